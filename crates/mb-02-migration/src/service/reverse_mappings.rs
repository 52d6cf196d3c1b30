//! # Step 0 → 1: Add Reverse Mappings
//!
//! Forward entries are the source of truth. For each one the reverse entry is
//! written when missing or when it disagrees.
//!
//! | Forward | Reverse |
//! |---------|---------|
//! | `matrix_user_{matrix id} → {mm id}` | `mattermost_user_{mm id} → {matrix id}` |
//! | `channel_mapping_{channel} → {room}` | `room_mapping_{room} → {channel}` |
//!
//! A channel mapping that points at a room alias (`#name:server`) also gets a
//! second reverse entry keyed by the resolved room id. That entry is always
//! rewritten.

use super::*;
use crate::domain::is_room_alias;
use mb_01_mapping_store::{
    Namespace, CHANNEL_MAPPING_PREFIX, MATRIX_USER_PREFIX, ROOM_MAPPING_PREFIX,
};
use tracing::debug;

impl<S: MappingStore + ?Sized, A: AliasResolver + ?Sized> MigrationEngine<S, A> {
    pub(crate) async fn add_reverse_mappings(&self) -> Result<StepReport, MigrationError> {
        let step = MigrationStep::AddReverseMappings;
        let mut report = StepReport::new(step);

        self.reverse_namespace(
            &mut report,
            MATRIX_USER_PREFIX,
            Namespace::MattermostUser,
        )?;

        let mut cursor = self.cursor(CHANNEL_MAPPING_PREFIX);
        while let Some(page) = cursor
            .next_page()
            .map_err(listing_error(CHANNEL_MAPPING_PREFIX, step))?
        {
            debug!(
                prefix = CHANNEL_MAPPING_PREFIX,
                page = page.index,
                keys = page.keys.len(),
                "[mb-02] Processing page"
            );
            for key in &page.keys {
                let Some(room) = self.forward_value(&mut report, key) else {
                    continue;
                };
                let channel_id = &key[CHANNEL_MAPPING_PREFIX.len()..];
                self.ensure_reverse(
                    &mut report,
                    &format!("{}{}", ROOM_MAPPING_PREFIX, room),
                    channel_id,
                );

                if is_room_alias(&room) {
                    self.reverse_alias(&mut report, key, &room, channel_id).await;
                }
            }
        }

        Ok(report)
    }

    /// Reverse every entry under `forward_prefix` into `reverse`.
    fn reverse_namespace(
        &self,
        report: &mut StepReport,
        forward_prefix: &'static str,
        reverse: Namespace,
    ) -> Result<(), MigrationError> {
        let mut cursor = self.cursor(forward_prefix);
        while let Some(page) = cursor
            .next_page()
            .map_err(listing_error(forward_prefix, report.step))?
        {
            debug!(
                prefix = forward_prefix,
                page = page.index,
                keys = page.keys.len(),
                "[mb-02] Processing page"
            );
            for key in &page.keys {
                let Some(value) = self.forward_value(report, key) else {
                    continue;
                };
                let identifier = &key[forward_prefix.len()..];
                self.ensure_reverse(report, &reverse.key(&value), identifier);
            }
        }
        Ok(())
    }

    /// Fetch a forward value worth reversing.
    fn forward_value(&self, report: &mut StepReport, key: &str) -> Option<String> {
        report.scanned += 1;
        match self.read_row(report, key)? {
            Some(value) if !value.is_empty() => Some(value),
            Some(_) => {
                warn!(key, "[mb-02] Forward mapping is empty, skipping");
                report.unchanged += 1;
                None
            }
            None => {
                report.unchanged += 1;
                None
            }
        }
    }

    /// Resolve `alias` and write `room_mapping_{room id} → channel_id`.
    async fn reverse_alias(
        &self,
        report: &mut StepReport,
        key: &str,
        alias: &str,
        channel_id: &str,
    ) {
        let room_id = match self.aliases.resolve(alias).await {
            Ok(room_id) => room_id,
            Err(e) => {
                warn!(alias, error = %e, "[mb-02] Failed to resolve room alias, skipping");
                report.fail(key, RowOperation::ResolveAlias, e);
                return;
            }
        };

        let reverse_key = format!("{}{}", ROOM_MAPPING_PREFIX, room_id);
        if self.write_row(report, &reverse_key, channel_id) {
            report.alias_entries_written += 1;
        }
    }
}
