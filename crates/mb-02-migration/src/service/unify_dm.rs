//! # Step 1 → 2: Unify DM and Channel Namespaces
//!
//! | Legacy | Unified |
//! |--------|---------|
//! | `dm_mapping_{channel} → {room}` | `channel_mapping_{channel} → {room}` + `room_mapping_{room} → {channel}` |
//! | `matrix_dm_mapping_{room} → {channel}` | `room_mapping_{room} → {channel}` |
//!
//! An existing unified entry always wins. A legacy key is removed only once
//! its forward value is safely in the unified namespace, so a failed write
//! never loses a mapping.
//!
//! Keys are snapshotted before processing: deleting while paging by offset
//! would shift later keys into already-visited pages.

use super::*;
use mb_01_mapping_store::{
    CHANNEL_MAPPING_PREFIX, LEGACY_DM_MAPPING_PREFIX, LEGACY_MATRIX_DM_MAPPING_PREFIX,
    ROOM_MAPPING_PREFIX,
};

impl<S: MappingStore + ?Sized, A: AliasResolver + ?Sized> MigrationEngine<S, A> {
    pub(crate) fn unify_dm_namespaces(&self) -> Result<StepReport, MigrationError> {
        let step = MigrationStep::UnifyDmNamespaces;
        let mut report = StepReport::new(step);

        let legacy_forward = self
            .cursor(LEGACY_DM_MAPPING_PREFIX)
            .collect_keys()
            .map_err(listing_error(LEGACY_DM_MAPPING_PREFIX, step))?;

        for key in &legacy_forward {
            let channel_id = &key[LEGACY_DM_MAPPING_PREFIX.len()..];
            let Some(room_id) = self.legacy_value(&mut report, key) else {
                continue;
            };

            let unified_key = format!("{}{}", CHANNEL_MAPPING_PREFIX, channel_id);
            let Some(existing) = self.read_row(&mut report, &unified_key) else {
                continue;
            };
            let effective = match existing {
                Some(existing) => {
                    report.unchanged += 1;
                    existing
                }
                None => {
                    if !self.write_row(&mut report, &unified_key, &room_id) {
                        continue;
                    }
                    report.written += 1;
                    room_id
                }
            };

            self.create_if_absent(
                &mut report,
                &format!("{}{}", ROOM_MAPPING_PREFIX, effective),
                channel_id,
            );
            self.delete_legacy(&mut report, key);
        }

        let legacy_reverse = self
            .cursor(LEGACY_MATRIX_DM_MAPPING_PREFIX)
            .collect_keys()
            .map_err(listing_error(LEGACY_MATRIX_DM_MAPPING_PREFIX, step))?;

        for key in &legacy_reverse {
            let room_id = &key[LEGACY_MATRIX_DM_MAPPING_PREFIX.len()..];
            let Some(channel_id) = self.legacy_value(&mut report, key) else {
                continue;
            };

            let unified_key = format!("{}{}", ROOM_MAPPING_PREFIX, room_id);
            if !self.create_if_absent(&mut report, &unified_key, &channel_id) {
                continue;
            }
            self.delete_legacy(&mut report, key);
        }

        Ok(report)
    }

    /// Fetch a legacy value. Missing and empty values are left in place.
    fn legacy_value(&self, report: &mut StepReport, key: &str) -> Option<String> {
        report.scanned += 1;
        match self.read_row(report, key)? {
            Some(value) if !value.is_empty() => Some(value),
            Some(_) => {
                warn!(key, "[mb-02] Legacy DM mapping is empty, leaving it in place");
                report.unchanged += 1;
                None
            }
            None => None,
        }
    }

    /// Write `key → value` only when `key` is absent.
    ///
    /// Returns false when the unified entry could not be confirmed, in which
    /// case the legacy source must be kept.
    fn create_if_absent(&self, report: &mut StepReport, key: &str, value: &str) -> bool {
        match self.read_row(report, key) {
            None => false,
            Some(Some(_)) => {
                report.unchanged += 1;
                true
            }
            Some(None) => {
                let written = self.write_row(report, key, value);
                if written {
                    report.written += 1;
                }
                written
            }
        }
    }

    fn delete_legacy(&self, report: &mut StepReport, key: &str) {
        match self.store.delete(key) {
            Ok(()) => report.deleted += 1,
            Err(e) => {
                warn!(key, error = %e, "[mb-02] Failed to delete legacy mapping");
                report.fail(key, RowOperation::Delete, e);
            }
        }
    }
}
