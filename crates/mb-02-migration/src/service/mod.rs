//! # Migration Engine Service
//!
//! Walks the store from its recorded schema version to
//! `TARGET_SCHEMA_VERSION`, one idempotent step at a time.
//!
//! ## Flow
//!
//! 1. Read `kv_store_version` (absent/unreadable/garbage ⇒ 0)
//! 2. Refuse to run against a newer layout
//! 3. Apply each pending step in order, collecting a `StepReport`
//! 4. Persist the target version once every step has finished

mod reverse_mappings;
mod unify_dm;


use crate::domain::{
    MigrationConfig, MigrationError, MigrationReport, MigrationStep, RowOperation, SchemaVersion,
    StepReport, TARGET_SCHEMA_VERSION,
};
use crate::ports::inbound::MigrationApi;
use crate::ports::outbound::AliasResolver;
use async_trait::async_trait;
use mb_01_mapping_store::{MappingStore, MappingStoreError, PrefixCursor, SCHEMA_VERSION_KEY};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// The Migration Engine.
///
/// Holds shared handles only; it is built once at startup, run once, and
/// dropped before event handlers are registered.
pub struct MigrationEngine<S: MappingStore + ?Sized, A: AliasResolver + ?Sized> {
    store: Arc<S>,
    aliases: Arc<A>,
    config: MigrationConfig,
}

impl<S: MappingStore + ?Sized, A: AliasResolver + ?Sized> MigrationEngine<S, A> {
    pub fn new(store: Arc<S>, aliases: Arc<A>, config: MigrationConfig) -> Self {
        Self {
            store,
            aliases,
            config,
        }
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Read the recorded schema version.
    pub fn current_version(&self) -> SchemaVersion {
        match self.store.get(SCHEMA_VERSION_KEY) {
            Ok(raw) => SchemaVersion::parse(raw.as_deref()),
            Err(e) => {
                warn!(
                    error = %e,
                    "[mb-02] Could not read schema version, assuming 0"
                );
                SchemaVersion::default()
            }
        }
    }

    /// Apply every pending step and persist the target version.
    pub async fn run(&self) -> Result<MigrationReport, MigrationError> {
        let started = Instant::now();
        let current = self.current_version();
        let mut report = MigrationReport::new(current.value());

        if current.value() > TARGET_SCHEMA_VERSION {
            return Err(MigrationError::UnsupportedSchemaVersion {
                found: current.value(),
                supported: TARGET_SCHEMA_VERSION,
            });
        }

        if current.value() == TARGET_SCHEMA_VERSION {
            info!(
                version = current.value(),
                "[mb-02] Mapping store schema is current"
            );
            return Ok(report);
        }

        info!(
            from = current.value(),
            to = TARGET_SCHEMA_VERSION,
            "[mb-02] Migrating mapping store"
        );

        for step in MigrationStep::pending_after(current) {
            let step_report = match step {
                MigrationStep::AddReverseMappings => self.add_reverse_mappings().await?,
                MigrationStep::UnifyDmNamespaces => self.unify_dm_namespaces()?,
            };

            info!(
                step = step.name(),
                version = step.target_version(),
                scanned = step_report.scanned,
                written = step_report.written,
                unchanged = step_report.unchanged,
                deleted = step_report.deleted,
                alias_entries = step_report.alias_entries_written,
                failed = step_report.failed(),
                "[mb-02] Migration step complete"
            );
            report.steps.push(step_report);
        }

        self.store
            .set(SCHEMA_VERSION_KEY, &TARGET_SCHEMA_VERSION.to_string())
            .map_err(|source| MigrationError::PersistVersion {
                version: TARGET_SCHEMA_VERSION,
                source,
            })?;

        report.to_version = TARGET_SCHEMA_VERSION;
        report.duration_ms = started.elapsed().as_millis() as u64;

        info!(
            from = report.from_version,
            to = report.to_version,
            written = report.total_written(),
            deleted = report.total_deleted(),
            failed = report.total_failed(),
            duration_ms = report.duration_ms,
            "[mb-02] Mapping store migration finished"
        );

        Ok(report)
    }

    /// Open a cursor over one namespace.
    fn cursor<'a>(&'a self, prefix: &'a str) -> PrefixCursor<'a, S> {
        PrefixCursor::new(&*self.store, prefix, self.config.batch_size)
    }

    /// Read one row, recording a failure against `key`.
    fn read_row(&self, report: &mut StepReport, key: &str) -> Option<Option<String>> {
        match self.store.get(key) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "[mb-02] Failed to read mapping, skipping");
                report.fail(key, RowOperation::Get, e);
                None
            }
        }
    }

    /// Write one row, recording a failure against `key`.
    fn write_row(&self, report: &mut StepReport, key: &str, value: &str) -> bool {
        match self.store.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "[mb-02] Failed to write mapping, skipping");
                report.fail(key, RowOperation::Set, e);
                false
            }
        }
    }

    /// Write `reverse_key → expected` unless it already holds exactly that.
    fn ensure_reverse(&self, report: &mut StepReport, reverse_key: &str, expected: &str) {
        let Some(existing) = self.read_row(report, reverse_key) else {
            return;
        };
        if existing.as_deref() == Some(expected) {
            report.unchanged += 1;
            return;
        }
        if existing.is_some() {
            warn!(
                key = reverse_key,
                "[mb-02] Reverse mapping disagrees with forward mapping, correcting"
            );
        }
        if self.write_row(report, reverse_key, expected) {
            report.written += 1;
        }
    }
}

/// Wrap a listing failure for `step`.
fn listing_error(
    prefix: &'static str,
    step: MigrationStep,
) -> impl FnOnce(MappingStoreError) -> MigrationError {
    move |source| MigrationError::Listing {
        prefix,
        version: step.target_version(),
        source,
    }
}

#[async_trait]
impl<S: MappingStore + ?Sized, A: AliasResolver + ?Sized> MigrationApi for MigrationEngine<S, A> {
    async fn migrate(&self) -> Result<MigrationReport, MigrationError> {
        self.run().await
    }

    fn schema_version(&self) -> SchemaVersion {
        self.current_version()
    }
}
