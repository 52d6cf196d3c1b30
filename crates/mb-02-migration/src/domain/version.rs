//! # Schema Version
//!
//! The store's layout version is a single decimal record under
//! `kv_store_version`. It only ever moves forward, and only after every step
//! up to the new value has completed.

use std::fmt;

/// Highest schema version this build knows how to produce.
pub const TARGET_SCHEMA_VERSION: u32 = 2;

/// Stored schema version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SchemaVersion(pub u32);

impl SchemaVersion {
    /// Interpret a raw stored value.
    ///
    /// Absent, empty and unparsable values all map to version 0, which forces
    /// a full (idempotent) re-migration instead of failing startup.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.map(|value| value.trim().trim_matches('"'))
            .and_then(|value| value.parse::<u32>().ok())
            .map(SchemaVersion)
            .unwrap_or_default()
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single schema transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum MigrationStep {
    /// 0 → 1: derive reverse user and channel mappings.
    AddReverseMappings,
    /// 1 → 2: fold legacy DM namespaces into the channel/room namespaces.
    UnifyDmNamespaces,
}

impl MigrationStep {
    /// Every step, in application order.
    pub const ALL: [MigrationStep; 2] = [
        MigrationStep::AddReverseMappings,
        MigrationStep::UnifyDmNamespaces,
    ];

    /// Version reached once this step completes.
    pub const fn target_version(self) -> u32 {
        match self {
            MigrationStep::AddReverseMappings => 1,
            MigrationStep::UnifyDmNamespaces => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            MigrationStep::AddReverseMappings => "add reverse mappings",
            MigrationStep::UnifyDmNamespaces => "unify DM and channel mapping namespaces",
        }
    }

    /// Steps still to apply when the store is at `current`.
    pub fn pending_after(current: SchemaVersion) -> impl Iterator<Item = MigrationStep> {
        Self::ALL
            .into_iter()
            .filter(move |step| step.target_version() > current.0)
    }
}
