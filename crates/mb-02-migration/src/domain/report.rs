//! # Migration Report
//!
//! Counters collected while a migration runs, returned to the caller and
//! logged at the end of each step.

use super::errors::{RowError, RowOperation};
use super::version::MigrationStep;
use serde::Serialize;

/// Outcome of one migration step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Step applied
    pub step: MigrationStep,
    /// Keys visited
    pub scanned: u64,
    /// Entries created or corrected
    pub written: u64,
    /// Entries already correct or deliberately left alone
    pub unchanged: u64,
    /// Legacy entries removed
    pub deleted: u64,
    /// Reverse entries (re)written for resolved room aliases
    pub alias_entries_written: u64,
    /// Per-row failures (non-fatal)
    pub errors: Vec<RowError>,
}

impl StepReport {
    pub fn new(step: MigrationStep) -> Self {
        Self {
            step,
            scanned: 0,
            written: 0,
            unchanged: 0,
            deleted: 0,
            alias_entries_written: 0,
            errors: Vec::new(),
        }
    }

    /// Record a failed row.
    pub fn fail(&mut self, key: &str, operation: RowOperation, message: impl ToString) {
        self.errors.push(RowError::new(key, operation, message));
    }

    pub fn failed(&self) -> u64 {
        self.errors.len() as u64
    }

    /// Alias lookups that failed; these never count as data errors.
    pub fn alias_failures(&self) -> u64 {
        self.errors
            .iter()
            .filter(|e| e.operation == RowOperation::ResolveAlias)
            .count() as u64
    }
}

/// Outcome of a full migration run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Version found in the store before the run
    pub from_version: u32,
    /// Version recorded after the run
    pub to_version: u32,
    /// One entry per applied step, in order
    pub steps: Vec<StepReport>,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl MigrationReport {
    pub fn new(from_version: u32) -> Self {
        Self {
            from_version,
            to_version: from_version,
            ..Self::default()
        }
    }

    /// True when the store was already current and nothing ran.
    pub fn is_noop(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn total_written(&self) -> u64 {
        self.steps
            .iter()
            .map(|s| s.written + s.alias_entries_written)
            .sum()
    }

    pub fn total_deleted(&self) -> u64 {
        self.steps.iter().map(|s| s.deleted).sum()
    }

    pub fn total_failed(&self) -> u64 {
        self.steps.iter().map(StepReport::failed).sum()
    }
}
