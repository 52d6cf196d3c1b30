//! # Domain Errors
//!
//! Two classes of failure exist during a migration run:
//!
//! - **Fatal** (`MigrationError`): the listing itself failed or the final
//!   schema version could not be persisted. The run aborts and startup fails.
//! - **Per-row** (`RowError`): one get/set/delete/resolve failed. The row is
//!   skipped, the error is recorded in the step report, and the batch goes on.

use mb_01_mapping_store::MappingStoreError;
use serde::Serialize;
use thiserror::Error;

/// Fatal migration errors.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Listing a namespace failed; the batch cannot continue.
    #[error("Failed to list keys with prefix {prefix} during migration to v{version}: {source}")]
    Listing {
        /// Namespace prefix being listed
        prefix: &'static str,
        /// Migration step being applied
        version: u32,
        /// Underlying store error
        #[source]
        source: MappingStoreError,
    },

    /// Every step ran but the new schema version could not be written.
    ///
    /// Retrying the whole run is safe because every step is idempotent.
    #[error("Failed to persist schema version {version}: {source}")]
    PersistVersion {
        /// Version that should have been recorded
        version: u32,
        /// Underlying store error
        #[source]
        source: MappingStoreError,
    },

    /// The store was written by a newer release.
    #[error("Unsupported schema version {found}, max supported {supported}")]
    UnsupportedSchemaVersion {
        /// Version found in the store
        found: u32,
        /// Highest version this build understands
        supported: u32,
    },
}

/// Alias resolution errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    /// The alias does not exist on the homeserver.
    #[error("Room alias not found: {0}")]
    NotFound(String),

    /// The homeserver could not be reached or answered with an error.
    #[error("Alias resolution transport error: {0}")]
    Transport(String),
}

/// Operation that failed for a single row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RowOperation {
    Get,
    Set,
    Delete,
    ResolveAlias,
}

/// Non-fatal failure affecting one key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// Key being processed
    pub key: String,
    /// Operation that failed
    pub operation: RowOperation,
    /// Error message
    pub message: String,
}

impl RowError {
    pub fn new(key: impl Into<String>, operation: RowOperation, message: impl ToString) -> Self {
        Self {
            key: key.into(),
            operation,
            message: message.to_string(),
        }
    }
}
