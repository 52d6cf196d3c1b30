//! # Inbound Ports
//!
//! API the runtime uses to bring the store's layout up to date.

use crate::domain::{MigrationError, MigrationReport, SchemaVersion};
use async_trait::async_trait;

/// Migration API - inbound port.
#[async_trait]
pub trait MigrationApi: Send + Sync {
    /// Apply every pending step and persist the new schema version.
    ///
    /// Must complete before any event handler is registered.
    async fn migrate(&self) -> Result<MigrationReport, MigrationError>;

    /// Version currently recorded in the store (0 if absent or unreadable).
    fn schema_version(&self) -> SchemaVersion;
}
