//! # Outbound Ports
//!
//! The Migration Engine depends on the Mapping Store (from `mb-01`) and on
//! one network collaborator: the homeserver's alias directory.

use crate::domain::AliasError;
use async_trait::async_trait;

/// Alias resolution - outbound port.
///
/// Implementations perform at most one attempt per call. The engine never
/// retries; a failure is logged and only that record is skipped.
#[async_trait]
pub trait AliasResolver: Send + Sync {
    /// Resolve `#alias:server` to its `!room:server` id.
    async fn resolve(&self, alias: &str) -> Result<String, AliasError>;
}
