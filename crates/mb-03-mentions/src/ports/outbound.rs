//! # Outbound Ports
//!
//! Collaborators the Mention Resolution Engine depends on.

use crate::domain::{DirectoryError, GhostError, UserRecord};
use async_trait::async_trait;

/// Local user directory - outbound port.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up a user by username (no `@`).
    async fn lookup_by_username(&self, username: &str) -> Result<UserRecord, DirectoryError>;
}

/// Ghost identity resolution - outbound port.
///
/// Returns the remote (Matrix) identity standing in for a local user,
/// creating it on first use.
#[async_trait]
pub trait GhostIdentityResolver: Send + Sync {
    async fn ensure(&self, local_user_id: &str) -> Result<String, GhostError>;
}

/// Remote ghost creation - outbound port.
///
/// Called by the store-backed resolver on a mapping miss.
#[async_trait]
pub trait GhostProvisioner: Send + Sync {
    async fn provision(&self, local_user_id: &str) -> Result<String, GhostError>;
}
