//! # Value Objects

use serde::{Deserialize, Serialize};

/// Revision tracker configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Maximum tracked revisions
    pub capacity: usize,
    /// Age after which an entry may be dropped
    pub retention_secs: u64,
    /// Run expiry every N successful inserts (0 disables)
    pub cleanup_every: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            retention_secs: 3_600,
            cleanup_every: 100,
        }
    }
}

impl TrackerConfig {
    pub fn new(capacity: usize, retention_secs: u64) -> Self {
        Self {
            capacity,
            retention_secs,
            ..Self::default()
        }
    }
}
