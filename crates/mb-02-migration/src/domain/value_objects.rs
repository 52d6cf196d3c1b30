//! # Value Objects

use mb_01_mapping_store::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

/// Migration Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Keys requested per listing call.
    pub batch_size: usize,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl MigrationConfig {
    /// Small pages so tests cross page boundaries with a handful of keys.
    pub fn for_testing() -> Self {
        Self { batch_size: 2 }
    }
}
