//! # Storage Adapter
//!
//! Opens the configured Mapping Store backend behind the `MappingStore` port.

use crate::container::config::{StoreBackend, StoreConfig};
use mb_01_mapping_store::{InMemoryMappingStore, MappingStore, MappingStoreError};
use std::sync::Arc;
use tracing::{info, warn};

/// Sub-directory of `data_dir` holding the RocksDB files.
pub const MAPPINGS_DIR: &str = "mappings";

/// Open the configured backend.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn MappingStore>, MappingStoreError> {
    match config.backend {
        StoreBackend::Memory => {
            warn!("[mb-01] Using in-memory mapping store; mappings are lost on restart");
            Ok(Arc::new(InMemoryMappingStore::new()))
        }
        StoreBackend::RocksDb => open_rocksdb(config),
    }
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(config: &StoreConfig) -> Result<Arc<dyn MappingStore>, MappingStoreError> {
    use mb_01_mapping_store::RocksDbMappingStore;

    let path = config.data_dir.join(MAPPINGS_DIR);
    std::fs::create_dir_all(&path).map_err(|e| {
        MappingStoreError::io(format!("Failed to create {}: {}", path.display(), e))
    })?;
    let store = RocksDbMappingStore::open_default(&path)?;
    info!(path = %path.display(), "[mb-01] Mapping store ready");
    Ok(Arc::new(store))
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(_config: &StoreConfig) -> Result<Arc<dyn MappingStore>, MappingStoreError> {
    info!("[mb-01] RocksDB backend requested but not compiled in");
    Err(MappingStoreError::io(
        "RocksDB backend not compiled in; rebuild with the `rocksdb` feature",
    ))
}
