//! # RocksDB Mapping Store Adapter
//!
//! Durable implementation of the `MappingStore` trait.
//!
//! ## Features
//!
//! - Ordered prefix iteration (keys are compared bytewise)
//! - Snappy compression
//! - Bloom filters for point lookups
//! - Optional fsync on every write

use crate::domain::errors::MappingStoreError;
use crate::ports::outbound::MappingStore;
use rocksdb::{Direction, IteratorMode, Options, WriteOptions, DB};
use std::path::Path;
use tracing::info;

/// RocksDB configuration.
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: String,
    /// Block cache size in bytes (default: 32MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: "./data/mappings".to_string(),
            block_cache_size: 32 * 1024 * 1024,
            write_buffer_size: 16 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Config for tests (small buffers, no sync).
    pub fn for_testing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 4 * 1024 * 1024,
            write_buffer_size: 2 * 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed mapping store.
pub struct RocksDbMappingStore {
    db: DB,
    config: RocksDbConfig,
}

impl RocksDbMappingStore {
    /// Open or create the database.
    pub fn open(config: RocksDbConfig) -> Result<Self, MappingStoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let db = DB::open(&opts, &config.path)
            .map_err(|e| MappingStoreError::io(format!("Failed to open RocksDB: {}", e)))?;

        info!(path = %config.path, "[mb-01] Opened RocksDB mapping store");

        Ok(Self { db, config })
    }

    /// Open with default tuning at `path`.
    pub fn open_default(path: impl AsRef<Path>) -> Result<Self, MappingStoreError> {
        Self::open(RocksDbConfig {
            path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        })
    }

    fn write_options(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }
}

fn decode(key: &[u8], bytes: Vec<u8>) -> Result<String, MappingStoreError> {
    String::from_utf8(bytes).map_err(|e| MappingStoreError::Corruption {
        key: String::from_utf8_lossy(key).to_string(),
        message: e.to_string(),
    })
}

impl MappingStore for RocksDbMappingStore {
    fn get(&self, key: &str) -> Result<Option<String>, MappingStoreError> {
        let value = self
            .db
            .get(key.as_bytes())
            .map_err(|e| MappingStoreError::io(format!("RocksDB get failed: {}", e)))?;
        value.map(|bytes| decode(key.as_bytes(), bytes)).transpose()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MappingStoreError> {
        self.db
            .put_opt(key.as_bytes(), value.as_bytes(), &self.write_options())
            .map_err(|e| MappingStoreError::io(format!("RocksDB put failed: {}", e)))
    }

    fn delete(&self, key: &str) -> Result<(), MappingStoreError> {
        self.db
            .delete_opt(key.as_bytes(), &self.write_options())
            .map_err(|e| MappingStoreError::io(format!("RocksDB delete failed: {}", e)))
    }

    fn list_keys_with_prefix(
        &self,
        prefix: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<String>, MappingStoreError> {
        if per_page == 0 {
            return Err(MappingStoreError::InvalidPageSize { per_page });
        }

        let skip = page.saturating_mul(per_page);
        let mut seen = 0usize;
        let mut keys = Vec::with_capacity(per_page);

        let iter = self
            .db
            .iterator(IteratorMode::From(prefix.as_bytes(), Direction::Forward));
        for item in iter {
            let (key, _) =
                item.map_err(|e| MappingStoreError::io(format!("RocksDB scan failed: {}", e)))?;
            if !key.starts_with(prefix.as_bytes()) {
                break;
            }
            if seen >= skip {
                keys.push(decode(&key, key.to_vec())?);
                if keys.len() == per_page {
                    break;
                }
            }
            seen += 1;
        }

        Ok(keys)
    }
}
