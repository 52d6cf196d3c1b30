//! # Bridge Configuration
//!
//! Unified configuration for every subsystem, with defaults and environment
//! overrides.

use mb_02_migration::MigrationConfig;
use mb_03_mentions::MentionConfig;
use mb_04_loop_guard::TrackerConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Complete bridge configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Mapping store configuration.
    pub store: StoreConfig,
    /// Migration engine configuration.
    pub migration: MigrationConfig,
    /// Mention rendering configuration.
    pub mentions: MentionConfig,
    /// Revision tracker configuration.
    pub loop_guard: TrackerConfig,
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable did not parse.
    #[error("Invalid value {value:?} for {var}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },

    /// A numeric limit is zero.
    #[error("{field} must be greater than zero")]
    ZeroLimit {
        /// Offending field
        field: &'static str,
    },

    /// The mention link base is not an http(s) URL.
    #[error("Mention link base must start with http:// or https://, got {0:?}")]
    InvalidLinkBase(String),

    /// The selected backend is not compiled in.
    #[error("Store backend {0} is not available in this build (enable the `rocksdb` feature)")]
    BackendUnavailable(StoreBackend),
}

/// Mapping store backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Volatile in-process map (development and tests).
    #[default]
    Memory,
    /// RocksDB under `data_dir`.
    RocksDb,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Memory => write!(f, "memory"),
            StoreBackend::RocksDb => write!(f, "rocksdb"),
        }
    }
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StoreBackend::Memory),
            "rocksdb" | "rocks" => Ok(StoreBackend::RocksDb),
            _ => Err(()),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend to open.
    pub backend: StoreBackend,
    /// Data directory for durable backends.
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl BridgeConfig {
    /// Load defaults overridden by environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MB_DATA_DIR`: Data directory (default: ./data)
    /// - `MB_STORE_BACKEND`: `memory` or `rocksdb` (default: memory)
    /// - `MB_MIGRATION_BATCH_SIZE`: Keys per listing page (default: 1000)
    /// - `MB_MATRIX_LINK_BASE`: Mention permalink base (default: https://matrix.to)
    /// - `MB_TRACKER_CAPACITY`: Tracked revisions (default: 10000)
    /// - `MB_TRACKER_RETENTION_SECS`: Revision retention (default: 3600)
    /// - `MB_TRACKER_CLEANUP_EVERY`: Inserts between sweeps (default: 100)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(dir) = lookup("MB_DATA_DIR") {
            config.store.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = parse_var(&lookup, "MB_STORE_BACKEND")? {
            config.store.backend = backend;
        }
        if let Some(batch_size) = parse_var(&lookup, "MB_MIGRATION_BATCH_SIZE")? {
            config.migration.batch_size = batch_size;
        }
        if let Some(link_base) = lookup("MB_MATRIX_LINK_BASE") {
            config.mentions.link_base = link_base;
        }
        if let Some(capacity) = parse_var(&lookup, "MB_TRACKER_CAPACITY")? {
            config.loop_guard.capacity = capacity;
        }
        if let Some(retention) = parse_var(&lookup, "MB_TRACKER_RETENTION_SECS")? {
            config.loop_guard.retention_secs = retention;
        }
        if let Some(every) = parse_var(&lookup, "MB_TRACKER_CLEANUP_EVERY")? {
            config.loop_guard.cleanup_every = every;
        }

        Ok(config)
    }

    /// Reject configurations the subsystems cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.migration.batch_size == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "migration.batch_size",
            });
        }
        if self.loop_guard.capacity == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "loop_guard.capacity",
            });
        }
        if self.loop_guard.retention_secs == 0 {
            return Err(ConfigError::ZeroLimit {
                field: "loop_guard.retention_secs",
            });
        }

        let base = &self.mentions.link_base;
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(ConfigError::InvalidLinkBase(base.clone()));
        }

        if self.store.backend == StoreBackend::RocksDb && !cfg!(feature = "rocksdb") {
            return Err(ConfigError::BackendUnavailable(StoreBackend::RocksDb));
        }

        Ok(())
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}
