//! # Bridge Container
//!
//! Configuration and the explicitly constructed context shared by all
//! event handlers.

pub mod config;
pub mod context;

pub use config::{BridgeConfig, ConfigError, StoreBackend, StoreConfig};
pub use context::{BridgeContext, Collaborators, StartupError};
