//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implementations of the `MappingStore` port.
//!
//! Enable the `rocksdb` feature for the durable backend:
//!
//! ```toml
//! mb-01-mapping-store = { path = "...", features = ["rocksdb"] }
//! ```

mod memory;

#[cfg(feature = "rocksdb")]
mod rocksdb_adapter;

pub use memory::InMemoryMappingStore;

#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbMappingStore};
