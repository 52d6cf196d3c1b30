//! # MB-01 Mapping Store
//!
//! Namespaced key/value persistence for cross-platform identifier correlation.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Purpose
//!
//! Every correlation the bridge knows about (users, channels, ghost users,
//! events, reactions) is a string key under a namespace prefix mapping to an
//! opaque identifier string. This crate owns the key layout and the storage
//! contract, and holds no business logic.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Exclusive prefixes | A key belongs to at most one namespace |
//! | 2 | Per-key atomicity | No torn reads or writes of a single key |
//! | 3 | Stable pagination | Fixed page size never repeats a key |
//!
//! ## Module Structure
//!
//! ```text
//! mb-01-mapping-store/
//! ├── domain/      # Namespace, MappingRecord, MappingStoreError
//! ├── ports/       # MappingStore trait
//! ├── adapters/    # InMemoryMappingStore, RocksDbMappingStore
//! └── cursor.rs    # PrefixCursor page walker
//! ```

#![warn(missing_docs)]
#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod cursor;
pub mod domain;
pub mod ports;

pub use adapters::InMemoryMappingStore;
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbMappingStore};
pub use cursor::{Page, PrefixCursor, DEFAULT_PAGE_SIZE};
pub use domain::{
    ghost_room_key, MappingRecord, MappingStoreError, Namespace, CHANNEL_MAPPING_PREFIX,
    GHOST_ROOM_PREFIX, GHOST_USER_PREFIX, LEGACY_DM_MAPPING_PREFIX,
    LEGACY_MATRIX_DM_MAPPING_PREFIX, MATRIX_EVENT_POST_PREFIX, MATRIX_REACTION_PREFIX,
    MATRIX_USER_PREFIX, MATTERMOST_USER_PREFIX, ROOM_MAPPING_PREFIX, SCHEMA_VERSION_KEY,
};
pub use ports::MappingStore;
