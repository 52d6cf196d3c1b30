//! # Outbound Ports (Driven Ports)
//!
//! The storage contract every other subsystem depends on.
//!
//! Production: `RocksDbMappingStore` (feature `rocksdb`)
//! Testing: `InMemoryMappingStore`

use crate::domain::errors::MappingStoreError;
use std::sync::Arc;

/// Namespaced key/value persistence.
///
/// ## Guarantees
///
/// - Each operation is atomic per key and safe under concurrent callers.
/// - There are no multi-key transactions.
/// - `list_keys_with_prefix` returns keys in ascending byte order. With a
///   constant `per_page` and increasing `page`, no key is returned twice as long
///   as nothing mutates the prefix in between. An empty page means the listing
///   is exhausted.
pub trait MappingStore: Send + Sync {
    /// Get a value by key. `Ok(None)` when the key does not exist.
    fn get(&self, key: &str) -> Result<Option<String>, MappingStoreError>;

    /// Set a key, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), MappingStoreError>;

    /// Delete a key. Deleting a missing key succeeds.
    fn delete(&self, key: &str) -> Result<(), MappingStoreError>;

    /// List one page of keys starting with `prefix`.
    ///
    /// `page` is zero-based; `per_page` must be non-zero.
    fn list_keys_with_prefix(
        &self,
        prefix: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<String>, MappingStoreError>;
}

impl<T: MappingStore + ?Sized> MappingStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, MappingStoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MappingStoreError> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), MappingStoreError> {
        (**self).delete(key)
    }

    fn list_keys_with_prefix(
        &self,
        prefix: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<String>, MappingStoreError> {
        (**self).list_keys_with_prefix(prefix, page, per_page)
    }
}
