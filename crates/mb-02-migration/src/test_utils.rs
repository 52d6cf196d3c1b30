use mb_01_mapping_store::{InMemoryMappingStore, MappingStore, MappingStoreError};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Mapping store with injectable per-key failures and write counters.
#[derive(Default)]
pub struct FaultyStore {
    pub inner: InMemoryMappingStore,
    fail_get: Mutex<HashSet<String>>,
    fail_set: Mutex<HashSet<String>>,
    fail_delete: Mutex<HashSet<String>>,
    fail_list: Mutex<HashSet<String>>,
    writes: AtomicU64,
    deletes: AtomicU64,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, key: &str, value: &str) {
        self.inner.set(key, value).unwrap();
    }

    pub fn fail_get_on(&self, key: &str) {
        self.fail_get.lock().insert(key.to_string());
    }

    pub fn fail_set_on(&self, key: &str) {
        self.fail_set.lock().insert(key.to_string());
    }

    pub fn fail_delete_on(&self, key: &str) {
        self.fail_delete.lock().insert(key.to_string());
    }

    pub fn fail_list_on(&self, prefix: &str) {
        self.fail_list.lock().insert(prefix.to_string());
    }

    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.inner.get(key).unwrap()
    }
}

impl MappingStore for FaultyStore {
    fn get(&self, key: &str) -> Result<Option<String>, MappingStoreError> {
        if self.fail_get.lock().contains(key) {
            return Err(MappingStoreError::io(format!("injected get failure: {}", key)));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MappingStoreError> {
        if self.fail_set.lock().contains(key) {
            return Err(MappingStoreError::io(format!("injected set failure: {}", key)));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), MappingStoreError> {
        if self.fail_delete.lock().contains(key) {
            return Err(MappingStoreError::io(format!("injected delete failure: {}", key)));
        }
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(key)
    }

    fn list_keys_with_prefix(
        &self,
        prefix: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Vec<String>, MappingStoreError> {
        if self.fail_list.lock().contains(prefix) {
            return Err(MappingStoreError::io(format!("injected list failure: {}", prefix)));
        }
        self.inner.list_keys_with_prefix(prefix, page, per_page)
    }
}
