use crate::domain::entities::MappingRecord;
use crate::domain::errors::MappingStoreError;
use crate::ports::outbound::MappingStore;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;

/// In-memory mapping store.
///
/// Keys are held in a `BTreeMap` so prefix listings come back ordered, the
/// same contract the RocksDB adapter provides.
#[derive(Default)]
pub struct InMemoryMappingStore {
    data: RwLock<BTreeMap<String, String>>,
}

impl InMemoryMappingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`.
    pub fn with_records(records: impl IntoIterator<Item = MappingRecord>) -> Self {
        let data = records
            .into_iter()
            .map(|record| (record.key, record.value))
            .collect();
        Self {
            data: RwLock::new(data),
        }
    }

    /// Snapshot every record, in key order.
    pub fn records(&self) -> Vec<MappingRecord> {
        self.data
            .read()
            .iter()
            .map(|(key, value)| MappingRecord {
                key: key.clone(),
                value: value.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl MappingStore for InMemoryMappingStore {
    fn get(&self, key: &str) -> Result<Option<String>, MappingStoreError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MappingStoreError> {
        self.data.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), MappingStoreError> {
        self.data.write().remove(key);
        Ok(())
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

        let data = self.data.read();
        let keys = data
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .skip(page.saturating_mul(per_page))
            .take(per_page)
            .map(|(key, _)| key.clone())
            .collect();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::keys::Namespace;

    #[test]
    fn test_in_memory_mapping_store() {
        let store = InMemoryMappingStore::new();

        store.set("key1", "value1").unwrap();
        store.set("key2", "value2").unwrap();

        assert_eq!(store.get("key1").unwrap(), Some("value1".to_string()));
        assert_eq!(store.get("key3").unwrap(), None);

        store.delete("key1").unwrap();
        assert_eq!(store.get("key1").unwrap(), None);

        // Deleting a missing key is not an error
        store.delete("key1").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_prefix_listing_is_ordered_and_scoped() {
        let store = InMemoryMappingStore::new();
        store.set("matrix_user_@c:x", "3").unwrap();
        store.set("matrix_user_@a:x", "1").unwrap();
        store.set("matrix_user_@b:x", "2").unwrap();
        store.set("mattermost_user_1", "@a:x").unwrap();
        store.set("matrix_event_post_$e", "p").unwrap();

        let keys = store
            .list_keys_with_prefix(Namespace::MatrixUser.prefix(), 0, 10)
            .unwrap();
        assert_eq!(
            keys,
            vec!["matrix_user_@a:x", "matrix_user_@b:x", "matrix_user_@c:x"]
        );
    }

    #[test]
    fn test_pagination_never_repeats_keys() {
        let store = InMemoryMappingStore::new();
        for i in 0..7 {
            store.set(&format!("room_mapping_{:02}", i), "c").unwrap();
        }

        let page0 = store.list_keys_with_prefix("room_mapping_", 0, 3).unwrap();
        let page1 = store.list_keys_with_prefix("room_mapping_", 1, 3).unwrap();
        let page2 = store.list_keys_with_prefix("room_mapping_", 2, 3).unwrap();
        let page3 = store.list_keys_with_prefix("room_mapping_", 3, 3).unwrap();

        assert_eq!(page0, vec!["room_mapping_00", "room_mapping_01", "room_mapping_02"]);
        assert_eq!(page1, vec!["room_mapping_03", "room_mapping_04", "room_mapping_05"]);
        assert_eq!(page2, vec!["room_mapping_06"]);
        assert!(page3.is_empty());
    }

    #[test]
    fn test_prefix_listing_stops_at_neighbouring_keys() {
        let store = InMemoryMappingStore::new();
        store.set("room_mapping", "bare").unwrap();
        store.set("room_mappinf_z", "before").unwrap();
        store.set("room_mapping_!a:x", "c1").unwrap();
        store.set("room_mapping`", "after").unwrap();

        let keys = store.list_keys_with_prefix("room_mapping_", 0, 10).unwrap();
        assert_eq!(keys, vec!["room_mapping_!a:x"]);
        assert!(store
            .list_keys_with_prefix("room_mapping_", 1, 10)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let store = InMemoryMappingStore::new();
        assert_eq!(
            store.list_keys_with_prefix("x", 0, 0),
            Err(MappingStoreError::InvalidPageSize { per_page: 0 })
        );
    }

    #[test]
    fn test_with_records_snapshot() {
        let store = InMemoryMappingStore::with_records(vec![
            MappingRecord::new(Namespace::ChannelMapping, "c1", "!r1:x"),
            MappingRecord::new(Namespace::RoomMapping, "!r1:x", "c1"),
        ]);
        let records = store.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, "channel_mapping_c1");
    }
}
