//! # Migration Flows
//!
//! The migration engine against a realistic legacy store.
//!
//! ## Flows Tested
//!
//! 1. **v0 → v2**: reverse mappings derived, DM namespaces unified
//! 2. **Rerun**: a second startup performs no writes
//! 3. **Crash before version write**: rerun from scratch converges to the same store

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use mb_01_mapping_store::{
        InMemoryMappingStore, MappingRecord, MappingStore, MappingStoreError, Namespace,
        SCHEMA_VERSION_KEY,
    };
    use mb_02_migration::{MigrationConfig, MigrationEngine, StaticAliasResolver};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Store wrapper counting mutations.
    struct CountingStore {
        inner: InMemoryMappingStore,
        mutations: AtomicUsize,
    }

    impl CountingStore {
        fn new(inner: InMemoryMappingStore) -> Self {
            Self {
                inner,
                mutations: AtomicUsize::new(0),
            }
        }

        fn mutations(&self) -> usize {
            self.mutations.load(Ordering::SeqCst)
        }
    }

    impl MappingStore for CountingStore {
        fn get(&self, key: &str) -> Result<Option<String>, MappingStoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), MappingStoreError> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> Result<(), MappingStoreError> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            self.inner.delete(key)
        }

        fn list_keys_with_prefix(
            &self,
            prefix: &str,
            page: usize,
            per_page: usize,
        ) -> Result<Vec<String>, MappingStoreError> {
            self.inner.list_keys_with_prefix(prefix, page, per_page)
        }
    }

    /// A store as an older release would have left it.
    fn legacy_store() -> InMemoryMappingStore {
        let mut records = Vec::new();
        for i in 0..25 {
            records.push(MappingRecord::new(
                Namespace::MatrixUser,
                &format!("@user{}:matrix.org", i),
                format!("mm-user-{}", i),
            ));
        }
        for i in 0..12 {
            records.push(MappingRecord::new(
                Namespace::ChannelMapping,
                &format!("chan{}", i),
                format!("!room{}:matrix.org", i),
            ));
        }
        records.push(MappingRecord::new(
            Namespace::ChannelMapping,
            "town-square",
            "#town-square:matrix.org",
        ));
        for i in 0..7 {
            records.push(MappingRecord::new(
                Namespace::LegacyDmMapping,
                &format!("dm{}", i),
                format!("!dm{}:matrix.org", i),
            ));
            records.push(MappingRecord::new(
                Namespace::LegacyMatrixDmMapping,
                &format!("!dm{}:matrix.org", i),
                format!("dm{}", i),
            ));
        }
        InMemoryMappingStore::with_records(records)
    }

    fn aliases() -> Arc<StaticAliasResolver> {
        Arc::new(
            StaticAliasResolver::new().with_alias("#town-square:matrix.org", "!ts:matrix.org"),
        )
    }

    fn small_batches() -> MigrationConfig {
        MigrationConfig { batch_size: 4 }
    }

    // =============================================================================
    // INTEGRATION TESTS
    // =============================================================================

    #[tokio::test]
    async fn test_full_migration_from_legacy_layout() {
        let store = Arc::new(legacy_store());
        let engine = MigrationEngine::new(store.clone(), aliases(), small_batches());

        let report = engine.run().await.unwrap();

        assert_eq!(report.from_version, 0);
        assert_eq!(report.to_version, 2);
        assert_eq!(report.total_failed(), 0);
        assert_eq!(store.get(SCHEMA_VERSION_KEY).unwrap().as_deref(), Some("2"));

        // Every forward mapping has an equal reverse mapping.
        for record in store.records() {
            let reverse = match record.namespace() {
                Some(Namespace::MatrixUser) => Namespace::MattermostUser.key(&record.value),
                Some(Namespace::ChannelMapping) => Namespace::RoomMapping.key(&record.value),
                _ => continue,
            };
            assert_eq!(
                store.get(&reverse).unwrap().as_deref(),
                record.identifier(),
                "missing reverse for {}",
                record.key
            );
        }

        // No legacy namespace survives.
        for record in store.records() {
            assert!(
                !record.namespace().is_some_and(Namespace::is_legacy),
                "legacy key left behind: {}",
                record.key
            );
        }

        assert_eq!(
            store.get("room_mapping_!ts:matrix.org").unwrap().as_deref(),
            Some("town-square")
        );
        assert_eq!(
            store.get("channel_mapping_dm3").unwrap().as_deref(),
            Some("!dm3:matrix.org")
        );
    }

    #[tokio::test]
    async fn test_second_startup_writes_nothing() {
        let store = Arc::new(CountingStore::new(legacy_store()));
        let engine = MigrationEngine::new(store.clone(), aliases(), small_batches());

        engine.run().await.unwrap();
        let after_first = store.mutations();
        assert!(after_first > 0);

        let second = engine.run().await.unwrap();

        assert!(second.is_noop());
        assert_eq!(store.mutations(), after_first);
    }

    #[tokio::test]
    async fn test_crash_before_version_write_converges() {
        let store = Arc::new(legacy_store());
        let engine = MigrationEngine::new(store.clone(), aliases(), small_batches());
        engine.run().await.unwrap();
        let migrated = store.records();

        // Lose the version record, as if the process died before persisting it.
        store.delete(SCHEMA_VERSION_KEY).unwrap();
        let report = engine.run().await.unwrap();

        assert_eq!(report.from_version, 0);
        assert_eq!(report.total_failed(), 0);
        assert_eq!(store.records(), migrated);
    }
}
