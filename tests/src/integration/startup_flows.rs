//! # Startup Flows
//!
//! The runtime's startup sequence and event gate end to end.
//!
//! ## Flows Tested
//!
//! 1. **Startup** migrates a legacy store before the context is handed out
//! 2. **Fatal migration** keeps the bridge from starting
//! 3. **Gate handler** forwards local posts, drops mirrored and echoed ones

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use bridge_runtime::container::StartupError;
    use bridge_runtime::handlers::{ForwardedPost, GateHandler, PostEvent};
    use bridge_runtime::{BridgeConfig, BridgeContext, Collaborators, EventGate};
    use mb_01_mapping_store::{
        InMemoryMappingStore, MappingRecord, MappingStore, MappingStoreError, Namespace,
        SCHEMA_VERSION_KEY,
    };
    use mb_02_migration::{MigrationError, StaticAliasResolver};
    use mb_03_mentions::{InMemoryUserDirectory, TemplateGhostProvisioner, UserRecord};
    use mb_04_loop_guard::{Actor, MockTimeSource};
    use tokio::sync::{mpsc, watch};
    use tokio::time::timeout;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn collaborators() -> Collaborators {
        Collaborators {
            aliases: Arc::new(StaticAliasResolver::new()),
            directory: Arc::new(InMemoryUserDirectory::with_users([UserRecord::new(
                "u-alice", "alice",
            )])),
            provisioner: Arc::new(TemplateGhostProvisioner::new(
                "mattermost_",
                "matrix.example.com",
            )),
            time_source: Arc::new(MockTimeSource::new(0)),
        }
    }

    fn legacy_store() -> Arc<InMemoryMappingStore> {
        Arc::new(InMemoryMappingStore::with_records([
            MappingRecord::new(Namespace::MatrixUser, "@alice:matrix.org", "user123"),
            MappingRecord::new(Namespace::LegacyDmMapping, "dm123", "!room:matrix.org"),
        ]))
    }

    fn post(id: &str, actor: Actor, message: &str) -> PostEvent {
        PostEvent {
            post_id: id.to_string(),
            channel_id: "town-square".to_string(),
            actor,
            message: message.to_string(),
            update_at: 1_000,
            is_edit: false,
        }
    }

    /// Store whose listings always fail.
    struct UnlistableStore;

    impl MappingStore for UnlistableStore {
        fn get(&self, _key: &str) -> Result<Option<String>, MappingStoreError> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), MappingStoreError> {
            Ok(())
        }
        fn delete(&self, _key: &str) -> Result<(), MappingStoreError> {
            Ok(())
        }
        fn list_keys_with_prefix(
            &self,
            _prefix: &str,
            _page: usize,
            _per_page: usize,
        ) -> Result<Vec<String>, MappingStoreError> {
            Err(MappingStoreError::io("listing unavailable"))
        }
    }

    // =============================================================================
    // INTEGRATION TESTS
    // =============================================================================

    #[tokio::test]
    async fn test_startup_migrates_before_serving() {
        let store = legacy_store();

        let (context, report) =
            BridgeContext::initialize_with_store(BridgeConfig::default(), store.clone(), collaborators())
                .await
                .unwrap();

        assert_eq!(report.to_version, 2);
        assert_eq!(
            context.store.get(SCHEMA_VERSION_KEY).unwrap().as_deref(),
            Some("2")
        );
        assert_eq!(
            store.get("mattermost_user_user123").unwrap().as_deref(),
            Some("@alice:matrix.org")
        );
        assert_eq!(
            store.get("channel_mapping_dm123").unwrap().as_deref(),
            Some("!room:matrix.org")
        );
        assert_eq!(store.get("dm_mapping_dm123").unwrap(), None);
        assert_eq!(
            store.get("room_mapping_!room:matrix.org").unwrap().as_deref(),
            Some("dm123")
        );
    }

    #[tokio::test]
    async fn test_listing_failure_aborts_startup() {
        let result = BridgeContext::initialize_with_store(
            BridgeConfig::default(),
            Arc::new(UnlistableStore),
            collaborators(),
        )
        .await;

        assert!(matches!(
            result,
            Err(StartupError::Migration(MigrationError::Listing { .. }))
        ));
    }

    #[tokio::test]
    async fn test_invalid_config_aborts_startup() {
        let mut config = BridgeConfig::default();
        config.loop_guard.capacity = 0;

        let result = BridgeContext::initialize(config, collaborators()).await;

        assert!(matches!(result, Err(StartupError::Config(_))));
    }

    #[tokio::test]
    async fn test_memory_backend_startup() {
        let (context, report) = BridgeContext::initialize(BridgeConfig::default(), collaborators())
            .await
            .unwrap();

        assert_eq!(report.from_version, 0);
        assert_eq!(report.to_version, 2);
        assert_eq!(context.revisions.size(), 0);
    }

    #[tokio::test]
    async fn test_gate_handler_end_to_end() {
        let (context, _) =
            BridgeContext::initialize_with_store(BridgeConfig::default(), legacy_store(), collaborators())
                .await
                .unwrap();
        let gate = Arc::new(EventGate::from_context(&context));

        // The bridge already applied revision 1000 of post p3.
        assert!(gate.record_applied("p3", 1_000).is_stored());

        let (event_tx, event_rx) = mpsc::channel(16);
        let (forward_tx, mut forward_rx) = mpsc::channel::<ForwardedPost>(16);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        let handler = tokio::spawn(GateHandler::new(event_rx, gate, forward_tx).run(shutdown_rx));

        event_tx
            .send(post("p1", Actor::local("u-carol", "carol"), "hi @alice"))
            .await
            .unwrap();
        event_tx
            .send(post(
                "p2",
                Actor::local("u-ghost", "matrix_bob").with_origin("matrix"),
                "from matrix",
            ))
            .await
            .unwrap();
        let mut echo = post("p3", Actor::local("u-carol", "carol"), "edited by bridge");
        echo.is_edit = true;
        event_tx.send(echo).await.unwrap();
        drop(event_tx);

        let forwarded = timeout(Duration::from_secs(5), forward_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(forwarded.post_id, "p1");
        assert_eq!(
            forwarded.content.inner().formatted_body.as_deref(),
            Some("hi <a href=\"https://matrix.to/#/@mattermost_u-alice:matrix.example.com\">@alice</a>")
        );

        let stats = timeout(Duration::from_secs(5), handler)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.forwarded, 1);
        assert_eq!(stats.skipped_remote, 1);
        assert_eq!(stats.skipped_echo, 1);
        assert!(forward_rx.recv().await.is_none());
    }
}
