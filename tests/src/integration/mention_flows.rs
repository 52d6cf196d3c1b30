//! # Mention Flows
//!
//! Mention resolution with ghost identities persisted in the Mapping Store.
//!
//! ## Flows Tested
//!
//! 1. **First mention** provisions a ghost and records `ghost_user_{id}`
//! 2. **Later mentions** reuse the stored ghost without provisioning
//! 3. **Wire content** carries the rich fields only when something resolved

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use mb_01_mapping_store::{InMemoryMappingStore, MappingStore};
    use mb_03_mentions::{
        GhostError, GhostProvisioner, InMemoryUserDirectory, MentionApi, MentionConfig,
        MentionResolver, MessageContent, StoreGhostResolver, TemplateGhostProvisioner,
        UserRecord,
    };
    use serde_json::json;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct CountingProvisioner {
        inner: TemplateGhostProvisioner,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GhostProvisioner for CountingProvisioner {
        async fn provision(&self, local_user_id: &str) -> Result<String, GhostError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.provision(local_user_id).await
        }
    }

    struct Fixture {
        store: Arc<InMemoryMappingStore>,
        provisioner: Arc<CountingProvisioner>,
        resolver: Arc<dyn MentionApi>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryMappingStore::new());
        store
            .set("ghost_user_u-alice", "@ghost_alice:matrix.example.com")
            .unwrap();

        let provisioner = Arc::new(CountingProvisioner {
            inner: TemplateGhostProvisioner::new("mattermost_", "matrix.example.com"),
            calls: AtomicUsize::new(0),
        });
        let directory = Arc::new(InMemoryUserDirectory::with_users([
            UserRecord::new("u-alice", "alice"),
            UserRecord::new("u-bob", "bob"),
        ]));
        let ghosts = Arc::new(StoreGhostResolver::new(store.clone(), provisioner.clone()));
        let resolver: Arc<dyn MentionApi> = Arc::new(MentionResolver::new(
            directory,
            ghosts,
            MentionConfig::default(),
        ));

        Fixture {
            store,
            provisioner,
            resolver,
        }
    }

    // =============================================================================
    // INTEGRATION TESTS
    // =============================================================================

    #[tokio::test]
    async fn test_known_ghost_rendered_from_store() {
        let f = fixture();

        let outcome = f.resolver.resolve_mentions("Hello @alice, how are you?").await;

        assert_eq!(
            outcome.text,
            "Hello <a href=\"https://matrix.to/#/@ghost_alice:matrix.example.com\">@alice</a>, how are you?"
        );
        assert_eq!(outcome.user_ids(), vec!["@ghost_alice:matrix.example.com"]);
        assert_eq!(f.provisioner.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_first_mention_provisions_and_persists_ghost() {
        let f = fixture();

        f.resolver.resolve_mentions("@bob look").await;
        f.resolver.resolve_mentions("@bob again").await;

        assert_eq!(f.provisioner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            f.store.get("ghost_user_u-bob").unwrap().as_deref(),
            Some("@mattermost_u-bob:matrix.example.com")
        );
    }

    #[tokio::test]
    async fn test_wire_content_for_mixed_message() {
        let f = fixture();
        let mut content =
            MessageContent::text("Contact alice@example.com about @alice and @channel");

        let resolved = f.resolver.enrich(&mut content).await;

        assert_eq!(resolved, 1);
        assert_eq!(
            content.to_json().unwrap(),
            json!({
                "msgtype": "m.text",
                "body": "Contact alice@example.com about @alice and @channel",
                "format": "org.matrix.custom.html",
                "formatted_body": "Contact alice@example.com about <a href=\"https://matrix.to/#/@ghost_alice:matrix.example.com\">@alice</a> and @channel",
                "m.mentions": { "user_ids": ["@ghost_alice:matrix.example.com"] }
            })
        );
    }

    #[tokio::test]
    async fn test_enrich_twice_is_stable() {
        let f = fixture();
        let mut content = MessageContent::text("@alice @bob @alice");

        f.resolver.enrich(&mut content).await;
        let once = content.clone();
        f.resolver.enrich(&mut content).await;

        assert_eq!(content, once);
        assert_eq!(
            once.inner().mentions.as_ref().map(|m| m.user_ids.len()),
            Some(3)
        );
    }
}
