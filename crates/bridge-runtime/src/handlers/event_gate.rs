//! # Event Gate
//!
//! Per-event decision for a local (Mattermost) post headed to Matrix.
//!
//! ## Flow
//!
//! 1. Author mirrors a Matrix user → `SkipRemoteActor` (it came from Matrix)
//! 2. Edit the bridge itself applied → `SkipOwnEcho`
//! 3. Otherwise mentions are resolved and the content is forwarded

use mb_03_mentions::{MentionApi, MessageContent};
use mb_04_loop_guard::{is_remote_actor, Actor, PutOutcome, RevisionTrackerApi};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::container::BridgeContext;

/// A post event from the local platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEvent {
    pub post_id: String,
    pub channel_id: String,
    pub actor: Actor,
    pub message: String,
    /// Platform timestamp of this revision
    pub update_at: i64,
    #[serde(default)]
    pub is_edit: bool,
}

/// What the orchestrator should do with a post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Authored by a mirrored account; syncing it would loop.
    SkipRemoteActor,
    /// Edit produced by the bridge itself.
    SkipOwnEcho,
    /// Send this content to the opposite platform.
    Forward(MessageContent),
}

/// Combines origin classification, the revision tracker and mention
/// resolution.
#[derive(Clone)]
pub struct EventGate {
    mentions: Arc<dyn MentionApi>,
    revisions: Arc<dyn RevisionTrackerApi>,
}

impl EventGate {
    pub fn new(mentions: Arc<dyn MentionApi>, revisions: Arc<dyn RevisionTrackerApi>) -> Self {
        Self {
            mentions,
            revisions,
        }
    }

    pub fn from_context(context: &BridgeContext) -> Self {
        Self::new(context.mentions.clone(), context.revisions.clone())
    }

    pub async fn evaluate(&self, event: &PostEvent) -> GateDecision {
        if is_remote_actor(&event.actor) {
            debug!(post_id = %event.post_id, "Skipping post by mirrored account");
            return GateDecision::SkipRemoteActor;
        }

        if event.is_edit && self.revisions.is_own_revision(&event.post_id, event.update_at) {
            debug!(
                post_id = %event.post_id,
                update_at = event.update_at,
                "Skipping edit applied by the bridge"
            );
            return GateDecision::SkipOwnEcho;
        }

        let mut content = MessageContent::text(event.message.clone());
        self.mentions.enrich(&mut content).await;
        GateDecision::Forward(content)
    }

    /// Record that the bridge wrote revision `update_at` of `post_id`.
    ///
    /// `AtCapacity` is backpressure, not a failure: the caller may retry.
    pub fn record_applied(&self, post_id: &str, update_at: i64) -> PutOutcome {
        let outcome = self.revisions.put(post_id, update_at);
        if let PutOutcome::AtCapacity { capacity } = outcome {
            debug!(post_id, capacity, "Revision not tracked, tracker full");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mb_01_mapping_store::InMemoryMappingStore;
    use mb_03_mentions::{
        InMemoryUserDirectory, MentionConfig, MentionResolver, StoreGhostResolver,
        TemplateGhostProvisioner, UserRecord,
    };
    use mb_04_loop_guard::{MockTimeSource, RevisionTracker, TrackerConfig};

    fn make_gate(capacity: usize) -> EventGate {
        let store = Arc::new(InMemoryMappingStore::new());
        let directory = Arc::new(InMemoryUserDirectory::with_users([UserRecord::new(
            "u-alice", "alice",
        )]));
        let ghosts = Arc::new(StoreGhostResolver::new(
            store,
            Arc::new(TemplateGhostProvisioner::new("mm_", "example.org")),
        ));
        let mentions = Arc::new(MentionResolver::new(
            directory,
            ghosts,
            MentionConfig::default(),
        ));
        let revisions = Arc::new(RevisionTracker::new(
            TrackerConfig::new(capacity, 60),
            Arc::new(MockTimeSource::new(0)),
        ));
        EventGate::new(mentions, revisions)
    }

    fn post(actor: Actor, message: &str) -> PostEvent {
        PostEvent {
            post_id: "p1".to_string(),
            channel_id: "c1".to_string(),
            actor,
            message: message.to_string(),
            update_at: 1_000,
            is_edit: false,
        }
    }

    #[tokio::test]
    async fn test_remote_actor_skipped() {
        let gate = make_gate(10);
        let event = post(Actor::local("u9", "bob").with_origin("matrix"), "hi");
        assert_eq!(gate.evaluate(&event).await, GateDecision::SkipRemoteActor);
    }

    #[tokio::test]
    async fn test_display_name_alone_does_not_skip() {
        let gate = make_gate(10);
        let actor = Actor::local("u9", "bob").with_display_name("[Matrix] bob");
        assert!(matches!(
            gate.evaluate(&post(actor, "hi")).await,
            GateDecision::Forward(_)
        ));
    }

    #[tokio::test]
    async fn test_own_edit_skipped_newer_edit_forwarded() {
        let gate = make_gate(10);
        assert!(gate.record_applied("p1", 1_000).is_stored());

        let mut event = post(Actor::local("u1", "alice"), "edited");
        event.is_edit = true;
        assert_eq!(gate.evaluate(&event).await, GateDecision::SkipOwnEcho);

        event.update_at = 2_000;
        assert!(matches!(
            gate.evaluate(&event).await,
            GateDecision::Forward(_)
        ));
    }

    #[tokio::test]
    async fn test_forward_resolves_mentions() {
        let gate = make_gate(10);
        let decision = gate
            .evaluate(&post(Actor::local("u1", "carol"), "ping @alice"))
            .await;

        let GateDecision::Forward(content) = decision else {
            panic!("expected forward");
        };
        let inner = content.inner();
        assert_eq!(inner.body, "ping @alice");
        assert_eq!(
            inner.formatted_body.as_deref(),
            Some("ping <a href=\"https://matrix.to/#/@mm_u-alice:example.org\">@alice</a>")
        );
    }

    #[tokio::test]
    async fn test_record_applied_reports_capacity() {
        let gate = make_gate(1);
        assert!(gate.record_applied("p1", 1).is_stored());
        assert_eq!(
            gate.record_applied("p2", 1),
            PutOutcome::AtCapacity { capacity: 1 }
        );
    }
}
