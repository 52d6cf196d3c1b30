//! # Loop Guard Flows
//!
//! The revision tracker as event handlers use it: many tasks recording and
//! checking revisions at once.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mb_04_loop_guard::{
        is_remote_actor, Actor, MockTimeSource, PutOutcome, RevisionTracker, RevisionTrackerApi,
        TrackerConfig,
    };

    fn tracker(
        capacity: usize,
        retention_secs: u64,
    ) -> (Arc<RevisionTracker<MockTimeSource>>, Arc<MockTimeSource>) {
        let clock = Arc::new(MockTimeSource::new(10_000));
        let tracker = Arc::new(RevisionTracker::new(
            TrackerConfig::new(capacity, retention_secs),
            clock.clone(),
        ));
        (tracker, clock)
    }

    #[tokio::test]
    async fn test_concurrent_handlers_share_tracker() {
        let (tracker, _) = tracker(1_000, 60);

        let tasks: Vec<_> = (0..8)
            .map(|worker| {
                let tracker = tracker.clone();
                tokio::spawn(async move {
                    for i in 0..50 {
                        let id = format!("w{}-p{}", worker, i);
                        assert!(tracker.put(&id, i).is_stored());
                        assert!(tracker.is_own_revision(&id, i));
                    }
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(tracker.size(), 400);
    }

    #[tokio::test]
    async fn test_backpressure_then_recovery() {
        let (tracker, clock) = tracker(5, 30);
        let api: Arc<dyn RevisionTrackerApi> = tracker.clone();

        for i in 0..5 {
            assert_eq!(api.put(&format!("post{}", i), i), PutOutcome::Stored);
        }
        assert_eq!(
            api.put("post5", 5),
            PutOutcome::AtCapacity { capacity: 5 }
        );
        assert_eq!(api.size(), 5);

        clock.advance(30);

        assert_eq!(api.put("post5", 5), PutOutcome::Stored);
        assert!(api.is_own_revision("post5", 5));
        assert!(!api.is_own_revision("post0", 0));
    }

    #[test]
    fn test_origin_marker_decides_remote() {
        let mirrored = Actor::local("u1", "matrix.alice").with_origin("matrix");
        let lookalike = Actor::local("u2", "matrix.bob").with_display_name("Bob (Matrix)");

        assert!(is_remote_actor(&mirrored));
        assert!(!is_remote_actor(&lookalike));
    }
}
