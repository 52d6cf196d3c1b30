//! # Revision Tracker
//!
//! Bounded record of message revisions the bridge wrote to the opposite
//! platform, consulted before re-processing an edit so the bridge does not
//! sync its own echo.
//!
//! ## Capacity
//!
//! A full tracker first drops entries older than the retention window. If it
//! is still full, `put` returns `PutOutcome::AtCapacity` instead of evicting a
//! recent entry: losing a recent entry would let an echo through.


use crate::domain::{PutOutcome, Timestamp, TrackedRevision, TrackerConfig};
use crate::ports::inbound::RevisionTrackerApi;
use crate::ports::outbound::TimeSource;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

struct TrackerState {
    entries: HashMap<String, TrackedRevision>,
    puts_since_cleanup: u64,
}

/// The revision tracker. One exclusive lock guards all state.
pub struct RevisionTracker<T: TimeSource + ?Sized> {
    state: Mutex<TrackerState>,
    time_source: Arc<T>,
    config: TrackerConfig,
}

impl<T: TimeSource + ?Sized> RevisionTracker<T> {
    pub fn new(config: TrackerConfig, time_source: Arc<T>) -> Self {
        Self {
            state: Mutex::new(TrackerState {
                entries: HashMap::with_capacity(config.capacity.min(1024)),
                puts_since_cleanup: 0,
            }),
            time_source,
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Record `timestamp` as the last applied revision of `message_id`.
    pub fn put(&self, message_id: &str, timestamp: i64) -> PutOutcome {
        let now = self.time_source.now();
        let mut state = self.state.lock();

        let is_new = !state.entries.contains_key(message_id);
        if is_new && state.entries.len() >= self.config.capacity {
            let removed = self.remove_expired(&mut state, now);
            if state.entries.len() >= self.config.capacity {
                debug!(
                    message_id,
                    capacity = self.config.capacity,
                    removed,
                    "[mb-04] Revision tracker at capacity"
                );
                return PutOutcome::AtCapacity {
                    capacity: self.config.capacity,
                };
            }
        }

        state.entries.insert(
            message_id.to_string(),
            TrackedRevision {
                message_id: message_id.to_string(),
                last_applied: timestamp,
                recorded_at: now,
            },
        );

        state.puts_since_cleanup += 1;
        let every = self.config.cleanup_every;
        if every > 0 && state.puts_since_cleanup >= every {
            self.remove_expired(&mut state, now);
        }

        PutOutcome::Stored
    }

    pub fn get(&self, message_id: &str) -> Option<i64> {
        self.state
            .lock()
            .entries
            .get(message_id)
            .map(|entry| entry.last_applied)
    }

    /// Stop tracking `message_id`. Returns whether it was tracked.
    pub fn delete(&self, message_id: &str) -> bool {
        self.state.lock().entries.remove(message_id).is_some()
    }

    pub fn size(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// True when `timestamp` is no newer than what the bridge last applied.
    pub fn is_own_revision(&self, message_id: &str, timestamp: i64) -> bool {
        self.get(message_id)
            .is_some_and(|last_applied| timestamp <= last_applied)
    }

    /// Drop expired entries now.
    pub fn cleanup(&self) -> usize {
        let now = self.time_source.now();
        let mut state = self.state.lock();
        self.remove_expired(&mut state, now)
    }

    fn remove_expired(&self, state: &mut TrackerState, now: Timestamp) -> usize {
        let retention = self.config.retention_secs;
        let before = state.entries.len();
        state
            .entries
            .retain(|_, entry| now.saturating_sub(entry.recorded_at) < retention);
        state.puts_since_cleanup = 0;

        let removed = before - state.entries.len();
        if removed > 0 {
            debug!(
                removed,
                remaining = state.entries.len(),
                "[mb-04] Expired tracked revisions"
            );
        }
        removed
    }
}

impl<T: TimeSource + ?Sized> RevisionTrackerApi for RevisionTracker<T> {
    fn put(&self, message_id: &str, timestamp: i64) -> PutOutcome {
        RevisionTracker::put(self, message_id, timestamp)
    }

    fn get(&self, message_id: &str) -> Option<i64> {
        RevisionTracker::get(self, message_id)
    }

    fn delete(&self, message_id: &str) -> bool {
        RevisionTracker::delete(self, message_id)
    }

    fn size(&self) -> usize {
        RevisionTracker::size(self)
    }

    fn is_own_revision(&self, message_id: &str, timestamp: i64) -> bool {
        RevisionTracker::is_own_revision(self, message_id, timestamp)
    }
}
