//! # Inbound Ports

use crate::domain::PutOutcome;

/// Revision tracking API - inbound port.
pub trait RevisionTrackerApi: Send + Sync {
    /// Record that the bridge applied revision `timestamp` of `message_id`.
    fn put(&self, message_id: &str, timestamp: i64) -> PutOutcome;

    /// Last applied timestamp for `message_id`.
    fn get(&self, message_id: &str) -> Option<i64>;

    fn delete(&self, message_id: &str) -> bool;

    fn size(&self) -> usize;

    /// True when an incoming edit is the bridge's own earlier write.
    fn is_own_revision(&self, message_id: &str, timestamp: i64) -> bool;
}
