//! # Domain Entities

use serde::{Deserialize, Serialize};

/// Seconds since the Unix epoch, from the tracker's `TimeSource`.
pub type Timestamp = u64;

/// The author of an event as seen on the local platform.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: String,
    /// Set when the account mirrors a user from the other platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_marker: Option<String>,
}

impl Actor {
    pub fn local(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            ..Self::default()
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_origin(mut self, origin_marker: impl Into<String>) -> Self {
        self.origin_marker = Some(origin_marker.into());
        self
    }
}

/// A message revision the bridge itself applied on the opposite platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrackedRevision {
    pub message_id: String,
    /// Platform timestamp of the applied revision
    pub last_applied: i64,
    /// When the tracker recorded it; drives expiry
    pub recorded_at: Timestamp,
}

/// Result of `RevisionTracker::put`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PutOutcome {
    /// The revision is tracked.
    Stored,
    /// The tracker is full of recent entries; try again later.
    AtCapacity {
        /// Configured capacity
        capacity: usize,
    },
}

impl PutOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored)
    }
}
