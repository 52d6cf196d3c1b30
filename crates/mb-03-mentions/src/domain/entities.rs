//! # Domain Entities

use serde::{Deserialize, Serialize};

/// A user as known to the local (Mattermost) directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Local user id
    pub id: String,
    /// Username without the `@`
    pub username: String,
    /// Human-readable name, may be empty
    #[serde(default)]
    pub display_name: String,
}

impl UserRecord {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            display_name: String::new(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }
}

/// A `@username` occurrence found in message text.
///
/// Transient: produced per message and never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MentionMatch {
    /// Byte offset of the `@`
    pub start: usize,
    /// Byte offset one past the last username byte
    pub end: usize,
    /// Candidate username without the `@`
    pub username: String,
    /// Remote identity once resolved
    pub target: Option<String>,
    /// Display name once resolved
    pub display_name: Option<String>,
}

impl MentionMatch {
    pub fn candidate(start: usize, end: usize, username: impl Into<String>) -> Self {
        Self {
            start,
            end,
            username: username.into(),
            target: None,
            display_name: None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.target.is_some()
    }

    /// Byte span covered by this mention.
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Result of resolving the mentions in one piece of text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MentionOutcome {
    /// Text with resolved mentions replaced by anchors
    pub text: String,
    /// Every candidate, resolved or not, in encounter order
    pub matches: Vec<MentionMatch>,
}

impl MentionOutcome {
    /// Resolved identities in encounter order, repeats included.
    pub fn user_ids(&self) -> Vec<String> {
        self.matches
            .iter()
            .filter_map(|m| m.target.clone())
            .collect()
    }

    pub fn resolved_count(&self) -> usize {
        self.matches.iter().filter(|m| m.is_resolved()).count()
    }
}
