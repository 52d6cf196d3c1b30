//! # Value Objects

use super::markup::escape_html;
use serde::{Deserialize, Serialize};

/// Default permalink base for rendered mentions.
pub const DEFAULT_LINK_BASE: &str = "https://matrix.to";

/// Mention Resolution Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionConfig {
    /// Base of the `{base}/#/{user id}` permalink
    pub link_base: String,
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            link_base: DEFAULT_LINK_BASE.to_string(),
        }
    }
}

impl MentionConfig {
    /// Permalink for a Matrix user id.
    pub fn permalink(&self, user_id: &str) -> String {
        format!("{}/#/{}", self.link_base.trim_end_matches('/'), user_id)
    }

    /// Anchor replacing a resolved `@username`.
    pub fn anchor(&self, user_id: &str, username: &str) -> String {
        format!(
            "<a href=\"{}\">@{}</a>",
            escape_html(&self.permalink(user_id)),
            escape_html(username)
        )
    }
}
