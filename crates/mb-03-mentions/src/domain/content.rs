//! # Message Content
//!
//! Outbound Matrix `m.room.message` content as an explicit tagged type,
//! serialized to JSON only at the platform boundary.

use super::markup::Markup;
use serde::{Deserialize, Serialize};

/// `format` value marking `formatted_body` as Matrix HTML.
pub const HTML_FORMAT: &str = "org.matrix.custom.html";

/// Message content, tagged by `msgtype`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "msgtype")]
pub enum MessageContent {
    #[serde(rename = "m.text")]
    Text(TextContent),
    #[serde(rename = "m.notice")]
    Notice(TextContent),
    #[serde(rename = "m.emote")]
    Emote(TextContent),
}

/// Body fields shared by every textual message type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    /// Plain-text body, always present
    pub body: String,
    /// Format marker for `formatted_body`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Rich body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_body: Option<String>,
    /// Users intentionally mentioned
    #[serde(
        rename = "m.mentions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub mentions: Option<Mentions>,
}

/// The `m.mentions` block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentions {
    /// Mentioned user ids in encounter order; repeats are kept
    pub user_ids: Vec<String>,
}

impl TextContent {
    pub fn plain(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::default()
        }
    }

    /// Text the mention scanner should run over, with its markup.
    ///
    /// An existing `formatted_body` is already HTML; otherwise the plain
    /// `body` is used.
    pub fn source(&self) -> (&str, Markup) {
        match &self.formatted_body {
            Some(html) => (html, Markup::Html),
            None => (&self.body, Markup::Plain),
        }
    }

    /// Attach a rewritten HTML body and its mention list.
    ///
    /// With no user ids the content is left untouched.
    pub fn set_mentions(&mut self, formatted_body: String, user_ids: Vec<String>) {
        if user_ids.is_empty() {
            return;
        }
        self.format = Some(HTML_FORMAT.to_string());
        self.formatted_body = Some(formatted_body);
        self.mentions = Some(Mentions { user_ids });
    }
}

impl MessageContent {
    pub fn text(body: impl Into<String>) -> Self {
        MessageContent::Text(TextContent::plain(body))
    }

    pub fn notice(body: impl Into<String>) -> Self {
        MessageContent::Notice(TextContent::plain(body))
    }

    pub fn emote(body: impl Into<String>) -> Self {
        MessageContent::Emote(TextContent::plain(body))
    }

    pub fn msgtype(&self) -> &'static str {
        match self {
            MessageContent::Text(_) => "m.text",
            MessageContent::Notice(_) => "m.notice",
            MessageContent::Emote(_) => "m.emote",
        }
    }

    pub fn inner(&self) -> &TextContent {
        match self {
            MessageContent::Text(c) | MessageContent::Notice(c) | MessageContent::Emote(c) => c,
        }
    }

    pub fn inner_mut(&mut self) -> &mut TextContent {
        match self {
            MessageContent::Text(c) | MessageContent::Notice(c) | MessageContent::Emote(c) => c,
        }
    }

    pub fn body(&self) -> &str {
        &self.inner().body
    }

    /// Wire representation.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
