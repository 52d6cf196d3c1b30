//! # Markup
//!
//! Whether mention text is plain (Mattermost `body`) or already Matrix HTML
//! (a previous `formatted_body`).

use std::borrow::Cow;

/// Markup of the text being rewritten.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Markup {
    /// User-typed text; every character is literal.
    Plain,
    /// Matrix HTML; tags and existing anchors are kept as they are.
    Html,
}

impl Markup {
    /// Render an untouched segment of source text as HTML.
    pub fn to_html(self, segment: &str) -> Cow<'_, str> {
        match self {
            Markup::Plain => Cow::Owned(escape_html(segment)),
            Markup::Html => Cow::Borrowed(segment),
        }
    }
}

/// Escape HTML special characters.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
