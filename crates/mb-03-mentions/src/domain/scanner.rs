//! # Mention Scanner
//!
//! Finds `@username` candidates in message text.
//!
//! A candidate is `@` followed by letters, digits, `.`, `-` or `_`, where:
//!
//! - the `@` is not preceded by a word character (rejects `alice@example.com`)
//! - the token is not followed by another `@` or a letter (rejects `@alice@host`)
//! - trailing `.` is sentence punctuation, not part of the name
//! - `@channel`, `@here` and `@all` are broadcast keywords, never users
//! - in HTML, text inside an existing `<a ...>...</a>` or inside a tag is
//!   never scanned; plain text has no markup, so everything is scanned

use super::entities::MentionMatch;
use super::markup::Markup;
use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

/// Broadcast keywords that look like mentions.
pub const SPECIAL_MENTIONS: [&str; 3] = ["channel", "here", "all"];

fn mention_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"@([A-Za-z0-9._\-]+)").expect("valid regex"))
}

fn markup_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?is)<a\b[^>]*>.*?</a>|<[^>]*>").expect("valid regex"))
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True for broadcast keywords, case-insensitively.
pub fn is_special_mention(username: &str) -> bool {
    SPECIAL_MENTIONS
        .iter()
        .any(|special| special.eq_ignore_ascii_case(username))
}

/// Byte ranges of existing anchors and tags.
fn markup_spans(text: &str, markup: Markup) -> Vec<Range<usize>> {
    match markup {
        Markup::Plain => Vec::new(),
        Markup::Html => markup_pattern().find_iter(text).map(|m| m.range()).collect(),
    }
}

/// Scan `text` for mention candidates, left to right.
pub fn scan(text: &str, markup: Markup) -> Vec<MentionMatch> {
    let skipped = markup_spans(text, markup);
    let mut candidates = Vec::new();

    for captures in mention_pattern().captures_iter(text) {
        let (Some(whole), Some(token)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let start = whole.start();

        if skipped.iter().any(|span| span.contains(&start)) {
            continue;
        }

        if text[..start].chars().next_back().is_some_and(is_word_char) {
            continue;
        }

        if text[whole.end()..]
            .chars()
            .next()
            .is_some_and(|c| c == '@' || c.is_alphanumeric())
        {
            continue;
        }

        let username = token.as_str().trim_end_matches('.');
        if username.is_empty() || is_special_mention(username) {
            continue;
        }

        candidates.push(MentionMatch::candidate(
            start,
            token.start() + username.len(),
            username,
        ));
    }

    candidates
}
