//! # MB-03 Mention Resolution Engine
//!
//! Rewrites outbound `@username` text into Matrix rich text with structured
//! mention metadata.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Output
//!
//! A resolved `@alice` becomes
//! `<a href="https://matrix.to/#/@ghost_alice:server">@alice</a>`, the content
//! gains `format: org.matrix.custom.html`, and `m.mentions.user_ids` lists each
//! resolved occurrence in order. With nothing resolved, the content is untouched.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Word boundary | `@` preceded by a word character is never a mention |
//! | 2 | Broadcasts excluded | `@channel`/`@here`/`@all` are never looked up |
//! | 3 | HTML-safe | Plain text outside resolved spans is escaped, never dropped |
//! | 4 | Idempotent | Existing anchors are not rescanned |

#![warn(missing_docs)]
#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{InMemoryUserDirectory, StoreGhostResolver, TemplateGhostProvisioner};
pub use domain::{
    escape_html, DirectoryError, GhostError, Markup, MentionConfig, MentionMatch,
    MentionOutcome, Mentions, MessageContent, TextContent, UserRecord, DEFAULT_LINK_BASE,
    HTML_FORMAT,
};
pub use ports::{GhostIdentityResolver, GhostProvisioner, MentionApi, UserDirectory};
pub use service::MentionResolver;
