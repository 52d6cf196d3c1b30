//! # Inbound Ports

use crate::domain::{MentionOutcome, MessageContent};
use async_trait::async_trait;

/// Mention resolution API - inbound port.
#[async_trait]
pub trait MentionApi: Send + Sync {
    /// Rewrite plain `text` as HTML, linking every resolvable `@username`.
    async fn resolve_mentions(&self, text: &str) -> MentionOutcome;

    /// Resolve mentions in `content`, adding the rich fields when at least
    /// one mention resolved. Returns the number of resolved mentions.
    async fn enrich(&self, content: &mut MessageContent) -> usize;
}
