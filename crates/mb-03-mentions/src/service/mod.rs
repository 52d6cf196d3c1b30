//! # Mention Resolution Service
//!
//! Turns `@username` text into Matrix rich text.
//!
//! ## Flow
//!
//! 1. Scan the text for candidates (see `domain::scanner`)
//! 2. For each candidate, left to right: directory lookup, then ghost lookup
//! 3. Splice an anchor over each resolved span. Plain text around it is
//!    HTML-escaped; HTML source is copied byte for byte
//!
//! A failure at step 2 drops only that candidate, which stays plain text.


use crate::domain::{
    scan, Markup, MentionConfig, MentionMatch, MentionOutcome, MessageContent,
};
use crate::ports::inbound::MentionApi;
use crate::ports::outbound::{GhostIdentityResolver, UserDirectory};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// The Mention Resolution Engine.
pub struct MentionResolver<D: UserDirectory + ?Sized, G: GhostIdentityResolver + ?Sized> {
    directory: Arc<D>,
    ghosts: Arc<G>,
    config: MentionConfig,
}

impl<D: UserDirectory + ?Sized, G: GhostIdentityResolver + ?Sized> MentionResolver<D, G> {
    pub fn new(directory: Arc<D>, ghosts: Arc<G>, config: MentionConfig) -> Self {
        Self {
            directory,
            ghosts,
            config,
        }
    }

    pub fn config(&self) -> &MentionConfig {
        &self.config
    }

    /// Resolve every candidate in plain `text`, producing HTML.
    pub async fn resolve(&self, text: &str) -> MentionOutcome {
        self.resolve_markup(text, Markup::Plain).await
    }

    /// Resolve every candidate in `text` of the given markup.
    pub async fn resolve_markup(&self, text: &str, markup: Markup) -> MentionOutcome {
        let mut matches = scan(text, markup);
        for candidate in &mut matches {
            self.resolve_candidate(candidate).await;
        }

        MentionOutcome {
            text: self.render(text, markup, &matches),
            matches,
        }
    }

    /// Resolve mentions in `content` and attach the rich fields.
    pub async fn apply(&self, content: &mut MessageContent) -> usize {
        let inner = content.inner_mut();
        let (source, markup) = inner.source();
        let outcome = self.resolve_markup(source, markup).await;
        let user_ids = outcome.user_ids();
        let resolved = user_ids.len();
        inner.set_mentions(outcome.text, user_ids);
        resolved
    }

    async fn resolve_candidate(&self, candidate: &mut MentionMatch) {
        let user = match self.directory.lookup_by_username(&candidate.username).await {
            Ok(user) => user,
            Err(e) => {
                debug!(
                    username = %candidate.username,
                    error = %e,
                    "[mb-03] Mention candidate not in directory, leaving as text"
                );
                return;
            }
        };

        let ghost = match self.ghosts.ensure(&user.id).await {
            Ok(ghost) => ghost,
            Err(e) => {
                debug!(
                    username = %candidate.username,
                    user_id = %user.id,
                    error = %e,
                    "[mb-03] No ghost identity for mentioned user, leaving as text"
                );
                return;
            }
        };

        candidate.username = user.username;
        candidate.target = Some(ghost);
        if !user.display_name.is_empty() {
            candidate.display_name = Some(user.display_name);
        }
    }

    /// Render `text` as HTML, replacing resolved spans with anchors.
    fn render(&self, text: &str, markup: Markup, matches: &[MentionMatch]) -> String {
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for m in matches {
            let Some(target) = &m.target else {
                continue;
            };
            out.push_str(&markup.to_html(&text[cursor..m.start]));
            out.push_str(&self.config.anchor(target, &m.username));
            cursor = m.end;
        }
        out.push_str(&markup.to_html(&text[cursor..]));
        out
    }
}

#[async_trait]
impl<D: UserDirectory + ?Sized, G: GhostIdentityResolver + ?Sized> MentionApi
    for MentionResolver<D, G>
{
    async fn resolve_mentions(&self, text: &str) -> MentionOutcome {
        self.resolve(text).await
    }

    async fn enrich(&self, content: &mut MessageContent) -> usize {
        self.apply(content).await
    }
}
