//! Static Alias Resolver Adapter
//!
//! Implements `AliasResolver` from a fixed table. Used when the bridge runs
//! without a homeserver connection (offline migrations) and in tests.

use crate::domain::AliasError;
use crate::ports::outbound::AliasResolver;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// Alias resolver backed by a fixed alias → room id table.
///
/// An empty table fails every lookup with `NotFound`, which the engine
/// treats like any other alias failure: logged and skipped.
#[derive(Clone, Debug, Default)]
pub struct StaticAliasResolver {
    aliases: HashMap<String, String>,
}

impl StaticAliasResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an alias entry.
    pub fn with_alias(mut self, alias: impl Into<String>, room_id: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), room_id.into());
        self
    }
}

#[async_trait]
impl AliasResolver for StaticAliasResolver {
    async fn resolve(&self, alias: &str) -> Result<String, AliasError> {
        debug!("[mb-02] Resolving alias {} from static table", alias);
        self.aliases
            .get(alias)
            .cloned()
            .ok_or_else(|| AliasError::NotFound(alias.to_string()))
    }
}
