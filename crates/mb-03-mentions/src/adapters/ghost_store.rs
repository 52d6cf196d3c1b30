//! Store-backed ghost identity resolver.
//!
//! `ghost_user_{local id}` holds the Matrix id of the ghost standing in for a
//! local user. On a miss the provisioner creates the ghost and the result is
//! persisted, so later lookups never reach the provisioner.

use crate::domain::GhostError;
use crate::ports::outbound::{GhostIdentityResolver, GhostProvisioner};
use async_trait::async_trait;
use mb_01_mapping_store::{MappingStore, Namespace};
use std::sync::Arc;
use tracing::{debug, info};

/// Ghost resolver persisting into the Mapping Store.
pub struct StoreGhostResolver<S: MappingStore + ?Sized, P: GhostProvisioner + ?Sized> {
    store: Arc<S>,
    provisioner: Arc<P>,
}

impl<S: MappingStore + ?Sized, P: GhostProvisioner + ?Sized> StoreGhostResolver<S, P> {
    pub fn new(store: Arc<S>, provisioner: Arc<P>) -> Self {
        Self { store, provisioner }
    }
}

#[async_trait]
impl<S: MappingStore + ?Sized, P: GhostProvisioner + ?Sized> GhostIdentityResolver
    for StoreGhostResolver<S, P>
{
    async fn ensure(&self, local_user_id: &str) -> Result<String, GhostError> {
        let key = Namespace::GhostUser.key(local_user_id);
        if let Some(ghost) = self.store.get(&key)?.filter(|g| !g.is_empty()) {
            debug!(local_user_id, ghost = %ghost, "[mb-03] Ghost identity found");
            return Ok(ghost);
        }

        let ghost = self.provisioner.provision(local_user_id).await?;
        self.store.set(&key, &ghost)?;
        info!(local_user_id, ghost = %ghost, "[mb-03] Ghost identity provisioned");
        Ok(ghost)
    }
}

/// Provisioner deriving ghost ids from a template: `@{prefix}{local id}:{server}`.
///
/// Registration with the homeserver happens lazily on first send, so this
/// only needs to name the ghost.
#[derive(Clone, Debug)]
pub struct TemplateGhostProvisioner {
    localpart_prefix: String,
    server_name: String,
}

impl TemplateGhostProvisioner {
    pub fn new(localpart_prefix: impl Into<String>, server_name: impl Into<String>) -> Self {
        Self {
            localpart_prefix: localpart_prefix.into(),
            server_name: server_name.into(),
        }
    }
}

#[async_trait]
impl GhostProvisioner for TemplateGhostProvisioner {
    async fn provision(&self, local_user_id: &str) -> Result<String, GhostError> {
        if local_user_id.is_empty() || local_user_id.contains(':') {
            return Err(GhostError::Provisioning {
                local_user_id: local_user_id.to_string(),
                message: "user id is not a valid Matrix localpart".to_string(),
            });
        }
        Ok(format!(
            "@{}{}:{}",
            self.localpart_prefix,
            local_user_id.to_lowercase(),
            self.server_name
        ))
    }
}
