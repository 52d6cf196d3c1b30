//! # Bridge Context
//!
//! Every shared component, built once at startup and handed to whoever needs
//! it. There is no global state: event handlers receive the context (or the
//! `Arc`s inside it) explicitly.
//!
//! ## Startup Sequence
//!
//! 1. Validate configuration
//! 2. Open the Mapping Store
//! 3. Run the Migration Engine to completion (failure aborts startup)
//! 4. Build the Mention Resolution Engine and the Revision Tracker

use super::config::{BridgeConfig, ConfigError};
use crate::adapters::open_store;
use mb_01_mapping_store::{MappingStore, MappingStoreError};
use mb_02_migration::{AliasResolver, MigrationEngine, MigrationError, MigrationReport};
use mb_02_migration::StaticAliasResolver;
use mb_03_mentions::{
    GhostProvisioner, InMemoryUserDirectory, MentionApi, MentionResolver, StoreGhostResolver,
    TemplateGhostProvisioner, UserDirectory,
};
use mb_04_loop_guard::{RevisionTracker, RevisionTrackerApi, SystemTimeSource, TimeSource};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Startup errors. Any of these stops the bridge.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Configuration rejected.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The Mapping Store could not be opened.
    #[error("Failed to open mapping store: {0}")]
    Store(#[from] MappingStoreError),

    /// Schema migration failed.
    #[error("Mapping store migration failed: {0}")]
    Migration(#[from] MigrationError),
}

/// External collaborators supplied by the platform clients.
#[derive(Clone)]
pub struct Collaborators {
    /// Homeserver alias directory
    pub aliases: Arc<dyn AliasResolver>,
    /// Local user directory
    pub directory: Arc<dyn UserDirectory>,
    /// Remote ghost creation
    pub provisioner: Arc<dyn GhostProvisioner>,
    /// Clock for revision expiry
    pub time_source: Arc<dyn TimeSource>,
}

impl Collaborators {
    /// Collaborators that need no homeserver: a static alias table, an
    /// in-memory directory, and template-named ghosts on `server_name`.
    pub fn offline(server_name: &str) -> Self {
        Self {
            aliases: Arc::new(StaticAliasResolver::new()),
            directory: Arc::new(InMemoryUserDirectory::new()),
            provisioner: Arc::new(TemplateGhostProvisioner::new("mattermost_", server_name)),
            time_source: Arc::new(SystemTimeSource),
        }
    }
}

/// Shared components for event handling.
#[derive(Clone)]
pub struct BridgeContext {
    pub config: BridgeConfig,
    pub store: Arc<dyn MappingStore>,
    pub mentions: Arc<dyn MentionApi>,
    pub revisions: Arc<dyn RevisionTrackerApi>,
}

impl BridgeContext {
    /// Open the configured store and run startup.
    pub async fn initialize(
        config: BridgeConfig,
        collaborators: Collaborators,
    ) -> Result<(Self, MigrationReport), StartupError> {
        config.validate()?;
        let store = open_store(&config.store)?;
        Self::start(config, store, collaborators).await
    }

    /// Run startup against an already-open store.
    pub async fn initialize_with_store(
        config: BridgeConfig,
        store: Arc<dyn MappingStore>,
        collaborators: Collaborators,
    ) -> Result<(Self, MigrationReport), StartupError> {
        config.validate()?;
        Self::start(config, store, collaborators).await
    }

    async fn start(
        config: BridgeConfig,
        store: Arc<dyn MappingStore>,
        collaborators: Collaborators,
    ) -> Result<(Self, MigrationReport), StartupError> {
        let engine = MigrationEngine::new(
            store.clone(),
            collaborators.aliases.clone(),
            config.migration.clone(),
        );
        let report = engine.run().await.map_err(|e| {
            error!(error = %e, "[mb-02] Migration failed, refusing to start");
            e
        })?;

        let ghosts = Arc::new(StoreGhostResolver::new(
            store.clone(),
            collaborators.provisioner.clone(),
        ));
        let mentions: Arc<dyn MentionApi> = Arc::new(MentionResolver::new(
            collaborators.directory.clone(),
            ghosts,
            config.mentions.clone(),
        ));
        let revisions: Arc<dyn RevisionTrackerApi> = Arc::new(RevisionTracker::new(
            config.loop_guard.clone(),
            collaborators.time_source.clone(),
        ));

        info!(
            schema_version = report.to_version,
            tracker_capacity = config.loop_guard.capacity,
            "Bridge context initialized"
        );

        Ok((
            Self {
                config,
                store,
                mentions,
                revisions,
            },
            report,
        ))
    }
}
