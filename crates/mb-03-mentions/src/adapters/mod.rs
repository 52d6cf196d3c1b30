//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for the Mention Resolution Engine.

mod directory;
mod ghost_store;

pub use directory::InMemoryUserDirectory;
pub use ghost_store::{StoreGhostResolver, TemplateGhostProvisioner};
