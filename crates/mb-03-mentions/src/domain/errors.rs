//! # Domain Errors
//!
//! Every error here is per-candidate: the mention is left as plain text and
//! the rest of the message is still processed.

use mb_01_mapping_store::MappingStoreError;
use thiserror::Error;

/// User directory lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// No user with this username.
    #[error("User not found: {0}")]
    NotFound(String),

    /// The directory could not be queried.
    #[error("User directory unavailable: {0}")]
    Unavailable(String),
}

/// Ghost identity errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GhostError {
    /// Creating the remote ghost failed.
    #[error("Failed to provision ghost for {local_user_id}: {message}")]
    Provisioning {
        /// Local user the ghost stands in for
        local_user_id: String,
        /// Error message
        message: String,
    },

    /// The ghost mapping could not be read or written.
    #[error("Ghost mapping store error: {0}")]
    Store(#[from] MappingStoreError),
}
