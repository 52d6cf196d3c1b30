//! # Domain Errors
//!
//! Error types for the Mapping Store.

use thiserror::Error;

/// Mapping store errors.
///
/// A missing key is not an error: `get` returns `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingStoreError {
    /// I/O error during read/write.
    #[error("Mapping store I/O error: {message}")]
    Io {
        /// Backend message
        message: String,
    },

    /// Stored bytes could not be decoded.
    #[error("Mapping store corruption at {key}: {message}")]
    Corruption {
        /// Offending key (lossy)
        key: String,
        /// Decoder message
        message: String,
    },

    /// Listing requested with a zero page size.
    #[error("Invalid page size: {per_page}")]
    InvalidPageSize {
        /// Requested page size
        per_page: usize,
    },
}

impl MappingStoreError {
    /// Shorthand for an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}
