//! # Domain Layer
//!
//! Pure types for the Mapping Store: key namespaces, records and errors.

pub mod entities;
pub mod errors;
pub mod keys;

pub use entities::*;
pub use errors::*;
pub use keys::*;
