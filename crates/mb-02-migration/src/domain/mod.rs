//! # Domain Module
//!
//! Schema versions, step reports and error types for the Migration Engine.

pub mod errors;
pub mod report;
pub mod value_objects;
pub mod version;

pub use errors::*;
pub use report::*;
pub use value_objects::*;
pub use version::*;

/// Sigil marking a Matrix room alias (as opposed to a `!room:server` id).
pub const ROOM_ALIAS_SIGIL: char = '#';

/// True when a channel mapping points at an alias that still needs resolving.
pub fn is_room_alias(value: &str) -> bool {
    value.starts_with(ROOM_ALIAS_SIGIL)
}
