//! # Origin Classification
//!
//! An event authored by a mirrored account must never be synced back to the
//! platform it came from. The origin marker is the only signal: display names
//! are user-controlled and prove nothing.

use super::entities::Actor;

/// True when `origin_marker` names a remote origin.
pub fn is_remote_origin(origin_marker: Option<&str>) -> bool {
    origin_marker.is_some_and(|marker| !marker.is_empty())
}

/// True when `actor` mirrors a user from the other platform.
pub fn is_remote_actor(actor: &Actor) -> bool {
    is_remote_origin(actor.origin_marker.as_deref())
}
