//! # MB-04 Loop/Duplicate Guard
//!
//! Keeps the bridge from reflecting events back to their origin.
//!
//! **Subsystem ID:** 04
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Components
//!
//! - `is_remote_actor`: pure classifier over an actor's origin marker
//! - `RevisionTracker`: bounded, time-aware `message id → last applied
//!   timestamp` record consulted before re-processing an edit
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Marker only | Remote-ness never depends on display names |
//! | 2 | Bounded | The tracker never holds more than `capacity` entries |
//! | 3 | No recent eviction | A full tracker refuses new entries instead |

#![warn(missing_docs)]
#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{MockTimeSource, SystemTimeSource};
pub use domain::{
    is_remote_actor, is_remote_origin, Actor, PutOutcome, Timestamp, TrackedRevision,
    TrackerConfig,
};
pub use ports::{RevisionTrackerApi, TimeSource};
pub use service::RevisionTracker;
