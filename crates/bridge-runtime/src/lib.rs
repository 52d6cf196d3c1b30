//! # Bridge Runtime Library
//!
//! This library exposes the runtime's modules for testing. The main entry
//! point is the `main.rs` binary.
//!
//! ## Startup
//!
//! Configuration is loaded, the Mapping Store opened, and the Migration Engine
//! run to completion before any event is gated. A failed migration stops the
//! process; rerunning it is safe because every step is idempotent.

#![warn(missing_docs)]
#![allow(missing_docs)]

pub mod adapters;
pub mod container;
pub mod handlers;

pub use container::{BridgeConfig, BridgeContext, Collaborators, ConfigError, StartupError};
pub use handlers::{EventGate, GateDecision, GateHandler, PostEvent};
