//! # Event Handlers
//!
//! Per-event gating between the platform clients.

pub mod dispatch;
pub mod event_gate;

pub use dispatch::{DispatchStats, ForwardedPost, GateHandler};
pub use event_gate::{EventGate, GateDecision, PostEvent};
