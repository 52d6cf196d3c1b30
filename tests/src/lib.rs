//! # Bridge Test Suite
//!
//! Unified test crate for flows that span several subsystems.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── migration_flows.rs   # Store + migration engine
//!     ├── mention_flows.rs     # Store-backed ghosts + mention engine
//!     ├── loop_guard_flows.rs  # Tracker under concurrent load
//!     └── startup_flows.rs     # Runtime context + event gate
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p mb-tests
//! cargo test -p mb-tests integration::migration_flows::
//! ```

#![allow(dead_code)]

pub mod integration;
