//! # Adapters
//!
//! Backend selection for the subsystems' outbound ports.

pub mod storage;

pub use storage::open_store;
