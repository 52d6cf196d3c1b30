//! # Ports Module
//!
//! The Mapping Store has no inbound API of its own: the outbound
//! `MappingStore` trait is the contract consumers program against.

pub mod outbound;

pub use outbound::*;
