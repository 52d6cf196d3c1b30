//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits for the Migration Engine.

mod alias;

pub use alias::StaticAliasResolver;
