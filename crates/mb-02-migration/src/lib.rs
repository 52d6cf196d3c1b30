//! # MB-02 Migration Engine
//!
//! Evolves the Mapping Store's key layout at startup.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Purpose
//!
//! The store records the highest fully-applied layout version under
//! `kv_store_version`. On startup the engine applies every pending step in
//! order and then records the new version. It must finish before any event
//! handler is registered.
//!
//! | Version | Step |
//! |---------|------|
//! | 0 → 1 | add reverse user and channel mappings |
//! | 1 → 2 | fold legacy DM namespaces into channel/room namespaces |
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Forward wins | A disagreeing reverse entry is rewritten from the forward entry |
//! | 2 | Idempotent steps | Re-running any step adds no writes beyond the first run |
//! | 3 | Version last | The version record moves only after every step completed |
//! | 4 | No data loss | Legacy keys are deleted only after their value is unified |
//!
//! ## Failure Model
//!
//! Per-row failures are logged, recorded in the `MigrationReport` and skipped.
//! Listing failures and a failed version write abort the run.

#![warn(missing_docs)]
#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

#[cfg(test)]
mod test_utils;

pub use adapters::StaticAliasResolver;
pub use domain::{
    AliasError, MigrationConfig, MigrationError, MigrationReport, MigrationStep, RowError,
    RowOperation, SchemaVersion, StepReport, TARGET_SCHEMA_VERSION,
};
pub use ports::{AliasResolver, MigrationApi};
pub use service::MigrationEngine;
