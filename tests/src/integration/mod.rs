//! # Integration Flows

pub mod loop_guard_flows;
pub mod mention_flows;
pub mod migration_flows;
pub mod startup_flows;
