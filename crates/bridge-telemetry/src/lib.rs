//! # Bridge Telemetry
//!
//! Structured logging for the bridge binary.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bridge_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     init_telemetry(TelemetryConfig::from_env()).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MB_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `MB_JSON_LOGS` | `false` (`true` in containers) | JSON output |
//! | `MB_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `MB_SERVICE_NAME` | `mattermost-bridge` | Service name |

#![warn(missing_docs)]
#![allow(missing_docs)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{build_filter, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log filter expression did not parse.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Initialize logging for the process.
pub fn init_telemetry(config: TelemetryConfig) -> Result<(), TelemetryError> {
    init_tracing(&config)
}
