//! # Component Telemetry
//!
//! Logging bootstrap for programs built on `component-core`.
//!
//! The core crate only emits `tracing` events: attach, detach and replace at
//! `debug`, typed lookups at `trace`, rejected adoptions at `warn`. This crate
//! decides where those events go.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use component_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_logging(&config)?;
//!
//!     // build the component tree here
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `COMPONENT_SERVICE_NAME` | `component-tree` | Service name in the startup record |
//! | `COMPONENT_LOG_LEVEL` | `info` | Filter directive, falls back to `RUST_LOG` |
//! | `COMPONENT_CONSOLE_OUTPUT` | `true` | Write events to stdout |
//! | `COMPONENT_JSON_LOGS` | `false` | JSON instead of pretty output |
//! | `COMPONENT_THREAD_IDS` | `false` | Include thread ids |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{init_logging, init_test_logging, LoggingGuard};

#[doc(hidden)]
pub use tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid log filter '{directive}': {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}
