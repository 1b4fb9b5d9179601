//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use tracing_subscriber::EnvFilter;

use crate::TelemetryError;

/// Configuration for the logging pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to the startup record
    pub service_name: String,

    /// Log filter directive (`info`, `component_core=debug`, ...)
    pub log_level: String,

    /// Whether to write formatted events to stdout
    pub console_output: bool,

    /// Whether to emit JSON instead of human-readable lines
    pub json_logs: bool,

    /// Whether each event carries the emitting thread's id
    pub with_thread_ids: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "component-tree".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            with_thread_ids: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `COMPONENT_SERVICE_NAME`: Service name (default: component-tree)
    /// - `COMPONENT_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `COMPONENT_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `COMPONENT_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `COMPONENT_THREAD_IDS`: Include thread ids (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service_name: env::var("COMPONENT_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: env::var("COMPONENT_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: env_flag("COMPONENT_CONSOLE_OUTPUT").unwrap_or(defaults.console_output),

            json_logs: env_flag("COMPONENT_JSON_LOGS").unwrap_or(defaults.json_logs),

            with_thread_ids: env_flag("COMPONENT_THREAD_IDS").unwrap_or(defaults.with_thread_ids),
        }
    }

    /// Builder: set the log filter directive.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Builder: switch to JSON output.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// Check the configuration before any subscriber is installed.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        if self.service_name.trim().is_empty() {
            return Err(TelemetryError::Config(
                "service_name must not be empty".to_string(),
            ));
        }
        self.env_filter().map(|_| ())
    }

    pub(crate) fn env_filter(&self) -> Result<EnvFilter, TelemetryError> {
        EnvFilter::try_new(&self.log_level).map_err(|e| TelemetryError::InvalidFilter {
            directive: self.log_level.clone(),
            reason: e.to_string(),
        })
    }
}

/// `true`/`1`/`yes`/`on` and `false`/`0`/`no`/`off`, case-insensitive.
fn env_flag(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
