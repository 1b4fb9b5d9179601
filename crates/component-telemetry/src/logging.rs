//! Subscriber installation and structured event helpers.
//!
//! Events emitted by `component-core` carry a `component` field (the short
//! type name of the child) and usually an `owner` field. The macros here keep
//! application code on the same field names so one filter query covers both.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{TelemetryConfig, TelemetryError};

/// Handle returned by [`init_logging`]; logs a shutdown record on drop.
#[derive(Debug)]
pub struct LoggingGuard {
    service_name: String,
}

impl LoggingGuard {
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for LoggingGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down logging");
    }
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// - [`TelemetryError::Config`] / [`TelemetryError::InvalidFilter`] if the
///   configuration does not validate.
/// - [`TelemetryError::AlreadyInitialized`] if a global subscriber exists.
pub fn init_logging(config: &TelemetryConfig) -> Result<LoggingGuard, TelemetryError> {
    config.validate()?;
    let env_filter = config.env_filter()?;

    let installed = match (config.console_output, config.json_logs) {
        // JSON output for log shippers
        (true, true) => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(config.with_thread_ids)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        // Pretty output for development
        (true, false) => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(config.with_thread_ids)
                    .with_ansi(true),
            )
            .try_init(),
        (false, _) => tracing_subscriber::registry().with(env_filter).try_init(),
    };
    installed.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        filter = %config.log_level,
        json = config.json_logs,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        service_name: config.service_name.clone(),
    })
}

/// Install a test-writer subscriber if none is set yet.
///
/// Safe to call from every test; only the first call in a process has an
/// effect. Honours `RUST_LOG`, otherwise logs warnings only.
pub fn init_test_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Emit an event about a component with the standard `component` and
/// `owner` fields.
///
/// ```rust,ignore
/// log_component_event!(info, "Inventory", "Player", "Slot refilled", slot = 3);
/// ```
#[macro_export]
macro_rules! log_component_event {
    ($level:ident, $component:expr, $owner:expr, $msg:expr $(, $($field:tt)*)?) => {
        $crate::tracing::$level!(
            component = %$component,
            owner = %$owner,
            $($($field)*,)?
            $msg
        )
    };
}
