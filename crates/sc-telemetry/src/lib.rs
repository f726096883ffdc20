//! # SC Telemetry
//!
//! Observability for the social client SDK.
//!
//! ## Components
//!
//! - **Logs**: `tracing` events rendered by `tracing-subscriber` (pretty or JSON)
//! - **Metrics**: Prometheus counters for protocol calls, validation failures
//!   and the optimistic update lifecycle
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sc_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! // Protocol calls executed from here on are logged and counted.
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SC_SERVICE_NAME` | `social-client` | Service name in log lines |
//! | `SC_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `SC_JSON_LOGS` | `false` | JSON output |
//! | `SC_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(missing_docs)]

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, OPTIMISTIC_UPDATES, PENDING_TRANSACTIONS,
    PROTOCOL_CALLS, PROTOCOL_CALL_DURATION, VALIDATION_FAILURES,
};
pub use tracing_setup::TracingGuard;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    /// A metric could not be registered or encoded.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// The configuration is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics_handle = register_metrics()?;
    let tracing_guard = tracing_setup::init_tracing(&config)?;

    Ok(TelemetryGuard {
        _tracing: tracing_guard,
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _tracing: TracingGuard,
    _metrics: MetricsHandle,
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}

/// Log a protocol-call event with the standard `kind` / `mode` fields.
#[macro_export]
macro_rules! log_call_event {
    ($level:ident, $msg:expr, $kind:expr, $mode:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            kind = %$kind,
            mode = %$mode,
            $($($field)*,)?
            $msg
        )
    };
}
