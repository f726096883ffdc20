//! Prometheus metrics for the social client SDK.
//!
//! All metrics follow the naming convention: `sc_<area>_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., protocol_calls_total)
//! - **Gauge**: Value that can go up or down (e.g., pending_transactions)
//! - **Histogram**: Distribution of values (e.g., protocol_call_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Gauge, Histogram, HistogramOpts, HistogramVec,
    Opts, Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // PROTOCOL CALL METRICS
    // =========================================================================

    /// Protocol calls by kind, execution mode and outcome
    pub static ref PROTOCOL_CALLS: CounterVec = CounterVec::new(
        Opts::new("sc_protocol_calls_total", "Protocol calls handed to the gateway"),
        &["kind", "mode", "outcome"]  // outcome: confirmed/relayed/failed/reverted
    ).expect("metric creation failed");

    /// Requests rejected before reaching the gateway
    pub static ref VALIDATION_FAILURES: CounterVec = CounterVec::new(
        Opts::new("sc_validation_failures_total", "Requests failing their validity predicate"),
        &["kind"]
    ).expect("metric creation failed");

    /// Gateway round-trip duration
    pub static ref PROTOCOL_CALL_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "sc_protocol_call_duration_seconds",
            "Time spent waiting on the protocol call gateway"
        ).buckets(exponential_buckets(0.005, 2.0, 14).expect("valid buckets")),
        &["kind"]
    ).expect("metric creation failed");

    // =========================================================================
    // OPTIMISTIC CACHE METRICS
    // =========================================================================

    /// Optimistic cache updates by kind and lifecycle action
    pub static ref OPTIMISTIC_UPDATES: CounterVec = CounterVec::new(
        Opts::new("sc_optimistic_updates_total", "Optimistic cache updates"),
        &["kind", "action"]  // action: applied/confirmed/reverted/skipped
    ).expect("metric creation failed");

    /// Relayed transactions awaiting settlement
    pub static ref PENDING_TRANSACTIONS: Gauge = Gauge::new(
        "sc_pending_transactions",
        "Relayed transactions awaiting settlement"
    ).expect("metric creation failed");
}

/// Handle returned once metrics are registered.
pub struct MetricsHandle {
    _registry: Registry,
}

/// Register all metrics with the global registry.
///
/// Registering twice is not an error: collectors already present are skipped.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(PROTOCOL_CALLS.clone()),
        Box::new(VALIDATION_FAILURES.clone()),
        Box::new(PROTOCOL_CALL_DURATION.clone()),
        Box::new(OPTIMISTIC_UPDATES.clone()),
        Box::new(PENDING_TRANSACTIONS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: REGISTRY.clone(),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
