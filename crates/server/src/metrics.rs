//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the report service:
//! - HTTP request metrics (latency, counts, in flight)
//! - Tickets issued and report lookups by outcome
//! - Overload gate state and flips

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "report_apis_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("report_apis_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "report_apis_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Report Metrics
// =============================================================================

/// Tickets issued total.
pub static TICKETS_ISSUED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "report_apis_tickets_issued_total",
        "Total report tickets issued since startup",
    )
    .unwrap()
});

/// Report lookups by outcome (ready, not_ready, invalid, error).
pub static REPORT_LOOKUPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("report_apis_report_lookups_total", "Report lookups by outcome"),
        &["outcome"],
    )
    .unwrap()
});

// =============================================================================
// Gate Metrics
// =============================================================================

/// Overload flag (1 = overloaded, 0 = accepting).
pub static GATE_OVERLOADED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "report_apis_gate_overloaded",
        "Whether the service reports itself overloaded (1) or not (0)",
    )
    .unwrap()
});

/// Overload flag flips.
pub static GATE_TOGGLES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "report_apis_gate_toggles_total",
        "Total overload flag flips since startup",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Reports
    registry
        .register(Box::new(TICKETS_ISSUED_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(REPORT_LOOKUPS_TOTAL.clone()))
        .unwrap();

    // Gate
    registry
        .register(Box::new(GATE_OVERLOADED.clone()))
        .unwrap();
    registry
        .register(Box::new(GATE_TOGGLES_TOTAL.clone()))
        .unwrap();
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Record the overload flag after a flip.
pub fn record_gate_toggle(overloaded: bool) {
    GATE_OVERLOADED.set(if overloaded { 1 } else { 0 });
    GATE_TOGGLES_TOTAL.inc();
}
