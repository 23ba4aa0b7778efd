//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - External services (CRM lookup, telephony submission)
//! - Call initiation outcomes
//! - Webhook intake

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// External Service Metrics
// =============================================================================

/// External service request duration.
pub static EXTERNAL_SERVICE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "dialbridge_external_service_duration_seconds",
            "Duration of external service calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["service", "operation"],
    )
    .unwrap()
});

/// External service requests total.
pub static EXTERNAL_SERVICE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "dialbridge_external_service_requests_total",
            "Total external service requests",
        ),
        &["service", "operation", "status"], // status: "success", "http_error", "error"
    )
    .unwrap()
});

// =============================================================================
// Call Metrics
// =============================================================================

/// Call initiations by result.
pub static CALLS_INITIATED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "dialbridge_calls_initiated_total",
            "Total call initiation requests",
        ),
        &["result"], // "initiated", "validation_error", "upstream_error"
    )
    .unwrap()
});

// =============================================================================
// Webhook Metrics
// =============================================================================

/// Webhook events received by kind.
pub static WEBHOOK_EVENTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "dialbridge_webhook_events_total",
            "Total provider webhook events received",
        ),
        &["kind"], // "inbound", "outbound"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Record the outcome of one external service call.
pub fn observe_external_call(service: &str, operation: &str, status: &str, seconds: f64) {
    EXTERNAL_SERVICE_DURATION
        .with_label_values(&[service, operation])
        .observe(seconds);
    EXTERNAL_SERVICE_REQUESTS
        .with_label_values(&[service, operation, status])
        .inc();
}

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(EXTERNAL_SERVICE_DURATION.clone()),
        Box::new(EXTERNAL_SERVICE_REQUESTS.clone()),
        Box::new(CALLS_INITIATED.clone()),
        Box::new(WEBHOOK_EVENTS.clone()),
    ]
}
