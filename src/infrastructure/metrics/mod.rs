//! Prometheus Metrics Module
//!
//! Client-wide counters collected with Prometheus.
//!
//! # Metrics Collected
//! - Navigation dispatches by outcome
//! - Search result renders
//! - Form submissions by outcome
//! - Stored values that failed to decode

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// Navigation dispatches by terminal outcome
pub static NAVIGATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("navigations_total", "Navigation dispatches by outcome").namespace("vetcare"),
        &["outcome"], // "applied", "rejected", "failed", "unrendered", "superseded", "stale"
    )
    .expect("Failed to create NAVIGATIONS_TOTAL metric")
});

/// Search renders that reached the results region
pub static SEARCH_RENDERS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new("search_renders_total", "Search result renders").namespace("vetcare"),
    )
    .expect("Failed to create SEARCH_RENDERS_TOTAL metric")
});

/// Form submissions by outcome
pub static SUBMISSIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("submissions_total", "Appointment form submissions by outcome")
            .namespace("vetcare"),
        &["outcome"], // "saved", "failed"
    )
    .expect("Failed to create SUBMISSIONS_TOTAL metric")
});

/// Stored values present but unparseable
pub static STORAGE_DECODE_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "storage_decode_failures_total",
            "Stored values that failed to decode and were treated as absent",
        )
        .namespace("vetcare"),
        &["key"],
    )
    .expect("Failed to create STORAGE_DECODE_FAILURES_TOTAL metric")
});

/// Register all metrics with the registry
fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(NAVIGATIONS_TOTAL.clone()))
        .expect("Failed to register NAVIGATIONS_TOTAL");
    registry
        .register(Box::new(SEARCH_RENDERS_TOTAL.clone()))
        .expect("Failed to register SEARCH_RENDERS_TOTAL");
    registry
        .register(Box::new(SUBMISSIONS_TOTAL.clone()))
        .expect("Failed to register SUBMISSIONS_TOTAL");
    registry
        .register(Box::new(STORAGE_DECODE_FAILURES_TOTAL.clone()))
        .expect("Failed to register STORAGE_DECODE_FAILURES_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::warn!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

pub fn record_navigation(outcome: &str) {
    NAVIGATIONS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_search_render() {
    SEARCH_RENDERS_TOTAL.inc();
}

pub fn record_submission(outcome: &str) {
    SUBMISSIONS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_decode_failure(key: &str) {
    STORAGE_DECODE_FAILURES_TOTAL.with_label_values(&[key]).inc();
}
