//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines the inbound request and upstream call metrics.

pub mod middleware;
use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};

lazy_static! {
    // Global Prometheus registry.
    pub static ref REGISTRY: Registry = Registry::new();

    // Counter: Total inbound HTTP requests.
    pub static ref REQUEST_COUNTER: CounterVec = {
        let opts = Opts::new("requests_total", "Total number of HTTP requests");
        let counter_vec = CounterVec::new(opts, &["endpoint", "method", "status"]).unwrap();
        REGISTRY.register(Box::new(counter_vec.clone())).unwrap();
        counter_vec
    };

    // Counter: Upstream calls by call kind and classified outcome.
    pub static ref UPSTREAM_CALLS: CounterVec = {
        let opts = Opts::new(
            "upstream_calls_total",
            "Total number of upstream WHM calls by outcome",
        );
        let counter_vec = CounterVec::new(opts, &["call_kind", "outcome"]).unwrap();
        REGISTRY.register(Box::new(counter_vec.clone())).unwrap();
        counter_vec
    };

    // Histogram for upstream call latency in seconds.
    pub static ref UPSTREAM_LATENCY: HistogramVec = {
        let histogram_opts =
            HistogramOpts::new("upstream_latency_seconds", "Upstream call latency in seconds")
                .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]);
        let histogram_vec = HistogramVec::new(histogram_opts, &["call_kind"]).unwrap();
        REGISTRY.register(Box::new(histogram_vec.clone())).unwrap();
        histogram_vec
    };
}

/// Gather all metrics and encode into the Prometheus text format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(buffer)
}
