//! Metrics collection and exposition.
//!
//! # Metrics
//! - `booking_api_requests_total` (counter): requests by method, operation, status
//! - `booking_api_request_duration_seconds` (histogram): latency by method, operation
//! - `booking_api_store_errors_total` (counter): persistence failures by operation
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, operation: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "booking_api_requests_total",
        "method" => method.to_string(),
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "booking_api_request_duration_seconds",
        "method" => method.to_string(),
        "operation" => operation
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_store_error(operation: &'static str) {
    metrics::counter!("booking_api_store_errors_total", "operation" => operation).increment(1);
}
