//! Metrics collection and exposition.
//!
//! # Metrics
//! - `tx_history_requests_total` (counter): requests by status
//! - `tx_history_request_duration_seconds` (histogram): handler latency
//! - `tx_history_rate_limited_total` (counter): requests rejected with 429
//! - `tx_history_resolutions_total` (counter): per-signature outcomes
//! - `tx_history_connect_attempts_total` (counter): bootstrap attempts by result
//!
//! Recording is a no-op until a recorder is installed by `init_metrics`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(status: u16, start: Instant) {
    metrics::counter!("tx_history_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("tx_history_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_rate_limited() {
    metrics::counter!("tx_history_rate_limited_total").increment(1);
}

pub fn record_resolution(outcome: &'static str) {
    metrics::counter!("tx_history_resolutions_total", "outcome" => outcome).increment(1);
}

pub fn record_connect_attempt(success: bool) {
    let result = if success { "success" } else { "failure" };
    metrics::counter!("tx_history_connect_attempts_total", "result" => result).increment(1);
}
