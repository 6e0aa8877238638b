//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): requests by method, status, route
//! - `router_request_duration_seconds` (histogram): handling latency
//! - `router_routes` (gauge): size of the active route table
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Unmatched requests are labelled with route `none`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Route label used for requests that matched nothing.
pub const NO_ROUTE: &str = "none";

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let status = status.to_string();

    metrics::counter!(
        "router_requests_total",
        "method" => method.to_string(),
        "status" => status.clone(),
        "route" => route.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "router_request_duration_seconds",
        "method" => method.to_string(),
        "status" => status,
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Publish the size of the active route table.
pub fn record_route_count(count: usize) {
    metrics::gauge!("router_routes").set(count as f64);
}
