//! Metrics collection and exposition.
//!
//! # Metrics
//! - `host_router_lookups_total` (counter): host lookups by result (hit, miss)
//! - `host_router_reloads_total` (counter): reloads by outcome (applied, rejected)
//! - `host_router_routes` (gauge): routes in the serving table
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Prometheus exposition only when enabled in config

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with an HTTP listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_lookup(result: &'static str) {
    metrics::counter!("host_router_lookups_total", "result" => result).increment(1);
}

pub fn record_reload(outcome: &'static str) {
    metrics::counter!("host_router_reloads_total", "outcome" => outcome).increment(1);
}

pub fn record_route_count(routes: usize) {
    metrics::gauge!("host_router_routes").set(routes as f64);
}
