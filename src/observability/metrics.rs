//! Metrics collection and exposition.
//!
//! # Metrics
//! - `widget_config_requests_total` (counter): live endpoint calls by `matched`
//! - `widget_resolution_total` (counter): pipeline source outcomes by
//!   `strategy` and `outcome`
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Prometheus exporter runs its own HTTP listener

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Result of asking one pipeline source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Hit,
    Miss,
    Failed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Hit => "hit",
            Outcome::Miss => "miss",
            Outcome::Failed => "failed",
        }
    }
}

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

/// Count a live resolution request.
pub fn record_config_request(matched: bool) {
    metrics::counter!(
        "widget_config_requests_total",
        "matched" => if matched { "true" } else { "false" }
    )
    .increment(1);
}

/// Count one source attempt in the resolution pipeline.
pub fn record_resolution(strategy: &'static str, outcome: Outcome) {
    metrics::counter!(
        "widget_resolution_total",
        "strategy" => strategy,
        "outcome" => outcome.as_str()
    )
    .increment(1);
}
