//! Metrics collection and exposition.
//!
//! # Metrics
//! - `site_requests_total` (counter): requests by method, route, status
//! - `site_request_duration_seconds` (histogram): latency by method, route, status
//! - `site_search_pings_total` (counter): search engine pings by engine, outcome
//!
//! # Design Decisions
//! - The route label is the matched route template, never the raw path,
//!   so label cardinality stays bounded
//! - Unmatched requests share the `unmatched` label

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

const UNMATCHED_ROUTE: &str = "unmatched";

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("site_requests_total", &labels).increment(1);
    metrics::histogram!("site_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_search_ping(engine: &'static str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    metrics::counter!("site_search_pings_total", "engine" => engine, "outcome" => outcome)
        .increment(1);
}

/// Route label for a request.
pub fn route_label(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// Middleware recording count and latency of every request.
pub async fn request_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = route_label(&request);

    let response = next.run(request).await;
    record_request(&method, response.status().as_u16(), &route, start);
    response
}
