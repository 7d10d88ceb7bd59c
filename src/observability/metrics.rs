//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method, route, status
//! - `proxy_request_duration_seconds` (histogram): latency by method, route
//! - `proxy_upstream_requests_total` (counter): upstream answers by status
//!
//! # Design Decisions
//! - Recording is a no-op until `init_metrics` installs the exporter
//! - Route labels come from the dispatch table, never raw paths, so
//!   cardinality stays bounded

use std::net::SocketAddr;
use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::route_label;

/// Install the Prometheus exporter on `addr`. Must run inside the runtime.
///
/// Fails when the listener cannot bind or a recorder is already installed.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one finished inbound request.
pub fn record_request(method: &str, route: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "proxy_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record the status of one upstream answer.
pub fn record_upstream(status: u16) {
    metrics::counter!("proxy_upstream_requests_total", "status" => status.to_string()).increment(1);
}

/// Middleware timing every request, including preflights and 404s.
pub async fn track_requests(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = route_label(request.method(), request.uri().path());

    let response = next.run(request).await;
    record_request(&method, route, response.status().as_u16(), start);
    response
}
