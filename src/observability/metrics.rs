//! Metrics collection and exposition.
//!
//! # Metrics
//! - `wiki_requests_total` (counter): requests by route and status
//! - `wiki_request_duration_seconds` (histogram): latency by route
//! - `wiki_page_saves_total` (counter): saves by outcome (`ok` / `error`)

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished request.
pub fn record_request(route: &str, status: u16, start: Instant) {
    ::metrics::counter!(
        "wiki_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("wiki_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of a page save.
pub fn record_save(ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    ::metrics::counter!("wiki_page_saves_total", "outcome" => outcome).increment(1);
}

/// Middleware recording every request under its route template.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(request).await;
    record_request(&route, response.status().as_u16(), start);
    response
}
