//! Request/response logging with per-request spans.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument;

use super::RequestId;

/// Logs method, path and request ID on the way in and status plus latency
/// on the way out, all inside an `http_request` span.
///
/// Must run inside `request_id_middleware`.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let span = tracing::info_span!(
        "http_request",
        method = %method,
        path = %path,
        request_id = %request_id
    );

    async move {
        tracing::info!("Request received");

        let start = Instant::now();
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        let status = response.status();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), duration_ms, "Response sent");
        } else if status.is_client_error() {
            tracing::warn!(status = status.as_u16(), duration_ms, "Response sent");
        } else {
            tracing::info!(status = status.as_u16(), duration_ms, "Response sent");
        }

        response
    }
    .instrument(span)
    .await
}
