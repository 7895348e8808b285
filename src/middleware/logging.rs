//! Logging middleware
//!
//! Records HTTP request and response information

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// Response header carrying the generated request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request logging middleware
///
/// Wraps each request in a span keyed by a fresh request id. Only the method
/// and path are logged; headers are not, since they carry the caller's token.
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    async move {
        let start_time = Instant::now();
        info!("Request started: {} {}", method, path);

        let mut response = next.run(request).await;

        let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("Authentication failed: {} {} - Duration: {:.2}ms", method, path, duration_ms);
        } else if status.is_client_error() {
            warn!("Client error: {} - Duration: {:.2}ms", status, duration_ms);
        } else if status.is_server_error() {
            warn!("Server error: {} - Duration: {:.2}ms", status, duration_ms);
        } else {
            info!("Request completed: {} - Duration: {:.2}ms", status, duration_ms);
        }

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }

        response
    }
    .instrument(span)
    .await
}
