//! Request logging middleware.
//!
//! Wraps each request in an `http_request` span carrying the request id so
//! service-level events logged while handling it are correlated.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, Level, info, span, warn};

use super::RequestId;

/// Logs method, path and request id on the way in, status and duration
/// on the way out. 5xx responses are logged at warn.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request_id_of(&request);

    let span = span!(
        Level::INFO,
        "http_request",
        method = %method,
        path = %uri.path(),
        request_id = %request_id
    );

    async move {
        info!("Request received");

        let start = Instant::now();
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis();
        let status = response.status().as_u16();

        if response.status().is_server_error() {
            warn!(status, duration_ms, "Response sent");
        } else {
            info!(status, duration_ms, "Response sent");
        }
        response
    }
    .instrument(span)
    .await
}

fn request_id_of(request: &Request) -> String {
    request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0.clone())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_request_id_of_reads_extension() {
        let mut request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(request_id_of(&request), "unknown");

        request
            .extensions_mut()
            .insert(RequestId("abc-123".to_string()));
        assert_eq!(request_id_of(&request), "abc-123");
    }
}
