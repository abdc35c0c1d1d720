//! HTTP-level middleware (cross-cutting concerns).
//!
//! This module is for transport/infrastructure concerns that should apply to
//! most (or all) routes, regardless of API version.
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id)
//! - Access logging / request tracing (TraceLayer)
//! - Per-request method/path/body log line (request_logger)
//! - Body size limits
//! - Global timeouts
//!
//! Notes:
//! - Defaults are intentionally conservative for production-ish behavior.
//! - Later, we can make these configurable via `Config` without changing call sites.

use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::error_handling::HandleErrorLayer;
use axum::extract::Request;
use axum::http::{StatusCode, header::HeaderName};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

/// Apply HTTP-level middleware to the given Router.
///
/// Defaults:
/// - Request-Id header: `x-request-id`
/// - Body limit: 1 MiB
/// - Timeout: 30 seconds
pub fn apply(router: Router) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let layers = ServiceBuilder::new()
        // Make the service error `Infallible` by converting errors into responses.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }))
        // Generate a request id if missing, then propagate it to the response.
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        // Limit request body size (protects against accidental/hostile large payloads).
        // Runs before request_logger, so the logger never buffers more than this.
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        // Bound request time (protects against hanging upstreams / slow clients).
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        // Access log / tracing for all requests.
        .layer(TraceLayer::new_for_http());

    // from_fn goes directly on the Router, not into the ServiceBuilder:
    // its inner-service type only resolves against a concrete Router.
    // Applied first = innermost, so the stack above (limit, timeout) still
    // runs before the logger.
    router
        .layer(middleware::from_fn(request_logger))
        .layer(layers)
}

/// Log method, path, and body for every inbound request, then continue.
///
/// Runs inside the body-limit layer, so buffering here is bounded. An
/// over-limit body surfaces as 413; any other read failure means the
/// transport is already gone, so we log what we have and hand an empty
/// body onward rather than abort here.
pub async fn request_logger(req: Request, next: Next) -> Response {
    let (parts, body) = req.into_parts();

    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) if is_length_limit(&err) => {
            tracing::warn!(
                method = %parts.method,
                path = %parts.uri.path(),
                "request body over limit"
            );
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to read request body for logging");
            Bytes::new()
        }
    };

    tracing::info!(
        method = %parts.method,
        path = %parts.uri.path(),
        body = %String::from_utf8_lossy(&bytes),
        "request"
    );

    let req = Request::from_parts(parts, Body::from(bytes));
    next.run(req).await
}

/// The limit layer signals "too large" as a `LengthLimitError` somewhere in
/// the error's source chain.
fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<http_body_util::LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::to_bytes, http::Request, routing::post};
    use tower::ServiceExt;

    async fn echo(body: String) -> String {
        body
    }

    fn test_app() -> Router {
        Router::new()
            .route("/echo", post(echo))
            .layer(middleware::from_fn(request_logger))
    }

    #[tokio::test]
    async fn body_survives_logging() {
        let req = Request::builder()
            .method("POST")
            .uri("/echo")
            .body(Body::from(r#"{"title":"hello"}"#))
            .unwrap();

        let res = test_app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"title":"hello"}"#);
    }

    #[tokio::test]
    async fn empty_body_passes_through() {
        let req = Request::builder()
            .method("POST")
            .uri("/echo")
            .body(Body::empty())
            .unwrap();

        let res = test_app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    // Same nesting as `apply`: the limit layer outside, the logger inside.
    fn limited_app(limit: usize) -> Router {
        Router::new()
            .route("/echo", post(echo))
            .layer(middleware::from_fn(request_logger))
            .layer(RequestBodyLimitLayer::new(limit))
    }

    #[tokio::test]
    async fn over_limit_body_is_rejected_with_413() {
        let req = Request::builder()
            .method("POST")
            .uri("/echo")
            .body(Body::from(vec![b'a'; 64]))
            .unwrap();

        let res = limited_app(16).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn body_within_limit_still_passes() {
        let req = Request::builder()
            .method("POST")
            .uri("/echo")
            .body(Body::from("small"))
            .unwrap();

        let res = limited_app(16).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"small");
    }
}
