//! Request body size limit
//!
//! The GraphQL extractor reads the body stream directly and ignores
//! `DefaultBodyLimit`, so the limit is enforced here on both the declared
//! `Content-Length` and the bytes actually received.

use axum::{
    body::{self, Body},
    extract::{Request, State},
    http::{header::CONTENT_LENGTH, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

/// Reject bodies larger than `max_size` bytes with 413
pub async fn body_limit_middleware(
    State(max_size): State<usize>,
    request: Request,
    next: Next,
) -> Response {
    let declared = request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());

    if let Some(len) = declared.filter(|len| *len > max_size) {
        warn!("Request body too large: declared {} bytes, limit {}", len, max_size);
        return StatusCode::PAYLOAD_TOO_LARGE.into_response();
    }

    let (parts, body) = request.into_parts();
    let bytes = match body::to_bytes(body, max_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Request body rejected, limit {} bytes: {}", max_size, e);
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware::from_fn_with_state, routing::post, Router};
    use tower::ServiceExt;

    fn app(limit: usize) -> Router {
        Router::new()
            .route("/", post(|body: String| async move { body.len().to_string() }))
            .layer(from_fn_with_state(limit, body_limit_middleware))
    }

    #[tokio::test]
    async fn test_body_within_limit_passes_through() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from("x".repeat(10)))
            .unwrap();

        let response = app(16).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"10");
    }

    #[tokio::test]
    async fn test_body_without_content_length_is_measured() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from("x".repeat(100)))
            .unwrap();

        let response = app(16).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
