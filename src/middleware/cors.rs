//! CORS handling
//!
//! Preflight requests are answered here and never reach the GraphQL engine.
//! Every other response gets the same permissive policy from `CorsLayer`.

use axum::{
    extract::Request,
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
            ACCESS_CONTROL_MAX_AGE, AUTHORIZATION, CONTENT_TYPE,
        },
        HeaderName, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization, Apollo-Require-Preflight";

/// Preflight cache lifetime (one day)
pub const MAX_AGE_SECS: u64 = 86_400;

const APOLLO_REQUIRE_PREFLIGHT: HeaderName = HeaderName::from_static("apollo-require-preflight");

/// Short-circuit `OPTIONS` requests with a 204 and the fixed CORS headers
pub async fn preflight_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        debug!("Answering CORS preflight for {}", request.uri().path());
        return preflight_response();
    }

    next.run(request).await
}

/// Response sent for every preflight request
pub fn preflight_response() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_string()),
            (ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS.to_string()),
            (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS.to_string()),
            (ACCESS_CONTROL_MAX_AGE, MAX_AGE_SECS.to_string()),
        ],
    )
        .into_response()
}

/// CORS policy applied to non-preflight responses
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, APOLLO_REQUIRE_PREFLIGHT])
        .allow_credentials(false)
        .max_age(Duration::from_secs(MAX_AGE_SECS))
}
