//! HTTP handlers module
//!
//! Builds the application router: every path is served by the GraphQL
//! handler, behind CORS and logging middleware

use crate::config::Settings;
use crate::graphql::{self, build_schema, ProxySchema};
use crate::middleware::{
    body_limit_middleware, cors_layer, preflight_middleware, request_logging_middleware,
};
use crate::services::{CompletionBackend, OpenAIClient};
use anyhow::Result;
use axum::{
    middleware::{from_fn, from_fn_with_state},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Application state
///
/// Built once at startup and shared read-only by every request.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub schema: ProxySchema,
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    let client = OpenAIClient::new(&settings)?;
    create_router_with_backend(settings, Arc::new(client))
}

/// Create application router around an explicit completion backend
pub fn create_router_with_backend(
    settings: Settings,
    backend: Arc<dyn CompletionBackend>,
) -> Result<Router> {
    if settings.openai.api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; every query will fail with a configuration error");
    }

    let max_request_size = settings.request.max_request_size;

    // Create application state
    let app_state = Arc::new(AppState {
        schema: build_schema(backend),
        settings,
    });

    // Preflight sits outside the CORS layer so OPTIONS never reaches it
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_logging_middleware))
        .layer(from_fn(preflight_middleware))
        .layer(cors_layer())
        .layer(from_fn_with_state(max_request_size, body_limit_middleware));

    let router = Router::new()
        .fallback(graphql::graphql_handler)
        .with_state(app_state)
        .layer(middleware_stack);

    Ok(router)
}
