//! GraphQL API module
//!
//! Declares the schema (two queries, no mutations or subscriptions) and the
//! HTTP handler that executes requests against it.

pub mod query;
pub mod types;

pub use query::QueryRoot;
pub use types::*;

use crate::handlers::AppState;
use crate::services::CompletionBackend;
use async_graphql::{EmptyMutation, EmptySubscription, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use std::sync::Arc;

/// GraphQL schema type
pub type ProxySchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Build the GraphQL schema around one shared completion backend
pub fn build_schema(backend: Arc<dyn CompletionBackend>) -> ProxySchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(backend)
        .finish()
}

/// GraphQL query handler
///
/// Mounted as the router fallback, so every path and method other than a
/// CORS preflight lands here.
pub async fn graphql_handler(
    State(state): State<Arc<AppState>>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let request = req.into_inner().data(RequestContext {
        api_key: state.settings.openai.api_key.clone(),
    });

    state.schema.execute(request).await.into()
}
