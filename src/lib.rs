//! AI GraphQL Proxy Library
//!
//! Exposes a small GraphQL API whose resolvers forward to the OpenAI chat completion API

pub mod config;
pub mod graphql;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::Settings;
pub use graphql::{build_schema, ProxySchema};
pub use handlers::{create_router, create_router_with_backend, AppState};
pub use models::openai;
pub use services::{CompletionBackend, OpenAIClient};
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
