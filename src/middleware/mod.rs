//! Middleware module
//!
//! CORS preflight handling, body size limit and request logging

pub mod cors;
pub mod limit;
pub mod logging;

pub use cors::{cors_layer, preflight_middleware};
pub use limit::body_limit_middleware;
pub use logging::request_logging_middleware;
