//! Error handling module
//!
//! Defines error types and how they surface to GraphQL clients

use async_graphql::ErrorExtensions;
use thiserror::Error;
use tracing::error;

/// Message returned to clients for every failure except a missing credential
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to get response from OpenAI";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("OpenAI API key is not configured")]
    MissingApiKey,

    /// Non-success status from the upstream API
    #[error("Upstream API error: status {status} - {body}")]
    Upstream {
        status: u16,
        body: serde_json::Value,
    },

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Upstream did not answer within the configured timeout
    #[error("Upstream request timed out")]
    Timeout,

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Upstream answered 2xx but the body lacks a required field
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout
        } else {
            AppError::HttpClient(err)
        }
    }
}

impl AppError {
    /// Get error kind string, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingApiKey => "configuration_error",
            AppError::Upstream { .. } => "upstream_error",
            AppError::Timeout => "timeout_error",
            AppError::HttpClient(_) => "http_client_error",
            AppError::Serialization(_) => "serialization_error",
            AppError::InvalidResponse(_) => "invalid_response_error",
        }
    }

    /// Machine-readable code placed in the GraphQL error extensions
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingApiKey => "CONFIGURATION_ERROR",
            AppError::Upstream { .. } => "UPSTREAM_ERROR",
            AppError::Timeout => "UPSTREAM_TIMEOUT",
            AppError::HttpClient(_)
            | AppError::Serialization(_)
            | AppError::InvalidResponse(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to clients
    pub fn public_message(&self) -> String {
        match self {
            AppError::MissingApiKey => self.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Upstream HTTP status, when the failure came from one
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            AppError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Log the full error once and convert it to a sanitized GraphQL error
    pub fn report(self, operation: &str) -> async_graphql::Error {
        error!(
            operation = operation,
            kind = self.kind(),
            upstream_status = self.upstream_status(),
            "Resolver failed: {}",
            self
        );
        self.to_graphql_error()
    }

    /// Convert to a GraphQL error without logging
    pub fn to_graphql_error(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.public_message()).extend_with(|_, ext| ext.set("code", code))
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_kinds() {
        assert_eq!(AppError::MissingApiKey.kind(), "configuration_error");
        assert_eq!(
            AppError::Upstream { status: 429, body: json!({}) }.kind(),
            "upstream_error"
        );
        assert_eq!(AppError::Timeout.kind(), "timeout_error");
        assert_eq!(AppError::InvalidResponse("x".to_string()).kind(), "invalid_response_error");
    }

    #[test]
    fn test_configuration_error_keeps_its_message() {
        let err = AppError::MissingApiKey;
        assert_eq!(err.public_message(), "OpenAI API key is not configured");
        assert_eq!(err.code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_upstream_detail_is_not_public() {
        let err = AppError::Upstream {
            status: 429,
            body: json!({"error": {"message": "Rate limit reached for org-secret"}}),
        };

        assert!(err.to_string().contains("org-secret"));
        assert_eq!(err.public_message(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(err.upstream_status(), Some(429));

        let gql = err.report("askOpenAI");
        assert_eq!(gql.message, GENERIC_FAILURE_MESSAGE);
        assert!(!format!("{:?}", gql).contains("org-secret"));
    }

    #[test]
    fn test_generic_failures_share_message() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        for err in [
            AppError::Timeout,
            AppError::Serialization(parse_err),
            AppError::InvalidResponse("no choices".to_string()),
        ] {
            assert_eq!(err.to_graphql_error().message, GENERIC_FAILURE_MESSAGE);
        }
    }
}
