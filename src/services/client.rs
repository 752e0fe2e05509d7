//! HTTP client service
//!
//! Encapsulates HTTP communication with the OpenAI chat completion API

use crate::config::{ApiKey, Settings};
use crate::models::openai::*;
use crate::utils::error::{AppError, AppResult};
use crate::utils::logging::create_request_log_summary;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

/// Upstream chat completion backend
///
/// Resolvers only see this trait; the schema carries one shared instance.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one chat completion request
    async fn chat_completions(
        &self,
        api_key: &ApiKey,
        request: ChatCompletionRequest,
    ) -> AppResult<ChatCompletionResponse>;
}

/// OpenAI API client
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    endpoint: String,
}

impl OpenAIClient {
    /// Create a new client instance
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.openai.timeout))
            .user_agent(concat!("aigqlproxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.chat_completions_url(),
        })
    }

    /// Handle HTTP response
    async fn handle_response(&self, response: Response) -> AppResult<ChatCompletionResponse> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            let completion: ChatCompletionResponse = serde_json::from_slice(&bytes)?;

            debug!(choices = completion.choices.len(), "OpenAI request completed successfully");
            Ok(completion)
        } else {
            let error_text = response.text().await.unwrap_or_default();

            // Keep the upstream payload as JSON when it is JSON
            let body = serde_json::from_str::<serde_json::Value>(&error_text)
                .unwrap_or(serde_json::Value::String(error_text));

            Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl CompletionBackend for OpenAIClient {
    async fn chat_completions(
        &self,
        api_key: &ApiKey,
        request: ChatCompletionRequest,
    ) -> AppResult<ChatCompletionResponse> {
        debug!("Sending OpenAI chat completion request");

        let log_summary = create_request_log_summary(&request);
        if let Ok(summary_json) = serde_json::to_string(&log_summary) {
            debug!("Outbound request: {}", summary_json);
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", api_key.bearer())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn create_test_settings(base_url: &str, timeout: u64) -> Settings {
        let mut settings = Settings::default();
        settings.openai.base_url = base_url.to_string();
        settings.openai.timeout = timeout;
        settings
    }

    fn test_request() -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage::user("Hello")],
            temperature: Some(0.7),
        }
    }

    fn test_key() -> ApiKey {
        ApiKey::new("sk-test-key").unwrap()
    }

    #[tokio::test]
    async fn test_successful_completion() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .header("authorization", "Bearer sk-test-key")
                    .json_body_partial(
                        json!({
                            "model": "gpt-3.5-turbo",
                            "messages": [{"role": "user", "content": "Hello"}]
                        })
                        .to_string(),
                    );
                then.status(200).json_body(json!({
                    "id": "chatcmpl-1",
                    "model": "gpt-3.5-turbo-0125",
                    "choices": [{
                        "index": 0,
                        "message": {"role": "assistant", "content": "Hi!"},
                        "finish_reason": "stop"
                    }],
                    "usage": {"prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7}
                }));
            })
            .await;

        let client = OpenAIClient::new(&create_test_settings(&server.base_url(), 5)).unwrap();
        let response = client.chat_completions(&test_key(), test_request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.choices[0].message.content.as_deref(), Some("Hi!"));
        assert_eq!(response.usage.unwrap().total_tokens, 7);
    }

    #[tokio::test]
    async fn test_error_status_keeps_upstream_payload() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(429).json_body(json!({
                    "error": {
                        "message": "Rate limit reached",
                        "type": "requests",
                        "code": "rate_limit_exceeded"
                    }
                }));
            })
            .await;

        let client = OpenAIClient::new(&create_test_settings(&server.base_url(), 5)).unwrap();
        let err = client.chat_completions(&test_key(), test_request()).await.unwrap_err();

        match err {
            AppError::Upstream { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body["error"]["code"], "rate_limit_exceeded");
            }
            other => panic!("Expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_with_plain_text_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(502).body("Bad Gateway");
            })
            .await;

        let client = OpenAIClient::new(&create_test_settings(&server.base_url(), 5)).unwrap();
        let err = client.chat_completions(&test_key(), test_request()).await.unwrap_err();

        assert_eq!(err.upstream_status(), Some(502));
        assert!(matches!(
            err,
            AppError::Upstream { body: serde_json::Value::String(ref s), .. } if s == "Bad Gateway"
        ));
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).body("not json");
            })
            .await;

        let client = OpenAIClient::new(&create_test_settings(&server.base_url(), 5)).unwrap();
        let err = client.chat_completions(&test_key(), test_request()).await.unwrap_err();

        assert!(matches!(err, AppError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200)
                    .delay(Duration::from_secs(3))
                    .json_body(json!({"choices": []}));
            })
            .await;

        let client = OpenAIClient::new(&create_test_settings(&server.base_url(), 1)).unwrap();
        let err = client.chat_completions(&test_key(), test_request()).await.unwrap_err();

        assert!(matches!(err, AppError::Timeout));
    }
}
