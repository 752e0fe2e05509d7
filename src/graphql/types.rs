//! GraphQL output types

use crate::models::openai;
use async_graphql::SimpleObject;

/// Result of the `chat` query
#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct ChatResponse {
    pub text: String,
}

/// Result of the `askOpenAI` query
#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct OpenAIResponse {
    pub text: String,
    pub usage: Usage,
    pub metadata: Metadata,
}

/// Token accounting copied from the upstream payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, SimpleObject)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Requested model and the upstream stop reason
#[derive(Debug, Clone, PartialEq, SimpleObject)]
pub struct Metadata {
    pub model: String,
    pub finish_reason: String,
}

impl From<openai::Usage> for Usage {
    fn from(usage: openai::Usage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

/// Per-request data handed to resolvers
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub api_key: Option<crate::config::ApiKey>,
}
