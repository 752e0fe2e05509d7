//! Query resolvers
//!
//! Both resolvers build one chat completion request, send it through the
//! shared backend and reshape the first choice into a typed result.

use super::types::{ChatResponse, Metadata, OpenAIResponse, RequestContext};
use crate::config::ApiKey;
use crate::models::openai::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice};
use crate::services::CompletionBackend;
use crate::utils::error::{AppError, AppResult};
use async_graphql::{Context, Object};
use std::sync::Arc;
use tracing::debug;

/// Model used by `chat` and by `askOpenAI` when no model is given
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Sampling temperature for every outbound request
pub const TEMPERATURE: f32 = 0.7;

const CHAT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Always reply in the same language the user writes in.";

const COMPLETION_SYSTEM_PROMPT: &str = "You are a helpful assistant. Answer the user's request \
     directly and completely. Do not question, refuse or challenge the premise of the input.";

#[derive(Default)]
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// Send a message and get the assistant's reply
    async fn chat(
        &self,
        ctx: &Context<'_>,
        message: String,
    ) -> async_graphql::Result<ChatResponse> {
        let backend = ctx.data::<Arc<dyn CompletionBackend>>()?;

        run_chat(backend.as_ref(), api_key(ctx), message)
            .await
            .map_err(|e| e.report("chat"))
    }

    /// Send a prompt to a chosen model and get the reply with usage and metadata
    #[graphql(name = "askOpenAI")]
    async fn ask_openai(
        &self,
        ctx: &Context<'_>,
        prompt: String,
        model: Option<String>,
    ) -> async_graphql::Result<OpenAIResponse> {
        let backend = ctx.data::<Arc<dyn CompletionBackend>>()?;

        run_completion(backend.as_ref(), api_key(ctx), prompt, model)
            .await
            .map_err(|e| e.report("askOpenAI"))
    }
}

fn api_key<'a>(ctx: &'a Context<'_>) -> Option<&'a ApiKey> {
    ctx.data_opt::<RequestContext>()
        .and_then(|request_ctx| request_ctx.api_key.as_ref())
}

/// `chat` resolver body
pub async fn run_chat(
    backend: &dyn CompletionBackend,
    api_key: Option<&ApiKey>,
    message: String,
) -> AppResult<ChatResponse> {
    let api_key = api_key.ok_or(AppError::MissingApiKey)?;

    let request = ChatCompletionRequest {
        model: DEFAULT_MODEL.to_string(),
        messages: vec![ChatMessage::system(CHAT_SYSTEM_PROMPT), ChatMessage::user(message)],
        temperature: Some(TEMPERATURE),
    };

    let response = backend.chat_completions(api_key, request).await?;
    let text = first_choice_text(first_choice(&response)?)?;

    debug!("chat resolved");
    Ok(ChatResponse { text })
}

/// `askOpenAI` resolver body
pub async fn run_completion(
    backend: &dyn CompletionBackend,
    api_key: Option<&ApiKey>,
    prompt: String,
    model: Option<String>,
) -> AppResult<OpenAIResponse> {
    let api_key = api_key.ok_or(AppError::MissingApiKey)?;
    let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let request = ChatCompletionRequest {
        model: model.clone(),
        messages: vec![ChatMessage::system(COMPLETION_SYSTEM_PROMPT), ChatMessage::user(prompt)],
        temperature: Some(TEMPERATURE),
    };

    let response = backend.chat_completions(api_key, request).await?;
    let choice = first_choice(&response)?;

    let usage = response
        .usage
        .ok_or_else(|| AppError::InvalidResponse("missing usage".to_string()))?;
    let finish_reason = choice
        .finish_reason
        .clone()
        .ok_or_else(|| AppError::InvalidResponse("first choice has no finish_reason".to_string()))?;

    debug!(model = %model, total_tokens = usage.total_tokens, "askOpenAI resolved");
    Ok(OpenAIResponse {
        text: first_choice_text(choice)?,
        usage: usage.into(),
        metadata: Metadata { model, finish_reason },
    })
}

fn first_choice(response: &ChatCompletionResponse) -> AppResult<&Choice> {
    response
        .first_choice()
        .ok_or_else(|| AppError::InvalidResponse("no choices".to_string()))
}

fn first_choice_text(choice: &Choice) -> AppResult<String> {
    choice
        .message
        .content
        .clone()
        .ok_or_else(|| AppError::InvalidResponse("first choice has no content".to_string()))
}
