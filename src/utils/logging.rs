//! Logging utilities
//!
//! Shared logging configuration and helper functions

use crate::models::openai::{ChatCompletionRequest, ChatMessage};

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let head: String = s.chars().take(max_len).collect();
        format!("{}... ({} chars truncated)", head, s.chars().count() - max_len)
    } else {
        s.to_string()
    }
}

/// Create a filtered version of a chat message for logging
fn filter_message(msg: &ChatMessage) -> serde_json::Value {
    // System instructions are fixed, keep them short
    let max_len = if msg.role == "system" { 60 } else { 200 };

    serde_json::json!({
        "role": msg.role,
        "content": truncate_content(&msg.content, max_len),
    })
}

/// Create a filtered summary of an outbound request for logging
/// Keeps original structure but truncates verbose content
pub fn create_request_log_summary(request: &ChatCompletionRequest) -> serde_json::Value {
    let filtered_messages: Vec<serde_json::Value> =
        request.messages.iter().map(filter_message).collect();

    serde_json::json!({
        "model": request.model,
        "temperature": request.temperature,
        "messages": filtered_messages,
    })
}
