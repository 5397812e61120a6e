/// OpenAI API request/response types
///
/// These types match the Chat Completions wire format exactly.
/// API Documentation: https://platform.openai.com/docs/api-reference/chat/create
use serde::{Deserialize, Serialize};

// ============================================================================
// REQUEST TYPES
// ============================================================================

/// OpenAI chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct OpenAiRequest {
    /// Model ID (e.g., "gpt-4o-mini")
    pub model: String,

    pub messages: Vec<OpenAiMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Response format (for JSON mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<OpenAiResponseFormat>,
}

/// Message in OpenAI format
#[derive(Debug, Clone, Serialize)]
pub struct OpenAiMessage {
    /// Role: "system", "user", or "assistant"
    pub role: String,
    pub content: String,
}

/// Response format specification
#[derive(Debug, Clone, Serialize)]
pub struct OpenAiResponseFormat {
    /// Format type: "text" or "json_object"
    #[serde(rename = "type")]
    pub type_: String,
}

// ============================================================================
// RESPONSE TYPES
// ============================================================================

/// OpenAI chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiResponse {
    /// Model used for generation
    pub model: String,

    pub choices: Vec<OpenAiChoice>,

    #[serde(default)]
    pub usage: Option<OpenAiUsage>,
}

/// A single choice in the response
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiChoice {
    pub message: OpenAiResponseMessage,

    /// Reason for stopping ("stop", "length", "content_filter", etc.)
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Response message from the assistant
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiResponseMessage {
    /// Role (always "assistant")
    #[serde(default)]
    pub role: String,
    pub content: String,
}

/// Token usage statistics
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        let raw = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1725000000,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "{\"ok\":true}"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 20, "completion_tokens": 8, "total_tokens": 28}
        }"#;

        let response: OpenAiResponse = serde_json::from_str(raw).expect("parse");
        assert_eq!(response.model, "gpt-4o-mini");
        assert_eq!(response.choices[0].message.content, "{\"ok\":true}");
        assert_eq!(response.usage.as_ref().map(|u| u.total_tokens), Some(28));
    }
}
