/// Google Gemini API request/response types
///
/// These types match the generateContent wire format exactly.
/// API Documentation: https://ai.google.dev/api/rest
use serde::{Deserialize, Serialize};

// ============================================================================
// REQUEST TYPES
// ============================================================================

/// Gemini chat completion request
#[derive(Debug, Clone, Serialize)]
pub struct GeminiRequest {
    /// Conversation turns (user/model roles only)
    pub contents: Vec<GeminiContent>,

    /// System instruction (separate from contents)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "systemInstruction")]
    pub system_instruction: Option<GeminiSystemInstruction>,

    /// Generation configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "generationConfig")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

/// A conversation turn in Gemini format
#[derive(Debug, Clone, Serialize)]
pub struct GeminiContent {
    pub parts: Vec<GeminiPart>,

    /// Role: "user" or "model" (no "system" role in contents)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// System instruction wrapper
#[derive(Debug, Clone, Serialize)]
pub struct GeminiSystemInstruction {
    pub parts: Vec<GeminiPart>,
}

/// A single text part
#[derive(Debug, Clone, Serialize)]
pub struct GeminiPart {
    pub text: String,
}

/// Generation configuration
#[derive(Debug, Clone, Serialize)]
pub struct GeminiGenerationConfig {
    /// Response MIME type ("application/json" for JSON mode)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "maxOutputTokens")]
    pub max_output_tokens: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

// ============================================================================
// RESPONSE TYPES
// ============================================================================

/// Gemini chat completion response
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,

    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<GeminiUsageMetadata>,
}

/// A single candidate response
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidate {
    pub content: GeminiResponseContent,

    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

/// Generated content from the model
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponseContent {
    #[serde(default)]
    pub parts: Vec<GeminiResponsePart>,

    /// Role (always "model")
    #[serde(default)]
    pub role: String,
}

/// A single part of generated content
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponsePart {
    pub text: String,
}

/// Token usage metadata
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiUsageMetadata {
    #[serde(rename = "promptTokenCount")]
    #[serde(default)]
    pub prompt_token_count: u32,

    #[serde(rename = "candidatesTokenCount")]
    #[serde(default)]
    pub candidates_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_names() {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: "hello".to_string(),
                }],
                role: Some("user".to_string()),
            }],
            system_instruction: Some(GeminiSystemInstruction {
                parts: vec![GeminiPart {
                    text: "persona".to_string(),
                }],
            }),
            generation_config: Some(GeminiGenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                max_output_tokens: Some(256),
                temperature: Some(0.2),
            }),
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("systemInstruction").is_some());
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 256);
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "{\"ok\":true}"}], "role": "model"},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5}
        }"#;

        let response: GeminiResponse = serde_json::from_str(raw).expect("parse");
        assert_eq!(response.candidates.len(), 1);
        assert_eq!(
            response.candidates[0].finish_reason.as_deref(),
            Some("STOP")
        );
        assert_eq!(
            response.usage_metadata.as_ref().map(|u| u.prompt_token_count),
            Some(10)
        );
    }
}
