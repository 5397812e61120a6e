/// Google Gemini API client (raw HTTP via reqwest)
///
/// API Documentation: https://ai.google.dev/api/rest
///
/// Endpoints:
/// - POST https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent
///
/// JSON mode is requested through generationConfig.responseMimeType, so the
/// model replies with a bare JSON object instead of fenced Markdown.
pub mod types;

pub use self::types::{
    GeminiCandidate, GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest,
    GeminiResponse, GeminiSystemInstruction,
};

use crate::apis::llm::{
    ChatRequest, ChatResponse, LlmClient, LlmError, MessageRole, Provider, Usage,
};
use crate::apis::stats::{ApiStats, ApiStatsTracker};
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};

// ============================================================================
// API CONFIGURATION
// ============================================================================

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const TIMEOUT_SECS: u64 = 30;

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

/// Google Gemini API client
pub struct GeminiClient {
    api_key: String,
    client: Client,
    model: String,
    timeout: Duration,
    stats: Arc<ApiStatsTracker>,
    enabled: bool,
}

impl GeminiClient {
    /// Create a new Gemini client
    ///
    /// # Arguments
    /// * `api_key` - Gemini API key (from https://aistudio.google.com/)
    /// * `model` - Optional model override (defaults to "gemini-2.0-flash")
    /// * `enabled` - Whether the client is enabled
    pub fn new(api_key: String, model: Option<String>, enabled: bool) -> Result<Self, String> {
        if api_key.trim().is_empty() {
            return Err("Gemini API key cannot be empty".to_string());
        }

        Ok(Self {
            api_key,
            client: Client::new(),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(TIMEOUT_SECS),
            stats: Arc::new(ApiStatsTracker::new()),
            enabled,
        })
    }

    /// Convert unified ChatRequest to Gemini-specific format
    ///
    /// System messages become the systemInstruction; user/assistant turns map
    /// to contents with roles "user"/"model".
    fn build_gemini_request(&self, request: ChatRequest) -> GeminiRequest {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for msg in request.messages {
            match msg.role {
                MessageRole::System => system_parts.push(GeminiPart { text: msg.content }),
                MessageRole::User => contents.push(GeminiContent {
                    parts: vec![GeminiPart { text: msg.content }],
                    role: Some("user".to_string()),
                }),
                MessageRole::Assistant => contents.push(GeminiContent {
                    parts: vec![GeminiPart { text: msg.content }],
                    role: Some("model".to_string()),
                }),
            }
        }

        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(GeminiSystemInstruction {
                parts: system_parts,
            })
        };

        let wants_json = request
            .response_format
            .as_ref()
            .map(|rf| rf.type_ == "json_object")
            .unwrap_or(false);

        let generation_config =
            if wants_json || request.temperature.is_some() || request.max_tokens.is_some() {
                Some(GeminiGenerationConfig {
                    response_mime_type: wants_json.then(|| "application/json".to_string()),
                    max_output_tokens: request.max_tokens,
                    temperature: request.temperature,
                })
            } else {
                None
            };

        GeminiRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    /// Convert Gemini response to unified ChatResponse
    fn parse_gemini_response(
        &self,
        response: GeminiResponse,
        model: &str,
        latency_ms: f64,
    ) -> Result<ChatResponse, LlmError> {
        let candidate = response
            .candidates
            .first()
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: "gemini".to_string(),
                message: "No candidates in response".to_string(),
            })?;

        let content = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("");

        if content.is_empty() {
            return Err(LlmError::InvalidResponse {
                provider: "gemini".to_string(),
                message: "Candidate contained no text parts".to_string(),
            });
        }

        let usage = response
            .usage_metadata
            .map(|u| Usage::new(u.prompt_token_count, u.candidates_token_count))
            .unwrap_or_default();

        Ok(ChatResponse::new(
            content,
            usage,
            candidate
                .finish_reason
                .clone()
                .unwrap_or_else(|| "STOP".to_string()),
            model,
            latency_ms,
        ))
    }

    /// Execute the API call
    async fn execute_request(
        &self,
        model: &str,
        request: GeminiRequest,
    ) -> Result<(GeminiResponse, f64), LlmError> {
        if !self.enabled {
            return Err(LlmError::ProviderDisabled {
                provider: "gemini".to_string(),
            });
        }

        let url = format!("{}/models/{}:generateContent", GEMINI_BASE_URL, model);

        logger::debug(
            LogTag::Llm,
            &format!("[GEMINI] Calling generateContent: model={}", model),
        );
        logger::verbose(
            LogTag::Llm,
            &format!(
                "[GEMINI] Request body: {}",
                serde_json::to_string(&request).unwrap_or_default()
            ),
        );

        let start = Instant::now();
        let response_result = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await;

        let elapsed = start.elapsed().as_millis() as f64;

        let response = response_result.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout {
                    provider: "gemini".to_string(),
                    timeout_ms: self.timeout.as_millis() as u64,
                }
            } else {
                LlmError::NetworkError {
                    provider: "gemini".to_string(),
                    message: format!("Request failed: {}", e),
                }
            }
        })?;

        let status = response.status();

        if !status.is_success() {
            // Parse retry-after header BEFORE consuming body
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(|s| s * 1000);

            let error_body = response.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                401 | 403 => LlmError::AuthError {
                    provider: "gemini".to_string(),
                    message: "Invalid API key".to_string(),
                },
                429 => LlmError::RateLimited {
                    provider: "gemini".to_string(),
                    retry_after_ms: retry_after,
                },
                _ => LlmError::ApiError {
                    provider: "gemini".to_string(),
                    status_code: status.as_u16(),
                    message: error_body,
                },
            });
        }

        let gemini_response =
            response
                .json::<GeminiResponse>()
                .await
                .map_err(|e| LlmError::ParseError {
                    provider: "gemini".to_string(),
                    message: format!("Failed to parse response: {}", e),
                })?;

        Ok((gemini_response, elapsed))
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn call(&self, request: ChatRequest) -> Result<ChatResponse, LlmError> {
        // Use the model from request, or fallback to client's default
        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        let gemini_request = self.build_gemini_request(request);

        let (gemini_response, latency_ms) =
            match self.execute_request(&model, gemini_request).await {
                Ok((resp, lat)) => {
                    self.stats.record_request(true, lat).await;
                    (resp, lat)
                }
                Err(e) => {
                    self.stats.record_request(false, 0.0).await;
                    self.stats.record_error(e.to_string()).await;
                    return Err(e);
                }
            };

        self.parse_gemini_response(gemini_response, &model, latency_ms)
    }

    async fn get_stats(&self) -> ApiStats {
        self.stats.get_stats().await
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::llm::ChatMessage;

    #[test]
    fn test_client_creation() {
        let client = GeminiClient::new(
            "test-key".to_string(),
            Some("gemini-1.5-pro".to_string()),
            true,
        );
        assert!(client.is_ok());
        let client = client.unwrap();
        assert_eq!(client.model, "gemini-1.5-pro");
        assert!(client.is_enabled());
    }

    #[test]
    fn test_client_creation_with_defaults() {
        let client = GeminiClient::new("test-key".to_string(), None, true);
        assert!(client.is_ok());
        assert_eq!(client.unwrap().model, DEFAULT_MODEL);
    }

    #[test]
    fn test_client_creation_empty_key() {
        let client = GeminiClient::new("".to_string(), None, true);
        assert!(client.is_err());
    }

    #[test]
    fn test_build_gemini_request() {
        let client = GeminiClient::new("test-key".to_string(), None, true).unwrap();

        let request = ChatRequest::new(
            "gemini-2.0-flash",
            vec![
                ChatMessage::system("You are a tax analyst"),
                ChatMessage::user("Analyze this return"),
                ChatMessage {
                    role: MessageRole::Assistant,
                    content: "Prior assessment".to_string(),
                },
            ],
        )
        .with_temperature(0.2)
        .with_max_tokens(512)
        .with_json_mode();

        let gemini_req = client.build_gemini_request(request);

        // System message goes to systemInstruction; assistant turns get the
        // "model" role in contents
        assert_eq!(gemini_req.contents.len(), 2);
        assert_eq!(gemini_req.contents[0].role.as_deref(), Some("user"));
        assert_eq!(gemini_req.contents[1].role.as_deref(), Some("model"));
        let system = gemini_req.system_instruction.expect("system instruction");
        assert_eq!(system.parts[0].text, "You are a tax analyst");

        let gen_config = gemini_req.generation_config.expect("generation config");
        assert_eq!(
            gen_config.response_mime_type.as_deref(),
            Some("application/json")
        );
        assert_eq!(gen_config.temperature, Some(0.2));
        assert_eq!(gen_config.max_output_tokens, Some(512));
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let client = GeminiClient::new("test-key".to_string(), None, true).unwrap();
        let raw = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}], "role": "model"},
                "finishReason": "STOP"
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(raw).unwrap();

        let parsed = client
            .parse_gemini_response(response, "gemini-2.0-flash", 12.0)
            .expect("parsed");
        assert_eq!(parsed.content, "{\"a\":1}");
        assert_eq!(parsed.finish_reason, "STOP");
    }

    #[test]
    fn test_parse_response_no_candidates() {
        let client = GeminiClient::new("test-key".to_string(), None, true).unwrap();
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(
            client.parse_gemini_response(response, DEFAULT_MODEL, 0.0),
            Err(LlmError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_provider() {
        let client = GeminiClient::new("test-key".to_string(), None, true).unwrap();
        assert_eq!(client.provider(), Provider::Gemini);
    }
}
