/// OpenAI API client (raw HTTP via reqwest)
///
/// API Documentation: https://platform.openai.com/docs/api-reference/chat
///
/// Endpoints:
/// - POST https://api.openai.com/v1/chat/completions
pub mod types;

pub use self::types::{
    OpenAiChoice, OpenAiMessage, OpenAiRequest, OpenAiResponse, OpenAiResponseFormat,
    OpenAiResponseMessage, OpenAiUsage,
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

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const ENDPOINT_CHAT: &str = "/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const TIMEOUT_SECS: u64 = 30;

// ============================================================================
// CLIENT IMPLEMENTATION
// ============================================================================

/// OpenAI API client
pub struct OpenAiClient {
    api_key: String,
    client: Client,
    model: String,
    timeout: Duration,
    stats: Arc<ApiStatsTracker>,
    enabled: bool,
}

impl OpenAiClient {
    /// Create a new OpenAI client
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key (from https://platform.openai.com/)
    /// * `model` - Optional model override (defaults to "gpt-4o-mini")
    /// * `enabled` - Whether the client is enabled
    pub fn new(api_key: String, model: Option<String>, enabled: bool) -> Result<Self, String> {
        if api_key.trim().is_empty() {
            return Err("OpenAI API key cannot be empty".to_string());
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

    /// Convert unified ChatRequest to OpenAI-specific format
    fn build_openai_request(&self, request: ChatRequest) -> OpenAiRequest {
        let messages = request
            .messages
            .into_iter()
            .map(|msg| OpenAiMessage {
                role: match msg.role {
                    MessageRole::System => "system".to_string(),
                    MessageRole::User => "user".to_string(),
                    MessageRole::Assistant => "assistant".to_string(),
                },
                content: msg.content,
            })
            .collect();

        OpenAiRequest {
            model: request.model,
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request
                .response_format
                .map(|rf| OpenAiResponseFormat { type_: rf.type_ }),
        }
    }

    /// Convert OpenAI response to unified ChatResponse
    fn parse_openai_response(
        &self,
        response: OpenAiResponse,
        latency_ms: f64,
    ) -> Result<ChatResponse, LlmError> {
        let choice = response
            .choices
            .first()
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: "openai".to_string(),
                message: "No choices in response".to_string(),
            })?;

        let usage = response
            .usage
            .as_ref()
            .map(|u| Usage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(ChatResponse::new(
            choice.message.content.clone(),
            usage,
            choice
                .finish_reason
                .clone()
                .unwrap_or_else(|| "stop".to_string()),
            response.model,
            latency_ms,
        ))
    }

    /// Execute the API call
    async fn execute_request(
        &self,
        request: OpenAiRequest,
    ) -> Result<(OpenAiResponse, f64), LlmError> {
        if !self.enabled {
            return Err(LlmError::ProviderDisabled {
                provider: "openai".to_string(),
            });
        }

        let url = format!("{}{}", OPENAI_BASE_URL, ENDPOINT_CHAT);

        logger::debug(
            LogTag::Llm,
            &format!("[OPENAI] Calling chat completions: model={}", request.model),
        );
        logger::verbose(
            LogTag::Llm,
            &format!(
                "[OPENAI] Request body: {}",
                serde_json::to_string(&request).unwrap_or_default()
            ),
        );

        let start = Instant::now();
        let response_result = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await;

        let elapsed = start.elapsed().as_millis() as f64;

        let response = response_result.map_err(|e| {
            if e.is_timeout() {
                LlmError::Timeout {
                    provider: "openai".to_string(),
                    timeout_ms: self.timeout.as_millis() as u64,
                }
            } else {
                LlmError::NetworkError {
                    provider: "openai".to_string(),
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
                401 => LlmError::AuthError {
                    provider: "openai".to_string(),
                    message: "Invalid API key".to_string(),
                },
                429 => LlmError::RateLimited {
                    provider: "openai".to_string(),
                    retry_after_ms: retry_after,
                },
                _ => LlmError::ApiError {
                    provider: "openai".to_string(),
                    status_code: status.as_u16(),
                    message: error_body,
                },
            });
        }

        let openai_response =
            response
                .json::<OpenAiResponse>()
                .await
                .map_err(|e| LlmError::ParseError {
                    provider: "openai".to_string(),
                    message: format!("Failed to parse response: {}", e),
                })?;

        Ok((openai_response, elapsed))
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn call(&self, request: ChatRequest) -> Result<ChatResponse, LlmError> {
        // Use the model from request, or fallback to client's default
        let mut request = request;
        if request.model.is_empty() {
            request.model = self.model.clone();
        }

        let openai_request = self.build_openai_request(request);

        let (openai_response, latency_ms) = match self.execute_request(openai_request).await {
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

        self.parse_openai_response(openai_response, latency_ms)
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
        let client = OpenAiClient::new("test-key".to_string(), Some("gpt-4o".to_string()), true);
        assert!(client.is_ok());
        let client = client.unwrap();
        assert_eq!(client.model, "gpt-4o");
        assert!(client.is_enabled());
    }

    #[test]
    fn test_client_creation_empty_key() {
        let client = OpenAiClient::new("  ".to_string(), None, true);
        assert!(client.is_err());
    }

    #[test]
    fn test_build_openai_request() {
        let client = OpenAiClient::new("test-key".to_string(), None, true).unwrap();

        let request = ChatRequest::new(
            "gpt-4o-mini",
            vec![
                ChatMessage::system("You are a tax analyst"),
                ChatMessage::user("Analyze this return"),
            ],
        )
        .with_temperature(0.2)
        .with_json_mode();

        let openai_req = client.build_openai_request(request);

        assert_eq!(openai_req.model, "gpt-4o-mini");
        assert_eq!(openai_req.messages.len(), 2);
        assert_eq!(openai_req.messages[0].role, "system");
        assert_eq!(openai_req.messages[1].role, "user");
        assert_eq!(openai_req.temperature, Some(0.2));
        assert_eq!(
            openai_req.response_format.map(|rf| rf.type_),
            Some("json_object".to_string())
        );
    }

    #[test]
    fn test_provider() {
        let client = OpenAiClient::new("test-key".to_string(), None, true).unwrap();
        assert_eq!(client.provider(), Provider::OpenAi);
    }
}
