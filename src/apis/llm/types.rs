/// Unified chat-completion types
///
/// The audit engine builds a `ChatRequest` (system persona + user filing
/// data, JSON mode on) and receives a `ChatResponse`; each provider client
/// translates these to and from its own wire format. Keeping the contract
/// here means the engine never sees provider-specific types.
use serde::{Deserialize, Serialize};
use std::fmt;

/// One conversation turn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    /// System turn: the analyst persona and output schema
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// User turn: the rendered filing data
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Chat roles; providers map these onto their own role vocabulary
/// (Gemini has no system role in contents and calls the assistant "model")
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A chat-completion request in provider-neutral form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier; empty means the client's configured default
    pub model: String,

    pub messages: Vec<ChatMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Set when the reply must be a bare JSON object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
            response_format: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Ask the provider for structured JSON output
    pub fn with_json_mode(mut self) -> Self {
        self.response_format = Some(ResponseFormat::json_object());
        self
    }
}

/// Requested reply format; this portal only ever asks for JSON objects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub type_: String,
}

impl ResponseFormat {
    pub fn json_object() -> Self {
        Self {
            type_: "json_object".to_string(),
        }
    }
}

/// A completed model reply, normalized across providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated text (the assessment JSON, possibly fenced)
    pub content: String,

    pub usage: Usage,

    /// Provider's stop reason, verbatim
    pub finish_reason: String,

    /// Model that produced the reply
    pub model: String,

    pub latency_ms: f64,
}

impl ChatResponse {
    pub fn new(
        content: impl Into<String>,
        usage: Usage,
        finish_reason: impl Into<String>,
        model: impl Into<String>,
        latency_ms: f64,
    ) -> Self {
        Self {
            content: content.into(),
            usage,
            finish_reason: finish_reason.into(),
            model: model.into(),
            latency_ms,
        }
    }
}

/// Token accounting for one call
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Failure modes of a provider call, tagged with the provider name so log
/// lines identify the source without extra context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LlmError {
    RateLimited {
        provider: String,
        retry_after_ms: Option<u64>,
    },

    Timeout {
        provider: String,
        timeout_ms: u64,
    },

    /// 2xx reply that does not carry usable content
    InvalidResponse { provider: String, message: String },

    AuthError { provider: String, message: String },

    NetworkError { provider: String, message: String },

    /// Reply body was not the expected wire format
    ParseError { provider: String, message: String },

    /// Any other non-2xx status
    ApiError {
        provider: String,
        status_code: u16,
        message: String,
    },

    ProviderDisabled { provider: String },
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::RateLimited {
                provider,
                retry_after_ms,
            } => match retry_after_ms {
                Some(ms) => write!(f, "[{}] Rate limited (retry after {}ms)", provider, ms),
                None => write!(f, "[{}] Rate limited", provider),
            },
            LlmError::Timeout {
                provider,
                timeout_ms,
            } => write!(f, "[{}] Request timeout ({}ms)", provider, timeout_ms),
            LlmError::InvalidResponse { provider, message } => {
                write!(f, "[{}] Invalid response: {}", provider, message)
            }
            LlmError::AuthError { provider, message } => {
                write!(f, "[{}] Auth error: {}", provider, message)
            }
            LlmError::NetworkError { provider, message } => {
                write!(f, "[{}] Network error: {}", provider, message)
            }
            LlmError::ParseError { provider, message } => {
                write!(f, "[{}] Parse error: {}", provider, message)
            }
            LlmError::ApiError {
                provider,
                status_code,
                message,
            } => write!(f, "[{}] API error {}: {}", provider, status_code, message),
            LlmError::ProviderDisabled { provider } => {
                write!(f, "[{}] Provider disabled in config", provider)
            }
        }
    }
}

impl std::error::Error for LlmError {}
