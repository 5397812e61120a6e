//! LLM provider layer
//!
//! Unified chat-completion interface over the supported generative-model
//! providers. The audit risk engine only ever sees the [`LlmClient`] trait
//! and the unified [`ChatRequest`]/[`ChatResponse`] types; each provider
//! module speaks its own wire format underneath.
//!
//! Supported providers:
//! - **Gemini** (default): Google generateContent API
//! - **OpenAI**: chat-completions API

pub mod gemini;
pub mod openai;
pub mod types;

pub use types::{
    ChatMessage, ChatRequest, ChatResponse, LlmError, MessageRole, ResponseFormat, Usage,
};

use crate::apis::stats::ApiStats;
use crate::config::AiConfig;
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// PROVIDER IDENTIFICATION
// ============================================================================

/// Supported LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Gemini,
    OpenAi,
}

impl Provider {
    /// Parse a provider name from config ("gemini", "openai")
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Some(Provider::Gemini),
            "openai" => Some(Provider::OpenAi),
            _ => None,
        }
    }

    /// Lowercase provider name used in errors and config
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAi => "openai",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// CLIENT TRAIT
// ============================================================================

/// Unified interface implemented by every provider client
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Which provider this client talks to
    fn provider(&self) -> Provider;

    /// Whether the client is enabled in configuration
    fn is_enabled(&self) -> bool;

    /// Execute a chat-completion call
    async fn call(&self, request: ChatRequest) -> Result<ChatResponse, LlmError>;

    /// Snapshot of this client's call statistics
    async fn get_stats(&self) -> ApiStats;
}

// ============================================================================
// MANAGER
// ============================================================================

/// Holds the constructed provider clients and the configured default
pub struct LlmManager {
    clients: HashMap<Provider, Arc<dyn LlmClient>>,
    default_provider: Provider,
}

impl LlmManager {
    /// Build the manager from configuration
    ///
    /// Clients are only constructed for enabled providers. API keys fall back
    /// to the provider's environment variable when the config value is empty.
    pub fn from_config(cfg: &AiConfig) -> Result<Self, String> {
        let mut clients: HashMap<Provider, Arc<dyn LlmClient>> = HashMap::new();

        if cfg.gemini_enabled {
            let api_key = resolve_api_key(&cfg.gemini_api_key, "GEMINI_API_KEY");
            let model = non_empty(&cfg.gemini_model);
            let client = gemini::GeminiClient::new(api_key, model, true)?;
            clients.insert(Provider::Gemini, Arc::new(client));
        }

        if cfg.openai_enabled {
            let api_key = resolve_api_key(&cfg.openai_api_key, "OPENAI_API_KEY");
            let model = non_empty(&cfg.openai_model);
            let client = openai::OpenAiClient::new(api_key, model, true)?;
            clients.insert(Provider::OpenAi, Arc::new(client));
        }

        let default_provider = Provider::parse(&cfg.default_provider)
            .ok_or_else(|| format!("Unknown default provider '{}'", cfg.default_provider))?;

        Ok(Self {
            clients,
            default_provider,
        })
    }

    /// Get the client for a specific provider, if enabled
    pub fn get_client(&self, provider: Provider) -> Option<Arc<dyn LlmClient>> {
        self.clients.get(&provider).cloned()
    }

    /// Get the configured default client
    ///
    /// Falls back to any enabled client when the default provider itself is
    /// not enabled.
    pub fn default_client(&self) -> Result<Arc<dyn LlmClient>, LlmError> {
        if let Some(client) = self.get_client(self.default_provider) {
            return Ok(client);
        }

        self.clients
            .values()
            .next()
            .cloned()
            .ok_or(LlmError::ProviderDisabled {
                provider: self.default_provider.as_str().to_string(),
            })
    }

    /// Names of the enabled providers
    pub fn enabled_providers(&self) -> Vec<String> {
        self.clients.keys().map(|p| p.as_str().to_string()).collect()
    }

    /// Gather per-provider call statistics
    pub async fn gather_stats(&self) -> HashMap<String, ApiStats> {
        let mut stats = HashMap::new();
        for (provider, client) in &self.clients {
            stats.insert(provider.as_str().to_string(), client.get_stats().await);
        }
        stats
    }
}

/// Config key wins; empty falls back to the environment variable
fn resolve_api_key(config_value: &str, env_var: &str) -> String {
    if !config_value.trim().is_empty() {
        return config_value.to_string();
    }
    std::env::var(env_var).unwrap_or_default()
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ============================================================================
// GLOBAL ACCESS
// ============================================================================

static LLM_MANAGER: OnceCell<Arc<LlmManager>> = OnceCell::new();

/// Build the global LLM manager from the loaded configuration
///
/// Call once at startup after load_config(). Succeeds even when no provider
/// is enabled; analysis calls will then fail with ProviderDisabled.
pub fn init_llm_manager() -> Result<(), String> {
    let cfg = crate::config::with_config(|c| c.ai.clone());
    let manager = LlmManager::from_config(&cfg)?;

    let enabled = manager.enabled_providers();
    if enabled.is_empty() {
        logger::warning(
            LogTag::Llm,
            "No LLM provider enabled; audit analysis will fail until one is configured",
        );
    } else {
        logger::info(
            LogTag::Llm,
            &format!(
                "LLM manager ready (providers: {}, default: {})",
                enabled.join(", "),
                manager.default_provider
            ),
        );
    }

    LLM_MANAGER
        .set(Arc::new(manager))
        .map_err(|_| "LLM manager already initialized".to_string())
}

/// Get the global LLM manager, if initialized
pub fn try_get_llm_manager() -> Option<Arc<LlmManager>> {
    LLM_MANAGER.get().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!(Provider::parse("gemini"), Some(Provider::Gemini));
        assert_eq!(Provider::parse("Google"), Some(Provider::Gemini));
        assert_eq!(Provider::parse("OPENAI"), Some(Provider::OpenAi));
        assert_eq!(Provider::parse("anthropic"), None);
    }

    #[test]
    fn test_manager_with_no_providers() {
        let cfg = AiConfig::default();
        let manager = LlmManager::from_config(&cfg).expect("manager");
        assert!(manager.enabled_providers().is_empty());
        assert!(matches!(
            manager.default_client(),
            Err(LlmError::ProviderDisabled { .. })
        ));
    }

    #[test]
    fn test_manager_rejects_unknown_default() {
        let cfg = AiConfig {
            default_provider: "sonnet".to_string(),
            ..AiConfig::default()
        };
        assert!(LlmManager::from_config(&cfg).is_err());
    }

    #[test]
    fn test_manager_builds_enabled_clients() {
        let cfg = AiConfig {
            gemini_enabled: true,
            gemini_api_key: "test-key".to_string(),
            ..AiConfig::default()
        };
        let manager = LlmManager::from_config(&cfg).expect("manager");
        assert_eq!(manager.enabled_providers(), vec!["gemini".to_string()]);
        assert!(manager.default_client().is_ok());
    }
}
