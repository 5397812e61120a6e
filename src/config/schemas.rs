/// Configuration schemas - all config structures defined once with defaults
///
/// Each struct is defined using the config_struct! macro which provides:
/// - Single-source definition (no repetition)
/// - Embedded defaults
/// - Type safety
/// - Serde support
use crate::config_struct;

// ============================================================================
// SERVER CONFIGURATION
// ============================================================================

config_struct! {
    /// Webserver configuration for portal access
    pub struct ServerConfig {
        /// Host/IP address to bind the webserver
        /// 127.0.0.1 = localhost only, 0.0.0.0 = all interfaces
        host: String = "127.0.0.1".to_string(),

        /// Port to bind the webserver (1024-65535)
        port: u16 = 8080,
    }
}

// ============================================================================
// AI CONFIGURATION
// ============================================================================

config_struct! {
    /// Generative-model provider configuration for audit risk analysis
    pub struct AiConfig {
        /// Default provider to use ("gemini" or "openai")
        default_provider: String = "gemini".to_string(),

        // === Gemini (Google) ===
        /// Enable the Gemini provider
        gemini_enabled: bool = false,

        /// Gemini API key (falls back to the GEMINI_API_KEY environment variable)
        gemini_api_key: String = String::new(),

        /// Model override for Gemini (empty = client default)
        gemini_model: String = String::new(),

        // === OpenAI ===
        /// Enable the OpenAI provider
        openai_enabled: bool = false,

        /// OpenAI API key (falls back to the OPENAI_API_KEY environment variable)
        openai_api_key: String = String::new(),

        /// Model override for OpenAI (empty = client default)
        openai_model: String = String::new(),

        // === Generation parameters ===
        /// Sampling temperature for risk analysis
        temperature: f32 = 0.2,

        /// Maximum tokens the model may generate per assessment
        max_output_tokens: u32 = 1024,
    }
}

// ============================================================================
// PORTAL CONFIGURATION
// ============================================================================

config_struct! {
    /// Portal presentation settings
    pub struct PortalConfig {
        /// Name shown in the page header and titles
        brand: String = "e-Tax Sahayak".to_string(),

        /// Page the login endpoint redirects to on success
        redirect_after_login: String = "/dashboard".to_string(),
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration combining all sections
    pub struct Config {
        server: ServerConfig = ServerConfig::default(),
        ai: AiConfig = AiConfig::default(),
        portal: PortalConfig = PortalConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ai.default_provider, "gemini");
        assert!(!config.ai.gemini_enabled);
        assert!(!config.ai.openai_enabled);
        assert_eq!(config.portal.brand, "e-Tax Sahayak");
        assert_eq!(config.portal.redirect_after_login, "/dashboard");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).expect("serialize");
        let parsed: Config = toml::from_str(&serialized).expect("parse");
        assert_eq!(parsed.server.port, config.server.port);
        assert_eq!(parsed.ai.temperature, config.ai.temperature);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: Config = toml::from_str("[server]\nport = 9999\n").expect("parse");
        assert_eq!(parsed.server.port, 9999);
        assert_eq!(parsed.server.host, "127.0.0.1");
        assert_eq!(parsed.ai.default_provider, "gemini");
    }
}
