/// Risk assessment engine
///
/// Renders the analysis prompt for a validated request, makes exactly one
/// model call, and validates/coerces the model's JSON reply into an
/// AuditAssessment. No retries, no caching; each invocation is independent
/// and stateless.
///
/// Out-of-range riskScore values are clamped into [0,100] with a logged
/// warning; a non-finite score or any schema mismatch is an AnalysisError.
use super::error::AnalysisError;
use super::prompt;
use super::types::{AuditAssessment, AuditRequest};
use crate::apis::llm::{self, ChatMessage, ChatRequest, LlmClient};
use crate::logger::{self, LogTag};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::sync::Arc;

/// Matches a JSON object wrapped in Markdown code fences
static JSON_FENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.+?\})\s*```").expect("Invalid JSON fence regex")
});

/// Audit risk analysis engine bound to one LLM client
pub struct AuditEngine {
    client: Arc<dyn LlmClient>,
    model: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

impl AuditEngine {
    /// Create an engine for the given client with generation settings
    pub fn new(client: Arc<dyn LlmClient>, model: Option<String>) -> Self {
        Self {
            client,
            model,
            temperature: 0.2,
            max_tokens: 1024,
        }
    }

    /// Override the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the generation token budget
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Produce an AuditAssessment for a validated request
    ///
    /// Exactly one outbound model call per invocation.
    pub async fn analyze(&self, request: &AuditRequest) -> Result<AuditAssessment, AnalysisError> {
        let chat_request = ChatRequest::new(
            self.model.clone().unwrap_or_default(),
            vec![
                ChatMessage::system(prompt::system_prompt()),
                ChatMessage::user(prompt::build_user_prompt(request)),
            ],
        )
        .with_temperature(self.temperature)
        .with_max_tokens(self.max_tokens)
        .with_json_mode();

        logger::debug(
            LogTag::Audit,
            &format!(
                "Requesting risk analysis for taxpayer {} ({})",
                request.taxpayer_id, request.tax_year
            ),
        );

        let response = self.client.call(chat_request).await?;

        logger::debug(
            LogTag::Audit,
            &format!(
                "Model replied in {:.0}ms ({} tokens)",
                response.latency_ms, response.usage.total_tokens
            ),
        );

        parse_assessment(&response.content)
    }
}

/// Parse and validate the model's reply into an AuditAssessment
///
/// Accepts either a bare JSON object or one wrapped in Markdown code fences.
fn parse_assessment(content: &str) -> Result<AuditAssessment, AnalysisError> {
    let payload = extract_json_payload(content);

    let raw: RawAssessment = serde_json::from_str(payload)
        .map_err(|e| AnalysisError::MalformedResponse(format!("Invalid JSON: {}", e)))?;

    if !raw.risk_score.is_finite() {
        return Err(AnalysisError::MalformedResponse(
            "riskScore is not a finite number".to_string(),
        ));
    }

    let risk_score = if (0.0..=100.0).contains(&raw.risk_score) {
        raw.risk_score
    } else {
        let clamped = raw.risk_score.clamp(0.0, 100.0);
        logger::warning(
            LogTag::Audit,
            &format!(
                "Model returned riskScore {} outside [0,100], clamped to {}",
                raw.risk_score, clamped
            ),
        );
        clamped
    };

    Ok(AuditAssessment {
        is_high_risk: raw.is_high_risk,
        risk_score,
        risk_reasons: raw.risk_reasons,
        summary_of_anomalies: raw.summary_of_anomalies,
        recommended_action: raw.recommended_action,
    })
}

/// Strip Markdown code fences if present, otherwise use the trimmed content
fn extract_json_payload(content: &str) -> &str {
    if let Some(captures) = JSON_FENCE_PATTERN.captures(content) {
        if let Some(json) = captures.get(1) {
            return json.as_str();
        }
    }
    content.trim()
}

/// Model reply before range validation; riskReasons defaults to empty
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAssessment {
    is_high_risk: bool,
    risk_score: f64,
    #[serde(default)]
    risk_reasons: Vec<String>,
    summary_of_anomalies: String,
    recommended_action: String,
}

/// Run a risk analysis using the globally configured LLM manager
///
/// This is what the HTTP handler calls: builds an engine from the default
/// client and the loaded configuration, then delegates to analyze().
pub async fn run_audit_analysis(request: &AuditRequest) -> Result<AuditAssessment, AnalysisError> {
    let manager = llm::try_get_llm_manager().ok_or(AnalysisError::ProviderUnavailable)?;
    let client = manager.default_client()?;

    let ai_cfg = crate::config::with_config(|cfg| cfg.ai.clone());

    // Model overrides are provider-specific; the client falls back to its
    // own default when none is configured
    let model = match client.provider() {
        llm::Provider::Gemini => non_empty(&ai_cfg.gemini_model),
        llm::Provider::OpenAi => non_empty(&ai_cfg.openai_model),
    };

    AuditEngine::new(client, model)
        .with_temperature(ai_cfg.temperature)
        .with_max_tokens(ai_cfg.max_output_tokens)
        .analyze(request)
        .await
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::llm::{ChatResponse, LlmError, Provider, Usage};
    use crate::apis::stats::ApiStats;
    use crate::audit::error::ANALYSIS_FAILED_MESSAGE;
    use async_trait::async_trait;

    /// Test double that replies with a fixed script or fails
    struct ScriptedClient {
        reply: Option<String>,
    }

    impl ScriptedClient {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply.to_string()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self { reply: None })
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        fn provider(&self) -> Provider {
            Provider::Gemini
        }

        fn is_enabled(&self) -> bool {
            true
        }

        async fn call(&self, _request: ChatRequest) -> Result<ChatResponse, LlmError> {
            match &self.reply {
                Some(reply) => Ok(ChatResponse::new(
                    reply.clone(),
                    Usage::new(100, 50),
                    "STOP",
                    "scripted",
                    5.0,
                )),
                None => Err(LlmError::Timeout {
                    provider: "gemini".to_string(),
                    timeout_ms: 30000,
                }),
            }
        }

        async fn get_stats(&self) -> ApiStats {
            ApiStats::default()
        }
    }

    fn sample_request() -> AuditRequest {
        AuditRequest {
            taxpayer_id: "AWBPC1234E".to_string(),
            tax_year: "2023-2024".to_string(),
            income_reported: 5_000_000.0,
            deductions_claimed: 1_500_000.0,
            tax_paid: 800_000.0,
            industry_type: Some("IT Services".to_string()),
            filing_date: "2024-07-01T10:00:00Z".to_string(),
            previous_audit_status: Some(crate::audit::types::PreviousAuditStatus::None),
            average_deductions_for_industry: Some(800_000.0),
            average_tax_paid_for_income_bracket: Some(1_000_000.0),
        }
    }

    const GOOD_REPLY: &str = r#"{
        "isHighRisk": true,
        "riskScore": 78,
        "riskReasons": ["Deductions significantly higher than industry average"],
        "summaryOfAnomalies": "Claimed deductions are nearly double the industry average.",
        "recommendedAction": "Full Audit"
    }"#;

    #[tokio::test]
    async fn test_analyze_success() {
        let engine = AuditEngine::new(ScriptedClient::replying(GOOD_REPLY), None);
        let assessment = engine.analyze(&sample_request()).await.expect("assessment");

        assert!(assessment.is_high_risk);
        assert!((0.0..=100.0).contains(&assessment.risk_score));
        assert!(!assessment.risk_reasons.is_empty());
        assert!(!assessment.recommended_action.is_empty());
    }

    #[tokio::test]
    async fn test_analyze_accepts_fenced_json() {
        let fenced = format!("Here is the result:\n```json\n{}\n```", GOOD_REPLY);
        let engine = AuditEngine::new(ScriptedClient::replying(&fenced), None);
        let assessment = engine.analyze(&sample_request()).await.expect("assessment");
        assert_eq!(assessment.recommended_action, "Full Audit");
    }

    #[tokio::test]
    async fn test_risk_score_clamped_high() {
        let reply = r#"{"isHighRisk": true, "riskScore": 140,
            "riskReasons": [], "summaryOfAnomalies": "x", "recommendedAction": "Full Audit"}"#;
        let engine = AuditEngine::new(ScriptedClient::replying(reply), None);
        let assessment = engine.analyze(&sample_request()).await.expect("assessment");
        assert_eq!(assessment.risk_score, 100.0);
    }

    #[tokio::test]
    async fn test_risk_score_clamped_low() {
        let reply = r#"{"isHighRisk": false, "riskScore": -5,
            "riskReasons": [], "summaryOfAnomalies": "x", "recommendedAction": "Monitor Only"}"#;
        let engine = AuditEngine::new(ScriptedClient::replying(reply), None);
        let assessment = engine.analyze(&sample_request()).await.expect("assessment");
        assert_eq!(assessment.risk_score, 0.0);
    }

    #[tokio::test]
    async fn test_missing_risk_reasons_defaults_to_empty() {
        let reply = r#"{"isHighRisk": false, "riskScore": 10,
            "summaryOfAnomalies": "Nothing notable.", "recommendedAction": "Monitor Only"}"#;
        let engine = AuditEngine::new(ScriptedClient::replying(reply), None);
        let assessment = engine.analyze(&sample_request()).await.expect("assessment");
        assert!(assessment.risk_reasons.is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_risk_score_is_error() {
        let reply = r#"{"isHighRisk": true, "riskScore": "high",
            "riskReasons": [], "summaryOfAnomalies": "x", "recommendedAction": "Full Audit"}"#;
        let engine = AuditEngine::new(ScriptedClient::replying(reply), None);
        let result = engine.analyze(&sample_request()).await;
        assert!(matches!(result, Err(AnalysisError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_non_json_reply_is_error() {
        let engine = AuditEngine::new(
            ScriptedClient::replying("I cannot analyze this filing."),
            None,
        );
        let result = engine.analyze(&sample_request()).await;
        assert!(matches!(result, Err(AnalysisError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_model_failure_collapses_to_generic_message() {
        let engine = AuditEngine::new(ScriptedClient::failing(), None);
        let err = engine
            .analyze(&sample_request())
            .await
            .expect_err("must fail");
        assert!(matches!(err, AnalysisError::ModelCall(_)));
        assert_eq!(err.user_message(), ANALYSIS_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_assessment_reserializes_to_contract_shape() {
        let engine = AuditEngine::new(ScriptedClient::replying(GOOD_REPLY), None);
        let assessment = engine.analyze(&sample_request()).await.expect("assessment");

        let json = serde_json::to_value(&assessment).expect("serialize");
        assert!(json["isHighRisk"].is_boolean());
        assert!(json["riskScore"].is_number());
        assert!(json["riskReasons"].is_array());
        assert!(json["summaryOfAnomalies"].is_string());
        assert!(json["recommendedAction"].is_string());
        let score = json["riskScore"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn test_extract_json_payload_without_fences() {
        assert_eq!(extract_json_payload("  {\"a\":1}  "), "{\"a\":1}");
    }
}
