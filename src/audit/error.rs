/// Audit domain errors
///
/// ValidationError is raised before any network call and carries enough
/// detail to let a human correct the input. AnalysisError collapses to one
/// generic user-facing message; the underlying cause is logged, never shown.
use crate::apis::llm::LlmError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The only analysis failure message end users ever see
pub const ANALYSIS_FAILED_MESSAGE: &str = "Failed to run AI analysis. Please check the logs.";

/// One offending field in a rejected request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFault {
    pub field: String,
    pub reason: String,
}

impl FieldFault {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// A request failed validation; lists every offending field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub faults: Vec<FieldFault>,
}

impl ValidationError {
    pub fn new(faults: Vec<FieldFault>) -> Self {
        Self { faults }
    }

    /// Whether a specific field is among the faults
    pub fn names_field(&self, field: &str) -> bool {
        self.faults.iter().any(|f| f.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self
            .faults
            .iter()
            .map(|fault| format!("{}: {}", fault.field, fault.reason))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "Invalid audit request: {}", summary)
    }
}

impl std::error::Error for ValidationError {}

/// The model call failed or its reply did not match the assessment shape
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No LLM provider is configured/enabled
    #[error("No LLM provider available")]
    ProviderUnavailable,

    /// The outbound model call failed (network, timeout, quota, auth)
    #[error("Model call failed: {0}")]
    ModelCall(#[from] LlmError),

    /// The model's reply could not be validated into an AuditAssessment
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// The generic message reported to the end user for any analysis failure
    pub fn user_message(&self) -> &'static str {
        ANALYSIS_FAILED_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_all_faults() {
        let err = ValidationError::new(vec![
            FieldFault::new("taxpayerId", "is required"),
            FieldFault::new("riskScore", "must be a number"),
        ]);
        assert!(err.names_field("taxpayerId"));
        assert!(!err.names_field("taxYear"));
        let display = err.to_string();
        assert!(display.contains("taxpayerId: is required"));
        assert!(display.contains("riskScore"));
    }

    #[test]
    fn test_analysis_error_user_message_is_generic() {
        let err = AnalysisError::MalformedResponse("riskScore was a string".to_string());
        assert_eq!(err.user_message(), ANALYSIS_FAILED_MESSAGE);
        // The internal display carries the diagnostic detail for logs only
        assert!(err.to_string().contains("riskScore was a string"));
    }
}
