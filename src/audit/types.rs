/// Audit analysis data contracts
///
/// Wire names are camelCase to match the portal's JSON API. Both records are
/// request-scoped: constructed, used once, and discarded.
use serde::{Deserialize, Serialize};

/// A taxpayer's filing submitted for risk analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRequest {
    /// Unique identifier for the taxpayer (PAN)
    pub taxpayer_id: String,

    /// The tax year for which the return was filed (e.g. "2023-2024")
    pub tax_year: String,

    /// Total income reported by the taxpayer, in INR
    pub income_reported: f64,

    /// Total deductions claimed by the taxpayer, in INR
    pub deductions_claimed: f64,

    /// Actual tax paid by the taxpayer, in INR
    pub tax_paid: f64,

    /// Industry the taxpayer operates in, if applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_type: Option<String>,

    /// Date the return was filed, ISO-8601 / RFC 3339
    pub filing_date: String,

    /// Status of previous audits for this taxpayer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_audit_status: Option<PreviousAuditStatus>,

    /// Average deductions claimed in the same industry, for comparison
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_deductions_for_industry: Option<f64>,

    /// Average tax paid in a similar income bracket, for comparison
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_tax_paid_for_income_bracket: Option<f64>,
}

/// Outcome of any previous audit of the taxpayer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreviousAuditStatus {
    None,
    #[serde(rename = "Audited_NoIssues")]
    AuditedNoIssues,
    #[serde(rename = "Audited_IssuesFound")]
    AuditedIssuesFound,
}

impl PreviousAuditStatus {
    /// All accepted wire values
    pub const WIRE_VALUES: [&'static str; 3] = ["None", "Audited_NoIssues", "Audited_IssuesFound"];

    /// Parse a wire value ("None", "Audited_NoIssues", "Audited_IssuesFound")
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "None" => Some(PreviousAuditStatus::None),
            "Audited_NoIssues" => Some(PreviousAuditStatus::AuditedNoIssues),
            "Audited_IssuesFound" => Some(PreviousAuditStatus::AuditedIssuesFound),
            _ => None,
        }
    }

    /// The wire value for this status
    pub fn as_str(&self) -> &'static str {
        match self {
            PreviousAuditStatus::None => "None",
            PreviousAuditStatus::AuditedNoIssues => "Audited_NoIssues",
            PreviousAuditStatus::AuditedIssuesFound => "Audited_IssuesFound",
        }
    }
}

impl std::fmt::Display for PreviousAuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The model's structured risk assessment of one filing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditAssessment {
    /// True if the return is identified as high-risk for audit
    pub is_high_risk: bool,

    /// Risk level from 0 to 100, higher is riskier
    pub risk_score: f64,

    /// Specific anomalies or patterns contributing to the assessment
    #[serde(default)]
    pub risk_reasons: Vec<String>,

    /// Detailed explanation of the identified anomalies
    pub summary_of_anomalies: String,

    /// Recommended action for the tax official
    /// (e.g. "Full Audit", "Compliance Review", "Monitor Only")
    pub recommended_action: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_names_are_camel_case() {
        let request = AuditRequest {
            taxpayer_id: "AWBPC1234E".to_string(),
            tax_year: "2023-2024".to_string(),
            income_reported: 5_000_000.0,
            deductions_claimed: 1_500_000.0,
            tax_paid: 800_000.0,
            industry_type: Some("IT Services".to_string()),
            filing_date: "2024-07-01T10:00:00Z".to_string(),
            previous_audit_status: Some(PreviousAuditStatus::None),
            average_deductions_for_industry: Some(800_000.0),
            average_tax_paid_for_income_bracket: Some(1_000_000.0),
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["taxpayerId"], "AWBPC1234E");
        assert_eq!(json["incomeReported"], 5_000_000.0);
        assert_eq!(json["previousAuditStatus"], "None");
        assert_eq!(json["averageDeductionsForIndustry"], 800_000.0);
    }

    #[test]
    fn test_optional_fields_omitted_when_absent() {
        let request = AuditRequest {
            taxpayer_id: "AWBPC1234E".to_string(),
            tax_year: "2023-2024".to_string(),
            income_reported: 1.0,
            deductions_claimed: 0.0,
            tax_paid: 0.0,
            industry_type: None,
            filing_date: "2024-07-01T10:00:00Z".to_string(),
            previous_audit_status: None,
            average_deductions_for_industry: None,
            average_tax_paid_for_income_bracket: None,
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert!(json.get("industryType").is_none());
        assert!(json.get("previousAuditStatus").is_none());
    }

    #[test]
    fn test_audit_status_enum_wire_values() {
        for value in PreviousAuditStatus::WIRE_VALUES {
            let parsed = PreviousAuditStatus::parse(value).expect("known value");
            assert_eq!(parsed.as_str(), value);
            // serde agrees with the hand-rolled parser
            let via_serde: PreviousAuditStatus =
                serde_json::from_value(json!(value)).expect("deserialize");
            assert_eq!(via_serde, parsed);
        }
        assert_eq!(PreviousAuditStatus::parse("Audited"), None);
    }

    #[test]
    fn test_assessment_risk_reasons_default_empty() {
        let assessment: AuditAssessment = serde_json::from_value(json!({
            "isHighRisk": false,
            "riskScore": 12.0,
            "summaryOfAnomalies": "Nothing notable.",
            "recommendedAction": "Monitor Only"
        }))
        .expect("deserialize");

        assert!(assessment.risk_reasons.is_empty());
    }
}
