/// Prompt rendering for audit risk analysis
///
/// The system prompt fixes the analyst persona and the exact JSON output
/// shape; the user prompt renders the filing data with conditional sections
/// so optional fields only appear when they were supplied.
use super::types::AuditRequest;

/// System prompt: persona + the required output schema
pub fn system_prompt() -> String {
    format!(
        "You are an AI assistant specialized in identifying high-risk tax returns \
         for the Indian government's e-Tax Sahayak system.\n\
         Your task is to analyze the provided tax return data for anomalies, patterns, \
         and potential compliance issues, then determine if it's a high-risk case for audit.\n\n\
         Respond ONLY with a JSON object matching this schema:\n\
         {}",
        output_schema()
    )
}

/// The declared output shape the model's reply must conform to
fn output_schema() -> &'static str {
    r#"{
  "isHighRisk": boolean (true if the return is high-risk for audit),
  "riskScore": number (0-100, higher is riskier),
  "riskReasons": array of strings (specific anomalies, may be empty),
  "summaryOfAnomalies": string (detailed explanation of the reasoning),
  "recommendedAction": string (e.g. "Full Audit", "Compliance Review", "Monitor Only")
}"#
}

/// User prompt: the filing data with conditional sections and the
/// four-point analysis checklist
pub fn build_user_prompt(request: &AuditRequest) -> String {
    let mut prompt = format!(
        "Here is the tax return data for Tax Year {} for Taxpayer ID {}:\n\n\
         - Income Reported: INR {}\n\
         - Deductions Claimed: INR {}\n\
         - Tax Paid: INR {}\n",
        request.tax_year,
        request.taxpayer_id,
        request.income_reported,
        request.deductions_claimed,
        request.tax_paid,
    );

    if let Some(ref industry) = request.industry_type {
        prompt.push_str(&format!("- Industry Type: {}\n", industry));
    }

    prompt.push_str(&format!("- Filing Date: {}\n", request.filing_date));

    if let Some(status) = request.previous_audit_status {
        prompt.push_str(&format!("- Previous Audit Status: {}\n", status));
    }

    if request.average_deductions_for_industry.is_some()
        || request.average_tax_paid_for_income_bracket.is_some()
    {
        prompt.push_str("\nFor comparison:\n");
        if let Some(avg) = request.average_deductions_for_industry {
            prompt.push_str(&format!(
                "- Average Deductions for similar industry: INR {}\n",
                avg
            ));
        }
        if let Some(avg) = request.average_tax_paid_for_income_bracket {
            prompt.push_str(&format!(
                "- Average Tax Paid for similar income bracket: INR {}\n",
                avg
            ));
        }
    }

    prompt.push_str(
        "\nCarefully analyze the provided information. Look for:\n\
         1. Significant discrepancies between claimed deductions and industry averages.\n\
         2. Unusually low tax paid compared to income reported and income bracket averages.\n\
         3. Any other patterns that suggest potential under-reporting or aggressive tax planning.\n\
         4. Consider the previous audit status, if available.\n\n\
         Based on your analysis, determine:\n\
         - If this return is high-risk for an audit (set `isHighRisk` to true or false).\n\
         - A `riskScore` from 0 to 100, where 100 is the highest risk.\n\
         - Specific `riskReasons` in bullet points (e.g., \"Deductions significantly higher than \
         industry average\", \"Low tax paid relative to income bracket\", \"History of audit issues\").\n\
         - A `summaryOfAnomalies` explaining your reasoning in detail.\n\
         - A `recommendedAction` for the tax official.\n",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::types::PreviousAuditStatus;

    fn full_request() -> AuditRequest {
        AuditRequest {
            taxpayer_id: "AWBPC1234E".to_string(),
            tax_year: "2023-2024".to_string(),
            income_reported: 5_000_000.0,
            deductions_claimed: 1_500_000.0,
            tax_paid: 800_000.0,
            industry_type: Some("IT Services".to_string()),
            filing_date: "2024-07-01T10:00:00Z".to_string(),
            previous_audit_status: Some(PreviousAuditStatus::AuditedIssuesFound),
            average_deductions_for_industry: Some(800_000.0),
            average_tax_paid_for_income_bracket: Some(1_000_000.0),
        }
    }

    #[test]
    fn test_system_prompt_declares_output_fields() {
        let prompt = system_prompt();
        for field in [
            "isHighRisk",
            "riskScore",
            "riskReasons",
            "summaryOfAnomalies",
            "recommendedAction",
        ] {
            assert!(prompt.contains(field), "system prompt missing {}", field);
        }
    }

    #[test]
    fn test_user_prompt_renders_all_sections_when_present() {
        let prompt = build_user_prompt(&full_request());
        assert!(prompt.contains("Tax Year 2023-2024"));
        assert!(prompt.contains("Taxpayer ID AWBPC1234E"));
        assert!(prompt.contains("Income Reported: INR 5000000"));
        assert!(prompt.contains("Industry Type: IT Services"));
        assert!(prompt.contains("Previous Audit Status: Audited_IssuesFound"));
        assert!(prompt.contains("Average Deductions for similar industry: INR 800000"));
        assert!(prompt.contains("Average Tax Paid for similar income bracket: INR 1000000"));
    }

    #[test]
    fn test_user_prompt_omits_absent_sections() {
        let request = AuditRequest {
            industry_type: None,
            previous_audit_status: None,
            average_deductions_for_industry: None,
            average_tax_paid_for_income_bracket: None,
            ..full_request()
        };
        let prompt = build_user_prompt(&request);
        assert!(!prompt.contains("Industry Type"));
        assert!(!prompt.contains("Previous Audit Status"));
        assert!(!prompt.contains("For comparison"));
    }
}
