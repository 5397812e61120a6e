/// Risk request validation
///
/// Rejects malformed requests before they reach the model-calling engine.
/// All offending fields are collected into a single ValidationError; no
/// partial requests are forwarded. No side effects.
use super::error::{FieldFault, ValidationError};
use super::types::{AuditRequest, PreviousAuditStatus};
use serde_json::Value;

/// Validate a candidate record into a typed AuditRequest
///
/// Checks, per field: presence of required fields, JSON primitive type,
/// non-empty strings for taxpayerId/taxYear, RFC 3339 syntax for filingDate,
/// and membership of previousAuditStatus in the three enumerated values.
///
/// Idempotent: validating the serialization of a validated request yields an
/// identical record.
pub fn validate_request(candidate: &Value) -> Result<AuditRequest, ValidationError> {
    let mut faults = Vec::new();

    let obj = match candidate.as_object() {
        Some(obj) => obj,
        None => {
            return Err(ValidationError::new(vec![FieldFault::new(
                "request",
                "must be a JSON object",
            )]))
        }
    };

    let taxpayer_id = require_string(obj, "taxpayerId", &mut faults);
    let tax_year = require_string(obj, "taxYear", &mut faults);
    let income_reported = require_number(obj, "incomeReported", &mut faults);
    let deductions_claimed = require_number(obj, "deductionsClaimed", &mut faults);
    let tax_paid = require_number(obj, "taxPaid", &mut faults);
    let industry_type = optional_string(obj, "industryType", &mut faults);
    let filing_date = require_timestamp(obj, "filingDate", &mut faults);
    let previous_audit_status = optional_audit_status(obj, &mut faults);
    let average_deductions_for_industry =
        optional_number(obj, "averageDeductionsForIndustry", &mut faults);
    let average_tax_paid_for_income_bracket =
        optional_number(obj, "averageTaxPaidForIncomeBracket", &mut faults);

    if !faults.is_empty() {
        return Err(ValidationError::new(faults));
    }

    // All unwraps guarded by the empty-faults check above
    Ok(AuditRequest {
        taxpayer_id: taxpayer_id.unwrap(),
        tax_year: tax_year.unwrap(),
        income_reported: income_reported.unwrap(),
        deductions_claimed: deductions_claimed.unwrap(),
        tax_paid: tax_paid.unwrap(),
        industry_type,
        filing_date: filing_date.unwrap(),
        previous_audit_status,
        average_deductions_for_industry,
        average_tax_paid_for_income_bracket,
    })
}

type Faults = Vec<FieldFault>;

fn require_string(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    faults: &mut Faults,
) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            faults.push(FieldFault::new(field, "is required"));
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            faults.push(FieldFault::new(field, "must not be empty"));
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            faults.push(FieldFault::new(field, "must be a string"));
            None
        }
    }
}

fn require_number(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    faults: &mut Faults,
) -> Option<f64> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            faults.push(FieldFault::new(field, "is required"));
            None
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(_) => {
            faults.push(FieldFault::new(field, "must be a number"));
            None
        }
    }
}

fn require_timestamp(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    faults: &mut Faults,
) -> Option<String> {
    let raw = require_string(obj, field, faults)?;
    match chrono::DateTime::parse_from_rfc3339(&raw) {
        Ok(_) => Some(raw),
        Err(_) => {
            faults.push(FieldFault::new(
                field,
                "must be a valid ISO-8601 timestamp",
            ));
            None
        }
    }
}

fn optional_string(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    faults: &mut Faults,
) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            faults.push(FieldFault::new(field, "must be a string"));
            None
        }
    }
}

fn optional_number(
    obj: &serde_json::Map<String, Value>,
    field: &str,
    faults: &mut Faults,
) -> Option<f64> {
    match obj.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(_) => {
            faults.push(FieldFault::new(field, "must be a number"));
            None
        }
    }
}

fn optional_audit_status(
    obj: &serde_json::Map<String, Value>,
    faults: &mut Faults,
) -> Option<PreviousAuditStatus> {
    const FIELD: &str = "previousAuditStatus";
    match obj.get(FIELD) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => match PreviousAuditStatus::parse(s) {
            Some(status) => Some(status),
            None => {
                faults.push(FieldFault::new(
                    FIELD,
                    format!(
                        "must be one of {}",
                        PreviousAuditStatus::WIRE_VALUES.join(", ")
                    ),
                ));
                None
            }
        },
        Some(_) => {
            faults.push(FieldFault::new(FIELD, "must be a string"));
            None
        }
    }
}
