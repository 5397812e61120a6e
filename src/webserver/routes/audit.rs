/// Audit analysis API route
///
/// POST /api/audit/analyze is the core operation of the portal: validate the
/// candidate record, run the risk analysis, and return either a conforming
/// assessment or the standard error envelope. Validation failures carry the
/// fault list; analysis failures collapse to the fixed generic message with
/// the cause logged.
use axum::{http::StatusCode, response::Response, routing::post, Json, Router};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    arguments::is_debug_webserver_enabled,
    audit::{self, AnalysisError},
    logger::{self, LogTag},
    webserver::{
        state::AppState,
        utils::{error_response, success_response},
    },
};

/// Create audit routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/audit/analyze", post(analyze))
}

/// POST /api/audit/analyze
async fn analyze(Json(candidate): Json<Value>) -> Response {
    if is_debug_webserver_enabled() {
        logger::debug(LogTag::Webserver, "Audit analysis endpoint called");
    }

    // Validator runs first; the engine is never invoked for bad input
    let request = match audit::validate_request(&candidate) {
        Ok(request) => request,
        Err(validation) => {
            logger::debug(
                LogTag::Audit,
                &format!("Rejected audit request: {}", validation),
            );
            let details = serde_json::to_value(&validation.faults).ok();
            return error_response(
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
                "Invalid audit request",
                details,
            );
        }
    };

    match audit::run_audit_analysis(&request).await {
        Ok(assessment) => success_response(assessment),
        Err(err) => {
            // Cause goes to the logs; the caller only sees the generic message
            log_analysis_failure(&request.taxpayer_id, &err);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "ANALYSIS_FAILED",
                err.user_message(),
                None,
            )
        }
    }
}

fn log_analysis_failure(taxpayer_id: &str, err: &AnalysisError) {
    logger::error(
        LogTag::Audit,
        &format!("Risk analysis failed for taxpayer {}: {}", taxpayer_id, err),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::ANALYSIS_FAILED_MESSAGE;
    use axum::body::to_bytes;
    use serde_json::json;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    // No LLM manager is initialized in the test process, so any request that
    // reached the analysis stage would produce a 500. A 400 with fault
    // details therefore proves the validator short-circuits the handler.
    #[tokio::test]
    async fn test_invalid_request_rejected_before_analysis() {
        let response = analyze(Json(json!({ "taxpayerId": "AWBPC1234E" }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
        assert_eq!(body["error"]["message"], "Invalid audit request");
        assert!(body["error"]["request_id"].is_string());

        let details = body["error"]["details"].as_array().expect("fault list");
        let named_fields: Vec<&str> = details
            .iter()
            .filter_map(|fault| fault["field"].as_str())
            .collect();
        for field in ["taxYear", "incomeReported", "filingDate"] {
            assert!(named_fields.contains(&field), "missing fault for {}", field);
        }
    }

    #[tokio::test]
    async fn test_analysis_failure_returns_generic_envelope() {
        let valid = json!({
            "taxpayerId": "AWBPC1234E",
            "taxYear": "2023-2024",
            "incomeReported": 5000000,
            "deductionsClaimed": 1500000,
            "taxPaid": 800000,
            "filingDate": "2024-07-01T10:00:00Z"
        });

        let response = analyze(Json(valid)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "ANALYSIS_FAILED");
        assert_eq!(body["error"]["message"], ANALYSIS_FAILED_MESSAGE);
        assert!(body["error"].get("details").is_none());
    }
}
