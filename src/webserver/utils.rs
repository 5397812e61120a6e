/// Response helpers for the JSON API
///
/// Success responses return the payload directly; error responses use the
/// standard envelope (code, message, optional details, timestamp, request
/// id) so every failure looks the same to API consumers.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
    pub request_id: String,
}

/// 200 with the payload serialized directly
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Error with the standard envelope
pub fn error_response(
    status: StatusCode,
    code: &str,
    message: &str,
    details: Option<serde_json::Value>,
) -> Response {
    let body = ErrorResponse {
        error: ErrorDetails {
            code: code.to_string(),
            message: message.to_string(),
            details,
            timestamp: Utc::now(),
            request_id: uuid::Uuid::new_v4().to_string(),
        },
    };

    (status, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_shape() {
        let body = ErrorResponse {
            error: ErrorDetails {
                code: "VALIDATION_FAILED".to_string(),
                message: "Invalid audit request".to_string(),
                details: None,
                timestamp: Utc::now(),
                request_id: uuid::Uuid::new_v4().to_string(),
            },
        };

        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["error"]["code"], "VALIDATION_FAILED");
        assert!(json["error"].get("details").is_none());
        assert!(json["error"]["request_id"].is_string());
    }
}
