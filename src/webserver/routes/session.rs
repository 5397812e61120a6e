/// Demo login API route
///
/// Accepts any exactly-10-character PAN and reports where to go next.
/// Demonstration only: no credentials are checked, no token is issued, and
/// no session state exists anywhere in the portal.
use axum::{http::StatusCode, response::Response, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    config::with_config,
    webserver::{
        state::AppState,
        utils::{error_response, success_response},
    },
};

/// PAN is a fixed-length identifier
const PAN_LENGTH: usize = 10;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub pan: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub redirect: String,
}

/// Create session routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/session/login", post(login))
}

/// POST /api/session/login
async fn login(Json(request): Json<LoginRequest>) -> Response {
    if !pan_is_valid(&request.pan) {
        return error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_PAN",
            &format!("PAN must be exactly {} characters", PAN_LENGTH),
            None,
        );
    }

    success_response(LoginResponse {
        success: true,
        redirect: with_config(|cfg| cfg.portal.redirect_after_login.clone()),
    })
}

/// Any 10-character string passes; this is a demonstration login
fn pan_is_valid(pan: &str) -> bool {
    pan.chars().count() == PAN_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pan_length_rule() {
        assert!(pan_is_valid("AWBPC1234E"));
        assert!(pan_is_valid("0123456789"));
        assert!(!pan_is_valid("SHORT"));
        assert!(!pan_is_valid("AWBPC1234E1"));
        assert!(!pan_is_valid(""));
    }
}
