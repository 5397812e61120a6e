/// Health and status API routes
use axum::{extract::State, response::Response, routing::get, Router};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    apis::{llm, stats::ApiStats},
    webserver::{state::AppState, utils::success_response},
};

/// Simple health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

/// Full status response with provider statistics
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub uptime_seconds: u64,
    pub version: String,
    pub llm_providers: Vec<String>,
    pub llm_stats: HashMap<String, ApiStats>,
}

/// Create status routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/status", get(system_status))
}

/// GET /api/health
async fn health_check() -> Response {
    success_response(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/status
async fn system_status(State(state): State<Arc<AppState>>) -> Response {
    let (llm_providers, llm_stats) = match llm::try_get_llm_manager() {
        Some(manager) => (manager.enabled_providers(), manager.gather_stats().await),
        None => (Vec::new(), HashMap::new()),
    };

    success_response(StatusResponse {
        timestamp: Utc::now(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        llm_providers,
        llm_stats,
    })
}
