/// Dashboard data API routes
///
/// All three endpoints serve the hard-coded sample data from portal::data;
/// the dashboard page's inline script fetches and renders them.
use axum::{response::Response, routing::get, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::{
    portal::data::{MetricCard, CompliancePoint, RevenuePoint, COMPLIANCE_SERIES, METRIC_CARDS, REVENUE_SERIES},
    webserver::{state::AppState, utils::success_response},
};

#[derive(Debug, Serialize)]
struct SummaryResponse {
    metrics: Vec<MetricCard>,
}

#[derive(Debug, Serialize)]
struct RevenueResponse {
    series: Vec<RevenuePoint>,
}

#[derive(Debug, Serialize)]
struct ComplianceResponse {
    series: Vec<CompliancePoint>,
}

/// Create dashboard routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard/summary", get(summary))
        .route("/dashboard/revenue", get(revenue))
        .route("/dashboard/compliance", get(compliance))
}

/// GET /api/dashboard/summary
async fn summary() -> Response {
    success_response(SummaryResponse {
        metrics: METRIC_CARDS.to_vec(),
    })
}

/// GET /api/dashboard/revenue
async fn revenue() -> Response {
    success_response(RevenueResponse {
        series: REVENUE_SERIES.to_vec(),
    })
}

/// GET /api/dashboard/compliance
async fn compliance() -> Response {
    success_response(ComplianceResponse {
        series: COMPLIANCE_SERIES.to_vec(),
    })
}
