use crate::webserver::{state::AppState, templates};
use axum::{
    response::Html,
    routing::get,
    Router,
};
use std::sync::Arc;

pub mod audit;
pub mod dashboard;
pub mod session;
pub mod status;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(login_page))
        .route("/dashboard", get(dashboard_page))
        .route("/audit", get(audit_page))
        .route("/file-return", get(file_return_page))
        .route("/payments", get(payments_page))
        .route("/notices", get(notices_page))
        .nest("/api", api_routes())
        .with_state(state)
}

/// All JSON API routes under /api
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(audit::routes())
        .merge(session::routes())
        .merge(dashboard::routes())
        .merge(status::routes())
}

/// Login page handler (no shell; the portal chrome appears after login)
async fn login_page() -> Html<String> {
    Html(templates::login_page())
}

/// Dashboard page handler
async fn dashboard_page() -> Html<String> {
    let content = templates::dashboard_content();
    Html(templates::base_template("Dashboard", "dashboard", &content))
}

/// Audit selection page handler
async fn audit_page() -> Html<String> {
    let content = templates::audit_content();
    Html(templates::base_template("Audit Selection", "audit", &content))
}

/// File-return placeholder page handler
async fn file_return_page() -> Html<String> {
    let content = templates::placeholder_content(
        "File Return",
        "e-filing of returns will be available here.",
    );
    Html(templates::base_template("File Return", "file-return", &content))
}

/// Payments placeholder page handler
async fn payments_page() -> Html<String> {
    let content =
        templates::placeholder_content("Payments", "Tax payments and challans will appear here.");
    Html(templates::base_template("Payments", "payments", &content))
}

/// Notices placeholder page handler
async fn notices_page() -> Html<String> {
    let content = templates::placeholder_content(
        "Notices",
        "Departmental notices and responses will appear here.",
    );
    Html(templates::base_template("Notices", "notices", &content))
}
