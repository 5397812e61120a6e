/// Axum webserver implementation
///
/// Main server lifecycle management including startup, shutdown, and graceful
/// termination
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::compression::CompressionLayer;

use crate::{
    config::with_config,
    logger::{self, LogTag},
    webserver::{routes, state::AppState},
};

/// Global shutdown notifier
static SHUTDOWN_NOTIFY: once_cell::sync::Lazy<Arc<Notify>> =
    once_cell::sync::Lazy::new(|| Arc::new(Notify::new()));

/// Start the webserver
///
/// This function blocks until the server is shut down. The bind address
/// comes from configuration; --port overrides the configured port.
pub async fn start_server() -> Result<(), String> {
    let (host, mut port) = with_config(|cfg| (cfg.server.host.clone(), cfg.server.port));
    if let Some(override_port) = crate::arguments::get_port_override() {
        port = override_port;
    }

    // Create application state
    let state = Arc::new(AppState::new());

    // Build the router
    let app = build_app(state);

    // Parse bind address
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| format!("Invalid bind address '{}:{}': {}", host, port, e))?;

    // Create TCP listener
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        match e.kind() {
            std::io::ErrorKind::AddrInUse => format!(
                "Failed to bind to {}: Address already in use\n\
                 Another instance of the portal may be running; stop it or pass --port <n>.",
                addr
            ),
            std::io::ErrorKind::PermissionDenied => format!(
                "Failed to bind to {}: Permission denied\n\
                 Ports below 1024 require elevated privileges; pick a higher port.",
                addr
            ),
            _ => format!("Failed to bind to {}: {}", addr, e),
        }
    })?;

    logger::info(
        LogTag::Webserver,
        &format!("Portal listening on http://{}", addr),
    );
    logger::debug(
        LogTag::Webserver,
        &format!("API endpoints available at http://{}/api", addr),
    );

    // Run the server with graceful shutdown
    let shutdown_signal = async {
        SHUTDOWN_NOTIFY.notified().await;
        logger::info(
            LogTag::Webserver,
            "Received shutdown signal, stopping webserver...",
        );
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    logger::info(LogTag::Webserver, "Webserver stopped gracefully");

    Ok(())
}

/// Trigger webserver shutdown
pub fn shutdown() {
    SHUTDOWN_NOTIFY.notify_one();
}

/// Build the Axum application with all routes and middleware
fn build_app(state: Arc<AppState>) -> Router {
    routes::create_router(state).layer(CompressionLayer::new())
}
