//! HTTP surface: public site and dashboard API

pub mod error;
pub mod routes;

use axum::{
    routing::{get, put},
    Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::store::ContentStore;

pub use error::ApiError;

/// State shared across handlers
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
}

pub type SharedState = Arc<AppState>;

/// Build the router; `static_dir` is served under `/static`
pub fn create_router(state: SharedState, static_dir: &Path) -> Router {
    Router::new()
        // Public site
        .route("/", get(routes::home))
        .route("/themes/:slug", get(routes::theme))
        .route("/analytics", get(routes::analytics_page))
        .route("/community", get(routes::community_page))
        .route("/auth", get(routes::contact_page))
        .route("/api/content", get(routes::api_content))
        // Content editor
        .route("/api/dashboard/content", get(routes::api_editable_content))
        .route("/api/dashboard/content/:collection", put(routes::api_save))
        .route("/api/dashboard/fields", get(routes::api_fields))
        // Dashboard pages
        .route("/api/dashboard/overview", get(routes::api_overview))
        .route("/api/dashboard/campaigns", get(routes::api_campaigns))
        .route("/api/dashboard/community", get(routes::api_community))
        .route("/api/dashboard/analytics", get(routes::api_analytics))
        .route("/health", get(routes::health))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until the process is stopped
pub async fn run(addr: SocketAddr, app: Router) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");
    axum::serve(listener, app).await
}
