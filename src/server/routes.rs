//! Router configuration for the web server.

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.settings.max_upload_bytes;

    Router::new()
        // Health check for container orchestration
        .route("/health", get(handlers::health))
        // Upload form and submission
        .route("/", get(handlers::upload_form).post(handlers::upload_file))
        // Generated artifacts
        .route("/results/:filename", get(handlers::download_file))
        // Static assets
        .route("/static/style.css", get(handlers::serve_css))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
