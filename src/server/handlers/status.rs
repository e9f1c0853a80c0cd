use axum::{http::StatusCode, response::IntoResponse};

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
