//! Result file and static asset handlers.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use super::super::assets;
use super::super::AppState;

/// Serve a generated artifact from the results directory.
pub async fn download_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Response {
    let canonical_results_dir = match state.settings.results_dir.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(
                "results dir {} unavailable: {}",
                state.settings.results_dir.display(),
                e
            );
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error",
            )
                .into_response();
        }
    };

    if filename == "." || filename == ".." || filename.contains(['/', '\\']) {
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    }

    let canonical_file = match canonical_results_dir.join(&filename).canonicalize() {
        Ok(p) => p,
        Err(_) => {
            return (StatusCode::NOT_FOUND, "File not found").into_response();
        }
    };

    if !canonical_file.starts_with(&canonical_results_dir) {
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    }

    let content = match tokio::fs::read(&canonical_file).await {
        Ok(c) => c,
        Err(_) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file").into_response();
        }
    };

    let mime = mime_guess::from_path(&canonical_file)
        .first_or_octet_stream()
        .to_string();

    ([(header::CONTENT_TYPE, mime)], content).into_response()
}

/// Serve CSS.
pub async fn serve_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], assets::CSS)
}
