//! Upload form and submission handlers.

use askama::Template;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use super::super::template_structs::{ErrorTemplate, ResultsTemplate, UploadTemplate};
use super::super::AppState;
use crate::pipeline::{DocumentExtractionPipeline, OutputPaths};
use crate::upload::{allowed_file, base_name, secure_filename, NO_FILE_PART, NO_SELECTED_FILE};

/// Show the upload form.
pub async fn upload_form(State(state): State<AppState>) -> impl IntoResponse {
    render_form(&state, None)
}

/// Accept an image upload, run the pipeline and show the results page.
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let Ok(mut multipart) = multipart else {
        return NO_FILE_PART.into_response();
    };

    let (filename, data) = match read_file_field(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => return NO_FILE_PART.into_response(),
        Err(e) => {
            tracing::warn!("Failed to read multipart upload: {}", e);
            return error_page(StatusCode::BAD_REQUEST, &format!("Failed to read upload: {}", e));
        }
    };

    if filename.is_empty() {
        return NO_SELECTED_FILE.into_response();
    }

    if !allowed_file(&filename, &state.settings.allowed_extensions) {
        tracing::info!("Rejected upload with disallowed name: {:?}", filename);
        return render_form(&state, Some("That file type is not allowed.")).into_response();
    }

    let filename = secure_filename(&filename);
    if filename.is_empty() {
        tracing::info!("Upload name sanitized to nothing");
        return render_form(&state, Some("That file name cannot be used.")).into_response();
    }

    let image_path = state.settings.upload_dir.join(&filename);
    if let Err(e) = tokio::fs::write(&image_path, &data).await {
        tracing::error!("Failed to save upload {}: {}", image_path.display(), e);
        return error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Failed to save upload: {}", e),
        );
    }
    tracing::info!("Saved upload {} ({} bytes)", image_path.display(), data.len());

    let base = base_name(&filename).to_string();
    let outputs = OutputPaths::in_dir(&state.settings.results_dir, &base);
    let config = state.settings.pipeline_config();

    // OCR and document writes block; keep them off the async workers.
    let result = tokio::task::spawn_blocking(move || {
        DocumentExtractionPipeline::new(&config).process(&image_path, &outputs)
    })
    .await;

    match result {
        Ok(Ok(report)) => {
            let template = ResultsTemplate::from_report(&base, &report);
            match template.render() {
                Ok(html) => Html(html).into_response(),
                Err(e) => error_page(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
            }
        }
        Ok(Err(e)) => {
            tracing::error!("Extraction failed for {}: {}", filename, e);
            error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Extraction failed: {}", e),
            )
        }
        Err(e) => {
            tracing::error!("Extraction task panicked for {}: {}", filename, e);
            error_page(StatusCode::INTERNAL_SERVER_ERROR, "Extraction task failed")
        }
    }
}

/// Find the `file` field and read its name and contents.
///
/// A `file` field without a `filename` parameter is a plain form value, not
/// a file part, and is skipped.
async fn read_file_field(
    multipart: &mut Multipart,
) -> Result<Option<(String, Bytes)>, axum::extract::multipart::MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field.bytes().await?;
        return Ok(Some((filename, data)));
    }
    Ok(None)
}

fn render_form(state: &AppState, notice: Option<&str>) -> Html<String> {
    let template = UploadTemplate::new(&state.settings.allowed_extensions, notice);
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Failed to render upload form: {}", e)),
    )
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let template = ErrorTemplate {
        title: "Error",
        message,
    };
    let body = template.render().unwrap_or_else(|_| message.to_string());
    (status, Html(body)).into_response()
}
