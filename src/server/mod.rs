//! Web server for uploading images and downloading OCR results.
//!
//! Provides:
//! - An upload form that runs the extraction pipeline on the posted image
//! - A results page linking the HTML, text and DOCX artifacts
//! - Result file delivery from the results directory

mod assets;
mod handlers;
mod routes;
mod template_structs;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: Arc::new(settings.clone()),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    settings.ensure_directories()?;

    let state = AppState::new(settings);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
