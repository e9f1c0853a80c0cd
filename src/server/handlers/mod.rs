//! HTTP request handlers for the web server.

mod static_files;
mod status;
mod upload;

// Re-export handlers for use by the router
pub use static_files::{download_file, serve_css};
pub use status::health;
pub use upload::{upload_file, upload_form};
