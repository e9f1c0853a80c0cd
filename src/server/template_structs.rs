//! Askama template structs for the web interface.
//!
//! Each struct corresponds to an HTML template in the templates/ directory.
//! Askama provides compile-time verification that templates are valid.

use askama::Template;

use crate::pipeline::ExtractionReport;

/// Upload form.
#[derive(Template)]
#[template(path = "upload.html")]
pub struct UploadTemplate<'a> {
    pub title: &'a str,
    /// Human-readable list of accepted extensions.
    pub allowed: String,
    /// `accept` attribute value for the file input.
    pub accept: String,
    pub notice: Option<&'a str>,
}

impl<'a> UploadTemplate<'a> {
    pub fn new(allowed_extensions: &[String], notice: Option<&'a str>) -> Self {
        Self {
            title: "Image to text",
            allowed: allowed_extensions.join(", "),
            accept: allowed_extensions
                .iter()
                .map(|ext| format!(".{}", ext))
                .collect::<Vec<_>>()
                .join(","),
            notice,
        }
    }
}

/// Results page linking the three artifacts.
#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsTemplate<'a> {
    pub title: &'a str,
    /// Base filename shared by the artifacts.
    pub filename: &'a str,
    pub font_size: Option<String>,
    pub symbols: usize,
    pub text: &'a str,
}

impl<'a> ResultsTemplate<'a> {
    pub fn from_report(filename: &'a str, report: &'a ExtractionReport) -> Self {
        Self {
            title: "Results",
            filename,
            font_size: report.font.map(|f| f.css_size()),
            symbols: report.font.map(|f| f.symbols).unwrap_or(0),
            text: &report.text,
        }
    }
}

/// Error page template.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub title: &'a str,
    pub message: &'a str,
}
