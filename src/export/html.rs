//! HTML artifact: the text in a `<pre>` block sized to the font estimate.

use std::fs;
use std::path::Path;

use super::{ExportError, Exporter, ExtractedDocument};

/// Escape HTML special characters for safe rendering.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExporter;

impl HtmlExporter {
    /// Render the full HTML page.
    ///
    /// Without a font estimate the style element is left out entirely.
    pub fn render(document: &ExtractedDocument) -> String {
        let style = document
            .font
            .map(|font| format!("<style>pre {{ font-size: {}px; }}</style>", font.css_size()))
            .unwrap_or_default();

        format!(
            "<html><head><title></title>{}</head><body><pre>{}</pre></body></html>",
            style,
            html_escape(&document.text)
        )
    }
}

impl Exporter for HtmlExporter {
    fn format(&self) -> &'static str {
        "html"
    }

    fn export(&self, document: &ExtractedDocument, path: &Path) -> Result<(), ExportError> {
        fs::write(path, Self::render(document)).map_err(|e| ExportError::io(path, e))
    }
}
