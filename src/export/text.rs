use std::fs;
use std::path::Path;

use super::{ExportError, Exporter, ExtractedDocument};

/// Plain-text artifact: the recognized text, byte for byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl Exporter for TextExporter {
    fn format(&self) -> &'static str {
        "txt"
    }

    fn export(&self, document: &ExtractedDocument, path: &Path) -> Result<(), ExportError> {
        fs::write(path, document.text.as_bytes()).map_err(|e| ExportError::io(path, e))
    }
}
