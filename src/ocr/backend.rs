//! OCR backend abstraction.
//!
//! A backend turns one image into the full recognized text plus word-level
//! layout data (point size, confidence) from the same recognition pass.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from OCR backends.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("Backend not available: {0}")]
    BackendNotAvailable(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("Trained data not found: {0}")]
    ModelNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One recognized word with its layout attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrWord {
    /// Word text as recognized.
    pub text: String,
    /// Point size reported by the engine's layout analysis, if any.
    pub point_size: Option<f64>,
    /// Word confidence (0 - 100), if reported.
    pub confidence: Option<f32>,
}

impl OcrWord {
    /// Number of non-empty symbols in this word.
    pub fn symbol_count(&self) -> usize {
        self.text.chars().filter(|c| !c.is_whitespace()).count()
    }
}

/// Result of OCR processing.
#[derive(Debug, Clone)]
pub struct OcrResult {
    /// Extracted text content, lines separated by `\n`.
    pub text: String,
    /// Word-level layout data from the same pass.
    pub words: Vec<OcrWord>,
    /// Which backend produced this result.
    pub backend: OcrBackendType,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Available OCR backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OcrBackendType {
    /// Tesseract OCR via command-line.
    Tesseract,
}

impl OcrBackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OcrBackendType::Tesseract => "tesseract",
        }
    }
}

impl std::fmt::Display for OcrBackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait for OCR backends.
pub trait OcrBackend: Send + Sync {
    /// Get the backend type.
    fn backend_type(&self) -> OcrBackendType;

    /// Check if this backend is available (binary installed, trained data present).
    fn is_available(&self) -> bool;

    /// Get a description of what's needed to make this backend available.
    fn availability_hint(&self) -> String;

    /// Recognize an image file, returning text and word layout in one pass.
    fn recognize(&self, image_path: &Path) -> Result<OcrResult, OcrError>;
}

/// Configuration for OCR backends.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Language for OCR (e.g., "eng", "deu+eng").
    pub language: String,
    /// Directory holding `<lang>.traineddata` files.
    pub tessdata_dir: PathBuf,
    /// Tesseract executable name or path.
    pub binary: PathBuf,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            tessdata_dir: PathBuf::from("tessdata-main"),
            binary: PathBuf::from("tesseract"),
        }
    }
}

/// Strip the page separator and trailing line breaks the engine appends.
pub fn normalize_text(raw: &str) -> String {
    raw.trim_end_matches(['\u{c}', '\n', '\r']).to_string()
}
