//! OCR and layout extraction module.
//!
//! Recognizes text in raster images using Tesseract and reads the per-word
//! point sizes it reports, from which an average font size is estimated.
//!
//! ## Backends
//!
//! - **Tesseract**: Traditional OCR via the `tesseract` binary (≥ 4)

mod backend;
mod font;
mod hocr;
mod model_utils;
mod tesseract;

pub use backend::{
    normalize_text, OcrBackend, OcrBackendType, OcrConfig, OcrError, OcrResult, OcrWord,
};
pub use font::FontEstimate;
pub use hocr::parse_words;
pub use model_utils::{check_binary, check_tessdata};
pub use tesseract::TesseractBackend;
