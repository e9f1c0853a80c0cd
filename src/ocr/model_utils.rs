//! Shared utilities for OCR backends.
//!
//! Provides common functionality for:
//! - Checking for CLI tool availability
//! - Verifying trained-data directories

use std::fs;
use std::path::Path;

use super::backend::OcrError;

/// Check if a binary is available (in PATH, or as a direct path).
pub fn check_binary(name: &Path) -> bool {
    which::which(name).is_ok()
}

/// Verify that a trained-data directory is readable and holds data for
/// every language in a `+`-separated language list.
pub fn check_tessdata(dir: &Path, language: &str) -> Result<(), OcrError> {
    fs::read_dir(dir).map_err(|e| {
        OcrError::ModelNotFound(format!(
            "cannot read trained data directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let missing: Vec<&str> = language
        .split('+')
        .filter(|lang| !lang.is_empty())
        .filter(|lang| !dir.join(format!("{}.traineddata", lang)).is_file())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(OcrError::ModelNotFound(format!(
            "no trained data for {} in '{}'",
            missing.join(", "),
            dir.display()
        )))
    }
}
