//! Tesseract OCR backend implementation.
//!
//! Uses Tesseract OCR via command-line. A single invocation renders both the
//! plain text and the hOCR layout (with font info), so the text and the
//! per-word point sizes come from the same recognition pass.

use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Instant;
use tempfile::TempDir;

use super::backend::{normalize_text, OcrBackend, OcrBackendType, OcrConfig, OcrError, OcrResult};
use super::hocr;
use super::model_utils::{check_binary, check_tessdata};

/// Base name for the renderer outputs inside the work directory.
const OUTPUT_BASE: &str = "ocr";

/// Tesseract OCR backend.
pub struct TesseractBackend {
    config: OcrConfig,
}

impl TesseractBackend {
    /// Create a new Tesseract backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: OcrConfig::default(),
        }
    }

    /// Create a new Tesseract backend with custom configuration.
    pub fn with_config(config: OcrConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OcrConfig {
        &self.config
    }

    /// Run Tesseract on an image file, writing `txt` and `hocr` renderings
    /// into `work_dir`.
    fn run_tesseract(&self, image_path: &Path, work_dir: &Path) -> Result<(), OcrError> {
        let output_base = work_dir.join(OUTPUT_BASE);
        let output = Command::new(&self.config.binary)
            .arg(image_path)
            .arg(&output_base)
            .arg("--tessdata-dir")
            .arg(&self.config.tessdata_dir)
            .args(["-l", &self.config.language])
            .args(["-c", "hocr_font_info=1"])
            .args(["txt", "hocr"])
            .output();

        match output {
            Ok(output) => {
                if output.status.success() {
                    Ok(())
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(OcrError::OcrFailed(format!(
                        "tesseract failed: {}",
                        stderr.trim()
                    )))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(OcrError::BackendNotAvailable(format!(
                    "{} not found (install tesseract-ocr)",
                    self.config.binary.display()
                )))
            }
            Err(e) => Err(OcrError::Io(e)),
        }
    }

    fn read_rendering(work_dir: &Path, extension: &str) -> Result<String, OcrError> {
        let path = work_dir.join(OUTPUT_BASE).with_extension(extension);
        fs::read_to_string(&path).map_err(|e| {
            OcrError::OcrFailed(format!(
                "tesseract produced no {} output ({}): {}",
                extension,
                path.display(),
                e
            ))
        })
    }
}

impl Default for TesseractBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrBackend for TesseractBackend {
    fn backend_type(&self) -> OcrBackendType {
        OcrBackendType::Tesseract
    }

    fn is_available(&self) -> bool {
        check_binary(&self.config.binary)
            && check_tessdata(&self.config.tessdata_dir, &self.config.language).is_ok()
    }

    fn availability_hint(&self) -> String {
        if !check_binary(&self.config.binary) {
            "Tesseract not installed. Install with: apt install tesseract-ocr".to_string()
        } else if let Err(e) = check_tessdata(&self.config.tessdata_dir, &self.config.language) {
            e.to_string()
        } else {
            "Tesseract is available".to_string()
        }
    }

    fn recognize(&self, image_path: &Path) -> Result<OcrResult, OcrError> {
        check_tessdata(&self.config.tessdata_dir, &self.config.language)?;

        let start = Instant::now();

        // Work area is removed when `work_dir` drops, on success or error.
        let work_dir = TempDir::with_prefix("ocrdoc")?;
        self.run_tesseract(image_path, work_dir.path())?;

        let text = normalize_text(&Self::read_rendering(work_dir.path(), "txt")?);
        let words = hocr::parse_words(&Self::read_rendering(work_dir.path(), "hocr")?)?;
        let elapsed = start.elapsed();

        tracing::debug!(
            "tesseract recognized {} words ({} chars) in {:?}",
            words.len(),
            text.len(),
            elapsed
        );

        Ok(OcrResult {
            text,
            words,
            backend: OcrBackendType::Tesseract,
            processing_time_ms: elapsed.as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_missing_tessdata_fails_before_spawning() {
        let dir = tempdir().unwrap();
        let backend = TesseractBackend::with_config(OcrConfig {
            tessdata_dir: dir.path().join("missing"),
            binary: PathBuf::from("definitely-not-a-real-binary-ocrdoc"),
            ..OcrConfig::default()
        });

        let result = backend.recognize(&dir.path().join("image.png"));
        assert!(matches!(result, Err(OcrError::ModelNotFound(_))));
    }

    #[test]
    fn test_missing_binary_is_backend_not_available() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("eng.traineddata"), b"").unwrap();
        let backend = TesseractBackend::with_config(OcrConfig {
            tessdata_dir: dir.path().to_path_buf(),
            binary: PathBuf::from("definitely-not-a-real-binary-ocrdoc"),
            ..OcrConfig::default()
        });

        assert!(!backend.is_available());
        assert!(backend.availability_hint().contains("not installed"));

        let result = backend.recognize(&dir.path().join("image.png"));
        assert!(matches!(result, Err(OcrError::BackendNotAvailable(_))));
    }
}
