//! Image to HTML/TXT/DOCX extraction pipeline.
//!
//! One linear procedure per image: validate the input, recognize it once
//! (text and word layout from the same pass), estimate the average symbol
//! size, then write the three artifacts. Nothing is kept between runs.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::export::{
    DocxExporter, ExportError, Exporter, ExtractedDocument, HtmlExporter, TextExporter,
};
use crate::ocr::{FontEstimate, OcrBackend, OcrConfig, OcrError, TesseractBackend};

/// Errors from a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("unsupported image {}: {reason}", path.display())]
    UnsupportedImage { path: PathBuf, reason: String },

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Fixed paths and engine settings the pipeline runs with.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding `<lang>.traineddata` files.
    pub tessdata_dir: PathBuf,
    /// OCR language code (e.g. "eng", "eng+deu").
    pub language: String,
    /// Tesseract executable name or path.
    pub tesseract: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let ocr = OcrConfig::default();
        Self {
            tessdata_dir: ocr.tessdata_dir,
            language: ocr.language,
            tesseract: ocr.binary,
        }
    }
}

impl PipelineConfig {
    pub fn ocr_config(&self) -> OcrConfig {
        OcrConfig {
            language: self.language.clone(),
            tessdata_dir: self.tessdata_dir.clone(),
            binary: self.tesseract.clone(),
        }
    }
}

/// Destination paths for the three artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub html: PathBuf,
    pub text: PathBuf,
    pub docx: PathBuf,
}

impl OutputPaths {
    /// `<dir>/<base>.html`, `<dir>/<base>.txt`, `<dir>/<base>.docx`.
    pub fn in_dir(dir: &Path, base: &str) -> Self {
        Self {
            html: dir.join(format!("{}.html", base)),
            text: dir.join(format!("{}.txt", base)),
            docx: dir.join(format!("{}.docx", base)),
        }
    }
}

/// Outcome of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// Recognized text, as written to the text artifact.
    pub text: String,
    /// Average symbol size, absent when no symbol was recognized.
    pub font: Option<FontEstimate>,
    /// Recognition wall time.
    pub processing_time_ms: u64,
    /// Where the artifacts were written.
    pub outputs: OutputPaths,
}

/// Runs OCR over an image and renders the result to HTML, text and DOCX.
pub struct DocumentExtractionPipeline {
    backend: Box<dyn OcrBackend>,
}

impl DocumentExtractionPipeline {
    /// Pipeline backed by the Tesseract binary.
    pub fn new(config: &PipelineConfig) -> Self {
        Self::with_backend(Box::new(TesseractBackend::with_config(config.ocr_config())))
    }

    /// Pipeline backed by any OCR backend.
    pub fn with_backend(backend: Box<dyn OcrBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &dyn OcrBackend {
        self.backend.as_ref()
    }

    /// Process one image into the three output files.
    ///
    /// All three writes are attempted even if an earlier one fails; the
    /// first write error is returned. Artifacts already written are left
    /// in place.
    pub fn process(
        &self,
        image_path: &Path,
        outputs: &OutputPaths,
    ) -> Result<ExtractionReport, PipelineError> {
        check_image(image_path)?;

        let result = self.backend.recognize(image_path)?;
        let font = FontEstimate::from_words(&result.words);

        match font {
            Some(font) => tracing::info!(
                "{}: average font size {:.2}pt over {} symbols ({})",
                image_path.display(),
                font.point_size,
                font.symbols,
                result.backend
            ),
            None => tracing::warn!(
                "{}: no symbols recognized, artifacts written without font size",
                image_path.display()
            ),
        }

        let document = ExtractedDocument::new(result.text, font);
        let exporters: [(&dyn Exporter, &Path); 3] = [
            (&HtmlExporter, outputs.html.as_path()),
            (&TextExporter, outputs.text.as_path()),
            (&DocxExporter, outputs.docx.as_path()),
        ];

        let mut first_error = None;
        for (exporter, path) in exporters {
            match exporter.export(&document, path) {
                Ok(()) => tracing::debug!("wrote {} to {}", exporter.format(), path.display()),
                Err(e) => {
                    tracing::error!("{} export failed: {}", exporter.format(), e);
                    first_error.get_or_insert(e);
                }
            }
        }
        if let Some(e) = first_error {
            return Err(e.into());
        }

        Ok(ExtractionReport {
            text: document.text,
            font,
            processing_time_ms: result.processing_time_ms,
            outputs: outputs.clone(),
        })
    }
}

/// Run the Tesseract-backed pipeline on one image.
pub fn ocr_to_files(
    config: &PipelineConfig,
    image_path: &Path,
    output_html_path: &Path,
    output_txt_path: &Path,
    output_docx_path: &Path,
) -> Result<ExtractionReport, PipelineError> {
    let outputs = OutputPaths {
        html: output_html_path.to_path_buf(),
        text: output_txt_path.to_path_buf(),
        docx: output_docx_path.to_path_buf(),
    };
    DocumentExtractionPipeline::new(config).process(image_path, &outputs)
}

/// Reject inputs that are missing or don't sniff as a raster image.
fn check_image(path: &Path) -> Result<(), PipelineError> {
    let unsupported = |reason: String| PipelineError::UnsupportedImage {
        path: path.to_path_buf(),
        reason,
    };

    match infer::get_from_path(path) {
        Ok(Some(kind)) if kind.matcher_type() == infer::MatcherType::Image => Ok(()),
        Ok(Some(kind)) => Err(unsupported(format!("content is {}", kind.mime_type()))),
        Ok(None) => Err(unsupported("unrecognized content".to_string())),
        Err(e) => Err(unsupported(e.to_string())),
    }
}
