//! Output artifact writers.
//!
//! Every exporter renders the same [`ExtractedDocument`] to one file. The
//! writers are independent; a failure in one says nothing about the others.

mod docx;
mod html;
mod text;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ocr::FontEstimate;

pub use self::docx::DocxExporter;
pub use self::html::{html_escape, HtmlExporter};
pub use self::text::TextExporter;

/// Errors from artifact writers.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build DOCX {}: {message}", path.display())]
    Docx { path: PathBuf, message: String },
}

impl ExportError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Recognized text and its estimated font size, ready for rendering.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub text: String,
    pub font: Option<FontEstimate>,
}

impl ExtractedDocument {
    pub fn new(text: impl Into<String>, font: Option<FontEstimate>) -> Self {
        Self {
            text: text.into(),
            font,
        }
    }

    /// Newline-delimited segments of the text, one per output paragraph.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// Writes an [`ExtractedDocument`] to a file in one format.
pub trait Exporter {
    /// Short format name used in logs ("html", "txt", "docx").
    fn format(&self) -> &'static str;

    fn export(&self, document: &ExtractedDocument, path: &Path) -> Result<(), ExportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_split_on_newline() {
        let doc = ExtractedDocument::new("HELLO\nWORLD", None);
        assert_eq!(doc.paragraphs().collect::<Vec<_>>(), vec!["HELLO", "WORLD"]);

        let doc = ExtractedDocument::new("a\n\nb", None);
        assert_eq!(doc.paragraphs().collect::<Vec<_>>(), vec!["a", "", "b"]);
    }

    #[test]
    fn test_empty_text_is_one_empty_paragraph() {
        let doc = ExtractedDocument::new("", None);
        assert_eq!(doc.paragraphs().collect::<Vec<_>>(), vec![""]);
    }
}
