//! DOCX artifact: one paragraph per line, every run at the estimated size.

use std::fs::File;
use std::path::Path;

use docx_rs::{Docx, Paragraph, Run};

use super::{ExportError, Exporter, ExtractedDocument};

#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExporter;

impl DocxExporter {
    /// Build the document model.
    ///
    /// Runs carry an explicit size only when a font estimate exists;
    /// otherwise they inherit the document default.
    pub fn build(document: &ExtractedDocument) -> Docx {
        let half_points = document.font.map(|font| font.half_points());

        document.paragraphs().fold(Docx::new(), |docx, line| {
            let mut run = Run::new().add_text(line);
            if let Some(size) = half_points {
                run = run.size(size);
            }
            docx.add_paragraph(Paragraph::new().add_run(run))
        })
    }
}

impl Exporter for DocxExporter {
    fn format(&self) -> &'static str {
        "docx"
    }

    fn export(&self, document: &ExtractedDocument, path: &Path) -> Result<(), ExportError> {
        let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
        Self::build(document)
            .build()
            .pack(file)
            .map_err(|e| ExportError::Docx {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}
