//! Environment check command.

use console::style;

use crate::config::Settings;
use crate::ocr::{OcrBackend, TesseractBackend};

/// Report whether OCR can run with the current settings.
pub fn cmd_check(settings: &Settings) -> anyhow::Result<()> {
    let backend = TesseractBackend::with_config(settings.pipeline_config().ocr_config());

    println!(
        "{} tesseract: {}",
        style("→").cyan(),
        settings.tesseract.display()
    );
    println!(
        "{} trained data: {} ({})",
        style("→").cyan(),
        settings.tessdata_dir.display(),
        settings.language
    );

    if backend.is_available() {
        println!("  {} {}", style("✓").green(), backend.availability_hint());
        Ok(())
    } else {
        let hint = backend.availability_hint();
        eprintln!("  {} {}", style("✗").red(), hint);
        Err(anyhow::anyhow!("{} backend unavailable", backend.backend_type()))
    }
}
