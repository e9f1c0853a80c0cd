//! One-shot conversion command.

use std::path::Path;

use anyhow::Context;
use console::style;

use crate::config::Settings;
use crate::pipeline::{DocumentExtractionPipeline, OutputPaths};
use crate::upload::{base_name, secure_filename};

/// Run the pipeline on a single image from the shell.
pub async fn cmd_convert(
    settings: &Settings,
    image: &Path,
    out_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let out_dir = out_dir.unwrap_or(&settings.results_dir).to_path_buf();
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("cannot create output directory {}", out_dir.display()))?;

    let filename = image
        .file_name()
        .map(|n| secure_filename(&n.to_string_lossy()))
        .filter(|n| !n.is_empty())
        .with_context(|| format!("cannot derive an output name from {}", image.display()))?;
    let outputs = OutputPaths::in_dir(&out_dir, base_name(&filename));

    println!("{} Recognizing {}", style("→").cyan(), image.display());

    let config = settings.pipeline_config();
    let image_path = image.to_path_buf();
    let report = tokio::task::spawn_blocking(move || {
        DocumentExtractionPipeline::new(&config).process(&image_path, &outputs)
    })
    .await??;

    match report.font {
        Some(font) => println!(
            "  {} Average font size {}pt over {} symbols ({} ms)",
            style("✓").green(),
            font.css_size(),
            font.symbols,
            report.processing_time_ms
        ),
        None => println!(
            "  {} No symbols recognized; outputs written without font size",
            style("!").yellow()
        ),
    }
    for path in [
        &report.outputs.html,
        &report.outputs.text,
        &report.outputs.docx,
    ] {
        println!("  {} {}", style("✓").green(), path.display());
    }

    Ok(())
}
