//! ocrdoc - image OCR to HTML, plain text and DOCX.
//!
//! Core library exposing the extraction pipeline and the thin web/CLI
//! surfaces around it.

pub mod cli;
pub mod config;
pub mod export;
pub mod ocr;
pub mod pipeline;
pub mod server;
pub mod upload;

pub use pipeline::{ocr_to_files, DocumentExtractionPipeline, ExtractionReport, PipelineError};
