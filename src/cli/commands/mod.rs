//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod check;
mod convert;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "ocrdoc")]
#[command(about = "OCR images into HTML, plain text and DOCX")]
#[command(version)]
pub struct Cli {
    /// Data directory holding uploads/, results/ and tessdata-main/
    #[arg(long, short = 'd', global = true)]
    data: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Resolve relative paths from current working directory instead of config file location
    #[arg(long, global = true)]
    cwd: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the upload web server
    Serve {
        /// Address to bind: port, host, or host:port
        #[arg(short, long, default_value = "127.0.0.1:5000")]
        bind: String,
    },

    /// Run OCR on one image and write <name>.html, .txt and .docx
    Convert {
        /// Image file to process
        image: PathBuf,
        /// Output directory (defaults to the results directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Check that tesseract and the trained data are available
    Check,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        use_cwd: cli.cwd,
        data: cli.data,
    };
    let (settings, _config) = load_settings_with_options(options).await;

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&settings, &bind).await,
        Commands::Convert { image, out_dir } => {
            convert::cmd_convert(&settings, &image, out_dir.as_deref()).await
        }
        Commands::Check => check::cmd_check(&settings),
    }
}
