//! Configuration management for ocrdoc.
//!
//! `Config` is what a config file says; `Settings` is the fully resolved
//! runtime view (defaults, then file, then `--data`, then environment).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineConfig;
use crate::upload::DEFAULT_ALLOWED_EXTENSIONS;

/// Subdirectory for saved uploads.
pub const UPLOADS_SUBDIR: &str = "uploads";
/// Subdirectory for generated artifacts.
pub const RESULTS_SUBDIR: &str = "results";
/// Default trained-data directory name.
pub const TESSDATA_SUBDIR: &str = "tessdata-main";
/// Default upload size limit (16 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Where uploaded images are saved.
    pub upload_dir: PathBuf,
    /// Where HTML/TXT/DOCX artifacts are written and served from.
    pub results_dir: PathBuf,
    /// Tesseract trained-data directory.
    pub tessdata_dir: PathBuf,
    /// OCR language code.
    pub language: String,
    /// Tesseract executable.
    pub tesseract: PathBuf,
    /// Accepted upload extensions (lowercase, no dot).
    pub allowed_extensions: Vec<String>,
    /// Maximum accepted request body size.
    pub max_upload_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_data_dir(PathBuf::from("."))
    }
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            upload_dir: data_dir.join(UPLOADS_SUBDIR),
            results_dir: data_dir.join(RESULTS_SUBDIR),
            tessdata_dir: data_dir.join(TESSDATA_SUBDIR),
            data_dir,
            language: "eng".to_string(),
            tesseract: PathBuf::from("tesseract"),
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Engine settings handed to each pipeline run.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            tessdata_dir: self.tessdata_dir.clone(),
            language: self.language.clone(),
            tesseract: self.tesseract.clone(),
        }
    }

    /// Ensure the upload and results directories exist.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        for (label, dir) in [("upload", &self.upload_dir), ("results", &self.results_dir)] {
            tracing::debug!("{} dir: {}", label, dir.display());
            fs::create_dir_all(dir).map_err(|e| {
                std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create {} directory '{}': {}",
                        label,
                        dir.display(),
                        e
                    ),
                )
            })?;
        }
        Ok(())
    }

    /// Apply `OCRDOC_*` environment overrides.
    fn apply_env_overrides(&mut self) {
        if let Some(dir) = env_value("OCRDOC_TESSDATA_DIR") {
            tracing::debug!("Using OCRDOC_TESSDATA_DIR from environment: {}", dir);
            self.tessdata_dir = PathBuf::from(shellexpand::tilde(&dir).as_ref());
        }
        if let Some(lang) = env_value("OCRDOC_LANG") {
            tracing::debug!("Using OCRDOC_LANG from environment: {}", lang);
            self.language = lang;
        }
        if let Some(bin) = env_value("OCRDOC_TESSERACT") {
            tracing::debug!("Using OCRDOC_TESSERACT from environment: {}", bin);
            self.tesseract = PathBuf::from(shellexpand::tilde(&bin).as_ref());
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data directory path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Upload directory (defaults to `<data_dir>/uploads`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_dir: Option<String>,
    /// Results directory (defaults to `<data_dir>/results`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_dir: Option<String>,
    /// Trained-data directory (defaults to `<data_dir>/tessdata-main`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tessdata_dir: Option<String>,
    /// OCR language code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Tesseract executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tesseract: Option<String>,
    /// Accepted upload extensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_extensions: Option<Vec<String>>,
    /// Maximum upload size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<usize>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer for discovery.
    /// Finds `ocrdoc.{toml,yaml,json,...}` in standard locations.
    pub async fn load() -> Self {
        match prefer::load("ocrdoc").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            // No config file found
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Format is chosen by extension: TOML, YAML, otherwise JSON.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config: Config = match ext {
            "toml" => toml::from_str(&contents)
                .map_err(|e| format!("Failed to parse TOML config: {}", e))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e))?,
            _ => serde_json::from_str(&contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e))?,
        };

        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Get the base directory for resolving relative paths.
    /// Returns the config file's parent directory if available, otherwise None.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    /// `base_dir` is used to resolve relative paths (typically config file dir or CWD).
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref data_dir) = self.data_dir {
            let data_dir = self.resolve_path(data_dir, base_dir);
            let defaults = Settings::with_data_dir(data_dir);
            settings.upload_dir = defaults.upload_dir;
            settings.results_dir = defaults.results_dir;
            settings.tessdata_dir = defaults.tessdata_dir;
            settings.data_dir = defaults.data_dir;
        }
        if let Some(ref dir) = self.upload_dir {
            settings.upload_dir = self.resolve_path(dir, base_dir);
        }
        if let Some(ref dir) = self.results_dir {
            settings.results_dir = self.resolve_path(dir, base_dir);
        }
        if let Some(ref dir) = self.tessdata_dir {
            settings.tessdata_dir = self.resolve_path(dir, base_dir);
        }
        if let Some(ref language) = self.language {
            settings.language = language.clone();
        }
        if let Some(ref tesseract) = self.tesseract {
            // Bare names are looked up in PATH, not resolved against base_dir.
            settings.tesseract = if tesseract.contains('/') {
                self.resolve_path(tesseract, base_dir)
            } else {
                PathBuf::from(tesseract)
            };
        }
        if let Some(ref extensions) = self.allowed_extensions {
            settings.allowed_extensions = extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect();
        }
        if let Some(limit) = self.max_upload_bytes {
            settings.max_upload_bytes = limit;
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Use CWD for relative paths instead of config file directory.
    pub use_cwd: bool,
    /// Data directory override (--data flag).
    pub data: Option<PathBuf>,
}

/// Load config from file sources.
async fn load_file_config(options: &LoadOptions) -> Config {
    // Priority 1: Explicit --config flag
    if let Some(ref config_path) = options.config_path {
        return match Config::load_from_path(config_path).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}", e);
                Config::default()
            }
        };
    }

    // Priority 2: Auto-discover via prefer
    Config::load().await
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(options: LoadOptions) -> (Settings, Config) {
    let config = load_file_config(&options).await;
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let base_dir = if options.use_cwd {
        cwd.clone()
    } else {
        config.base_dir().unwrap_or_else(|| cwd.clone())
    };

    let mut settings = Settings::with_data_dir(cwd.clone());
    config.apply_to_settings(&mut settings, &base_dir);

    // --data override takes precedence for all data-relative directories
    if let Some(data) = options.data {
        let data_dir = if data.is_absolute() { data } else { cwd.join(data) };
        let defaults = Settings::with_data_dir(data_dir);
        settings.upload_dir = defaults.upload_dir;
        settings.results_dir = defaults.results_dir;
        settings.tessdata_dir = defaults.tessdata_dir;
        settings.data_dir = defaults.data_dir;
    }

    // Environment variables take highest precedence
    settings.apply_env_overrides();

    (settings, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_layout() {
        let settings = Settings::with_data_dir(PathBuf::from("/srv/ocr"));
        assert_eq!(settings.upload_dir, Path::new("/srv/ocr/uploads"));
        assert_eq!(settings.results_dir, Path::new("/srv/ocr/results"));
        assert_eq!(settings.tessdata_dir, Path::new("/srv/ocr/tessdata-main"));
        assert_eq!(settings.allowed_extensions, vec!["png", "jpg", "jpeg"]);
        assert_eq!(settings.language, "eng");
    }

    #[test]
    fn test_apply_resolves_relative_to_base_dir() {
        let config = Config {
            data_dir: Some("data".to_string()),
            results_dir: Some("/var/out".to_string()),
            language: Some("deu".to_string()),
            tesseract: Some("bin/tesseract".to_string()),
            allowed_extensions: Some(vec![".PNG".to_string(), "tif".to_string()]),
            ..Default::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/etc/ocrdoc"));

        assert_eq!(settings.data_dir, Path::new("/etc/ocrdoc/data"));
        assert_eq!(settings.upload_dir, Path::new("/etc/ocrdoc/data/uploads"));
        assert_eq!(settings.results_dir, Path::new("/var/out"));
        assert_eq!(
            settings.tessdata_dir,
            Path::new("/etc/ocrdoc/data/tessdata-main")
        );
        assert_eq!(settings.language, "deu");
        assert_eq!(settings.tesseract, Path::new("/etc/ocrdoc/bin/tesseract"));
        assert_eq!(settings.allowed_extensions, vec!["png", "tif"]);
    }

    #[test]
    fn test_bare_tesseract_name_is_kept() {
        let config = Config {
            tesseract: Some("tesseract5".to_string()),
            ..Default::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/etc/ocrdoc"));
        assert_eq!(settings.tesseract, Path::new("tesseract5"));
    }

    #[test]
    fn test_pipeline_config_carries_engine_settings() {
        let settings = Settings::with_data_dir(PathBuf::from("/srv/ocr"));
        let pipeline = settings.pipeline_config();
        assert_eq!(pipeline.tessdata_dir, settings.tessdata_dir);
        assert_eq!(pipeline.language, "eng");
        assert_eq!(pipeline.tesseract, Path::new("tesseract"));
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempdir().unwrap();
        let settings = Settings::with_data_dir(dir.path().join("nested"));
        settings.ensure_directories().unwrap();
        assert!(settings.upload_dir.is_dir());
        assert!(settings.results_dir.is_dir());
        // Trained data is never created, only read
        assert!(!settings.tessdata_dir.exists());
    }

    #[tokio::test]
    async fn test_load_from_toml_and_yaml() {
        let dir = tempdir().unwrap();

        let toml_path = dir.path().join("ocrdoc.toml");
        std::fs::write(&toml_path, "language = \"fra\"\nmax_upload_bytes = 1024\n").unwrap();
        let config = Config::load_from_path(&toml_path).await.unwrap();
        assert_eq!(config.language.as_deref(), Some("fra"));
        assert_eq!(config.max_upload_bytes, Some(1024));
        assert_eq!(config.base_dir().as_deref(), Some(dir.path()));

        let yaml_path = dir.path().join("ocrdoc.yaml");
        std::fs::write(&yaml_path, "results_dir: out\n").unwrap();
        let config = Config::load_from_path(&yaml_path).await.unwrap();
        assert_eq!(config.results_dir.as_deref(), Some("out"));
    }

    #[tokio::test]
    async fn test_load_invalid_file_reports_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ocrdoc.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Config::load_from_path(&path).await.unwrap_err();
        assert!(err.contains("JSON"));
    }

    #[tokio::test]
    async fn test_load_settings_with_explicit_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ocrdoc.toml");
        std::fs::write(&path, "results_dir = \"out\"\n").unwrap();

        let (settings, config) = load_settings_with_options(LoadOptions {
            config_path: Some(path.clone()),
            ..Default::default()
        })
        .await;

        assert_eq!(config.source_path.as_deref(), Some(path.as_path()));
        assert_eq!(settings.results_dir, dir.path().join("out"));
    }
}
