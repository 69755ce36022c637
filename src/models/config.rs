use serde::Deserialize;
use std::path::{Path, PathBuf};
use swatch_palette::{PaletteOptions, DEFAULT_DEDUPE_THRESHOLD};
use thiserror::Error;

use crate::services::DEFAULT_MAX_PIXELS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Swatch extraction defaults
    pub palette: PaletteConfig,

    /// Upload limits
    pub upload: UploadConfig,

    /// Tag suggestion settings
    pub tagging: TaggingConfig,
}

/// Defaults for palette extraction; query parameters override them per request
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub max_colors: usize,
    pub quality: u32,
    pub palette_size: usize,
    pub dedupe_threshold: f64,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            max_colors: 4,
            quality: 5,
            palette_size: 12,
            dedupe_threshold: DEFAULT_DEDUPE_THRESHOLD,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted image body in bytes
    pub max_bytes: usize,

    /// Largest accepted decoded image in pixels (width x height)
    pub max_pixels: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

/// Settings for the language-model tag suggester.
///
/// The API key is never read from this file; see `OPENAI_API_KEY`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TaggingConfig {
    /// Responses endpoint URL
    pub endpoint: String,
    pub model: String,
    /// Upper bound on returned tags
    pub max_tags: usize,
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/responses".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tags: 4,
            temperature: 0.2,
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes to unit, not to an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing or invalid
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file set, using defaults");
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    max_colors = config.palette.max_colors,
                    max_upload = config.upload.max_bytes,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Load from the file named by `CONFIG_FILE`, if any
    pub fn from_env() -> Self {
        let path = std::env::var("CONFIG_FILE").ok().map(PathBuf::from);
        Self::load(path.as_deref())
    }

    /// Extraction options built from the configured defaults
    pub fn palette_options(&self) -> PaletteOptions {
        PaletteOptions::new()
            .max_colors(self.palette.max_colors)
            .quality(self.palette.quality)
            .palette_size(self.palette.palette_size)
            .dedupe_threshold(self.palette.dedupe_threshold)
    }
}
