pub mod config;

pub use config::{AppConfig, ConfigError, PaletteConfig, TaggingConfig, UploadConfig};
