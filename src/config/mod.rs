//! Configuration management for tagfield.
//!
//! Settings are read from `config.toml` in the platform configuration
//! directory (for example `~/.config/tagfield/config.toml` on Linux).
//! A missing file means defaults; every section and key is optional.

mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::ui::components::MAX_ITEMS_LIMIT;

pub use settings::{UiSettings, WidgetSettings, DEFAULT_TICK_RATE_MS};

/// Smallest accepted tick rate, in milliseconds.
const MIN_TICK_RATE_MS: u64 = 10;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tag widget settings.
    pub widget: WidgetSettings,
    /// Terminal UI settings.
    pub ui: UiSettings,
}

impl Config {
    /// Path of the default configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if the platform has no
    /// configuration directory.
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("tagfield").join("config.toml"))
    }

    /// Load the default configuration file, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed or
    /// validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` describing the first
    /// offending value.
    pub fn validate(&self) -> Result<()> {
        if self.widget.max_items == 0 {
            return Err(ConfigError::ValidationError(
                "widget.max_items must be at least 1".to_string(),
            ));
        }
        if self.widget.max_items > MAX_ITEMS_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "widget.max_items must be at most {}",
                MAX_ITEMS_LIMIT
            )));
        }
        if self.ui.tick_rate_ms < MIN_TICK_RATE_MS {
            return Err(ConfigError::ValidationError(format!(
                "ui.tick_rate_ms must be at least {}",
                MIN_TICK_RATE_MS
            )));
        }
        Ok(())
    }
}
