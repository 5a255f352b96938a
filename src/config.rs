//! Configuration loading and management
//!
//! Handles parsing of `.td.toml` configuration files.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".td.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Backing file configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Listing and footer display
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Backing file configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// Backing file or its directory; `--db` / `TODO_DB_PATH` take priority
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Display configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Colour the status signs and hashtags
    #[serde(default = "default_true")]
    pub color: bool,

    /// Print the backing file path after each command
    #[serde(default = "default_true")]
    pub show_path: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            show_path: true,
        }
    }
}

impl Config {
    /// Load configuration from a `.td.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `dir/.td.toml`, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring config");
                Self::default()
            }
        }
    }

    fn validate(&self) -> crate::error::Result<()> {
        if let Some(path) = &self.store.path {
            if path.as_os_str().is_empty() {
                return Err(crate::error::Error::InvalidConfig(
                    "store.path cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
