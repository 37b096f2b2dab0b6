//! Configuration module for the hlot CLI.
//!
//! This module handles loading configuration settings for the hlot
//! application from `hlot.toml`.

use dirs::{config_dir, home_dir};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{HlotError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "hlot.toml";

/// Application configuration structure.
///
/// Every field has a default, so an empty file is a valid configuration.
/// Command-line flags take precedence over values loaded here.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    /// Global verbose setting.
    #[serde(default)]
    pub verbose: bool,

    /// Settings for the `tokens` command.
    #[serde(default)]
    pub tokens: TokensConfig,
}

/// Settings for the `tokens` command.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TokensConfig {
    /// Output format, `text` or `json`.
    #[serde(default = "default_format")]
    pub format: String,

    /// Print `line:column` for every token.
    #[serde(default)]
    pub show_locations: bool,

    /// Treat an error token as a failure (non-zero exit and a diagnostic).
    #[serde(default = "default_true")]
    pub stop_on_error: bool,
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for TokensConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            show_locations: false,
            stop_on_error: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Searches for configuration in the following order:
    /// 1. Current directory
    /// 2. `~/.config/hlot/`
    /// 3. System configuration directory
    ///
    /// Returns the default configuration if no config file is found.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(HlotError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| HlotError::Config(format!("Failed to parse configuration: {}", e)))?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Check for config in current directory.
    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    /// Check for config in home directory.
    fn check_home_config() -> Option<PathBuf> {
        home_dir()
            .map(|dir| dir.join(".config").join("hlot").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Check for config in system config directory.
    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("hlot").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Find the configuration file in standard locations.
    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}
