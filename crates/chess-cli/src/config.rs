//! Configuration file loading for the terminal front end.
//!
//! Settings live in a small TOML file, `chess.toml` in the working directory
//! unless another path is given on the command line. Every key is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// How the board and move lists are drawn.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Draw pieces with Unicode chess glyphs instead of letters.
    #[serde(default)]
    pub unicode: bool,
    /// Print file and rank labels around the board. Defaults to true.
    #[serde(default = "default_coordinates")]
    pub coordinates: bool,
    /// List the legal moves after every ply.
    #[serde(default)]
    pub show_moves: bool,
}

fn default_coordinates() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            unicode: false,
            coordinates: default_coordinates(),
            show_moves: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Maximum tracing level ("error", "warn", "info", "debug", "trace").
    /// Defaults to "warn".
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Top-level configuration for `chess-play`.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct PlayConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl PlayConfig {
    /// Loads the configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default configuration path, `chess.toml` in the current
    /// working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }
}
