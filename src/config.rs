//! Application configuration management.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. Built-in defaults
//! 2. A JSON config file (`--config PATH`, `FIND_DUPLICATES_CONFIG`, or the
//!    platform config directory)
//! 3. Command-line flags
//!
//! ```json
//! { "greater_than": 5.0, "progress": true, "output": "text" }
//! ```

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{megabytes_to_bytes, Cli, OutputFormat};
use crate::error::ArgumentError;

/// Application configuration file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default size threshold in megabytes.
    pub greater_than: Option<f64>,
    /// Whether progress markers are printed.
    pub progress: bool,
    /// Default report format.
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            greater_than: None,
            progress: true,
            output: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Load the configuration from `path`, or from the default
    /// platform-specific location when `path` is `None`.
    ///
    /// Missing, unreadable or malformed files fall back to defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::config_path() {
                Ok(p) => p,
                Err(e) => {
                    log::debug!("No config directory, using defaults: {}", e);
                    return Self::default();
                }
            },
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    /// Read one config file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the default platform-specific configuration path.
    fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "find_duplicates")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.json"))
    }
}

/// Effective settings for one run, after merging the CLI over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Threshold in megabytes, if any, as the user wrote it
    pub greater_than_mb: Option<f64>,
    /// Threshold in bytes (0 when unset)
    pub greater_than_bytes: u64,
    /// Print progress markers
    pub progress: bool,
    /// Report format
    pub output: OutputFormat,
}

impl Settings {
    /// Merge command-line flags over a loaded config.
    ///
    /// Progress markers are always off for JSON output so that stdout stays
    /// a single JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::InvalidThreshold`] if the config file holds a
    /// negative or non-finite threshold.
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self, ArgumentError> {
        let greater_than_mb = cli.greater_than.or(config.greater_than);
        if let Some(mb) = greater_than_mb {
            if !mb.is_finite() || mb < 0.0 {
                return Err(ArgumentError::InvalidThreshold(mb));
            }
        }

        let output = cli.output.unwrap_or(config.output);
        let progress = config.progress && !cli.no_progress && output == OutputFormat::Text;

        Ok(Self {
            greater_than_mb,
            greater_than_bytes: greater_than_mb.map_or(0, megabytes_to_bytes),
            progress,
            output,
        })
    }
}
