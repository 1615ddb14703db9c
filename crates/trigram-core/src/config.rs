//! Configuration management.
//!
//! Configuration is stored in TOML format in a platform-appropriate location.
//! Every section falls back to its defaults, so a partial file is valid.

use crate::error::{Result, TrigramError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure.
///
/// ## Example Configuration File (trigram.toml)
///
/// ```toml
/// [general]
/// log_level = "info"
///
/// [index]
/// prune_limit = 5000
///
/// [search]
/// max_results = 1000
/// parallel_threshold = 10000
/// verify = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Index construction and pruning
    pub index: IndexConfig,

    /// Query execution
    pub search: SearchConfig,
}

/// General configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log_level: "info".to_string(),
        }
    }
}

/// Index configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Prune posting lists longer than this after a bulk load (None = never)
    pub prune_limit: Option<usize>,

    /// Name slots the catalog reserves up front; the index itself grows on demand
    pub initial_capacity: usize,
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of results to return
    pub max_results: usize,

    /// Candidate count above which verification runs in parallel
    pub parallel_threshold: usize,

    /// Re-check candidates against the full pattern
    pub verify: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_results: 1000,
            parallel_threshold: 10000,
            verify: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default config if no config file exists.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Config::default());
        }

        info!(path = %path.display(), "Loading configuration");
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| TrigramError::config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        info!(path = %path.display(), "Saving configuration");
        let contents = toml::to_string_pretty(self)
            .map_err(|e| TrigramError::config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "trigram")
            .ok_or_else(|| TrigramError::config("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("trigram.toml"))
    }
}
