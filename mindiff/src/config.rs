//! Configuration loading for mindiff.
//!
//! Supports loading configuration from TOML files, with sensible defaults
//! for all settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use mindiff_core::stats::{DEFAULT_POWER, DEFAULT_SIGNIFICANCE};

/// Top-level configuration for mindiff.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Settings for the sample-size statistics.
    pub statistics: StatisticsConfig,
    /// Settings for talking to the experiment platform API.
    pub platform: PlatformConfig,
    /// Settings for terminal output.
    pub display: DisplayConfig,
}

/// Configuration for the sample-size statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsConfig {
    /// Two-sided significance level, alpha (default: 0.05).
    pub significance: f64,
    /// Statistical power target, 1 - beta (default: 0.8).
    pub power: f64,
}

/// Configuration for the experiment platform API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Base URL of the platform API.
    pub base_url: String,
    /// Timeout in milliseconds for platform requests.
    pub timeout_ms: u64,
}

/// Configuration for terminal output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Whether to use colored output.
    pub colors: bool,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            significance: DEFAULT_SIGNIFICANCE,
            power: DEFAULT_POWER,
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_ms: 30_000, // 30 seconds
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { colors: true }
    }
}

/// Default configuration file name.
const DEFAULT_CONFIG_FILE: &str = ".mindiff.toml";

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from the default file (`.mindiff.toml`) or use
    /// defaults.
    ///
    /// This function searches for the configuration file in the current
    /// directory. If the file doesn't exist, default configuration is
    /// returned. If the file exists but cannot be parsed, an error is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be
    /// parsed.
    pub fn load_or_default() -> Result<Config> {
        let path = Path::new(DEFAULT_CONFIG_FILE);

        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from the specified path, or try default locations.
    ///
    /// # Errors
    ///
    /// Returns an error if the specified file cannot be read or parsed.
    pub fn load_from(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(p) => Self::load(p),
            None => Self::load_or_default(),
        }
    }
}
