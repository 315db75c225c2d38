//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/carnet/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/carnet/` (~/.config/carnet/)
//! - Data: `$XDG_DATA_HOME/carnet/` (~/.local/share/carnet/)
//! - State/Logs: `$XDG_STATE_HOME/carnet/` (~/.local/state/carnet/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_DATA_HOME or ~/.local/share
fn xdg_data_home() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/share"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Statistics configuration
    #[serde(default)]
    pub stats: StatsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Statistics configuration
#[derive(Debug, Deserialize, Clone)]
pub struct StatsConfig {
    /// Number of top tags to report
    #[serde(default = "default_top_tags")]
    pub top_tags: usize,

    /// Number of entries in the country breakdown
    #[serde(default = "default_top_countries")]
    pub top_countries: usize,

    /// Number of top-rated restaurants on the public view
    #[serde(default = "default_top_rated")]
    pub top_rated: usize,

    /// Cache results keyed on (snapshot fingerprint, period)
    #[serde(default = "default_cache_enabled")]
    pub cache_enabled: bool,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            top_tags: default_top_tags(),
            top_countries: default_top_countries(),
            top_rated: default_top_rated(),
            cache_enabled: default_cache_enabled(),
        }
    }
}

fn default_top_tags() -> usize {
    3
}

fn default_top_countries() -> usize {
    10
}

fn default_top_rated() -> usize {
    3
}

fn default_cache_enabled() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/carnet/config.toml` (~/.config/carnet/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("carnet").join("config.toml")
    }

    /// Returns the data directory path (for snapshot files)
    ///
    /// `$XDG_DATA_HOME/carnet/` (~/.local/share/carnet/)
    pub fn data_dir() -> PathBuf {
        xdg_data_home().join("carnet")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/carnet/` (~/.local/state/carnet/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("carnet")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/carnet/carnet.log` (~/.local/state/carnet/carnet.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("carnet.log")
    }
}
