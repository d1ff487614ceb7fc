//! Configuration file loading with precedence handling.
//!
//! Precedence chain: Defaults → Config File → Env Vars → CLI Args.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are
/// used. Corresponds to `~/.config/chatpane/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Pane title shown in the header.
    #[serde(default)]
    pub title: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Event loop tick interval in milliseconds.
    #[serde(default)]
    pub tick_rate_ms: Option<u64>,

    /// Rows scrolled per mouse wheel notch.
    #[serde(default)]
    pub mouse_scroll_step: Option<usize>,

    /// TCP endpoint probed by the connectivity watcher.
    #[serde(default)]
    pub probe_addr: Option<String>,

    /// Seconds between connectivity probes.
    #[serde(default)]
    pub probe_interval_secs: Option<u64>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Pane title shown in the header.
    pub title: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Event loop tick interval in milliseconds.
    pub tick_rate_ms: u64,
    /// Rows scrolled per mouse wheel notch.
    pub mouse_scroll_step: usize,
    /// TCP endpoint probed by the connectivity watcher.
    pub probe_addr: String,
    /// Seconds between connectivity probes.
    pub probe_interval_secs: u64,
    /// Disable the connectivity watcher entirely (CLI only).
    pub offline: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            title: "Conversation".to_string(),
            log_file_path: default_log_path(),
            tick_rate_ms: 100,
            mouse_scroll_step: 3,
            probe_addr: "1.1.1.1:53".to_string(),
            probe_interval_secs: 5,
            offline: false,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/chatpane/chatpane.log` on Unix-like systems,
/// or the platform state directory elsewhere. Falls back to the current
/// directory when no state directory can be determined.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("chatpane").join("chatpane.log")
    } else {
        PathBuf::from("chatpane.log")
    }
}

/// Resolve the default config file path
/// (`~/.config/chatpane/config.toml`), if a config directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chatpane").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if the file doesn't exist (not an error - use
/// defaults). Returns `Err` if the file exists but cannot be read or
/// parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load the config file with path precedence: an explicitly given path
/// must exist and parse; otherwise the default location is tried and a
/// missing file falls back to defaults.
pub fn load_config_with_precedence(
    explicit: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    match explicit {
        Some(path) => load_config_file(path),
        None => match default_config_path() {
            Some(path) => load_config_file(path),
            None => Ok(None),
        },
    }
}

/// Merge an optional config file over the defaults.
pub fn merge_config(file: Option<ConfigFile>) -> ResolvedConfig {
    let mut resolved = ResolvedConfig::default();
    if let Some(file) = file {
        if let Some(title) = file.title {
            resolved.title = title;
        }
        if let Some(path) = file.log_file_path {
            resolved.log_file_path = path;
        }
        if let Some(tick) = file.tick_rate_ms {
            resolved.tick_rate_ms = tick;
        }
        if let Some(step) = file.mouse_scroll_step {
            resolved.mouse_scroll_step = step;
        }
        if let Some(addr) = file.probe_addr {
            resolved.probe_addr = addr;
        }
        if let Some(interval) = file.probe_interval_secs {
            resolved.probe_interval_secs = interval;
        }
    }
    resolved
}

/// Apply environment variable overrides (`CHATPANE_TITLE`,
/// `CHATPANE_LOG_FILE`, `CHATPANE_PROBE_ADDR`).
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(title) = std::env::var("CHATPANE_TITLE") {
        config.title = title;
    }
    if let Ok(path) = std::env::var("CHATPANE_LOG_FILE") {
        config.log_file_path = PathBuf::from(path);
    }
    if let Ok(addr) = std::env::var("CHATPANE_PROBE_ADDR") {
        config.probe_addr = addr;
    }
    config
}

/// Apply CLI argument overrides. CLI wins over every other source.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    title: Option<String>,
    offline: Option<bool>,
) -> ResolvedConfig {
    if let Some(title) = title {
        config.title = title;
    }
    if let Some(offline) = offline {
        config.offline = offline;
    }
    config
}

// ===== Tests =====

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
