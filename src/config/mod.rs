//! Configuration for the admin console
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/searchkro-admin/config.toml)
//! 3. Built-in defaults (lowest priority)

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod endpoints;
mod observability;
mod serialization;

#[cfg(test)]
mod tests;

pub use endpoints::{Endpoints, FileEndpoints};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name under ~/.config
const APP_DIR: &str = "searchkro-admin";

const DEFAULT_API_URL: &str = "https://elite-day-3-5.onrender.com";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL every endpoint is resolved against
    pub api_url: String,

    /// Where the session token is persisted between runs
    pub session_file: PathBuf,

    /// Per-request timeout
    pub request_timeout_secs: u64,

    /// Starting value of the logout countdown popup
    pub countdown_secs: u32,

    /// Delay before leaving the reset-password screen after success
    pub reset_redirect_ms: u64,

    /// TUI color theme ("auto" or "light")
    pub theme: String,

    pub endpoints: Endpoints,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: Self::default_session_file(),
            request_timeout_secs: 30,
            countdown_secs: 3,
            reset_redirect_ms: 1200,
            theme: "auto".to_string(),
            endpoints: Endpoints::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub session_file: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub countdown_secs: Option<u32>,
    pub reset_redirect_ms: Option<u64>,
    pub theme: Option<String>,

    /// Optional [endpoints] section
    pub endpoints: Option<FileEndpoints>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Config directory: ~/.config/searchkro-admin
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join(APP_DIR))
    }

    /// Config file path: ~/.config/searchkro-admin/config.toml
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    fn default_session_file() -> PathBuf {
        Self::config_dir()
            .map(|d| d.join("session.json"))
            .unwrap_or_else(|| PathBuf::from("./searchkro-session.json"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        if let Err(e) = std::fs::write(&path, Self::default().to_toml()) {
            tracing::debug!("Could not write config template {}: {}", path.display(), e);
        }
    }

    /// Parse a config file. A missing file yields defaults; a broken one is an error.
    pub(crate) fn read_file_config(path: &Path) -> Result<FileConfig> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).with_context(|| {
                format!(
                    "Failed to parse configuration file {} (check quoting, booleans and section names)",
                    path.display()
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(e)
                .with_context(|| format!("Cannot read configuration file {}", path.display())),
        }
    }

    /// Load configuration: env vars > config file > defaults
    pub fn load() -> Result<Self> {
        let file = match Self::config_path() {
            Some(path) => Self::read_file_config(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::resolve(file, |key| std::env::var(key).ok()))
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // API URL: env > file > default
        let api_url = env("SEARCHKRO_API_URL")
            .or(file.api_url)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        // Session file: env > file > default
        let session_file = env("SEARCHKRO_SESSION_FILE")
            .or(file.session_file)
            .map(PathBuf::from)
            .unwrap_or(defaults.session_file);

        // Countdown: env > file > default
        let countdown_secs = env("SEARCHKRO_COUNTDOWN_SECS")
            .and_then(|v| v.parse().ok())
            .or(file.countdown_secs)
            .unwrap_or(defaults.countdown_secs);

        Self {
            api_url,
            session_file,
            request_timeout_secs: file
                .request_timeout_secs
                .unwrap_or(defaults.request_timeout_secs),
            countdown_secs,
            reset_redirect_ms: file
                .reset_redirect_ms
                .unwrap_or(defaults.reset_redirect_ms),
            theme: file.theme.unwrap_or(defaults.theme),
            endpoints: Endpoints::from_file(file.endpoints),
            logging: LoggingConfig::from_file(file.logging),
        }
    }
}
