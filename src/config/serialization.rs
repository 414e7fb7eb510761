//! Config serialization to TOML
//!
//! Single source of truth for the config file format.

use super::Config;

/// Quote a string as a TOML basic string
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

impl Config {
    /// Render the `[endpoints]` table
    fn endpoints_to_toml(&self) -> String {
        let mut output = String::from("[endpoints]\n");
        for (key, value) in self.endpoints.entries() {
            output.push_str(&format!("{} = {}\n", key, quoted(value)));
        }
        output
    }

    /// Serialize the full configuration with explanatory comments
    pub fn to_toml(&self) -> String {
        format!(
            r#"# searchkro-admin configuration

# Base URL of the marketplace REST API. Every endpoint below is relative to it.
api_url = {api_url}

# Session token storage (JSON, key "token")
session_file = {session_file}

# Per-request timeout
request_timeout_secs = {timeout}

# Seconds shown by the logout popup before the session is closed
countdown_secs = {countdown}

# Delay before returning to login after a password reset
reset_redirect_ms = {reset_ms}

# TUI theme: auto (terminal palette) or light
theme = {theme}

# Endpoint paths (override when a backend uses e.g. "auth/signup" or "legal-policy")
{endpoints}
# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# File logging (in addition to the TUI buffer)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = {log_file_rotation}  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            api_url = quoted(&self.api_url),
            session_file = quoted(&self.session_file.display().to_string()),
            timeout = self.request_timeout_secs,
            countdown = self.countdown_secs,
            reset_ms = self.reset_redirect_ms,
            theme = quoted(&self.theme),
            endpoints = self.endpoints_to_toml(),
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = quoted(self.logging.file_rotation.as_str()),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}
