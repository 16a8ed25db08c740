//! Application configuration
//!
//! Loaded from TOML, then overridden by `TASKFLOW_API_URL` and
//! `TASKFLOW_LOG`. Every field has a default, so an absent file is fine.
//!
//! ```toml
//! api_url = "http://localhost:3000"
//! timeout_secs = 30
//!
//! [log]
//! filter = "info,taskflow_view=debug"
//! format = "json"
//! ```

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use taskflow_client::DEFAULT_BASE_URL;

/// Environment variable overriding the backend URL
pub const ENV_API_URL: &str = "TASKFLOW_API_URL";
/// Environment variable overriding the log filter
pub const ENV_LOG: &str = "TASKFLOW_LOG";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON structured logs
    Json,
    /// Human-readable logs
    #[default]
    Pretty,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive
    pub filter: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskflowConfig {
    /// Backend base URL
    pub api_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Logging
    pub log: LogConfig,
}

impl TaskflowConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML
    ///
    /// # Errors
    /// Returns [`AppError::Config`] on malformed input
    pub fn from_toml_str(raw: &str) -> Result<Self, AppError> {
        toml::from_str(raw).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load from `path` if given and present, then apply environment overrides
    ///
    /// # Errors
    /// Returns [`AppError::Config`] if the file exists but cannot be read or parsed
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let config = match path {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?;
                Self::from_toml_str(&raw)?
            }
            Some(path) => {
                tracing::debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply overrides from a variable lookup
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_url = url;
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.log.filter = filter;
        }
        self
    }

    /// With backend URL
    #[inline]
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log.filter = filter.into();
        self
    }

    /// With log format
    #[inline]
    #[must_use]
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log.format = format;
        self
    }

    /// Request timeout
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TaskflowConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            log: LogConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = TaskflowConfig::from_toml_str("timeout_secs = 5\n[log]\nformat = \"json\"").unwrap();
        assert_eq!(config.api_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.log.format, LogFormat::Json);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn overrides_win_over_file() {
        let config = TaskflowConfig::from_toml_str("api_url = \"http://file\"")
            .unwrap()
            .with_overrides(|key| match key {
                ENV_API_URL => Some("http://env".into()),
                ENV_LOG => Some(String::new()),
                _ => None,
            });
        assert_eq!(config.api_url, "http://env");
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_url = \"http://staging:3000\"").unwrap();
        let config = TaskflowConfig::load(Some(file.path())).unwrap();
        // An exported TASKFLOW_API_URL would win here
        if std::env::var(ENV_API_URL).is_err() {
            assert_eq!(config.api_url, "http://staging:3000");
        }
    }

    #[test]
    fn malformed_file_is_config_error() {
        assert!(matches!(
            TaskflowConfig::from_toml_str("timeout_secs = \"soon\""),
            Err(AppError::Config(_))
        ));
    }
}
