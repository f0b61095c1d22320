//! # Configuration
//!
//! Settings are read from a TOML file and then overridden from the
//! environment.
//!
//! ## Sources (later wins)
//!
//! 1. Built-in defaults
//! 2. `--config <path>`, or `wordgroup.toml` in the working directory if present
//! 3. `WORDGROUP_API_URL`: Datamuse base URL
//!
//! ```toml
//! [api]
//! base_url = "https://api.datamuse.com"
//! timeout_secs = 10
//! max_results = 100
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! ```

use crate::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "wordgroup.toml";

/// Public Datamuse endpoint.
pub const DEFAULT_API_URL: &str = "https://api.datamuse.com";

/// Datamuse refuses to return more than this many results.
pub const MAX_RESULTS_LIMIT: u32 = 1000;

/// Maximum config file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api: ApiConfig,
    pub server: ServerConfig,
}

/// Word API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Passed to Datamuse as `max`.
    pub max_results: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 10,
            max_results: 100,
        }
    }
}

/// HTTP service bind address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, AppError> {
        let config: Self =
            toml::from_str(text).map_err(|e| AppError::Config(format!("Invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `wordgroup.toml` is used
    /// if present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let path = match path {
            Some(p) => p,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Path::new(DEFAULT_CONFIG_FILE),
            None => {
                tracing::debug!("No config file, using defaults");
                return Ok(Self::default());
            }
        };

        let metadata = std::fs::metadata(path).map_err(|e| {
            AppError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(AppError::Config(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;

        tracing::info!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Apply environment overrides.
    pub fn with_env_overrides(self) -> Result<Self, AppError> {
        self.with_overrides(std::env::var("WORDGROUP_API_URL").ok())
    }

    /// Apply overrides explicitly; blank values are ignored.
    pub fn with_overrides(mut self, api_url: Option<String>) -> Result<Self, AppError> {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), AppError> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "api.base_url must be an http(s) URL, got '{url}'"
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::Config(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.api.max_results == 0 || self.api.max_results > MAX_RESULTS_LIMIT {
            return Err(AppError::Config(format!(
                "api.max_results must be between 1 and {MAX_RESULTS_LIMIT}"
            )));
        }
        Ok(())
    }
}
