//! Client configuration for Qaekwy.
//!
//! Load the engine endpoint and solve defaults from TOML or YAML files so
//! they can change without recompiling.
//!
//! # Examples
//!
//! ```
//! use qaekwy_config::ClientConfig;
//! use qaekwy_core::SearcherType;
//! use std::time::Duration;
//!
//! let config = ClientConfig::from_toml_str(r#"
//!     endpoint = "https://engine.example.invalid/v1"
//!     timeout_seconds = 120
//!
//!     [solve]
//!     searcher = "bab"
//!     solution_limit = 3
//! "#).unwrap();
//!
//! assert_eq!(config.timeout(), Duration::from_secs(120));
//! assert_eq!(config.solve.searcher, SearcherType::Bab);
//! assert_eq!(config.solve.solution_limit, 3);
//! ```
//!
//! Use defaults when the file is missing:
//!
//! ```
//! use qaekwy_config::ClientConfig;
//!
//! let config = ClientConfig::load("qaekwy.toml").unwrap_or_default();
//! ```

#[cfg(test)]
mod tests;

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use qaekwy_core::SearcherType;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 3600;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Engine connection and solve defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ClientConfig {
    /// Base URL of the engine; commands are appended as path segments.
    #[serde(default)]
    pub endpoint: String,

    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Verify TLS certificates.
    #[serde(default = "default_true")]
    pub ssl_verify: bool,

    #[serde(default)]
    pub solve: SolveConfig,

    /// `tracing` filter directive, e.g. `qaekwy=debug`.
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            ssl_verify: true,
            solve: SolveConfig::default(),
            log_filter: None,
        }
    }
}

impl ClientConfig {
    /// Creates a default configuration for `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn with_ssl_verify(mut self, verify: bool) -> Self {
        self.ssl_verify = verify;
        self
    }

    pub fn with_searcher(mut self, searcher: SearcherType) -> Self {
        self.solve.searcher = searcher;
        self
    }

    pub fn with_solution_limit(mut self, limit: u32) -> Self {
        self.solve.solution_limit = limit;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = Some(filter.into());
        self
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".into()));
        }
        if self.solve.solution_limit == 0 {
            return Err(ConfigError::Invalid(
                "solve.solution_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Joins the endpoint and a command path.
    pub fn command_url(&self, command: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            command.trim_start_matches('/')
        )
    }
}

/// Defaults applied when a model is solved without explicit settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolveConfig {
    /// Search procedure; any case is accepted.
    #[serde(default, deserialize_with = "searcher_any_case")]
    pub searcher: SearcherType,

    #[serde(default = "default_solution_limit")]
    pub solution_limit: u32,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            searcher: SearcherType::default(),
            solution_limit: default_solution_limit(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_true() -> bool {
    true
}

fn default_solution_limit() -> u32 {
    1
}

fn searcher_any_case<'de, D>(deserializer: D) -> Result<SearcherType, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    text.parse().map_err(serde::de::Error::custom)
}
