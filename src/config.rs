//! Application configuration.
//!
//! Settings are read from an optional TOML file, with every field defaulted,
//! then overridden from `TASKBRIDGE_*` environment variables and validated.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding [`DatabaseConfig::url`].
pub const ENV_DATABASE_URL: &str = "TASKBRIDGE_DATABASE_URL";
/// Environment variable overriding [`GithubApiConfig::api_url`].
pub const ENV_GITHUB_API_URL: &str = "TASKBRIDGE_GITHUB_API_URL";
/// Environment variable overriding [`GithubApiConfig::timeout_secs`].
pub const ENV_GITHUB_TIMEOUT_SECS: &str = "TASKBRIDGE_GITHUB_TIMEOUT_SECS";
/// Environment variable overriding [`LoggingConfig::level`].
pub const ENV_LOG_LEVEL: &str = "TASKBRIDGE_LOG_LEVEL";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`AppConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {var}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },

    /// A setting failed validation.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// GitHub API settings.
    pub github: GithubApiConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// `PostgreSQL` connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL.
    pub url: String,
    /// Maximum pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/taskbridge".to_owned(),
            max_connections: 10,
        }
    }
}

/// GitHub REST API settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GithubApiConfig {
    /// API base URL.
    pub api_url: String,
    /// Value sent in `X-GitHub-Api-Version`.
    pub api_version: String,
    /// Value sent in `User-Agent`.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GithubApiConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_owned(),
            api_version: "2022-11-28".to_owned(),
            user_agent: concat!("taskbridge/", env!("CARGO_PKG_VERSION")).to_owned(),
            timeout_secs: 10,
        }
    }
}

/// Output format for log records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Plain,
    /// One JSON object per record.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is unset.
    pub level: String,
    /// Record format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Plain,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `path` (or defaults) and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, an
    /// override is malformed, or the result fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_toml_str(&raw)?
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or mistyped fields.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Applies `TASKBRIDGE_*` overrides obtained through `lookup`.
    ///
    /// Blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] when the timeout is not an integer.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(url) = read(ENV_DATABASE_URL) {
            self.database.url = url;
        }
        if let Some(url) = read(ENV_GITHUB_API_URL) {
            self.github.api_url = url;
        }
        if let Some(raw) = read(ENV_GITHUB_TIMEOUT_SECS) {
            self.github.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_GITHUB_TIMEOUT_SECS,
                value: raw,
            })?;
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Checks settings that would otherwise fail at first use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must not be empty".to_owned()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be positive".to_owned(),
            ));
        }
        let api_url = self.github.api_url.trim();
        if !(api_url.starts_with("https://") || api_url.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "github.api_url must be an http(s) URL, got {api_url:?}"
            )));
        }
        if self.github.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "github.timeout_secs must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}
