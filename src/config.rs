//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::DEFAULT_REVISION;
use crate::source::DEFAULT_DATA_URL;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Benchmark data source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// URL template containing a `{revision}` placeholder
    #[serde(default = "default_data_url")]
    pub data_url: String,

    /// Revision fetched when none is requested
    #[serde(default = "default_revision")]
    pub default_revision: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_data_url() -> String {
    DEFAULT_DATA_URL.to_string()
}

fn default_revision() -> String {
    DEFAULT_REVISION.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            data_url: default_data_url(),
            default_revision: default_revision(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl SourceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Web server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// First existing file among the user, system and working-directory locations
    pub fn default_path() -> Option<PathBuf> {
        [
            dirs::config_dir().map(|dir| dir.join("benchboard").join("config.toml")),
            Some(PathBuf::from("/etc/benchboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .find(|path| path.exists())
    }

    /// Load from the default location with environment overrides, falling
    /// back to defaults.
    ///
    /// Problems come back alongside the config; callers log them once the
    /// subscriber built from `logging` is installed.
    pub fn load_default() -> (Self, Vec<ConfigError>) {
        Self::load_or_default(Self::default_path().as_deref(), |key| {
            std::env::var(key).ok()
        })
    }

    fn load_or_default(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> (Self, Vec<ConfigError>) {
        let mut problems = Vec::new();
        let mut config = match path.map(Self::load) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                problems.push(e);
                Self::default()
            }
            None => Self::default(),
        };
        problems.extend(config.apply_overrides(lookup));
        (config, problems)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<ConfigError> {
        let mut problems = Vec::new();

        // Source overrides
        if let Some(url) = lookup("BENCHBOARD_DATA_URL") {
            self.source.data_url = url;
        }
        if let Some(revision) = lookup("BENCHBOARD_REVISION") {
            self.source.default_revision = revision;
        }

        // Server overrides
        if let Some(host) = lookup("BENCHBOARD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("BENCHBOARD_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => problems.push(ConfigError::InvalidEnv {
                    key: "BENCHBOARD_PORT",
                    value: port,
                }),
            }
        }

        // Logging overrides
        if let Some(level) = lookup("BENCHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("BENCHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }

        problems
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Ignoring invalid {key} value {value:?}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Benchboard Configuration
#
# Environment variables override these settings:
# - BENCHBOARD_DATA_URL
# - BENCHBOARD_REVISION
# - BENCHBOARD_HOST
# - BENCHBOARD_PORT
# - BENCHBOARD_LOG_LEVEL
# - BENCHBOARD_LOG_FORMAT

[source]
# Where benchmark runs are published; {revision} is replaced by the requested revision
data_url = "https://raw.githubusercontent.com/the-benchmarker/web-frameworks/{revision}/data.min.json"

# Revision shown when no ?sha= parameter is given
default_revision = "master"

# Request timeout in seconds
request_timeout_secs = 30

[server]
# Web server host
host = "0.0.0.0"

# Web server port
port = 8086

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
