//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Boop server connection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// WebSocket path on the same host
    #[serde(default = "default_socket_path")]
    pub socket_path: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    pub username: Option<String>,

    pub password: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_socket_path() -> String {
    "/ws".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            socket_path: default_socket_path(),
            request_timeout_secs: default_request_timeout(),
            username: None,
            password: None,
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Both halves of the login, when configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.username.as_deref()?, self.password.as_deref()?))
    }
}

/// Terminal output
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Colour notifications with the sender's theme colour
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
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
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit path, else from the default locations, else
    /// from the environment alone.
    ///
    /// An explicit path that can't be read is an error; a broken file in a
    /// default location is skipped with a warning.
    pub fn load_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            let config = Self::load_with_env(path)?;
            tracing::info!("Loaded config from {:?}", path);
            return Ok(config);
        }

        for path in default_paths().iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Ok(Self::from_env())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(url) = lookup("BOOPING_SERVER_URL") {
            self.server.base_url = url;
        }
        if let Some(path) = lookup("BOOPING_SOCKET_PATH") {
            self.server.socket_path = path;
        }
        if let Some(username) = lookup("BOOPING_USERNAME") {
            self.server.username = Some(username);
        }
        if let Some(password) = lookup("BOOPING_PASSWORD") {
            self.server.password = Some(password);
        }

        // Logging overrides
        if let Some(level) = lookup("BOOPING_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("BOOPING_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn default_paths() -> [Option<PathBuf>; 2] {
    [
        dirs::config_dir().map(|p| p.join("booping").join("config.toml")),
        Some(PathBuf::from("./booping.toml")),
    ]
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Booping Configuration
#
# Environment variables override these settings:
# - BOOPING_SERVER_URL
# - BOOPING_SOCKET_PATH
# - BOOPING_USERNAME
# - BOOPING_PASSWORD
# - BOOPING_LOG_LEVEL
# - BOOPING_LOG_FORMAT

[server]
# Boop server base URL
base_url = "http://localhost:5000"

# WebSocket path for live boops
socket_path = "/ws"

# Request timeout in seconds
request_timeout_secs = 30

# Login used at startup
# username = "frog"
# password = ""

[display]
# Colour notifications with the sender's theme colour
color = true

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path (logs go to stderr otherwise)
# file = "/tmp/booping.log"
"#
    .to_string()
}
