//! Configuration management for tally
//!
//! This module handles loading, validation, and management of
//! tally configuration from YAML files. Every field has a default,
//! so a missing or partial config file still produces a working
//! configuration.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::{ConfigError, ConfigResult};

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port; the PORT environment variable overrides this
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory of static frontend assets
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the entry file
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
    /// Entry file name
    #[serde(default = "default_entries_file")]
    pub entries_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            entries_file: default_entries_file(),
        }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("data")
}

fn default_entries_file() -> String {
    "entries.json".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            },
            _ => ConfigError::IoError {
                reason: e.to_string(),
            },
        })?;

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::InvalidYaml {
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.storage.path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.path".to_string(),
                reason: "Storage directory must not be empty".to_string(),
            });
        }

        if self.storage.entries_file.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.entries_file".to_string(),
                reason: "Entry file name must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Apply environment variable overrides
    ///
    /// `PORT` overrides `server.port`. On an unparseable value the
    /// configuration is left untouched and an error is returned for the
    /// caller to report.
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        if let Ok(raw) = std::env::var("PORT") {
            let port: u16 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                field: "PORT".to_string(),
                reason: format!("'{}' is not a valid port number", raw),
            })?;
            if port == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "PORT".to_string(),
                    reason: "Port must be greater than 0".to_string(),
                });
            }
            self.server.port = port;
        }
        Ok(())
    }

    /// Get the full path to the entry file
    pub fn entries_path(&self) -> PathBuf {
        self.storage.path.join(&self.storage.entries_file)
    }
}
