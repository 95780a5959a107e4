//! Configuration management for Tooldex
//!
//! Precedence, lowest to highest: built-in defaults, configuration file,
//! environment variables, CLI flags (applied by the binaries before
//! `validate`).

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one descriptor document per server
    #[serde(default = "default_servers_dir")]
    pub servers_dir: String,
    /// Path of the published registry artifact
    #[serde(default = "default_registry_file")]
    pub registry_file: String,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_servers_dir() -> String {
    crate::DEFAULT_SERVERS_DIR.to_string()
}

fn default_registry_file() -> String {
    crate::DEFAULT_REGISTRY_FILE.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            servers_dir: default_servers_dir(),
            registry_file: default_registry_file(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from an optional YAML file.
    ///
    /// A `None` path falls back to [`crate::DEFAULT_CONFIG_FILE`] when that
    /// file exists, otherwise to defaults. An explicitly given path must
    /// exist. Environment variable overrides are applied afterwards; CLI
    /// overrides and `validate` are the caller's responsibility.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // Load .env before reading override variables
        let _ = dotenvy::dotenv();

        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(RegistryError::config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(path)?
            }
            None => {
                let default_path = Path::new(crate::DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_environment_overrides();
        Ok(config)
    }

    /// Parse a configuration file as YAML
    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| RegistryError::config(format!("Failed to read config file: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| RegistryError::config(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_environment_overrides(&mut self) {
        if let Ok(dir) = std::env::var("TOOLDEX_SERVERS_DIR") {
            if !dir.is_empty() {
                self.servers_dir = dir;
            }
        }

        if let Ok(file) = std::env::var("TOOLDEX_REGISTRY_FILE") {
            if !file.is_empty() {
                self.registry_file = file;
            }
        }

        if let Ok(level) = std::env::var("TOOLDEX_LOG_LEVEL") {
            if !level.is_empty() {
                self.logging.level = level;
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.servers_dir.trim().is_empty() {
            return Err(RegistryError::config("Servers directory cannot be empty"));
        }

        if self.registry_file.trim().is_empty() {
            return Err(RegistryError::config("Registry file path cannot be empty"));
        }

        for (label, path) in [
            ("servers_dir", &self.servers_dir),
            ("registry_file", &self.registry_file),
        ] {
            if path.contains("..") {
                return Err(RegistryError::config(format!(
                    "Path '{}' for {} contains '..' which is not allowed",
                    path, label
                )));
            }
        }

        self.logging.validate()
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Result<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(RegistryError::config(format!(
                    "Invalid log level: '{}'. Valid levels: trace, debug, info, warn, error",
                    self.level
                )));
            }
        }

        match self.format.as_str() {
            "text" | "json" => {}
            _ => {
                return Err(RegistryError::config(format!(
                    "Invalid log format: '{}'. Valid formats: text, json",
                    self.format
                )));
            }
        }

        Ok(())
    }

    /// Install the global tracing subscriber.
    ///
    /// Logs go to stderr; stdout stays reserved for query output.
    pub fn init(&self) {
        use tracing_subscriber::EnvFilter;

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.level));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr);

        if self.format == "json" {
            builder.json().init();
        } else {
            builder.init();
        }
    }
}
