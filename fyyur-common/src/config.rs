//! Configuration loading and bootstrap setting resolution
//!
//! Every bootstrap setting is resolved with the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the SQLite database file
pub const ENV_DATABASE: &str = "FYYUR_DATABASE";
/// Environment variable naming the bind host
pub const ENV_HOST: &str = "FYYUR_HOST";
/// Environment variable naming the listen port
pub const ENV_PORT: &str = "PORT";
/// Environment variable naming the TOML config file
pub const ENV_CONFIG: &str = "FYYUR_CONFIG";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Bootstrap configuration loaded from TOML file
///
/// All keys are optional; anything left out falls through to the compiled
/// default.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Path to SQLite database file
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Address to bind the HTTP server to
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Values given on the command line (priority 1)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub database: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub database_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Resolve every bootstrap setting from CLI, environment, TOML and defaults
    pub fn resolve(cli: &CliOverrides, toml_config: TomlConfig) -> Result<Self> {
        let database_path = cli
            .database
            .clone()
            .or_else(|| std::env::var(ENV_DATABASE).ok().map(PathBuf::from))
            .or(toml_config.database_path)
            .unwrap_or_else(default_database_path);

        let host = cli
            .host
            .clone()
            .or_else(|| std::env::var(ENV_HOST).ok())
            .or(toml_config.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match cli.port {
            Some(port) => port,
            None => match std::env::var(ENV_PORT) {
                Ok(raw) => raw.trim().parse::<u16>().map_err(|_| {
                    Error::Config(format!("{} must be a port number, got {:?}", ENV_PORT, raw))
                })?,
                Err(_) => toml_config.port.unwrap_or(DEFAULT_PORT),
            },
        };

        Ok(Self {
            database_path,
            host,
            port,
            logging: toml_config.logging,
        })
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Locate the TOML configuration file, if any
///
/// An explicitly requested file (CLI or environment) must exist. The
/// per-user default location is only used when present.
pub fn locate_config_file(cli_arg: Option<&Path>) -> Result<Option<PathBuf>> {
    let explicit = cli_arg
        .map(Path::to_path_buf)
        .or_else(|| std::env::var(ENV_CONFIG).ok().map(PathBuf::from));

    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    let user_config = dirs::config_dir().map(|d| d.join("fyyur").join("config.toml"));
    match user_config {
        Some(path) if path.exists() => Ok(Some(path)),
        _ => {
            debug!("No config file found, using defaults");
            Ok(None)
        }
    }
}

/// Load TOML configuration from file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Get OS-dependent default database path
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("fyyur"))
        .unwrap_or_else(|| PathBuf::from("./fyyur_data"))
        .join("fyyur.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert!(config.database_path.is_none());
        assert!(config.port.is_none());
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_full_toml_parses() {
        let config: TomlConfig = toml::from_str(
            r#"
            database_path = "/srv/fyyur/fyyur.db"
            host = "0.0.0.0"
            port = 8080

            [logging]
            level = "debug"
            file = "/var/log/fyyur/error.log"
            "#,
        )
        .unwrap();

        assert_eq!(config.database_path, Some(PathBuf::from("/srv/fyyur/fyyur.db")));
        assert_eq!(config.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(
            config.logging.file,
            Some(PathBuf::from("/var/log/fyyur/error.log"))
        );
    }

    #[test]
    fn test_default_database_path_file_name() {
        let path = default_database_path();
        assert_eq!(path.file_name().unwrap(), "fyyur.db");
    }

    #[test]
    fn test_bind_address_format() {
        let config = ServiceConfig {
            database_path: PathBuf::from("fyyur.db"),
            host: "0.0.0.0".to_string(),
            port: 5000,
            logging: LoggingConfig::default(),
        };
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
    }
}
