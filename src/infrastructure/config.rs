//! Application configuration management.
//!
//! Configuration is loaded once at startup from environment variables (and a
//! `.env` file when present). Missing variables fall back to defaults;
//! present but invalid values are reported as errors.
//!
//! # Environment Variables
//!
//! - `APP_HOST`: bind host (default: `0.0.0.0`)
//! - `APP_PORT`: bind port (default: `8000`)
//! - `STORAGE_MODE`: `sqlite` (default) | `in_memory`
//! - `DATABASE_URL`: SQLite URL (default: `sqlite://todo.db`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: `5`)
//! - `STATIC_DIR`: directory holding `favicon.ico` (default: `resources/static`)
//!
//! # Example
//!
//! ```rust,ignore
//! use todo_web::infrastructure::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("Listening on {}:{}", config.app_host, config.app_port);
//! ```

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://todo.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_STATIC_DIR: &str = "resources/static";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Description of why the value is invalid.
        message: String,
    },

    /// Unknown storage mode.
    #[error("Invalid storage mode: '{0}'. Expected 'sqlite' or 'in_memory'")]
    InvalidStorageMode(String),
}

// =============================================================================
// Storage Mode
// =============================================================================

/// Backend used for task persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Relational storage through `sqlx`.
    #[default]
    Sqlite,
    /// Process-local storage, lost on restart.
    InMemory,
}

impl FromStr for StorageMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "sqlite" | "sql" => Ok(Self::Sqlite),
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            _ => Err(ConfigError::InvalidStorageMode(value.to_string())),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP server host address.
    pub app_host: String,
    /// HTTP server port.
    pub app_port: u16,
    /// Task persistence backend.
    pub storage_mode: StorageMode,
    /// SQLite connection URL.
    pub database_url: String,
    /// Upper bound of pooled database connections.
    pub database_max_connections: u32,
    /// Directory with static assets.
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_host: DEFAULT_HOST.to_string(),
            app_port: DEFAULT_PORT,
            storage_mode: StorageMode::default(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: DEFAULT_MAX_CONNECTIONS,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let app_host = read("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let app_port = parse_optional(read("APP_PORT"), "APP_PORT", DEFAULT_PORT)?;
        let storage_mode = read("STORAGE_MODE")
            .map(|value| value.parse::<StorageMode>())
            .transpose()?
            .unwrap_or_default();
        let database_url =
            read("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let database_max_connections = parse_optional(
            read("DATABASE_MAX_CONNECTIONS"),
            "DATABASE_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
        )?;
        let static_dir = read("STATIC_DIR").map_or_else(
            || PathBuf::from(DEFAULT_STATIC_DIR),
            PathBuf::from,
        );

        if database_max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DATABASE_MAX_CONNECTIONS".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(Self {
            app_host,
            app_port,
            storage_mode,
            database_url,
            database_max_connections,
            static_dir,
        })
    }
}

fn parse_optional<T>(value: Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |value| {
        value.parse().map_err(|error: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: error.to_string(),
        })
    })
}
