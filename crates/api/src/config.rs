//! # API Configuration Module
//!
//! Loads configuration for the Rota server from environment variables,
//! with defaults suitable for a single user on one machine.
//!
//! ## Environment Variables
//!
//! - `ROTA_HOST`: The host address to bind the server to (default: "127.0.0.1")
//! - `ROTA_PORT`: The port to listen on (default: 3000)
//! - `ROTA_DATA_FILE`: Path of the JSON slot file (default: "rota.json")
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `ROTA_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `ROTA_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)

use eyre::{Result, WrapErr};
use std::env;
use std::path::PathBuf;
use tracing::Level;

/// Configuration for the Rota API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// File holding the persisted schedule slot
    pub data_file: PathBuf,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            data_file: PathBuf::from("rota.json"),
            log_level: Level::INFO,
            cors_origins: None,
            request_timeout: 30,
        }
    }
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `ROTA_PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let host = lookup("ROTA_HOST").unwrap_or(defaults.host);
        let port = match lookup("ROTA_PORT") {
            Some(port) => port.parse().wrap_err("Invalid ROTA_PORT value")?,
            None => defaults.port,
        };

        let data_file = lookup("ROTA_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_file);

        let log_level = match lookup("LOG_LEVEL").unwrap_or_default().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        let cors_origins = lookup("ROTA_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        let request_timeout = lookup("ROTA_REQUEST_TIMEOUT_SECONDS")
            .and_then(|secs| secs.parse().ok())
            .unwrap_or(defaults.request_timeout);

        Ok(Self {
            host,
            port,
            data_file,
            log_level,
            cors_origins,
            request_timeout,
        })
    }

    /// Returns the server address as a string, e.g. "127.0.0.1:3000"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
