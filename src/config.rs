//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_JUDGE_MAX_BATCH_SIZE,
    DEFAULT_JUDGE_POLL_TIMEOUT_SECONDS, DEFAULT_JUDGE_REQUEST_TIMEOUT_SECONDS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub judge: JudgeConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// JWT verification configuration
///
/// Tokens are issued by the auth service; this server only verifies them.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

/// Judge0 connection and polling configuration
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// Base URL of the Judge0 API, without a trailing slash
    pub base_url: String,
    /// Bearer token sent with every request, if the deployment requires one
    pub api_key: Option<String>,
    /// Timeout applied to each individual HTTP call
    pub request_timeout: Duration,
    /// Ceiling on the total time spent waiting for one batch
    pub poll_timeout: Duration,
    /// Maximum number of test cases accepted in one batch
    pub max_batch_size: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            judge: JudgeConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: parse_or("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: required("DATABASE_URL")?,
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_DATABASE_MAX_CONNECTIONS)?,
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: required("ACCESS_TOKEN_SECRET").or_else(|_| required("JWT_SECRET"))?,
        })
    }
}

impl JudgeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = required("JUDGE0_API_URL")?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue("JUDGE0_API_URL".to_string()));
        }

        let max_batch_size = parse_or("JUDGE_MAX_BATCH_SIZE", DEFAULT_JUDGE_MAX_BATCH_SIZE)?;
        if max_batch_size == 0 {
            return Err(ConfigError::InvalidValue("JUDGE_MAX_BATCH_SIZE".to_string()));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: env::var("JUDGE0_API_KEY").ok().filter(|key| !key.is_empty()),
            request_timeout: Duration::from_secs(parse_or(
                "JUDGE_REQUEST_TIMEOUT_SECONDS",
                DEFAULT_JUDGE_REQUEST_TIMEOUT_SECONDS,
            )?),
            poll_timeout: Duration::from_secs(parse_or(
                "JUDGE_POLL_TIMEOUT_SECONDS",
                DEFAULT_JUDGE_POLL_TIMEOUT_SECONDS,
            )?),
            max_batch_size,
        })
    }
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:2358".to_string(),
            api_key: None,
            request_timeout: Duration::from_secs(DEFAULT_JUDGE_REQUEST_TIMEOUT_SECONDS),
            poll_timeout: Duration::from_secs(DEFAULT_JUDGE_POLL_TIMEOUT_SECONDS),
            max_batch_size: DEFAULT_JUDGE_MAX_BATCH_SIZE,
        }
    }
}

fn required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key.to_string()))
}

fn parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
