//! Process configuration
//!
//! Read once at startup. A missing required key fails startup fast rather
//! than failing per-request.

use thiserror::Error;

const DEFAULT_PORT: u16 = 3001;

/// Relay server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Listening port (`PORT`, default 3001)
    pub port: u16,
    /// Upstream API credential (`OPENAI_API_KEY`, required)
    pub api_key: String,
    /// Upstream API root override (`OPENAI_BASE_URL`, optional)
    pub base_url: Option<String>,
}

/// Startup configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => return Err(ConfigError::MissingVar("OPENAI_API_KEY")),
        };

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidVar("PORT", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            api_key,
            base_url: std::env::var("OPENAI_BASE_URL").ok(),
        })
    }
}
