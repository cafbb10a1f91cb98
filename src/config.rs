//! Runtime configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use secrecy::SecretString;

use crate::domain::ConfigError;
use crate::infra::{DEFAULT_BASE_URL, DogApiConfig, LogFormat};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Server and adapter settings.
#[derive(Debug)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub cors_allowed_origin: String,
    pub log_format: LogFormat,
    pub dog_api: DogApiConfig,
}

impl AppConfig {
    /// Reads settings from the process environment.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `BIND_ADDR` | `0.0.0.0:3000` |
    /// | `DOG_API_BASE_URL` | `https://dogapi.dog/api/v2` |
    /// | `DOG_API_KEY` | unset |
    /// | `DOG_API_TIMEOUT_SECS` | unset (no timeout) |
    /// | `CORS_ALLOWED_ORIGIN` | `http://localhost:3000` |
    /// | `LOG_FORMAT` | `compact` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| invalid("BIND_ADDR", e))?;

        let base_url = get("DOG_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        reqwest::Url::parse(&base_url).map_err(|e| invalid("DOG_API_BASE_URL", e))?;

        let mut dog_api = DogApiConfig::new(base_url);
        if let Some(api_key) = get("DOG_API_KEY") {
            dog_api = dog_api.with_api_key(SecretString::from(api_key));
        }
        if let Some(raw) = get("DOG_API_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| invalid("DOG_API_TIMEOUT_SECS", e))?;
            dog_api = dog_api.with_timeout(Duration::from_secs(secs));
        }

        let log_format = match get("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            log_format,
            dog_api,
        })
    }
}

fn invalid(key: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: err.to_string(),
    }
}
