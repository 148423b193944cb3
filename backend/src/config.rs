//! Server configuration, resolved once from the environment at startup.

use std::env;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

pub const DATABASE_URL_VAR: &str = "EXPENSE_DATABASE_URL";
pub const BIND_ADDR_VAR: &str = "EXPENSE_BIND_ADDR";
pub const CORS_ORIGIN_VAR: &str = "EXPENSE_CORS_ORIGIN";

const DEFAULT_DATABASE_URL: &str = "sqlite:expenses.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidBindAddr { var: &'static str, value: String },

    #[error("{var} is not a valid origin header value: {value}")]
    InvalidCorsOrigin { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
}

impl ServerConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup, falling back to
    /// defaults for anything unset or blank
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let database_url = read(DATABASE_URL_VAR, DEFAULT_DATABASE_URL);

        let bind_addr_raw = read(BIND_ADDR_VAR, DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddr {
                var: BIND_ADDR_VAR,
                value: bind_addr_raw.clone(),
            })?;

        let cors_origin_raw = read(CORS_ORIGIN_VAR, DEFAULT_CORS_ORIGIN);
        let cors_origin = cors_origin_raw
            .parse::<HeaderValue>()
            .map_err(|_| ConfigError::InvalidCorsOrigin {
                var: CORS_ORIGIN_VAR,
                value: cors_origin_raw.clone(),
            })?;

        Ok(Self {
            database_url,
            bind_addr,
            cors_origin,
        })
    }
}
