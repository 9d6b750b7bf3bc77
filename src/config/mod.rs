//! Application configuration loaded from environment.

use std::net::SocketAddr;

use chrono::Duration;

/// Application configuration loaded from `.env` and environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g. `0.0.0.0:3000`).
    pub server_addr: SocketAddr,
    /// PostgreSQL connection URL. Required.
    pub database_url: String,
    /// JWT signing secret. Required, the process refuses to start without it.
    pub secret_key: String,
    /// Token lifetime: hours + minutes normally, seconds when `TESTING` is set.
    pub token_ttl: Duration,
    /// When set, the toggleable routes answer with a generic not-found.
    pub hide_resources: bool,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let server_addr = std::env::var("SERVER_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let server_addr: SocketAddr = server_addr
            .parse()
            .map_err(|_| ConfigLoadError::InvalidServerAddr)?;

        let secret_key =
            std::env::var("SECRET_KEY").map_err(|_| ConfigLoadError::MissingSecretKey)?;
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigLoadError::MissingDatabaseUrl)?;

        let testing = env_flag("TESTING");
        let token_ttl = if testing {
            Duration::seconds(env_number("TOKEN_EXPIRE_SECONDS", 5)?)
        } else {
            Duration::hours(env_number("TOKEN_EXPIRE_HOURS", 1)?)
                + Duration::minutes(env_number("TOKEN_EXPIRE_MINUTES", 0)?)
        };
        if token_ttl <= Duration::zero() {
            return Err(ConfigLoadError::NonPositiveTokenTtl);
        }

        let hide_resources = env_flag("HIDE_RESOURCES");
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            server_addr,
            database_url,
            secret_key,
            token_ttl,
            hide_resources,
            log_level,
        })
    }
}

fn env_flag(name: &str) -> bool {
    match std::env::var(name) {
        Ok(v) => !matches!(v.to_lowercase().as_str(), "" | "0" | "f" | "false"),
        Err(_) => false,
    }
}

fn env_number(name: &str, default: i64) -> Result<i64, ConfigLoadError> {
    match std::env::var(name) {
        Ok(v) => v
            .parse()
            .map_err(|_| ConfigLoadError::InvalidNumber(name.to_string())),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Invalid SERVER_ADDR")]
    InvalidServerAddr,
    #[error("No secret key set for application")]
    MissingSecretKey,
    #[error("No database url provided for application")]
    MissingDatabaseUrl,
    #[error("Invalid number in {0}")]
    InvalidNumber(String),
    #[error("Token lifetime must be positive")]
    NonPositiveTokenTtl,
}
