//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use tracing::Level;

/// Shortest accepted `SESSION_SECRET`, in bytes.
pub const MIN_SESSION_SECRET_LEN: usize = 32;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Where users and stories are persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Storage {
    Postgres(String),
    /// Process-local store, selected with `DATABASE_URL=memory://`.
    Memory,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub storage: Storage,
    pub log_level: Level,
    pub session_secret: String,
    pub session_ttl_hours: i64,
    pub session_cookie_secure: bool,
    pub cors_origin: HeaderValue,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("storage", &self.storage)
            .field("log_level", &self.log_level)
            .field("session_secret", &"<redacted>")
            .field("session_ttl_hours", &self.session_ttl_hours)
            .field("session_cookie_secure", &self.session_cookie_secure)
            .field("cors_origin", &self.cors_origin)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server and Database Settings ---
        let bind_address_str = lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingVar("DATABASE_URL".to_string()))?;
        let storage = if database_url == "memory://" {
            Storage::Memory
        } else {
            Storage::Postgres(database_url)
        };

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Session Settings ---
        let session_secret = lookup("SESSION_SECRET")
            .ok_or_else(|| ConfigError::MissingVar("SESSION_SECRET".to_string()))?;
        if session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::InvalidValue(
                "SESSION_SECRET".to_string(),
                format!("must be at least {} bytes", MIN_SESSION_SECRET_LEN),
            ));
        }

        let session_ttl_hours = match lookup("SESSION_TTL_HOURS") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|hours| *hours > 0)
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "SESSION_TTL_HOURS".to_string(),
                        format!("'{}' is not a positive number of hours", raw),
                    )
                })?,
            None => 24 * 30,
        };

        let session_cookie_secure = match lookup("SESSION_COOKIE_SECURE") {
            Some(raw) => raw.parse::<bool>().map_err(|_| {
                ConfigError::InvalidValue(
                    "SESSION_COOKIE_SECURE".to_string(),
                    format!("'{}' is not true or false", raw),
                )
            })?,
            None => true,
        };

        let cors_origin_str =
            lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());
        let cors_origin = HeaderValue::from_str(&cors_origin_str).map_err(|e| {
            ConfigError::InvalidValue("CORS_ORIGIN".to_string(), e.to_string())
        })?;

        Ok(Self {
            bind_address,
            storage,
            log_level,
            session_secret,
            session_ttl_hours,
            session_cookie_secure,
            cors_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_only_required_vars_are_set() {
        let config = load(&[("DATABASE_URL", "postgres://db/app"), ("SESSION_SECRET", SECRET)])
            .unwrap();

        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(config.storage, Storage::Postgres("postgres://db/app".to_string()));
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.session_ttl_hours, 720);
        assert!(config.session_cookie_secure);
        assert_eq!(config.cors_origin, "http://localhost:3000");
    }

    #[test]
    fn memory_url_selects_the_in_process_store() {
        let config = load(&[("DATABASE_URL", "memory://"), ("SESSION_SECRET", SECRET)]).unwrap();
        assert_eq!(config.storage, Storage::Memory);
    }

    #[test]
    fn missing_database_url_is_reported() {
        let err = load(&[("SESSION_SECRET", SECRET)]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(var) if var == "DATABASE_URL"));
    }

    #[test]
    fn short_session_secret_is_rejected() {
        let err = load(&[("DATABASE_URL", "memory://"), ("SESSION_SECRET", "short")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var, _) if var == "SESSION_SECRET"));
    }

    #[test]
    fn non_positive_ttl_is_rejected() {
        let err = load(&[
            ("DATABASE_URL", "memory://"),
            ("SESSION_SECRET", SECRET),
            ("SESSION_TTL_HOURS", "0"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(var, _) if var == "SESSION_TTL_HOURS"));
    }

    #[test]
    fn secret_is_redacted_in_debug_output() {
        let config = load(&[("DATABASE_URL", "memory://"), ("SESSION_SECRET", SECRET)]).unwrap();
        assert!(!format!("{:?}", config).contains(SECRET));
    }
}
