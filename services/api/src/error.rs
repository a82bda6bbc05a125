//! services/api/src/error.rs
//!
//! Everything that can stop the `api` binary before it starts serving.

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Connecting the pool failed.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration Error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Binding the listener or serving failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_failures_name_their_source() {
        let err = ApiError::from(ConfigError::MissingVar("SESSION_SECRET".to_string()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing the environment variable SESSION_SECRET"
        );

        let err = ApiError::from(std::io::Error::new(std::io::ErrorKind::AddrInUse, "taken"));
        assert_eq!(err.to_string(), "IO error: taken");
    }
}
