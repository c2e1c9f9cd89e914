//! Service-level error types
//!
//! Startup and infrastructure failures (configuration, database pool, socket I/O)
//! surface as [`Error`]. Request failures are [`crate::handlers::ApiError`] and
//! store failures are [`crate::repository::RepositoryError`].

use thiserror::Error;

/// Result alias for service-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Service-level error
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or extracted
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Database pool could not be created or queried
    #[error("Database error: {0}")]
    Database(String),

    /// I/O error (binding the listener, serving connections)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("port taken"));
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: Error = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, Error::Database(_)));
    }

    #[test]
    fn test_config_error_display() {
        let err: Error = figment::Error::from("missing field `url`".to_string()).into();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
