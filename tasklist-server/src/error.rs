//! Error types for tasklist-server
//!
//! Library errors are structured `thiserror` enums. The HTTP layer maps them
//! to responses in [`crate::http::error`].

use thiserror::Error;

/// Configuration could not be resolved into something usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// None of the connection-string variables are set.
    #[error("no database connection string configured (checked {names})")]
    MissingConnectionString { names: String },

    /// The connection string is set but is not a usable Postgres URL.
    #[error("invalid database connection string: {reason}")]
    InvalidConnectionString { reason: String },

    /// A CORS origin could not be turned into a header value.
    #[error("invalid CORS origin '{origin}'")]
    InvalidCorsOrigin { origin: String },
}

/// Task store failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("task '{id}' not found")]
    NotFound { id: i32 },

    /// The engine could not be configured on first use.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Any driver or network failure while talking to Postgres.
    #[error("database error: {0}")]
    Connectivity(#[from] sqlx::Error),
}

/// Result alias for task store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::NotFound { id: 999 };
        assert_eq!(err.to_string(), "task '999' not found");

        let err = ConfigError::MissingConnectionString {
            names: "DATABASE_URL, POSTGRES_URL".into(),
        };
        assert!(err.to_string().contains("DATABASE_URL, POSTGRES_URL"));
    }

    #[test]
    fn config_error_converts_transparently() {
        let err: StoreError = ConfigError::InvalidConnectionString {
            reason: "relative URL without a base".into(),
        }
        .into();

        assert!(matches!(err, StoreError::Config(_)));
        assert_eq!(
            err.to_string(),
            "invalid database connection string: relative URL without a base"
        );
    }
}
