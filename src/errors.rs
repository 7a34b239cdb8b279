//! Unified error type for the pizzeria records application.
//!
//! Storage, validation, lookup and startup failures all funnel into [`Error`].
//! Unique-constraint violations reported by the database are lifted into
//! [`Error::Conflict`] so the web layer can answer them with a 409 instead of a 500.

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Errors produced anywhere in the application.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Any storage failure that is not a constraint conflict
    #[error("Database error: {0}")]
    Database(DbErr),

    /// A record requested by identifier does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Record type, e.g. "Supplier"
        entity: &'static str,
        /// Requested identifier
        id: i32,
    },

    /// A submitted field is missing or malformed
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// Form field name
        field: &'static str,
        /// Human-readable reason
        message: String,
    },

    /// A write violated a uniqueness constraint
    #[error("Conflict: {message}")]
    Conflict {
        /// Constraint description reported by the database
        message: String,
    },

    /// A view failed to render
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// I/O error: reading config, binding the listener
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] on `field`.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Self::Conflict { message },
            _ => Self::Database(err),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
