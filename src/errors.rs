//! Unified error types for the ordering system.
//!
//! All fallible operations in this crate return [`Result`] with the [`Error`]
//! enum defined here. Validation and availability errors are raised before
//! (or inside) the enclosing database transaction, so a failed operation
//! never leaves a partial write behind.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or missing input, rejected before any lookup or side effect
    #[error("Validation error: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// A referenced menu item is missing or inactive; the whole submission is rejected
    #[error("Menu item not found or inactive: {name}")]
    ItemUnavailable {
        /// Name or id of the offending menu item
        name: String,
    },

    /// One-time-code verification failed; recoverable, the caller may retry or resend
    #[error("Verification failed: {reason}")]
    VerificationFailed {
        /// Why the code was not accepted
        reason: String,
    },

    /// A lookup by id matched nothing within the caller's authorized scope
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity looked up (e.g. "order")
        entity: &'static str,
        /// The id that was requested
        id: String,
    },

    /// A role-gated mutation was attempted by an unauthorized actor
    #[error("Forbidden: {action}")]
    Forbidden {
        /// The action that was refused
        action: String,
    },

    /// Configuration loading or parsing problem
    #[error("Configuration error: {message}")]
    Config {
        /// Details of the configuration problem
        message: String,
    },

    /// Underlying database error
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
