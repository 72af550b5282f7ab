//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password missing from the request.
    #[error("missing email or password")]
    MissingCredentials,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] vitala_core::EmailError),

    /// Password too weak.
    #[error("password must be at least {min} characters")]
    WeakPassword {
        /// Minimum allowed length.
        min: usize,
    },

    /// Invalid credentials (wrong password or user not found).
    ///
    /// Deliberately covers both cases so responses can't be used to probe
    /// which emails are registered.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User already exists.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
