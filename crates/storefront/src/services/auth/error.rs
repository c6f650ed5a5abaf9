//! Authentication and account error types.

use thiserror::Error;

use local_stores_core::{AddressError, EmailError};

use crate::db::RepositoryError;

/// Errors that can occur during authentication and account operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Invalid credentials (no such account).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Account not found.
    #[error("account not found")]
    UserNotFound,

    /// An account with this email already exists.
    #[error("an account with this email already exists")]
    UserAlreadyExists,

    /// A saved address is missing required fields.
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// Repository error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}
