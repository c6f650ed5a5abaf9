//! Unified error handling.
//!
//! Provides a unified `AppError` type that every flow-level entry point can
//! return. Callers embedding the library surface one error type instead of
//! six; per-module errors convert in via `From`.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::orders::OrderError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Repository(#[from] RepositoryError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Order operation failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Cart derivation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("store-123".to_owned());
        assert_eq!(err.to_string(), "Not found: store-123");

        let err = AppError::BadRequest("invalid input".to_owned());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_module_errors_convert_in() {
        fn flow() -> Result<()> {
            Err(OrderError::NoAddressSelected)?;
            Ok(())
        }

        let err = flow().expect_err("converted");
        assert!(matches!(err, AppError::Order(OrderError::NoAddressSelected)));
        assert_eq!(err.to_string(), "Order error: no delivery address selected");
    }

    #[test]
    fn test_auth_error_converts_in() {
        let err: AppError = AuthError::InvalidCredentials.into();
        assert!(matches!(err, AppError::Auth(AuthError::InvalidCredentials)));
    }
}
