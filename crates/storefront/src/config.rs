//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and fall back to defaults:
//! - `LOCALSTORES_DATA_DIR` - directory for persisted state (default: `data`)
//! - `LOCALSTORES_CATALOG` - path to the catalog JSON file (default: `content/stores.json`)
//! - `LOCALSTORES_DELIVERY_FEE` - flat per-order delivery fee (default: `40`)
//! - `LOCALSTORES_SEARCH_RADIUS_KM` - nearby-store radius in km (default: `10`)

use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory the file-backed key-value store writes under.
    pub data_dir: PathBuf,
    /// Path to the catalog JSON file.
    pub catalog_path: PathBuf,
    /// Flat delivery fee added to each per-store order.
    pub delivery_fee: Decimal,
    /// Radius used when listing nearby stores, in kilometres.
    pub search_radius_km: f64,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            catalog_path: PathBuf::from("content/stores.json"),
            delivery_fee: Decimal::from(40),
            search_radius_km: 10.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        Ok(Self {
            data_dir: get_optional_env("LOCALSTORES_DATA_DIR")
                .map_or(defaults.data_dir, PathBuf::from),
            catalog_path: get_optional_env("LOCALSTORES_CATALOG")
                .map_or(defaults.catalog_path, PathBuf::from),
            delivery_fee: parse_or_default(
                "LOCALSTORES_DELIVERY_FEE",
                get_optional_env("LOCALSTORES_DELIVERY_FEE"),
                defaults.delivery_fee,
            )?,
            search_radius_km: parse_or_default(
                "LOCALSTORES_SEARCH_RADIUS_KM",
                get_optional_env("LOCALSTORES_SEARCH_RADIUS_KM"),
                defaults.search_radius_km,
            )?,
        })
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Parse a variable's value if it was set, otherwise use the default.
fn parse_or_default<T: std::str::FromStr>(
    key: &str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.catalog_path, PathBuf::from("content/stores.json"));
        assert_eq!(config.delivery_fee, Decimal::from(40));
        assert!((config.search_radius_km - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_or_default_uses_default_when_unset() {
        let fee = parse_or_default("FEE", None, Decimal::from(40)).expect("default");
        assert_eq!(fee, Decimal::from(40));
    }

    #[test]
    fn test_parse_or_default_parses_set_value() {
        let fee = parse_or_default("FEE", Some("25".to_owned()), Decimal::from(40)).expect("parse");
        assert_eq!(fee, Decimal::from(25));
    }

    #[test]
    fn test_parse_or_default_rejects_garbage() {
        let result = parse_or_default("FEE", Some("forty".to_owned()), Decimal::from(40));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "FEE"));
    }

    #[test]
    fn test_radius_parses_as_float() {
        let radius = parse_or_default("RADIUS", Some("7.5".to_owned()), 10.0_f64).expect("parse");
        assert!((radius - 7.5).abs() < f64::EPSILON);
    }
}
