//! Read-only store and product reference data.
//!
//! The catalog is supplied from outside (a JSON file in this deployment,
//! `content/stores.json`) and loaded once at startup, the same way the
//! content layer loads markdown pages. Nothing in the domain mutates it.

use std::collections::BTreeSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use local_stores_core::{ProductId, StoreId};

/// Errors loading the catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog file is not valid catalog JSON.
    #[error("invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A product sold by a store. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Currency amount in standard units (rupees, not paise).
    pub price: Decimal,
    pub image: String,
    /// Product category, independent of the owning store's category.
    pub category: String,
}

/// A local store and the products it owns. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub description: String,
    /// Postal address, display only.
    pub address: String,
    pub category: String,
    /// Rating on a 0.0-5.0 scale.
    pub rating: f64,
    pub image: String,
    /// Decimal degrees.
    pub latitude: f64,
    /// Decimal degrees.
    pub longitude: f64,
    pub products: Vec<Product>,
}

/// The full set of stores available to browse.
#[derive(Debug, Clone)]
pub struct Catalog {
    stores: Vec<Store>,
}

impl Catalog {
    /// Build a catalog from an already-loaded store list.
    #[must_use]
    pub const fn new(stores: Vec<Store>) -> Self {
        Self { stores }
    }

    /// Load the catalog from a JSON file containing an array of stores.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read or parsed. Unlike
    /// session persistence, a broken catalog is fatal to startup: there is
    /// nothing to sell without it.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let stores: Vec<Store> = serde_json::from_str(&raw)?;
        tracing::info!(count = stores.len(), path = %path.display(), "loaded catalog");
        Ok(Self::new(stores))
    }

    /// All stores, in catalog order.
    #[must_use]
    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    /// Look up a store by id.
    #[must_use]
    pub fn get_store(&self, id: &StoreId) -> Option<&Store> {
        self.stores.iter().find(|s| &s.id == id)
    }

    /// All distinct store categories, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.stores
            .iter()
            .map(|s| s.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Case-insensitive substring search over store name, category, and
    /// description. An empty query matches every store.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Store> {
        let needle = query.trim().to_lowercase();
        self.stores
            .iter()
            .filter(|s| {
                needle.is_empty()
                    || s.name.to_lowercase().contains(&needle)
                    || s.category.to_lowercase().contains(&needle)
                    || s.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
