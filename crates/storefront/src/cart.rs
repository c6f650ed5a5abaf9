//! Shopping cart state and derived views.
//!
//! A cart holds at most one entry per product id; quantities never persist
//! at zero (a zero-quantity update removes the entry). All operations here
//! are pure state transitions - persistence is the session's job.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use local_stores_core::{ProductId, StoreId};

use crate::catalog::{Catalog, Product, Store};

/// Errors from cart derivations.
#[derive(Debug, Error)]
pub enum CartError {
    /// An entry references a store that is no longer in the catalog. An
    /// order cannot be placed against a store that does not exist.
    #[error("store `{0}` is not in the catalog")]
    StoreNotFound(StoreId),
}

/// One product in the cart, with its quantity and the store it came from.
///
/// The product is a snapshot, not a catalog reference: orders keep the
/// entry list as placed even if the catalog changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub product: Product,
    /// Always >= 1 while the entry exists.
    pub quantity: u32,
    pub store_id: StoreId,
}

impl CartEntry {
    /// Price times quantity for this entry.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// The entries of one store, resolved against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreGroup {
    pub store: Store,
    pub entries: Vec<CartEntry>,
}

/// A per-session shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Add one unit of `product`. If the product is already in the cart its
    /// quantity is incremented and it keeps its original owning store, even
    /// if `store_id` differs.
    pub fn add_item(&mut self, product: Product, store_id: StoreId) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.product.id == product.id) {
            entry.quantity += 1;
        } else {
            self.entries.push(CartEntry {
                product,
                quantity: 1,
                store_id,
            });
        }
    }

    /// Remove the entry for `product_id`. No-op if absent.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.entries.retain(|e| &e.product.id != product_id);
    }

    /// Replace the quantity for `product_id`. A quantity of zero removes the
    /// entry; an absent product id is a no-op.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }
        if let Some(entry) = self.entries.iter_mut().find(|e| &e.product.id == product_id) {
            entry.quantity = quantity;
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of price times quantity over all entries.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(CartEntry::subtotal).sum()
    }

    /// Sum of quantities over all entries.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    /// Entries belonging to one store.
    #[must_use]
    pub fn store_items(&self, store_id: &StoreId) -> Vec<&CartEntry> {
        self.entries
            .iter()
            .filter(|e| &e.store_id == store_id)
            .collect()
    }

    /// Partition the entries by owning store, in first-seen order, resolving
    /// each store id against the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::StoreNotFound`] if any entry references a store
    /// id the catalog no longer contains.
    pub fn group_by_store(&self, catalog: &Catalog) -> Result<Vec<StoreGroup>, CartError> {
        let mut groups: Vec<(StoreId, Vec<CartEntry>)> = Vec::new();
        for entry in &self.entries {
            if let Some((_, entries)) = groups.iter_mut().find(|(id, _)| id == &entry.store_id) {
                entries.push(entry.clone());
            } else {
                groups.push((entry.store_id.clone(), vec![entry.clone()]));
            }
        }

        groups
            .into_iter()
            .map(|(store_id, entries)| {
                let store = catalog
                    .get_store(&store_id)
                    .cloned()
                    .ok_or(CartError::StoreNotFound(store_id))?;
                Ok(StoreGroup { store, entries })
            })
            .collect()
    }
}
