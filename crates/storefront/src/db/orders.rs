//! Per-user order lists over the `orders_<user_id>` keys.

use local_stores_core::{OrderId, UserId};

use super::{RepositoryError, read_record, write_record};
use crate::kv::KeyValue;
use crate::models::Order;

const ORDERS_SCHEMA: u32 = 1;

fn orders_key(user_id: &UserId) -> String {
    format!("orders_{user_id}")
}

/// Repository for a user's placed orders.
pub struct OrderRepository<'a, S: KeyValue> {
    store: &'a S,
}

impl<'a, S: KeyValue> OrderRepository<'a, S> {
    /// Create a repository over the given store.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All orders for `user_id`, in insertion (placement) order. Timestamp
    /// fields come back as `DateTime<Utc>` via serde; a missing or corrupt
    /// list reads as empty.
    #[must_use]
    pub fn list(&self, user_id: &UserId) -> Vec<Order> {
        read_record(self.store, &orders_key(user_id), ORDERS_SCHEMA).unwrap_or_default()
    }

    /// Look up one order.
    #[must_use]
    pub fn get(&self, user_id: &UserId, order_id: &OrderId) -> Option<Order> {
        self.list(user_id).into_iter().find(|o| &o.id == order_id)
    }

    /// Append a newly placed order to the user's list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if the order cannot be
    /// encoded.
    pub fn append(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut orders = self.list(&order.user_id);
        orders.push(order.clone());
        write_record(self.store, &orders_key(&order.user_id), ORDERS_SCHEMA, &orders)
    }

    /// Replace the stored order with the same id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order is not in the user's
    /// list.
    pub fn update(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut orders = self.list(&order.user_id);
        let Some(slot) = orders.iter_mut().find(|o| o.id == order.id) else {
            return Err(RepositoryError::NotFound);
        };
        *slot = order.clone();
        write_record(self.store, &orders_key(&order.user_id), ORDERS_SCHEMA, &orders)
    }
}
