//! Order placement, retrieval, and status updates.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;

use local_stores_core::{Address, AddressError, OrderId, OrderStatus, PaymentMethod, UserId};

use crate::cart::{CartEntry, StoreGroup};
use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::kv::KeyValue;
use crate::models::order::generate_order_id;
use crate::models::{Order, TrackingInfo};

/// Flat fee added to every order's subtotal.
pub const DEFAULT_DELIVERY_FEE: u32 = 40;

/// Errors that can occur placing or updating orders.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Checkout attempted without a delivery address.
    #[error("no delivery address selected")]
    NoAddressSelected,

    /// The selected address is missing required fields.
    #[error("invalid delivery address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// The requested status change is not a legal lifecycle transition.
    #[error("cannot move order from `{from}` to `{to}`")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Repository error.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Order service: synthesizes orders from cart groupings and manages their
/// tracking timelines.
pub struct OrderService<'a, S: KeyValue> {
    orders: OrderRepository<'a, S>,
    delivery_fee: Decimal,
}

impl<'a, S: KeyValue> OrderService<'a, S> {
    /// Create a service with the default delivery fee.
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self::with_delivery_fee(store, Decimal::from(DEFAULT_DELIVERY_FEE))
    }

    /// Create a service with an explicit delivery fee.
    #[must_use]
    pub const fn with_delivery_fee(store: &'a S, delivery_fee: Decimal) -> Self {
        Self {
            orders: OrderRepository::new(store),
            delivery_fee,
        }
    }

    /// Place one order per store group, each totalling that store's subtotal
    /// plus the delivery fee, with a fresh pending tracking timeline, and
    /// persist them under the user's order list.
    ///
    /// Orders are written group by group with no rollback: if a later group
    /// fails, orders already persisted stay persisted. The caller is
    /// expected to clear the cart only after the whole batch succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NoAddressSelected`] when `address` is `None`,
    /// [`OrderError::InvalidAddress`] when it is incomplete, and
    /// [`OrderError::Repository`] when persisting fails.
    pub fn place_order(
        &self,
        groups: &[StoreGroup],
        address: Option<&Address>,
        payment_method: PaymentMethod,
        user_id: &UserId,
    ) -> Result<Vec<Order>, OrderError> {
        let address = address.ok_or(OrderError::NoAddressSelected)?;
        address.validate()?;

        let mut placed = Vec::with_capacity(groups.len());
        for group in groups {
            let now = Utc::now();
            let subtotal: Decimal = group.entries.iter().map(CartEntry::subtotal).sum();
            let order = Order {
                id: generate_order_id(now),
                user_id: user_id.clone(),
                items: group.entries.clone(),
                store: group.store.clone(),
                status: OrderStatus::Pending,
                created_at: now,
                updated_at: now,
                total: subtotal + self.delivery_fee,
                address: address.clone(),
                payment_method,
                estimated_delivery: Some(estimate_delivery(now)),
                tracking_info: Some(TrackingInfo::initial(now)),
            };
            self.orders.append(&order)?;
            tracing::info!(
                order_id = %order.id,
                store = %order.store.id,
                total = %order.total,
                "order placed"
            );
            placed.push(order);
        }
        Ok(placed)
    }

    /// All orders for the user, in placement order. Callers wanting
    /// newest-first sort by `created_at` descending.
    #[must_use]
    pub fn list_orders(&self, user_id: &UserId) -> Vec<Order> {
        self.orders.list(user_id)
    }

    /// Look up one order.
    #[must_use]
    pub fn get_order(&self, user_id: &UserId, order_id: &OrderId) -> Option<Order> {
        self.orders.get(user_id, order_id)
    }

    /// Move an order to `new_status`, appending a timeline entry and
    /// persisting the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::InvalidTransition`] when the change is not
    /// legal in the lifecycle graph, and [`OrderError::Repository`] when the
    /// order is missing or persisting fails.
    pub fn advance_status(
        &self,
        order: &Order,
        new_status: OrderStatus,
        description: &str,
    ) -> Result<Order, OrderError> {
        if !order.status.can_transition_to(new_status) {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: new_status,
            });
        }

        let now = Utc::now();
        let mut updated = order.clone();
        let mut tracking = updated.tracking_info.take().unwrap_or_else(|| TrackingInfo {
            current_status: order.status,
            status_history: Vec::new(),
        });
        tracking.record(new_status, now, description);

        updated.status = new_status;
        updated.updated_at = now;
        updated.tracking_info = Some(tracking);

        self.orders.update(&updated)?;
        Ok(updated)
    }
}

/// Estimated delivery time: 24 hours after placement plus a uniformly random
/// extra 0-24 hours.
#[must_use]
pub fn estimate_delivery(created_at: DateTime<Utc>) -> DateTime<Utc> {
    let extra_hours = rand::rng().random_range(0..24_i64);
    created_at + Duration::hours(24 + extra_hours)
}
