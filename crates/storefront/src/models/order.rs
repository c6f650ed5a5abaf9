//! Order record and its tracking timeline.

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use local_stores_core::{Address, OrderId, OrderStatus, PaymentMethod, UserId};

use crate::cart::CartEntry;
use crate::catalog::Store;

/// One entry in an order's tracking timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

/// Append-only audit trail of an order's status changes.
///
/// Invariant: `status_history` is non-decreasing in timestamp, and the last
/// entry's status equals `current_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingInfo {
    pub current_status: OrderStatus,
    pub status_history: Vec<TrackingEvent>,
}

impl TrackingInfo {
    /// The single-entry timeline every order starts with.
    #[must_use]
    pub fn initial(now: DateTime<Utc>) -> Self {
        Self {
            current_status: OrderStatus::Pending,
            status_history: vec![TrackingEvent {
                status: OrderStatus::Pending,
                timestamp: now,
                description: "Order has been placed and is awaiting confirmation".to_owned(),
            }],
        }
    }

    /// Append a status change to the timeline.
    pub fn record(&mut self, status: OrderStatus, now: DateTime<Utc>, description: &str) {
        self.current_status = status;
        self.status_history.push(TrackingEvent {
            status,
            timestamp: now,
            description: description.to_owned(),
        });
    }
}

/// A placed order against a single store.
///
/// Immutable at creation except for status updates; the items, store, and
/// address are snapshots taken at placement time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<CartEntry>,
    pub store: Store,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Store subtotal plus the delivery fee.
    pub total: Decimal,
    pub address: Address,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_info: Option<TrackingInfo>,
}

const ORDER_ID_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate an order id in the `ORD-<6 base36>-<4 digits>` format used by
/// the persisted records.
#[must_use]
pub fn generate_order_id(now: DateTime<Utc>) -> OrderId {
    let mut rng = rand::rng();
    let token: String = (0..6)
        .map(|_| char::from(*ORDER_ID_ALPHABET.choose(&mut rng).unwrap_or(&b'0')))
        .collect();
    let suffix = now.timestamp_millis().rem_euclid(10_000);
    OrderId::new(format!("ORD-{token}-{suffix:04}"))
}
