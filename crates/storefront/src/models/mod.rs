//! Domain records persisted through the key-value store.

pub mod order;
pub mod user;

pub use order::{Order, TrackingEvent, TrackingInfo};
pub use user::UserAccount;
