//! Shared domain types.

mod address;
mod email;
mod id;
mod status;

pub use address::{Address, AddressError};
pub use email::{Email, EmailError};
pub use id::{OrderId, ProductId, StoreId, UserId};
pub use status::{AuthProvider, OrderStatus, PaymentMethod};
