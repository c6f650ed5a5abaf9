//! LocalStores Core - Shared types library.
//!
//! This crate provides the domain primitives used across all LocalStores
//! components:
//! - `storefront` - Catalog, cart, session, and order domain logic
//! - `integration-tests` - End-to-end flows over the domain
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no clocks.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, addresses, and closed status enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
