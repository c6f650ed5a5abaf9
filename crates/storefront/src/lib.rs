//! LocalStores Storefront domain library.
//!
//! Everything a storefront UI needs behind its pages: the store/product
//! catalog, proximity ranking, the per-session shopping cart, the account
//! directory with saved addresses, and order placement with a tracking
//! timeline. Persistence goes through the small key-value contract in
//! [`kv`] (browser local storage in the original deployment, a directory of
//! JSON files or an in-memory map here).
//!
//! # Architecture
//!
//! - [`catalog`] - Read-only store/product reference data
//! - [`geo`] - Great-circle distance, ranking, and radius filtering
//! - [`cart`] - Cart state and per-store grouping
//! - [`session`] - One browser context: owns the cart and the signed-in user
//! - [`db`] - Repositories over the key-value store
//! - [`services`] - Auth/account and order services
//!
//! Execution is single-threaded and synchronous: each session owns its cart
//! and user state exclusively, and persistence is whole-value
//! read-modify-write. That is only safe with a single writer; a multi-client
//! deployment would need optimistic concurrency, which this library does not
//! provide.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod geo;
pub mod kv;
pub mod models;
pub mod services;
pub mod session;
