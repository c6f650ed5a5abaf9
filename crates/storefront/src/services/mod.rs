//! Domain services over the repositories.

pub mod auth;
pub mod orders;
