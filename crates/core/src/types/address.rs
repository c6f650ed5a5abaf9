//! Delivery address record.

use serde::{Deserialize, Serialize};

/// Errors produced when validating an [`Address`] for checkout.
#[derive(thiserror::Error, Debug, Clone)]
pub enum AddressError {
    /// A required field is empty.
    #[error("address field `{0}` is required")]
    MissingField(&'static str),
}

/// A delivery address.
///
/// Stored on accounts and copied onto orders at placement time, so later
/// edits to an account's address book never rewrite order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub full_name: String,
    pub street: String,
    pub city: String,
    /// State or province.
    pub state: String,
    pub postal_code: String,
    pub phone: String,
}

impl Address {
    /// Check that every field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::MissingField`] naming the first empty field.
    pub fn validate(&self) -> Result<(), AddressError> {
        let fields = [
            ("fullName", &self.full_name),
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("postalCode", &self.postal_code),
            ("phone", &self.phone),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(AddressError::MissingField(name));
            }
        }
        Ok(())
    }
}
