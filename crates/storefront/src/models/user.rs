//! User account record and its address-book invariants.

use serde::{Deserialize, Serialize};

use local_stores_core::{Address, AuthProvider, Email, UserId};

/// A registered account.
///
/// `default_address_index` is either `-1` ("no default") or a valid index
/// into `addresses`; every mutation below maintains that invariant. The
/// sentinel form is kept because the persisted record format uses it - see
/// DESIGN.md. Use [`UserAccount::default_address`] for the `Option` view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    pub default_address_index: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub provider: AuthProvider,
}

impl UserAccount {
    /// Create a fresh account with a generated id and an empty address book.
    #[must_use]
    pub fn new(name: impl Into<String>, email: Email, provider: AuthProvider) -> Self {
        Self {
            id: UserId::generate(),
            name: name.into(),
            email,
            phone: None,
            addresses: Vec::new(),
            default_address_index: -1,
            photo_url: None,
            provider,
        }
    }

    /// The address pre-selected for checkout, if any.
    #[must_use]
    pub fn default_address(&self) -> Option<&Address> {
        usize::try_from(self.default_address_index)
            .ok()
            .and_then(|i| self.addresses.get(i))
    }

    /// Append an address. The first address automatically becomes the
    /// default.
    pub fn add_address(&mut self, address: Address) {
        self.addresses.push(address);
        if self.default_address_index == -1 {
            self.default_address_index = 0;
        }
    }

    /// Replace the address at `index` in place. Returns `false` (and leaves
    /// the account untouched) when the index is out of bounds.
    pub fn update_address(&mut self, index: usize, address: Address) -> bool {
        match self.addresses.get_mut(index) {
            Some(slot) => {
                *slot = address;
                true
            }
            None => false,
        }
    }

    /// Remove the address at `index`, re-deriving the default pointer:
    /// removing the default falls back to index 0 (or none when the book is
    /// now empty); removing an address before the default shifts the default
    /// down so it keeps pointing at the same logical address. Returns
    /// `false` when the index is out of bounds.
    pub fn remove_address(&mut self, index: usize) -> bool {
        if index >= self.addresses.len() {
            return false;
        }
        self.addresses.remove(index);

        let removed = i32::try_from(index).unwrap_or(i32::MAX);
        if removed == self.default_address_index {
            self.default_address_index = if self.addresses.is_empty() { -1 } else { 0 };
        } else if removed < self.default_address_index {
            self.default_address_index -= 1;
        }
        true
    }

    /// Point the default at `index`. Returns `false` when out of bounds.
    pub fn set_default_address(&mut self, index: usize) -> bool {
        if index >= self.addresses.len() {
            return false;
        }
        self.default_address_index = i32::try_from(index).unwrap_or(i32::MAX);
        true
    }
}
