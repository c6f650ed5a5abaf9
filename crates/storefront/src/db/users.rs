//! Account directory over the `users` key.
//!
//! The whole directory is one persisted list, read and written as a unit.
//! That is safe only because a session is the sole writer of its store.

use local_stores_core::{Email, UserId};

use super::{RepositoryError, read_record, write_record};
use crate::kv::KeyValue;
use crate::models::UserAccount;

const USERS_KEY: &str = "users";
const USERS_SCHEMA: u32 = 1;

/// Repository for the registered-account list.
pub struct UserDirectory<'a, S: KeyValue> {
    store: &'a S,
}

impl<'a, S: KeyValue> UserDirectory<'a, S> {
    /// Create a directory over the given store.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All registered accounts. A missing or corrupt directory reads as
    /// empty.
    #[must_use]
    pub fn list(&self) -> Vec<UserAccount> {
        read_record(self.store, USERS_KEY, USERS_SCHEMA).unwrap_or_default()
    }

    /// Look up an account by email (case-sensitive exact match).
    #[must_use]
    pub fn find_by_email(&self, email: &Email) -> Option<UserAccount> {
        self.list().into_iter().find(|u| &u.email == email)
    }

    /// Look up an account by id.
    #[must_use]
    pub fn find_by_id(&self, id: &UserId) -> Option<UserAccount> {
        self.list().into_iter().find(|u| &u.id == id)
    }

    /// Add a new account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already
    /// registered.
    pub fn insert(&self, account: &UserAccount) -> Result<(), RepositoryError> {
        let mut accounts = self.list();
        if accounts.iter().any(|u| u.email == account.email) {
            return Err(RepositoryError::Conflict(
                "email already registered".to_owned(),
            ));
        }
        accounts.push(account.clone());
        write_record(self.store, USERS_KEY, USERS_SCHEMA, &accounts)
    }

    /// Replace the stored account with the same id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no account has this id.
    pub fn update(&self, account: &UserAccount) -> Result<(), RepositoryError> {
        let mut accounts = self.list();
        let Some(slot) = accounts.iter_mut().find(|u| u.id == account.id) else {
            return Err(RepositoryError::NotFound);
        };
        *slot = account.clone();
        write_record(self.store, USERS_KEY, USERS_SCHEMA, &accounts)
    }
}
