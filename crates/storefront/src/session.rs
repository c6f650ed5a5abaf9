//! Per-client session state: the cart and the signed-in user.
//!
//! A session owns the in-memory copies and writes them through to the
//! key-value store on every mutation, so a new session over the same store
//! picks up exactly where the last one left off.

use local_stores_core::{ProductId, StoreId};

use crate::cart::Cart;
use crate::catalog::Product;
use crate::db::{RepositoryError, read_record, write_record};
use crate::kv::KeyValue;
use crate::models::UserAccount;

const CART_KEY: &str = "cart";
const CART_SCHEMA: u32 = 1;
const USER_KEY: &str = "user";
const USER_SCHEMA: u32 = 1;

/// A client session, rehydrated from and persisted to a key-value store.
pub struct Session<'a, S: KeyValue> {
    store: &'a S,
    cart: Cart,
    user: Option<UserAccount>,
}

impl<'a, S: KeyValue> Session<'a, S> {
    /// Open a session, rehydrating the cart and user from the store. Missing
    /// or corrupt state starts the session empty and signed out.
    #[must_use]
    pub fn open(store: &'a S) -> Self {
        let cart = read_record(store, CART_KEY, CART_SCHEMA).unwrap_or_default();
        let user = read_record(store, USER_KEY, USER_SCHEMA);
        Self { store, cart, user }
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&UserAccount> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Add one unit of `product` to the cart and persist it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if the cart cannot be
    /// encoded.
    pub fn add_item(&mut self, product: Product, store_id: StoreId) -> Result<(), RepositoryError> {
        self.cart.add_item(product, store_id);
        self.persist_cart()
    }

    /// Remove a product from the cart and persist it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if the cart cannot be
    /// encoded.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<(), RepositoryError> {
        self.cart.remove_item(product_id);
        self.persist_cart()
    }

    /// Set a product's quantity (zero removes it) and persist the cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if the cart cannot be
    /// encoded.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        self.cart.set_quantity(product_id, quantity);
        self.persist_cart()
    }

    /// Empty the cart and persist it. Used after a successful checkout.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if the cart cannot be
    /// encoded.
    pub fn clear_cart(&mut self) -> Result<(), RepositoryError> {
        self.cart.clear();
        self.persist_cart()
    }

    /// Sign a user in (or refresh the stored account after a profile
    /// change) and persist the session user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` if the account cannot be
    /// encoded.
    pub fn set_user(&mut self, user: UserAccount) -> Result<(), RepositoryError> {
        write_record(self.store, USER_KEY, USER_SCHEMA, &user)?;
        self.user = Some(user);
        Ok(())
    }

    /// Sign out, clearing the persisted session user. The cart is left
    /// alone.
    pub fn logout(&mut self) {
        self.user = None;
        self.store.remove(USER_KEY);
    }

    fn persist_cart(&self) -> Result<(), RepositoryError> {
        write_record(self.store, CART_KEY, CART_SCHEMA, &self.cart)
    }
}
