//! Authentication and account service.
//!
//! Authentication here is a stand-in for an external identity collaborator:
//! passwords are accepted but never stored or checked, and any email
//! containing `test` or `demo` signs in as a throwaway identity. The durable
//! contract is the shape of the account record and the address-book
//! invariants, not the credential checks.

mod error;

pub use error::AuthError;

use local_stores_core::{Address, AuthProvider, Email, UserId};

use crate::db::RepositoryError;
use crate::db::users::UserDirectory;
use crate::kv::KeyValue;
use crate::models::UserAccount;

/// Profile handed back by an external identity provider.
#[derive(Debug, Clone)]
pub struct ExternalProfile {
    pub name: String,
    pub email: Email,
    pub photo_url: Option<String>,
}

/// Fields that can be changed on an account profile. `None` leaves the
/// current value alone.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<String>,
}

/// Authentication and account service.
pub struct AuthService<'a, S: KeyValue> {
    directory: UserDirectory<'a, S>,
}

impl<'a, S: KeyValue> AuthService<'a, S> {
    /// Create a new service over the given store.
    #[must_use]
    pub const fn new(store: &'a S) -> Self {
        Self {
            directory: UserDirectory::new(store),
        }
    }

    /// Register a new account.
    ///
    /// The password is accepted for interface compatibility but not stored;
    /// see the module docs.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already
    /// registered (case-sensitive exact match).
    pub fn register(
        &self,
        name: &str,
        email: &str,
        _password: &str,
    ) -> Result<UserAccount, AuthError> {
        let email = Email::parse(email)?;

        let account = UserAccount::new(name, email, AuthProvider::Email);
        self.directory.insert(&account).map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Repository(other),
        })?;

        Ok(account)
    }

    /// Log in with email and password.
    ///
    /// Demo bypass: an email containing `test` or `demo` authenticates as a
    /// throwaway identity that is not added to the directory.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no account matches.
    pub fn login(&self, email: &str, _password: &str) -> Result<UserAccount, AuthError> {
        let email = Email::parse(email)?;

        if email.contains("test") || email.contains("demo") {
            let mut account = UserAccount::new("Test User", email, AuthProvider::Email);
            account.phone = Some("+91 9876543210".to_owned());
            return Ok(account);
        }

        self.directory
            .find_by_email(&email)
            .ok_or(AuthError::InvalidCredentials)
    }

    /// Sign in with an external identity, upserting the account keyed by
    /// email: an existing account gets its photo and provider refreshed
    /// rather than being duplicated.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the directory write fails.
    pub fn login_with_external_identity(
        &self,
        profile: ExternalProfile,
    ) -> Result<UserAccount, AuthError> {
        if let Some(mut existing) = self.directory.find_by_email(&profile.email) {
            existing.photo_url = profile.photo_url;
            existing.provider = AuthProvider::Google;
            self.directory.update(&existing)?;
            return Ok(existing);
        }

        let mut account = UserAccount::new(profile.name, profile.email, AuthProvider::Google);
        account.photo_url = profile.photo_url;
        self.directory.insert(&account)?;
        Ok(account)
    }

    /// Shallow-merge profile fields into the account and persist it.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the account is not in the
    /// directory.
    pub fn update_profile(
        &self,
        account: &UserAccount,
        patch: ProfilePatch,
    ) -> Result<UserAccount, AuthError> {
        let mut updated = account.clone();
        if let Some(name) = patch.name {
            updated.name = name;
        }
        if let Some(email) = patch.email {
            updated.email = email;
        }
        if let Some(phone) = patch.phone {
            updated.phone = Some(phone);
        }
        self.persist(updated)
    }

    /// Append an address; the first one becomes the default.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidAddress` if a required field is empty.
    pub fn add_address(
        &self,
        account: &UserAccount,
        address: Address,
    ) -> Result<UserAccount, AuthError> {
        address.validate()?;
        let mut updated = account.clone();
        updated.add_address(address);
        self.persist(updated)
    }

    /// Replace the address at `index`. Out-of-bounds indexes are a silent
    /// no-op and the account is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidAddress` if a required field is empty.
    pub fn update_address(
        &self,
        account: &UserAccount,
        index: usize,
        address: Address,
    ) -> Result<UserAccount, AuthError> {
        address.validate()?;
        let mut updated = account.clone();
        if !updated.update_address(index, address) {
            return Ok(account.clone());
        }
        self.persist(updated)
    }

    /// Remove the address at `index`, re-deriving the default pointer.
    /// Out-of-bounds indexes are a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the account is not in the
    /// directory.
    pub fn remove_address(
        &self,
        account: &UserAccount,
        index: usize,
    ) -> Result<UserAccount, AuthError> {
        let mut updated = account.clone();
        if !updated.remove_address(index) {
            return Ok(account.clone());
        }
        self.persist(updated)
    }

    /// Point the default address at `index`. Out-of-bounds indexes are a
    /// silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the account is not in the
    /// directory.
    pub fn set_default_address(
        &self,
        account: &UserAccount,
        index: usize,
    ) -> Result<UserAccount, AuthError> {
        let mut updated = account.clone();
        if !updated.set_default_address(index) {
            return Ok(account.clone());
        }
        self.persist(updated)
    }

    /// Look up an account by id.
    #[must_use]
    pub fn get_user(&self, id: &UserId) -> Option<UserAccount> {
        self.directory.find_by_id(id)
    }

    fn persist(&self, account: UserAccount) -> Result<UserAccount, AuthError> {
        self.directory.update(&account).map_err(|e| match e {
            RepositoryError::NotFound => AuthError::UserNotFound,
            other => AuthError::Repository(other),
        })?;
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn address() -> Address {
        Address {
            full_name: "Priya Sharma".to_owned(),
            street: "12 MG Road".to_owned(),
            city: "Mumbai".to_owned(),
            state: "Maharashtra".to_owned(),
            postal_code: "400001".to_owned(),
            phone: "+91 9876543210".to_owned(),
        }
    }

    #[test]
    fn test_register_then_login() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        let registered = auth.register("Priya", "priya@example.com", "pw").expect("register");
        let logged_in = auth.login("priya@example.com", "pw").expect("login");
        assert_eq!(registered, logged_in);
        assert_eq!(logged_in.provider, AuthProvider::Email);
    }

    #[test]
    fn test_register_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        auth.register("A", "a@x.com", "pw").expect("register");

        let err = auth.register("B", "a@x.com", "pw").expect_err("duplicate");
        assert!(matches!(err, AuthError::UserAlreadyExists));
    }

    #[test]
    fn test_login_unknown_email_fails() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        let err = auth.login("nobody@x.com", "pw").expect_err("unknown");
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_demo_bypass_creates_throwaway_identity() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        let account = auth.login("demo@x.com", "anything").expect("bypass");
        assert_eq!(account.name, "Test User");
        // The throwaway identity is not added to the directory.
        assert!(auth.get_user(&account.id).is_none());
    }

    #[test]
    fn test_external_identity_upserts_by_email() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        let registered = auth.register("Priya", "priya@example.com", "pw").expect("register");

        let account = auth
            .login_with_external_identity(ExternalProfile {
                name: "Priya S".to_owned(),
                email: Email::parse("priya@example.com").expect("email"),
                photo_url: Some("https://example.com/p.jpg".to_owned()),
            })
            .expect("external login");

        // Same account, refreshed photo and provider, no duplicate.
        assert_eq!(account.id, registered.id);
        assert_eq!(account.provider, AuthProvider::Google);
        assert_eq!(account.photo_url.as_deref(), Some("https://example.com/p.jpg"));
    }

    #[test]
    fn test_external_identity_creates_account_when_new() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);

        let account = auth
            .login_with_external_identity(ExternalProfile {
                name: "New User".to_owned(),
                email: Email::parse("new@example.com").expect("email"),
                photo_url: None,
            })
            .expect("external login");

        assert_eq!(auth.get_user(&account.id), Some(account));
    }

    #[test]
    fn test_update_profile_merges_fields() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        let account = auth.register("Priya", "priya@example.com", "pw").expect("register");

        let updated = auth
            .update_profile(
                &account,
                ProfilePatch {
                    phone: Some("+91 9999999999".to_owned()),
                    ..ProfilePatch::default()
                },
            )
            .expect("update");

        assert_eq!(updated.name, "Priya");
        assert_eq!(updated.phone.as_deref(), Some("+91 9999999999"));
        assert_eq!(auth.get_user(&account.id), Some(updated));
    }

    #[test]
    fn test_address_operations_persist() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        let account = auth.register("Priya", "priya@example.com", "pw").expect("register");

        let account = auth.add_address(&account, address()).expect("add");
        assert_eq!(account.default_address_index, 0);

        let account = auth.remove_address(&account, 0).expect("remove");
        assert_eq!(account.default_address_index, -1);
        assert_eq!(auth.get_user(&account.id), Some(account));
    }

    #[test]
    fn test_incomplete_address_is_rejected() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        let account = auth.register("Priya", "priya@example.com", "pw").expect("register");

        let mut incomplete = address();
        incomplete.city = String::new();
        let err = auth.add_address(&account, incomplete).expect_err("invalid");
        assert!(matches!(err, AuthError::InvalidAddress(_)));
    }

    #[test]
    fn test_out_of_bounds_address_index_is_noop() {
        let store = MemoryStore::new();
        let auth = AuthService::new(&store);
        let account = auth.register("Priya", "priya@example.com", "pw").expect("register");

        let unchanged = auth.set_default_address(&account, 3).expect("noop");
        assert_eq!(unchanged, account);
    }
}
