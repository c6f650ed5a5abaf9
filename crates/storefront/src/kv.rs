//! Key-value persistence contract and its backends.
//!
//! The storefront persists whole JSON values under a handful of well-known
//! keys (`cart`, `user`, `users`, `orders_<user_id>`). The contract mirrors
//! browser local storage: reads that fail for any reason come back as
//! absent, and writes do not report errors to the caller. Failures are
//! logged, never propagated - the worst case anywhere in this library is
//! "treat as empty and continue".

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Minimal key-value persistence contract.
///
/// Implementations must treat `set` as a whole-value replace. There is no
/// compare-and-swap; the single-writer session model is what makes
/// read-modify-write safe.
pub trait KeyValue {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str);

    /// Delete the value stored under `key`, if any.
    fn remove(&self, key: &str);
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            // Single-threaded callers cannot poison the lock; recover anyway.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl KeyValue for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }
}

/// Durable store keeping one JSON file per key under a data directory.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a file store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory this store writes into.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are internal (`cart`, `orders_user_…`) but sanitize anyway so
        // a hostile user id cannot escape the data directory.
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{safe}.json"))
    }
}

impl KeyValue for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read key, treating as absent");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        let path = self.path_for(key);
        if let Err(e) = fs::write(&path, value) {
            tracing::error!(key, error = %e, "failed to persist key");
        }
    }

    fn remove(&self, key: &str) {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(key, error = %e, "failed to delete key"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("cart"), None);

        store.set("cart", "{}");
        assert_eq!(store.get("cart").as_deref(), Some("{}"));

        store.set("cart", "[1]");
        assert_eq!(store.get("cart").as_deref(), Some("[1]"));

        store.remove("cart");
        assert_eq!(store.get("cart"), None);
    }

    #[test]
    fn test_memory_store_remove_absent_is_noop() {
        let store = MemoryStore::new();
        store.remove("nope");
        assert_eq!(store.get("nope"), None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = std::env::temp_dir().join(format!(
            "local-stores-kv-{}-{}",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        let store = FileStore::open(&dir).expect("create file store");

        assert_eq!(store.get("user"), None);
        store.set("user", "{\"id\":\"user_1\"}");
        assert_eq!(store.get("user").as_deref(), Some("{\"id\":\"user_1\"}"));

        store.remove("user");
        assert_eq!(store.get("user"), None);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_file_store_sanitizes_keys() {
        let dir = std::env::temp_dir().join(format!(
            "local-stores-kv-sanitize-{}",
            std::process::id()
        ));
        let store = FileStore::open(&dir).expect("create file store");

        store.set("orders_../../etc", "x");
        // The written file stays inside the data directory.
        let entries: Vec<_> = fs::read_dir(&dir)
            .expect("read dir")
            .filter_map(Result::ok)
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(store.get("orders_../../etc").as_deref(), Some("x"));

        let _ = fs::remove_dir_all(&dir);
    }
}
