//! Integration tests for LocalStores.
//!
//! Everything runs in-process against an in-memory key-value store and the
//! real seed catalog in `content/stores.json`, so the tests exercise the
//! same wiring an embedding application would use.
//!
//! Run with: `cargo test -p local-stores-integration-tests`

use std::path::Path;
use std::sync::Once;

use local_stores_core::{Address, ProductId, StoreId};
use local_stores_storefront::catalog::{Catalog, Product};
use local_stores_storefront::kv::MemoryStore;

static TRACING: Once = Once::new();

/// Install a tracing subscriber honoring `RUST_LOG`. Idempotent across
/// tests in the same process.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Shared fixture: one backing store plus the seed catalog.
pub struct TestContext {
    pub store: MemoryStore,
    pub catalog: Catalog,
}

impl TestContext {
    /// Build a context over a fresh store and the checked-in catalog.
    ///
    /// # Panics
    ///
    /// Panics if `content/stores.json` is missing or unparsable; that is a
    /// repository defect, not a test-specific condition.
    #[must_use]
    pub fn new() -> Self {
        init_tracing();
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../content/stores.json");
        let catalog = Catalog::load(&path).expect("seed catalog should load");
        Self {
            store: MemoryStore::new(),
            catalog,
        }
    }

    /// Look up a product from the seed catalog by store and product id.
    ///
    /// # Panics
    ///
    /// Panics if the ids are not in the seed catalog.
    #[must_use]
    pub fn product(&self, store_id: &str, product_id: &str) -> Product {
        self.catalog
            .get_store(&StoreId::new(store_id))
            .expect("store in seed catalog")
            .products
            .iter()
            .find(|p| p.id == ProductId::new(product_id))
            .expect("product in seed catalog")
            .clone()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete, valid delivery address.
#[must_use]
pub fn sample_address() -> Address {
    Address {
        full_name: "Priya Sharma".to_owned(),
        street: "12 MG Road".to_owned(),
        city: "Mumbai".to_owned(),
        state: "Maharashtra".to_owned(),
        postal_code: "400001".to_owned(),
        phone: "+91 9876543210".to_owned(),
    }
}
