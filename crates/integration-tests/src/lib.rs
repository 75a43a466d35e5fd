//! Integration tests for Clementine.
//!
//! Cross-crate scenario tests for the catalog faceting engine and the
//! favorites reconciler, driven entirely through in-memory collections and
//! store fakes - no network, no live document store.
//!
//! # Test Categories
//!
//! - `catalog_filtering` - facet extraction, price bucketing, and filter
//!   evaluation scenarios
//! - `favorites_reconciler` - anonymous-to-authenticated merge scenarios
//!
//! This library holds the shared fixtures: product builders and an
//! in-memory [`RemoteFavoriteStore`] standing in for the document store.

use std::collections::BTreeMap;
use std::sync::{Mutex, Once};

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use clementine_core::{
    AttributeValue, CurrencyCode, Price, Product, ProductId, ProductSnapshot, ProductStatus,
    ShopperId, TenantId,
};
use clementine_favorites::{FavoriteEntry, FavoritesError, RemoteFavoriteStore};

static TRACING: Once = Once::new();

/// Initialize test logging once per process.
///
/// Controlled by `RUST_LOG`, e.g. `RUST_LOG=debug cargo test -- --nocapture`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// The tenant every fixture belongs to.
#[must_use]
pub fn test_tenant() -> TenantId {
    TenantId::new("acme")
}

/// An active product with no attributes.
#[must_use]
pub fn product(id: &str, price: u32) -> Product {
    Product {
        id: ProductId::new(id),
        tenant: test_tenant(),
        title: format!("Product {id}"),
        price: Price::new(Decimal::from(price), CurrencyCode::USD),
        compare_at_price: None,
        status: ProductStatus::Active,
        attributes: BTreeMap::new(),
        image_url: None,
        created_at: Utc::now() - Duration::minutes(i64::from(price)),
    }
}

/// An active product with scalar attributes.
#[must_use]
pub fn product_with_attrs(id: &str, price: u32, attrs: &[(&str, &str)]) -> Product {
    let mut item = product(id, price);
    item.attributes = attrs
        .iter()
        .map(|(k, v)| ((*k).to_string(), AttributeValue::from(*v)))
        .collect();
    item
}

/// An active product with one list-valued attribute.
#[must_use]
pub fn product_with_list_attr(id: &str, price: u32, key: &str, values: &[&str]) -> Product {
    let mut item = product(id, price);
    item.attributes.insert(
        key.to_string(),
        AttributeValue::List(values.iter().map(|v| (*v).to_string()).collect()),
    );
    item
}

/// A favorite entry for the test tenant.
#[must_use]
pub fn favorite(product_id: &str, title: &str) -> FavoriteEntry {
    FavoriteEntry {
        tenant: test_tenant(),
        product_id: ProductId::new(product_id),
        snapshot: ProductSnapshot {
            title: title.to_string(),
            price: Price::new(Decimal::from(25), CurrencyCode::USD),
            image_url: None,
        },
        added_at: Utc::now(),
    }
}

/// In-memory stand-in for the remote favorites collection.
#[derive(Default)]
pub struct InMemoryRemote {
    entries: Mutex<BTreeMap<String, FavoriteEntry>>,
}

impl InMemoryRemote {
    /// An empty remote scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry directly, bypassing the reconciler.
    pub fn seed(&self, entry: FavoriteEntry) {
        let key = format!("{}_{}", entry.tenant, entry.product_id);
        self.entries.lock().expect("lock").insert(key, entry);
    }

    /// Product ids currently stored, sorted.
    #[must_use]
    pub fn product_ids(&self) -> Vec<String> {
        self.entries
            .lock()
            .expect("lock")
            .values()
            .map(|e| e.product_id.to_string())
            .collect()
    }

    /// Fetch one stored entry by identity.
    #[must_use]
    pub fn get(&self, tenant: &TenantId, product: &ProductId) -> Option<FavoriteEntry> {
        self.entries
            .lock()
            .expect("lock")
            .get(&format!("{tenant}_{product}"))
            .cloned()
    }
}

impl RemoteFavoriteStore for InMemoryRemote {
    async fn load(
        &self,
        _shopper: &ShopperId,
        tenant: &TenantId,
    ) -> Result<Vec<FavoriteEntry>, FavoritesError> {
        Ok(self
            .entries
            .lock()
            .expect("lock")
            .values()
            .filter(|e| e.tenant == *tenant)
            .cloned()
            .collect())
    }

    async fn upsert(
        &self,
        _shopper: &ShopperId,
        entry: &FavoriteEntry,
    ) -> Result<(), FavoritesError> {
        self.seed(entry.clone());
        Ok(())
    }

    async fn remove(
        &self,
        _shopper: &ShopperId,
        tenant: &TenantId,
        product: &ProductId,
    ) -> Result<(), FavoritesError> {
        self.entries
            .lock()
            .expect("lock")
            .remove(&format!("{tenant}_{product}"));
        Ok(())
    }
}
