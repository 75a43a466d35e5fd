//! The favorites reconciler: one canonical list, two storage scopes.
//!
//! Before sign-in the device-local scope is authoritative; after sign-in the
//! remote scope is, and the local scope is retired following a one-time
//! merge. Membership tests are synchronous against the in-memory list and
//! never touch the network.
//!
//! Mutations update the in-memory list optimistically and then write to
//! whichever scope is authoritative; a failed write is logged and left to a
//! later reload to reconcile (last-write-wins, never transactional).

use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use clementine_core::{Product, ProductId, ShopperId, TenantId};

use crate::entry::FavoriteEntry;
use crate::store::{FavoritesError, LocalFavoriteStore, RemoteFavoriteStore};

/// Which scope is currently authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShopperScope {
    /// No authenticated shopper; the device-local scope is authoritative.
    Anonymous,
    /// A signed-in shopper; the remote scope is authoritative and the local
    /// scope has been retired.
    Authenticated(ShopperId),
}

/// Owns a shopper's canonical favorites list for one tenant.
pub struct FavoritesReconciler<L, R> {
    tenant: TenantId,
    local: L,
    remote: R,
    scope: ShopperScope,
    entries: Vec<FavoriteEntry>,
}

impl<L, R> FavoritesReconciler<L, R>
where
    L: LocalFavoriteStore,
    R: RemoteFavoriteStore,
{
    /// Start anonymous, seeded from the device-local scope.
    ///
    /// An unreachable or corrupt local scope degrades to an empty list;
    /// favorites are never worth failing a page load over.
    pub fn new(tenant: TenantId, local: L, remote: R) -> Self {
        let entries = local.load(&tenant).unwrap_or_else(|e| {
            warn!(tenant = %tenant, error = %e, "Failed to load local favorites, starting empty");
            Vec::new()
        });

        Self {
            tenant,
            local,
            remote,
            scope: ShopperScope::Anonymous,
            entries,
        }
    }

    /// The currently authoritative scope.
    #[must_use]
    pub const fn scope(&self) -> &ShopperScope {
        &self.scope
    }

    /// The reconciled favorites, in adoption order.
    #[must_use]
    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    /// Synchronous membership test by product identity.
    #[must_use]
    pub fn is_favorite(&self, product: &ProductId) -> bool {
        self.entries.iter().any(|e| e.product_id == *product)
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the shopper has no favorites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Transition to the authenticated state, merging the anonymous scope
    /// into the authoritated one.
    ///
    /// The remote copy wins on conflicting product identities; local-only
    /// entries are persisted remotely and the local scope is cleared. With
    /// an already-cleared local scope the merge is a no-op union, so
    /// retrying is safe. Re-running for the same shopper does nothing.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError` if the remote scope cannot be read; the
    /// reconciler then stays anonymous so local data is never cleared
    /// against a store we could not see. Failed remote writes during the
    /// merge are logged, not returned.
    #[instrument(skip(self), fields(tenant = %self.tenant, shopper = %shopper))]
    pub async fn sign_in(&mut self, shopper: ShopperId) -> Result<(), FavoritesError> {
        if self.scope == ShopperScope::Authenticated(shopper.clone()) {
            debug!("Already authenticated, skipping merge");
            return Ok(());
        }

        let mut merged = self.remote.load(&shopper, &self.tenant).await?;

        let local_entries = self.local.load(&self.tenant).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load local favorites for merge, treating as empty");
            Vec::new()
        });

        if local_entries.is_empty() {
            debug!(remote = merged.len(), "Local scope empty, adopting remote");
        } else {
            let known: HashSet<ProductId> =
                merged.iter().map(|e| e.product_id.clone()).collect();
            let local_only: Vec<FavoriteEntry> = local_entries
                .into_iter()
                .filter(|e| !known.contains(&e.product_id))
                .collect();

            for entry in &local_only {
                if let Err(e) = self.remote.upsert(&shopper, entry).await {
                    warn!(
                        product = %entry.product_id,
                        error = %e,
                        "Failed to persist merged favorite remotely"
                    );
                }
            }

            debug!(
                remote = merged.len(),
                merged_in = local_only.len(),
                "Merged anonymous favorites into remote scope"
            );
            merged.extend(local_only);

            if let Err(e) = self.local.clear(&self.tenant) {
                warn!(error = %e, "Failed to clear local favorites after merge");
            }
        }

        self.entries = merged;
        self.scope = ShopperScope::Authenticated(shopper);
        Ok(())
    }

    /// Favorite a product. A no-op if it is already a favorite.
    pub async fn add(&mut self, product: &Product) {
        self.add_entry(FavoriteEntry::for_product(product)).await;
    }

    /// Add a prepared entry. A no-op on duplicate product identity.
    pub async fn add_entry(&mut self, entry: FavoriteEntry) {
        if self.is_favorite(&entry.product_id) {
            debug!(product = %entry.product_id, "Already a favorite, ignoring");
            return;
        }

        self.entries.push(entry.clone());
        match &self.scope {
            ShopperScope::Anonymous => self.persist_local("add"),
            ShopperScope::Authenticated(shopper) => {
                if let Err(e) = self.remote.upsert(shopper, &entry).await {
                    warn!(product = %entry.product_id, error = %e, "Failed to persist favorite");
                }
            }
        }
    }

    /// Unfavorite a product. A no-op if it is not a favorite.
    pub async fn remove(&mut self, product: &ProductId) {
        let before = self.entries.len();
        self.entries.retain(|e| e.product_id != *product);
        if self.entries.len() == before {
            return;
        }

        match &self.scope {
            ShopperScope::Anonymous => self.persist_local("remove"),
            ShopperScope::Authenticated(shopper) => {
                if let Err(e) = self.remote.remove(shopper, &self.tenant, product).await {
                    warn!(product = %product, error = %e, "Failed to delete favorite");
                }
            }
        }
    }

    /// Drop every favorite in the authoritative scope.
    pub async fn clear(&mut self) {
        let removed = std::mem::take(&mut self.entries);

        match &self.scope {
            ShopperScope::Anonymous => {
                if let Err(e) = self.local.clear(&self.tenant) {
                    warn!(error = %e, "Failed to clear local favorites");
                }
            }
            ShopperScope::Authenticated(shopper) => {
                for entry in &removed {
                    if let Err(e) = self
                        .remote
                        .remove(shopper, &self.tenant, &entry.product_id)
                        .await
                    {
                        warn!(product = %entry.product_id, error = %e, "Failed to delete favorite");
                    }
                }
            }
        }
    }

    /// Write the full in-memory list to the local scope.
    fn persist_local(&self, operation: &str) {
        if let Err(e) = self.local.save(&self.tenant, &self.entries) {
            warn!(operation, error = %e, "Failed to persist local favorites");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use chrono::Utc;
    use rust_decimal::Decimal;

    use clementine_core::{CurrencyCode, Price, ProductSnapshot};

    use super::*;
    use crate::local::{DeviceStorage, DeviceStorageFavorites, InMemoryStorage};

    /// In-memory stand-in for the remote document store.
    #[derive(Default)]
    struct FakeRemote {
        entries: Mutex<BTreeMap<String, FavoriteEntry>>,
        fail_loads: AtomicBool,
        fail_writes: AtomicBool,
    }

    impl FakeRemote {
        fn doc_id(tenant: &TenantId, product: &ProductId) -> String {
            format!("{tenant}_{product}")
        }

        fn seed(&self, entry: FavoriteEntry) {
            let key = Self::doc_id(&entry.tenant, &entry.product_id);
            self.entries
                .lock()
                .expect("lock")
                .insert(key, entry);
        }

        fn product_ids(&self) -> Vec<String> {
            self.entries
                .lock()
                .expect("lock")
                .values()
                .map(|e| e.product_id.to_string())
                .collect()
        }

        fn get(&self, tenant: &TenantId, product: &ProductId) -> Option<FavoriteEntry> {
            self.entries
                .lock()
                .expect("lock")
                .get(&Self::doc_id(tenant, product))
                .cloned()
        }

        fn unavailable() -> FavoritesError {
            FavoritesError::Remote(clementine_docstore::DocStoreError::Api {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    impl RemoteFavoriteStore for FakeRemote {
        async fn load(
            &self,
            _shopper: &ShopperId,
            tenant: &TenantId,
        ) -> Result<Vec<FavoriteEntry>, FavoritesError> {
            if self.fail_loads.load(Ordering::SeqCst) {
                return Err(Self::unavailable());
            }
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
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(Self::unavailable());
            }
            self.seed(entry.clone());
            Ok(())
        }

        async fn remove(
            &self,
            _shopper: &ShopperId,
            tenant: &TenantId,
            product: &ProductId,
        ) -> Result<(), FavoritesError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(Self::unavailable());
            }
            self.entries
                .lock()
                .expect("lock")
                .remove(&Self::doc_id(tenant, product));
            Ok(())
        }
    }

    fn tenant() -> TenantId {
        TenantId::new("acme")
    }

    fn entry(product: &str, title: &str) -> FavoriteEntry {
        FavoriteEntry {
            tenant: tenant(),
            product_id: ProductId::new(product),
            snapshot: ProductSnapshot {
                title: title.to_string(),
                price: Price::new(Decimal::from(25), CurrencyCode::USD),
                image_url: None,
            },
            added_at: Utc::now(),
        }
    }

    fn reconciler<'a>(
        storage: &'a InMemoryStorage,
        remote: &'a FakeRemote,
    ) -> FavoritesReconciler<DeviceStorageFavorites<&'a InMemoryStorage>, &'a FakeRemote> {
        FavoritesReconciler::new(tenant(), DeviceStorageFavorites::new(storage), remote)
    }

    #[tokio::test]
    async fn test_anonymous_mutations_persist_locally() {
        let storage = InMemoryStorage::new();
        let remote = FakeRemote::default();
        let mut favorites = reconciler(&storage, &remote);

        favorites.add_entry(entry("p1", "Bowl")).await;
        favorites.add_entry(entry("p2", "Tray")).await;
        assert!(favorites.is_favorite(&ProductId::new("p1")));
        assert_eq!(favorites.len(), 2);

        // Everything landed in device storage, nothing remote.
        let text = storage
            .get_item("favorites_acme")
            .expect("get_item")
            .expect("stored value");
        assert!(text.contains("p1") && text.contains("p2"));
        assert!(remote.product_ids().is_empty());
    }

    #[tokio::test]
    async fn test_add_duplicate_is_a_no_op() {
        let storage = InMemoryStorage::new();
        let remote = FakeRemote::default();
        let mut favorites = reconciler(&storage, &remote);

        favorites.add_entry(entry("p1", "Bowl")).await;
        favorites.add_entry(entry("p1", "Bowl again")).await;
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites.entries()[0].snapshot.title, "Bowl");
    }

    #[tokio::test]
    async fn test_sign_in_merges_and_remote_wins_on_conflict() {
        let storage = InMemoryStorage::new();
        let remote = FakeRemote::default();
        remote.seed(entry("B", "Remote B"));
        remote.seed(entry("C", "Remote C"));

        let mut favorites = reconciler(&storage, &remote);
        favorites.add_entry(entry("A", "Local A")).await;
        favorites.add_entry(entry("B", "Local B")).await;

        favorites.sign_in(ShopperId::new("s1")).await.expect("sign in");

        // Union is exactly {A, B, C}, with remote's copy of B preserved.
        let mut ids: Vec<&str> = favorites
            .entries()
            .iter()
            .map(|e| e.product_id.as_str())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["A", "B", "C"]);

        let b = favorites
            .entries()
            .iter()
            .find(|e| e.product_id.as_str() == "B")
            .expect("B");
        assert_eq!(b.snapshot.title, "Remote B");

        // Local-only A was persisted remotely; the local scope is retired.
        let remote_a = remote.get(&tenant(), &ProductId::new("A")).expect("A remote");
        assert_eq!(remote_a.snapshot.title, "Local A");
        assert_eq!(storage.get_item("favorites_acme").expect("get_item"), None);
    }

    #[tokio::test]
    async fn test_sign_in_scenario_local_x_empty_remote() {
        let storage = InMemoryStorage::new();
        let remote = FakeRemote::default();

        let mut favorites = reconciler(&storage, &remote);
        favorites.add_entry(entry("X", "Vase")).await;

        favorites.sign_in(ShopperId::new("s1")).await.expect("sign in");
        assert_eq!(remote.product_ids(), vec!["X"]);
        assert_eq!(storage.get_item("favorites_acme").expect("get_item"), None);

        // A second sign-in with local now empty leaves remote unchanged.
        let mut again = reconciler(&storage, &remote);
        again.sign_in(ShopperId::new("s1")).await.expect("sign in");
        assert_eq!(remote.product_ids(), vec!["X"]);
        assert_eq!(again.len(), 1);
    }

    #[tokio::test]
    async fn test_repeated_sign_in_is_idempotent() {
        let storage = InMemoryStorage::new();
        let remote = FakeRemote::default();
        remote.seed(entry("p1", "Bowl"));

        let mut favorites = reconciler(&storage, &remote);
        favorites.sign_in(ShopperId::new("s1")).await.expect("first");
        favorites.sign_in(ShopperId::new("s1")).await.expect("second");

        assert_eq!(favorites.len(), 1);
        assert_eq!(remote.product_ids(), vec!["p1"]);
    }

    #[tokio::test]
    async fn test_sign_in_stays_anonymous_when_remote_unreachable() {
        let storage = InMemoryStorage::new();
        let remote = FakeRemote::default();
        remote.fail_loads.store(true, Ordering::SeqCst);

        let mut favorites = reconciler(&storage, &remote);
        favorites.add_entry(entry("p1", "Bowl")).await;

        let result = favorites.sign_in(ShopperId::new("s1")).await;
        assert!(result.is_err());
        assert_eq!(favorites.scope(), &ShopperScope::Anonymous);

        // Local data survives for a later retry.
        assert!(favorites.is_favorite(&ProductId::new("p1")));
        assert!(
            storage
                .get_item("favorites_acme")
                .expect("get_item")
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_authenticated_mutations_go_remote() {
        let storage = InMemoryStorage::new();
        let remote = FakeRemote::default();

        let mut favorites = reconciler(&storage, &remote);
        favorites.sign_in(ShopperId::new("s1")).await.expect("sign in");

        favorites.add_entry(entry("p1", "Bowl")).await;
        assert_eq!(remote.product_ids(), vec!["p1"]);

        favorites.remove(&ProductId::new("p1")).await;
        assert!(remote.product_ids().is_empty());
        assert!(!favorites.is_favorite(&ProductId::new("p1")));

        // Local scope never saw any of it.
        assert_eq!(storage.get_item("favorites_acme").expect("get_item"), None);
    }

    #[tokio::test]
    async fn test_failed_remote_write_keeps_optimistic_state() {
        let storage = InMemoryStorage::new();
        let remote = FakeRemote::default();

        let mut favorites = reconciler(&storage, &remote);
        favorites.sign_in(ShopperId::new("s1")).await.expect("sign in");

        remote.fail_writes.store(true, Ordering::SeqCst);
        favorites.add_entry(entry("p1", "Bowl")).await;

        // The write was lost remotely but the in-memory update stands.
        assert!(favorites.is_favorite(&ProductId::new("p1")));
        assert!(remote.product_ids().is_empty());
    }

    #[tokio::test]
    async fn test_clear_empties_the_authoritative_scope() {
        let storage = InMemoryStorage::new();
        let remote = FakeRemote::default();

        let mut favorites = reconciler(&storage, &remote);
        favorites.add_entry(entry("p1", "Bowl")).await;
        favorites.clear().await;
        assert!(favorites.is_empty());
        assert_eq!(storage.get_item("favorites_acme").expect("get_item"), None);

        favorites.sign_in(ShopperId::new("s1")).await.expect("sign in");
        favorites.add_entry(entry("p2", "Tray")).await;
        favorites.clear().await;
        assert!(favorites.is_empty());
        assert!(remote.product_ids().is_empty());
    }
}
