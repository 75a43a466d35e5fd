//! Store capabilities for the two favorites scopes.
//!
//! The reconciler never branches on "is a shopper signed in" at call sites;
//! it is handed one capability per scope and a state machine decides which
//! one is authoritative.

use clementine_core::{ProductId, ShopperId, TenantId};

use crate::entry::FavoriteEntry;

/// Errors from either favorites scope.
#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    /// Device-local storage failed (unavailable, quota, corrupt value).
    #[error("local storage error: {0}")]
    Local(String),

    /// The favorite list text could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The remote document store failed.
    #[error("remote store error: {0}")]
    Remote(#[from] clementine_docstore::DocStoreError),
}

/// The anonymous scope: synchronous, device-local, per tenant.
pub trait LocalFavoriteStore {
    /// Load the tenant's favorite list. Absent storage reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError` if storage is unreachable or the stored
    /// text is corrupt.
    fn load(&self, tenant: &TenantId) -> Result<Vec<FavoriteEntry>, FavoritesError>;

    /// Replace the tenant's favorite list.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError` if storage is unreachable.
    fn save(&self, tenant: &TenantId, entries: &[FavoriteEntry]) -> Result<(), FavoritesError>;

    /// Retire the tenant's local scope entirely.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError` if storage is unreachable.
    fn clear(&self, tenant: &TenantId) -> Result<(), FavoritesError>;
}

/// The authoritated scope: asynchronous, remote, keyed by shopper identity.
pub trait RemoteFavoriteStore {
    /// Load the shopper's favorites for one tenant.
    fn load(
        &self,
        shopper: &ShopperId,
        tenant: &TenantId,
    ) -> impl Future<Output = Result<Vec<FavoriteEntry>, FavoritesError>> + Send;

    /// Upsert one favorite.
    fn upsert(
        &self,
        shopper: &ShopperId,
        entry: &FavoriteEntry,
    ) -> impl Future<Output = Result<(), FavoritesError>> + Send;

    /// Delete one favorite by identity. Deleting a missing entry is a no-op.
    fn remove(
        &self,
        shopper: &ShopperId,
        tenant: &TenantId,
        product: &ProductId,
    ) -> impl Future<Output = Result<(), FavoritesError>> + Send;
}

impl<T: RemoteFavoriteStore + Sync> RemoteFavoriteStore for &T {
    fn load(
        &self,
        shopper: &ShopperId,
        tenant: &TenantId,
    ) -> impl Future<Output = Result<Vec<FavoriteEntry>, FavoritesError>> + Send {
        (**self).load(shopper, tenant)
    }

    fn upsert(
        &self,
        shopper: &ShopperId,
        entry: &FavoriteEntry,
    ) -> impl Future<Output = Result<(), FavoritesError>> + Send {
        (**self).upsert(shopper, entry)
    }

    fn remove(
        &self,
        shopper: &ShopperId,
        tenant: &TenantId,
        product: &ProductId,
    ) -> impl Future<Output = Result<(), FavoritesError>> + Send {
        (**self).remove(shopper, tenant, product)
    }
}
