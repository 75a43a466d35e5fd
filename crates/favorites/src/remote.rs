//! Document-store-backed authoritated favorites scope.
//!
//! A shopper's favorites live in one collection across all tenants
//! (`shopper/{shopperId}/favorites`), keyed by `{tenantId}_{productId}`, so
//! loads filter down to the requested tenant client-side.

use clementine_core::{ProductId, ShopperId, TenantId};
use clementine_docstore::{DocStoreClient, paths};

use crate::entry::FavoriteEntry;
use crate::store::{FavoritesError, RemoteFavoriteStore};

/// The authoritated favorites scope over the hosted document store.
#[derive(Clone)]
pub struct DocStoreFavorites {
    client: DocStoreClient,
}

impl DocStoreFavorites {
    /// Create the remote scope over a document store client.
    #[must_use]
    pub const fn new(client: DocStoreClient) -> Self {
        Self { client }
    }
}

impl RemoteFavoriteStore for DocStoreFavorites {
    async fn load(
        &self,
        shopper: &ShopperId,
        tenant: &TenantId,
    ) -> Result<Vec<FavoriteEntry>, FavoritesError> {
        let documents = self
            .client
            .list::<FavoriteEntry>(&paths::shopper_favorites(shopper))
            .await?;
        Ok(documents
            .into_iter()
            .map(|doc| doc.data)
            .filter(|entry| entry.tenant == *tenant)
            .collect())
    }

    async fn upsert(
        &self,
        shopper: &ShopperId,
        entry: &FavoriteEntry,
    ) -> Result<(), FavoritesError> {
        self.client
            .put(
                &paths::shopper_favorites(shopper),
                &paths::favorite_doc_id(&entry.tenant, &entry.product_id),
                entry,
            )
            .await?;
        Ok(())
    }

    async fn remove(
        &self,
        shopper: &ShopperId,
        tenant: &TenantId,
        product: &ProductId,
    ) -> Result<(), FavoritesError> {
        self.client
            .delete(
                &paths::shopper_favorites(shopper),
                &paths::favorite_doc_id(tenant, product),
            )
            .await?;
        Ok(())
    }
}
