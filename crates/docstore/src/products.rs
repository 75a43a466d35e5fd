//! Cached repository over tenant product collections.
//!
//! Storefront pages recompute facets on every category switch, so product
//! reads are cached per tenant with a short TTL rather than hitting the
//! store each time. The facet configuration document is cached the same way.

use std::sync::Arc;

use moka::future::Cache;
use tracing::{error, instrument};

use clementine_catalog::TenantFacetConfig;
use clementine_core::{Product, TenantId};

use crate::client::DocStoreClient;
use crate::error::DocStoreError;
use crate::paths;

/// Cache key for per-tenant reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Products(TenantId),
    FacetConfig(TenantId),
}

/// Cached value types.
#[derive(Debug, Clone)]
enum CacheValue {
    Products(Arc<Vec<Product>>),
    FacetConfig(Option<Arc<TenantFacetConfig>>),
}

/// Read access to tenant catalogs, with per-tenant caching.
#[derive(Clone)]
pub struct ProductCatalog {
    client: DocStoreClient,
    cache: Cache<CacheKey, CacheValue>,
}

impl ProductCatalog {
    /// Create a catalog repository over a document store client.
    #[must_use]
    pub fn new(client: DocStoreClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(client.cache_ttl())
            .build();
        Self { client, cache }
    }

    /// The active products of a tenant, eligible for faceting and display.
    ///
    /// Draft and archived products are filtered out at the read boundary so
    /// the catalog engine only ever sees displayable products.
    ///
    /// # Errors
    ///
    /// Returns `DocStoreError` if the store is unreachable or returns a
    /// failure status.
    #[instrument(skip(self), fields(tenant = %tenant))]
    pub async fn active_products(&self, tenant: &TenantId) -> Result<Vec<Product>, DocStoreError> {
        let key = CacheKey::Products(tenant.clone());
        if let Some(CacheValue::Products(products)) = self.cache.get(&key).await {
            return Ok(products.as_ref().clone());
        }

        let documents = self
            .client
            .list::<Product>(&paths::tenant_products(tenant))
            .await?;
        let products: Vec<Product> = documents
            .into_iter()
            .map(|doc| doc.data)
            .filter(Product::is_active)
            .collect();

        self.cache
            .insert(key, CacheValue::Products(Arc::new(products.clone())))
            .await;
        Ok(products)
    }

    /// Like [`Self::active_products`], degraded to an empty list on failure.
    ///
    /// The storefront shows "no filters available" rather than an error page
    /// when the store is unreachable.
    pub async fn active_products_or_empty(&self, tenant: &TenantId) -> Vec<Product> {
        match self.active_products(tenant).await {
            Ok(products) => products,
            Err(e) => {
                error!(tenant = %tenant, error = %e, "Failed to read products, degrading to empty");
                Vec::new()
            }
        }
    }

    /// The tenant's facet configuration, `None` when the merchant has not
    /// authored one (callers fall back to automatic extraction).
    ///
    /// # Errors
    ///
    /// Returns `DocStoreError` if the store is unreachable or returns a
    /// failure status.
    #[instrument(skip(self), fields(tenant = %tenant))]
    pub async fn facet_config(
        &self,
        tenant: &TenantId,
    ) -> Result<Option<TenantFacetConfig>, DocStoreError> {
        let key = CacheKey::FacetConfig(tenant.clone());
        if let Some(CacheValue::FacetConfig(config)) = self.cache.get(&key).await {
            return Ok(config.map(|c| c.as_ref().clone()));
        }

        let config = self
            .client
            .get::<TenantFacetConfig>(&paths::tenant_settings(tenant), paths::FACET_SETTINGS_DOC)
            .await?;

        self.cache
            .insert(
                key,
                CacheValue::FacetConfig(config.clone().map(Arc::new)),
            )
            .await;
        Ok(config)
    }

    /// Drop cached reads for a tenant (e.g. after merchant edits).
    pub async fn invalidate(&self, tenant: &TenantId) {
        self.cache
            .invalidate(&CacheKey::Products(tenant.clone()))
            .await;
        self.cache
            .invalidate(&CacheKey::FacetConfig(tenant.clone()))
            .await;
    }
}
