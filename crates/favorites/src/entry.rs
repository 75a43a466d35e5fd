//! A single favorited product.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clementine_core::{Product, ProductId, ProductSnapshot, TenantId};

/// One favorite, identified by `(tenant, product_id)` within a shopper scope.
///
/// Carries a denormalized snapshot of the product so the favorites view
/// renders correctly even after the product is removed or re-priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub tenant: TenantId,
    pub product_id: ProductId,
    pub snapshot: ProductSnapshot,
    pub added_at: DateTime<Utc>,
}

impl FavoriteEntry {
    /// Favorite a product now.
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        Self {
            tenant: product.tenant.clone(),
            product_id: product.id.clone(),
            snapshot: ProductSnapshot::from(product),
            added_at: Utc::now(),
        }
    }
}
