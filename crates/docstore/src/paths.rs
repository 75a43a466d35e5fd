//! Addressing scheme for the hosted document store.
//!
//! Products live under `tenant/{tenantId}/products/{productId}`, per-tenant
//! settings under `tenant/{tenantId}/settings`, and a shopper's favorites
//! under `shopper/{shopperId}/favorites/{tenantId}_{productId}`.

use clementine_core::{ProductId, ShopperId, TenantId};

/// Document id of the facet configuration inside a tenant's settings
/// collection.
pub const FACET_SETTINGS_DOC: &str = "facets";

/// Collection holding a tenant's products.
#[must_use]
pub fn tenant_products(tenant: &TenantId) -> String {
    format!("tenant/{tenant}/products")
}

/// Collection holding a tenant's settings documents.
#[must_use]
pub fn tenant_settings(tenant: &TenantId) -> String {
    format!("tenant/{tenant}/settings")
}

/// Collection holding a shopper's favorites across tenants.
#[must_use]
pub fn shopper_favorites(shopper: &ShopperId) -> String {
    format!("shopper/{shopper}/favorites")
}

/// Document id of one favorite, composite over tenant and product.
#[must_use]
pub fn favorite_doc_id(tenant: &TenantId, product: &ProductId) -> String {
    format!("{tenant}_{product}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_follow_addressing_scheme() {
        let tenant = TenantId::new("acme");
        let shopper = ShopperId::new("s-9");
        let product = ProductId::new("p-1");

        assert_eq!(tenant_products(&tenant), "tenant/acme/products");
        assert_eq!(tenant_settings(&tenant), "tenant/acme/settings");
        assert_eq!(shopper_favorites(&shopper), "shopper/s-9/favorites");
        assert_eq!(favorite_doc_id(&tenant, &product), "acme_p-1");
    }
}
