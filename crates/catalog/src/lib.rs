//! Clementine Catalog - faceted filtering over tenant product catalogs.
//!
//! This crate is the shared engine behind every storefront theme's filter
//! sidebar and the merchant dashboard's order list:
//!
//! - [`facets`] - derives a filter schema from free-form, per-tenant product
//!   attributes, either automatically or from merchant configuration
//! - [`buckets`] - adaptive price range buckets from the live price
//!   distribution
//! - [`filter`] - the multi-facet boolean predicate evaluator
//! - [`sort`] - total-order comparators for products and order lists
//!
//! Everything here is pure and synchronous: callers hold the active product
//! subset in memory and call [`recompute`] whenever it changes (category
//! switch, new search results). There is no observer wiring and no I/O.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod buckets;
pub mod facets;
pub mod filter;
pub mod sort;

use tracing::debug;

use clementine_core::Product;

pub use buckets::{PriceBucket, generate_price_buckets};
pub use facets::source::{
    AutomaticFacetSource, ConfiguredFacetSource, FacetConfigEntry, FacetSource, TenantFacetConfig,
};
pub use facets::{FacetDefinition, FacetKind};
pub use filter::apply_filters;
pub use sort::{OrderSort, ProductSort, sort_orders, sort_products};

/// The derived filter schema for one active product subset.
#[derive(Debug, Clone, Default)]
pub struct FacetModel {
    /// Facets in display order, selections empty.
    pub facets: Vec<FacetDefinition>,
    /// Non-empty price buckets, unselected.
    pub price_buckets: Vec<PriceBucket>,
}

/// Select the facet source for a tenant.
///
/// A present, non-empty configuration strictly determines which facets exist
/// and in what order; otherwise extraction falls back to scanning the product
/// attributes. The choice is made once per product-subset change.
#[must_use]
pub fn facet_source(config: Option<&TenantFacetConfig>) -> Box<dyn FacetSource + '_> {
    match config {
        Some(config) if !config.is_empty() => Box::new(ConfiguredFacetSource::new(config)),
        _ => Box::new(AutomaticFacetSource),
    }
}

/// Rebuild the facet model for a new active product subset.
///
/// Invoked by the caller whenever a relevant input changes; the previous
/// model (including its selections) is discarded.
#[must_use]
pub fn recompute(products: &[Product], config: Option<&TenantFacetConfig>) -> FacetModel {
    let facets = facet_source(config).facets(products);
    let price_buckets = generate_price_buckets(products);

    debug!(
        products = products.len(),
        facets = facets.len(),
        price_buckets = price_buckets.len(),
        "Recomputed facet model"
    );

    FacetModel {
        facets,
        price_buckets,
    }
}
