//! Multi-facet boolean predicate evaluation.
//!
//! Classic faceted-search semantics: selected price buckets are alternatives
//! (OR), selected values within one facet are alternatives (OR), and facets
//! are constraints (AND). Evaluation is pure and order-preserving; products
//! are only ever removed, never reordered.

use clementine_core::Product;

use crate::buckets::PriceBucket;
use crate::facets::FacetDefinition;

/// Evaluate the current facet and bucket selections against a product subset.
///
/// With no selections anywhere, the input is returned unchanged.
#[must_use]
pub fn apply_filters(
    products: &[Product],
    facets: &[FacetDefinition],
    buckets: &[PriceBucket],
) -> Vec<Product> {
    products
        .iter()
        .filter(|product| matches_price(product, buckets) && matches_facets(product, facets))
        .cloned()
        .collect()
}

/// Price predicate: passes when no bucket is selected, or when the price
/// falls in any selected bucket.
fn matches_price(product: &Product, buckets: &[PriceBucket]) -> bool {
    let mut selected = buckets.iter().filter(|b| b.selected).peekable();
    if selected.peek().is_none() {
        return true;
    }
    selected.any(|bucket| bucket.matches(product.price.amount))
}

/// Facet predicate: for every facet with a selection, the product must carry
/// the attribute and at least one of its normalized values must be selected.
fn matches_facets(product: &Product, facets: &[FacetDefinition]) -> bool {
    facets
        .iter()
        .filter(|facet| facet.has_selection())
        .all(|facet| {
            product.attributes.get(&facet.key).is_some_and(|attribute| {
                attribute.normalized().any(|value| facet.is_selected(value))
            })
        })
}
