//! Facet schema derivation from product attribute maps.
//!
//! Tenants have no fixed product schema; facets are discovered by scanning
//! the active subset's free-form attribute maps. Values are normalized
//! (trimmed, blanks dropped) and deduplicated per attribute key, and keys
//! that end up with no values produce no facet. A key present on a single
//! product still produces a facet with one value - long-tail facets are
//! intentional.

pub mod labels;
pub mod source;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use clementine_core::Product;

/// A filterable attribute dimension with its selectable values.
///
/// Recomputed whenever the active product subset changes; the shopper's
/// `selected_values` are UI-session state and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetDefinition {
    /// Attribute key this facet was derived from. Identity.
    pub key: String,
    /// Human-readable display name.
    pub label: String,
    /// Display hint only; evaluation treats `Select` and `Tags` identically.
    pub kind: FacetKind,
    /// Known values across the active subset, lexicographically sorted.
    pub values: Vec<String>,
    /// The shopper's current selection. Starts empty.
    pub selected_values: BTreeSet<String>,
}

impl FacetDefinition {
    fn from_scan(key: &str, kind: FacetKind, values: BTreeSet<String>) -> Self {
        Self {
            key: key.to_string(),
            label: labels::display_name(key),
            kind,
            values: values.into_iter().collect(),
            selected_values: BTreeSet::new(),
        }
    }

    /// Add a value to the selection.
    pub fn select(&mut self, value: impl Into<String>) {
        self.selected_values.insert(value.into());
    }

    /// Remove a value from the selection.
    pub fn deselect(&mut self, value: &str) {
        self.selected_values.remove(value);
    }

    /// Drop the entire selection.
    pub fn clear_selection(&mut self) {
        self.selected_values.clear();
    }

    /// Whether any value is currently selected.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        !self.selected_values.is_empty()
    }

    /// Whether a specific value is currently selected.
    #[must_use]
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected_values.contains(value)
    }
}

/// Display hint for how a facet renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FacetKind {
    /// Single-valued attribute, rendered as a checkbox list.
    #[default]
    Select,
    /// Multi-valued attribute, rendered as tag chips.
    Tags,
    /// Numeric range, rendered as a slider (used by price).
    Range,
}

/// Accumulated values for one attribute key across a product subset.
#[derive(Debug, Default)]
pub(crate) struct KeyScan {
    pub(crate) values: BTreeSet<String>,
    pub(crate) saw_list: bool,
}

impl KeyScan {
    pub(crate) const fn inferred_kind(&self) -> FacetKind {
        if self.saw_list {
            FacetKind::Tags
        } else {
            FacetKind::Select
        }
    }
}

/// Scan the active subset for a single attribute key.
pub(crate) fn scan_key(products: &[Product], key: &str) -> KeyScan {
    let mut scan = KeyScan::default();
    for product in products.iter().filter(|p| p.is_active()) {
        let Some(value) = product.attributes.get(key) else {
            continue;
        };
        scan.saw_list |= matches!(value, clementine_core::AttributeValue::List(_));
        scan.values
            .extend(value.normalized().map(ToString::to_string));
    }
    scan
}

/// Scan the active subset for every attribute key it carries.
fn scan_all(products: &[Product]) -> BTreeMap<String, KeyScan> {
    let mut scans: BTreeMap<String, KeyScan> = BTreeMap::new();
    for product in products.iter().filter(|p| p.is_active()) {
        for (key, value) in &product.attributes {
            let scan = scans.entry(key.clone()).or_default();
            scan.saw_list |= matches!(value, clementine_core::AttributeValue::List(_));
            scan.values
                .extend(value.normalized().map(ToString::to_string));
        }
    }
    scans
}

/// Derive the facet schema for an active product subset by extraction.
///
/// Output is sorted by display name; values within each facet are
/// lexicographically sorted; selection state starts empty. Keys whose
/// normalized value set is empty are dropped.
#[must_use]
pub fn extract_facets(products: &[Product]) -> Vec<FacetDefinition> {
    let mut facets: Vec<FacetDefinition> = scan_all(products)
        .into_iter()
        .filter(|(_, scan)| !scan.values.is_empty())
        .map(|(key, scan)| {
            let kind = scan.inferred_kind();
            FacetDefinition::from_scan(&key, kind, scan.values)
        })
        .collect();

    facets.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.key.cmp(&b.key)));
    facets
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::BTreeMap;

    use chrono::Utc;
    use rust_decimal::Decimal;

    use clementine_core::{
        AttributeValue, CurrencyCode, Price, Product, ProductId, ProductStatus, TenantId,
    };

    pub(crate) fn plain_product(id: &str, price: u32) -> Product {
        Product {
            id: ProductId::new(id),
            tenant: TenantId::new("tenant-1"),
            title: format!("Product {id}"),
            price: Price::new(Decimal::from(price), CurrencyCode::USD),
            compare_at_price: None,
            status: ProductStatus::Active,
            attributes: BTreeMap::new(),
            image_url: None,
            created_at: Utc::now(),
        }
    }

    pub(crate) fn product_with_attrs(id: &str, price: u32, attrs: &[(&str, &str)]) -> Product {
        let mut product = plain_product(id, price);
        product.attributes = attrs
            .iter()
            .map(|(k, v)| ((*k).to_string(), AttributeValue::from(*v)))
            .collect();
        product
    }

    pub(crate) fn product_with_list_attr(
        id: &str,
        price: u32,
        key: &str,
        values: &[&str],
    ) -> Product {
        let mut product = plain_product(id, price);
        product.attributes.insert(
            key.to_string(),
            AttributeValue::List(values.iter().map(|v| (*v).to_string()).collect()),
        );
        product
    }
}
