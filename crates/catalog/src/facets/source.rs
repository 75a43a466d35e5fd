//! Facet sources: configured resolution vs automatic extraction.
//!
//! Merchants may author an explicit facet configuration (which facets are
//! enabled, whether they are visible, and their display order). When that
//! configuration is present and non-empty it strictly determines which
//! facets exist and in what order; otherwise the schema is extracted
//! automatically from the product attributes.

use serde::{Deserialize, Serialize};

use clementine_core::Product;

use super::{FacetDefinition, FacetKind, extract_facets, scan_key};

/// Strategy for producing the facet schema of an active product subset.
///
/// Selected once per product-subset change via
/// [`crate::facet_source`].
pub trait FacetSource {
    /// Produce the facet schema, in display order, selections empty.
    fn facets(&self, products: &[Product]) -> Vec<FacetDefinition>;
}

/// Extraction-based source: scans every attribute key in the subset.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutomaticFacetSource;

impl FacetSource for AutomaticFacetSource {
    fn facets(&self, products: &[Product]) -> Vec<FacetDefinition> {
        extract_facets(products)
    }
}

/// Configuration-driven source: honors the tenant's facet settings.
#[derive(Debug, Clone, Copy)]
pub struct ConfiguredFacetSource<'a> {
    config: &'a TenantFacetConfig,
}

impl<'a> ConfiguredFacetSource<'a> {
    /// Create a source over a tenant's facet configuration.
    #[must_use]
    pub const fn new(config: &'a TenantFacetConfig) -> Self {
        Self { config }
    }
}

impl FacetSource for ConfiguredFacetSource<'_> {
    /// Resolve configured facets against the active subset.
    ///
    /// Only entries that are both enabled and visible are considered, in the
    /// tenant's display order. Each entry's key is scanned against the
    /// subset; a facet is emitted only if at least one non-blank value is
    /// present right now - configuring a facet does not force it to appear.
    fn facets(&self, products: &[Product]) -> Vec<FacetDefinition> {
        let mut entries: Vec<&FacetConfigEntry> = self
            .config
            .facets
            .iter()
            .filter(|e| e.enabled && e.visible)
            .collect();
        entries.sort_by_key(|e| e.display_order);

        entries
            .into_iter()
            .filter_map(|entry| {
                let scan = scan_key(products, &entry.key);
                if scan.values.is_empty() {
                    return None;
                }
                let kind = entry.kind.unwrap_or_else(|| scan.inferred_kind());
                let mut facet = FacetDefinition::from_scan(&entry.key, kind, scan.values);
                if let Some(label) = &entry.label {
                    facet.label.clone_from(label);
                }
                Some(facet)
            })
            .collect()
    }
}

/// A tenant's facet configuration document.
///
/// Authored by merchant tooling and stored under
/// `tenant/{tenantId}/settings/facets`; read-only to the catalog core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TenantFacetConfig {
    #[serde(default)]
    pub facets: Vec<FacetConfigEntry>,
}

impl TenantFacetConfig {
    /// An absent-or-empty configuration falls back to automatic extraction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

/// Per-facet merchant settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetConfigEntry {
    /// Attribute key the entry applies to.
    pub key: String,
    /// Disabled facets are never resolved.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Hidden facets stay configured but are not offered to shoppers.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Position in the filter sidebar; lower sorts first.
    #[serde(default)]
    pub display_order: u32,
    /// Optional display-name override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Optional render-kind override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<FacetKind>,
    /// Value count observed when the merchant last saved. Informational.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_count: Option<u32>,
}

impl FacetConfigEntry {
    /// An enabled, visible entry with defaults.
    #[must_use]
    pub fn new(key: impl Into<String>, display_order: u32) -> Self {
        Self {
            key: key.into(),
            enabled: true,
            visible: true,
            display_order,
            label: None,
            kind: None,
            value_count: None,
        }
    }
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::test_support::{product_with_attrs, product_with_list_attr};

    fn config(entries: Vec<FacetConfigEntry>) -> TenantFacetConfig {
        TenantFacetConfig { facets: entries }
    }

    #[test]
    fn test_configured_order_wins_over_alphabetical() {
        let products = vec![product_with_attrs(
            "p1",
            10,
            &[("color", "Red"), ("brand", "Acme"), ("size", "M")],
        )];
        let config = config(vec![
            FacetConfigEntry::new("size", 0),
            FacetConfigEntry::new("brand", 1),
            FacetConfigEntry::new("color", 2),
        ]);

        let facets = ConfiguredFacetSource::new(&config).facets(&products);
        let keys: Vec<&str> = facets.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["size", "brand", "color"]);
    }

    #[test]
    fn test_disabled_and_hidden_entries_are_skipped() {
        let products = vec![product_with_attrs(
            "p1",
            10,
            &[("color", "Red"), ("brand", "Acme"), ("size", "M")],
        )];
        let mut disabled = FacetConfigEntry::new("brand", 0);
        disabled.enabled = false;
        let mut hidden = FacetConfigEntry::new("size", 1);
        hidden.visible = false;
        let config = config(vec![disabled, hidden, FacetConfigEntry::new("color", 2)]);

        let facets = ConfiguredFacetSource::new(&config).facets(&products);
        assert_eq!(facets.len(), 1);
        assert_eq!(facets[0].key, "color");
    }

    #[test]
    fn test_configured_facet_without_values_is_not_emitted() {
        let products = vec![product_with_attrs("p1", 10, &[("color", "Red")])];
        let config = config(vec![
            FacetConfigEntry::new("color", 0),
            FacetConfigEntry::new("material", 1),
        ]);

        let facets = ConfiguredFacetSource::new(&config).facets(&products);
        assert_eq!(facets.len(), 1);
        assert_eq!(facets[0].key, "color");
    }

    #[test]
    fn test_label_and_kind_overrides() {
        let products = vec![product_with_list_attr("p1", 10, "color", &["Red", "Blue"])];
        let mut entry = FacetConfigEntry::new("color", 0);
        entry.label = Some("Colour".to_string());
        entry.kind = Some(FacetKind::Select);
        let config = config(vec![entry]);

        let facets = ConfiguredFacetSource::new(&config).facets(&products);
        assert_eq!(facets[0].label, "Colour");
        assert_eq!(facets[0].kind, FacetKind::Select);
    }

    #[test]
    fn test_config_defaults_deserialize_enabled_and_visible() {
        let entry: FacetConfigEntry =
            serde_json::from_str(r#"{ "key": "color" }"#).expect("deserialize");
        assert!(entry.enabled);
        assert!(entry.visible);
        assert_eq!(entry.display_order, 0);
    }
}
