//! Free-form product attribute values.
//!
//! Tenants attach arbitrary attribute maps to products
//! (`attributeKey -> string | list<string>`); these are the raw material for
//! facet extraction. The scalar-or-list union exists only at the store
//! boundary - callers normalize to trimmed, non-blank strings immediately via
//! [`AttributeValue::normalized`].

use serde::{Deserialize, Serialize};

/// A single attribute value: either a scalar string or a list of strings.
///
/// Serialized untagged, so `"red"` and `["red", "blue"]` both deserialize
/// directly from tenant documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Scalar(String),
    List(Vec<String>),
}

impl AttributeValue {
    /// Iterate the trimmed, non-blank values carried by this attribute.
    ///
    /// A scalar yields at most one value; a list yields each non-blank entry.
    pub fn normalized(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Self::Scalar(value) => std::slice::from_ref(value),
            Self::List(values) => values,
        };
        slice.iter().map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    /// Whether this attribute carries any non-blank value.
    #[must_use]
    pub fn has_values(&self) -> bool {
        self.normalized().next().is_some()
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}
