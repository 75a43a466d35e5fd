//! Display names for attribute keys.

/// Human-readable names for well-known attribute keys.
///
/// Keys missing from this table fall back to a capitalized form of the key
/// itself.
const ATTRIBUTE_LABELS: &[(&str, &str)] = &[
    ("brand", "Brand"),
    ("category", "Category"),
    ("color", "Color"),
    ("fit", "Fit"),
    ("gender", "Gender"),
    ("material", "Material"),
    ("occasion", "Occasion"),
    ("pattern", "Pattern"),
    ("season", "Season"),
    ("size", "Size"),
    ("style", "Style"),
    ("tags", "Tags"),
];

/// Resolve the display name for an attribute key.
#[must_use]
pub fn display_name(key: &str) -> String {
    ATTRIBUTE_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map_or_else(|| capitalize(key), |(_, label)| (*label).to_string())
}

/// Capitalize an attribute key for display: first letter uppercased,
/// underscores turned into spaces (`sleeve_length` -> `Sleeve length`).
fn capitalize(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key_uses_dictionary() {
        assert_eq!(display_name("color"), "Color");
        assert_eq!(display_name("size"), "Size");
    }

    #[test]
    fn test_unknown_key_is_capitalized() {
        assert_eq!(display_name("sleeve_length"), "Sleeve length");
        assert_eq!(display_name("wash"), "Wash");
    }

    #[test]
    fn test_empty_key() {
        assert_eq!(display_name(""), "");
    }
}
