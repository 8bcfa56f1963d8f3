//! Ordered property-key candidates for each derived feature attribute.

use serde_json::{Map, Value};

/// Property keys probed, in order, for a feature's canonical name.
///
/// Covers the Natural Earth admin name, generic GeoJSON `name` fields,
/// the long name, the geographic unit and finally the sovereign entity.
pub const DEFAULT_NAME_KEYS: &[&str] = &[
    "ADMIN",
    "admin",
    "name",
    "NAME",
    "NAME_LONG",
    "geounit",
    "sovereignt",
];

/// ISO 3166-1 alpha-3 property variants.
pub const DEFAULT_ISO_A3_KEYS: &[&str] = &["ISO_A3", "iso_a3"];

/// ISO 3166-1 alpha-2 property variants.
pub const DEFAULT_ISO_A2_KEYS: &[&str] = &["ISO_A2", "iso_a2"];

/// Alternate names: sovereign state, then the brief name.
pub const DEFAULT_ALTERNATE_NAME_KEYS: &[&str] = &["SOVEREIGNT", "BRK_NAME"];

/// Field lookup configuration for the [`FeatureIndexer`](super::FeatureIndexer).
///
/// Each list is probed in order and the first qualifying value wins.
/// A value qualifies when it is a non-empty string or a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCatalog {
    pub name_keys: Vec<String>,
    pub iso_a3_keys: Vec<String>,
    pub iso_a2_keys: Vec<String>,
    pub alternate_name_keys: Vec<String>,
    /// Fall back to the feature's top-level `id` when no ISO alpha-3
    /// property is present.
    pub iso_a3_from_id: bool,
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self {
            name_keys: to_owned(DEFAULT_NAME_KEYS),
            iso_a3_keys: to_owned(DEFAULT_ISO_A3_KEYS),
            iso_a2_keys: to_owned(DEFAULT_ISO_A2_KEYS),
            alternate_name_keys: to_owned(DEFAULT_ALTERNATE_NAME_KEYS),
            iso_a3_from_id: true,
        }
    }
}

fn to_owned(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

/// First qualifying value among `keys`, rendered as text.
pub(crate) fn first_value(properties: &Map<String, Value>, keys: &[String]) -> Option<String> {
    keys.iter()
        .filter_map(|key| properties.get(key))
        .find_map(value_text)
}

/// Text of a scalar property value, or `None` if it does not qualify.
pub(crate) fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
