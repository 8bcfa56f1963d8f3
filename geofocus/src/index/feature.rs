//! Indexed feature type.

use serde_json::{Map, Value};

/// One geographic region with its properties and derived lookup fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub(crate) index: usize,
    pub(crate) id: Option<Value>,
    pub(crate) properties: Map<String, Value>,
    pub(crate) geometry: Option<Value>,
    pub(crate) canonical_name: String,
    pub(crate) iso_code: String,
    pub(crate) iso_a2: String,
    pub(crate) alternate_name: String,
    pub(crate) lookup: LookupKeys,
}

/// Normalized forms of the derived fields, computed once at index time.
///
/// Queries are compared against these, never against the raw fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupKeys {
    pub name: String,
    pub alternate_name: String,
    pub iso_a2: String,
    pub iso_a3: String,
}

impl Feature {
    /// Position in the source collection, stable within one load.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn id(&self) -> Option<&Value> {
        self.id.as_ref()
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    pub fn geometry(&self) -> Option<&Value> {
        self.geometry.as_ref()
    }

    /// Display name; empty if the record had no recognised name property.
    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    /// ISO alpha-3 code, or the feature id when no ISO property exists.
    pub fn iso_code(&self) -> &str {
        &self.iso_code
    }

    pub fn iso_a2(&self) -> &str {
        &self.iso_a2
    }

    pub fn alternate_name(&self) -> &str {
        &self.alternate_name
    }

    pub fn lookup(&self) -> &LookupKeys {
        &self.lookup
    }

    /// Geometry type string, if any.
    pub fn geometry_type(&self) -> Option<&str> {
        self.geometry
            .as_ref()
            .and_then(|g| g.get("type"))
            .and_then(Value::as_str)
    }
}
