//! Feature indexing: derive lookup fields once per dataset load.

use serde_json::{Map, Value};
use tracing::debug;

use super::feature::{Feature, LookupKeys};
use super::fields::{first_value, value_text, FieldCatalog};
use crate::provider::GeoDocument;
use crate::resolve::normalize;

/// Features of one dataset load, in collection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureIndex {
    features: Vec<Feature>,
}

impl FeatureIndex {
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }
}

impl<'a> IntoIterator for &'a FeatureIndex {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

/// Normalizes raw feature records into [`Feature`] values.
///
/// Pure and deterministic: the same records and catalog always produce the
/// same index.
#[derive(Debug, Clone, Default)]
pub struct FeatureIndexer {
    catalog: FieldCatalog,
}

impl FeatureIndexer {
    pub fn new(catalog: FieldCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// Indexes every feature of a fetched document.
    pub fn index(&self, document: &GeoDocument) -> FeatureIndex {
        self.index_features(document.features())
    }

    /// Indexes raw GeoJSON feature records.
    ///
    /// Records that are not JSON objects still get an entry (with empty
    /// derived fields) so indices stay aligned with the source array.
    pub fn index_features(&self, records: &[Value]) -> FeatureIndex {
        let features: Vec<Feature> = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let properties = record
                    .get("properties")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                self.derive(
                    index,
                    record.get("id").cloned(),
                    properties,
                    record.get("geometry").filter(|g| !g.is_null()).cloned(),
                )
            })
            .collect();

        debug!(
            features = features.len(),
            unnamed = features.iter().filter(|f| f.canonical_name.is_empty()).count(),
            "Indexed feature collection"
        );

        FeatureIndex { features }
    }

    /// Re-derives lookup fields for already indexed features.
    ///
    /// Derived values come only from properties and id, so this yields
    /// the same result as the original pass.
    pub fn reindex(&self, features: &[Feature]) -> FeatureIndex {
        FeatureIndex {
            features: features
                .iter()
                .map(|f| {
                    self.derive(
                        f.index,
                        f.id.clone(),
                        f.properties.clone(),
                        f.geometry.clone(),
                    )
                })
                .collect(),
        }
    }

    fn derive(
        &self,
        index: usize,
        id: Option<Value>,
        properties: Map<String, Value>,
        geometry: Option<Value>,
    ) -> Feature {
        let canonical_name = first_value(&properties, &self.catalog.name_keys).unwrap_or_default();

        let iso_code = first_value(&properties, &self.catalog.iso_a3_keys)
            .or_else(|| {
                if self.catalog.iso_a3_from_id {
                    id.as_ref().and_then(value_text)
                } else {
                    None
                }
            })
            .unwrap_or_default();

        let iso_a2 = first_value(&properties, &self.catalog.iso_a2_keys).unwrap_or_default();
        let alternate_name =
            first_value(&properties, &self.catalog.alternate_name_keys).unwrap_or_default();

        let lookup = LookupKeys {
            name: normalize(&canonical_name),
            alternate_name: normalize(&alternate_name),
            iso_a2: normalize(&iso_a2),
            iso_a3: normalize(&iso_code),
        };

        Feature {
            index,
            id,
            properties,
            geometry,
            canonical_name,
            iso_code,
            iso_a2,
            alternate_name,
            lookup,
        }
    }
}
