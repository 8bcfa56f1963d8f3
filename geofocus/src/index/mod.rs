//! Feature indexing.
//!
//! Turns raw GeoJSON feature records into [`Feature`] values carrying a
//! canonical name and ISO codes, derived once per dataset load from the
//! ordered key lists of a [`FieldCatalog`].

mod feature;
mod fields;
mod indexer;

pub use feature::{Feature, LookupKeys};
pub use fields::{
    FieldCatalog, DEFAULT_ALTERNATE_NAME_KEYS, DEFAULT_ISO_A2_KEYS, DEFAULT_ISO_A3_KEYS,
    DEFAULT_NAME_KEYS,
};
pub use indexer::{FeatureIndex, FeatureIndexer};
