//! Free-text country resolution.

use tracing::debug;

use super::normalize::normalize;
use crate::index::Feature;

/// Which condition made a feature match a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Normalized canonical name equals the query.
    ExactName,
    /// Normalized canonical name contains the query.
    NameContains,
    /// Normalized alternate name contains the query.
    AlternateNameContains,
    /// Normalized ISO alpha-2 code equals the query.
    IsoAlpha2,
    /// Normalized ISO alpha-3 code (or id) equals the query.
    IsoAlpha3,
}

/// Resolves user input to a single feature.
///
/// # Precedence
///
/// 1. A feature whose normalized canonical name equals the query, wherever
///    it sits in the collection.
/// 2. Otherwise the first feature, in collection order, satisfying any
///    [`MatchKind`] condition.
///
/// There is no scoring among multiple matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountryResolver;

impl CountryResolver {
    pub fn new() -> Self {
        Self
    }

    /// Returns the matching feature, or `None` for no match.
    ///
    /// A query that normalizes to the empty string matches nothing and no
    /// feature is inspected.
    pub fn resolve<'a>(&self, query: &str, features: &'a [Feature]) -> Option<&'a Feature> {
        let q = normalize(query);
        if q.is_empty() {
            return None;
        }

        let found = features
            .iter()
            .find(|f| f.lookup().name == q)
            .or_else(|| features.iter().find(|f| self.match_kind(&q, f).is_some()));

        match found {
            Some(feature) => debug!(
                query = query,
                name = feature.canonical_name(),
                index = feature.index(),
                "Query resolved"
            ),
            None => debug!(query = query, "No feature matched query"),
        }

        found
    }

    /// Every matching feature in collection order, with the reason it matched.
    ///
    /// Diagnostic only; [`resolve`](Self::resolve) stays single-result.
    pub fn resolve_all<'a>(
        &self,
        query: &str,
        features: &'a [Feature],
    ) -> Vec<(&'a Feature, MatchKind)> {
        let q = normalize(query);
        if q.is_empty() {
            return Vec::new();
        }

        features
            .iter()
            .filter_map(|f| self.match_kind(&q, f).map(|kind| (f, kind)))
            .collect()
    }

    /// Tests one feature against an already normalized query.
    pub fn match_kind(&self, normalized_query: &str, feature: &Feature) -> Option<MatchKind> {
        let q = normalized_query;
        if q.is_empty() {
            return None;
        }

        let keys = feature.lookup();
        if keys.name == q {
            return Some(MatchKind::ExactName);
        }
        if keys.name.contains(q) {
            return Some(MatchKind::NameContains);
        }
        if keys.alternate_name.contains(q) {
            return Some(MatchKind::AlternateNameContains);
        }
        if keys.iso_a2 == q {
            return Some(MatchKind::IsoAlpha2);
        }
        if keys.iso_a3 == q {
            return Some(MatchKind::IsoAlpha3);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{FeatureIndex, FeatureIndexer};
    use serde_json::json;

    fn world() -> FeatureIndex {
        FeatureIndexer::default().index_features(&[
            json!({"properties": {"ADMIN": "Nigeria", "ISO_A3": "NGA", "ISO_A2": "NG"}}),
            json!({"properties": {"ADMIN": "Niger", "ISO_A3": "NER", "ISO_A2": "NE"}}),
            json!({"properties": {"ADMIN": "India", "ISO_A3": "IND", "ISO_A2": "IN"}}),
            json!({"properties": {"ADMIN": "United States of America", "ISO_A3": "USA", "ISO_A2": "US", "BRK_NAME": "United States"}}),
            json!({"properties": {"ADMIN": "Greenland", "ISO_A3": "GRL", "SOVEREIGNT": "Denmark"}}),
            json!({"properties": {"ADMIN": "Ivory Coast", "NAME_LONG": "Côte d'Ivoire", "ISO_A3": "CIV"}}),
            json!({"properties": {"name": "Côte d'Ivoire"}, "id": "CIV"}),
            json!({"properties": {"ADMIN": "Japan", "ISO_A3": "JPN", "ISO_A2": "JP"}}),
            json!({"properties": {"ADMIN": "Nicaragua", "ISO_A3": "NIC", "ISO_A2": "NI"}}),
        ])
    }

    fn resolve<'a>(query: &str, index: &'a FeatureIndex) -> Option<&'a str> {
        CountryResolver::new()
            .resolve(query, index.features())
            .map(Feature::canonical_name)
    }

    #[test]
    fn test_exact_name_beats_earlier_substring() {
        let index = world();
        // "Nigeria" comes first and contains "niger".
        assert_eq!(resolve("Niger", &index), Some("Niger"));
    }

    #[test]
    fn test_substring_match_first_found() {
        let index = world();
        assert_eq!(resolve("nige", &index), Some("Nigeria"));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let index = world();
        assert_eq!(resolve("  INDIA ", &index), Some("India"));
    }

    #[test]
    fn test_iso_alpha3_and_alpha2() {
        let index = world();
        assert_eq!(resolve("JPN", &index), Some("Japan"));
        assert_eq!(resolve("jp", &index), Some("Japan"));
    }

    #[test]
    fn test_alternate_name_substring() {
        let index = world();
        assert_eq!(resolve("Denmark", &index), Some("Greenland"));
        assert_eq!(
            resolve("United States", &index),
            Some("United States of America")
        );
    }

    #[test]
    fn test_diacritics_are_ignored() {
        let index = world();
        assert_eq!(resolve("cote d'ivoire", &index), Some("Côte d'Ivoire"));
    }

    #[test]
    fn test_empty_and_whitespace_query_is_no_match() {
        let index = world();
        assert_eq!(resolve("", &index), None);
        assert_eq!(resolve("   ", &index), None);
        assert_eq!(resolve("?!", &index), None);
    }

    #[test]
    fn test_empty_collection_is_no_match() {
        assert!(CountryResolver::new().resolve("France", &[]).is_none());
    }

    #[test]
    fn test_unknown_query_is_no_match() {
        let index = world();
        assert_eq!(resolve("Atlantis", &index), None);
    }

    #[test]
    fn test_two_letter_query_can_hit_name_before_iso() {
        let index = world();
        // "NI" is Nicaragua's code, but "Nigeria" comes first and contains "ni".
        assert_eq!(resolve("NI", &index), Some("Nigeria"));
    }

    #[test]
    fn test_resolve_all_reports_kinds_in_order() {
        let index = world();
        let matches = CountryResolver::new().resolve_all("niger", index.features());
        let summary: Vec<(&str, MatchKind)> = matches
            .iter()
            .map(|(f, kind)| (f.canonical_name(), *kind))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Nigeria", MatchKind::NameContains),
                ("Niger", MatchKind::ExactName)
            ]
        );
    }

    #[test]
    fn test_matches_against_stored_lookup_keys() {
        let index = world();
        let mut greenland = index.get(4).unwrap().clone();
        greenland.lookup.alternate_name = "kalaallit nunaat".to_string();

        let resolver = CountryResolver::new();
        assert_eq!(
            resolver.match_kind("nunaat", &greenland),
            Some(MatchKind::AlternateNameContains)
        );
        assert_eq!(resolver.match_kind("denmark", &greenland), None);
    }

    #[test]
    fn test_match_kind_iso_fallback_id() {
        let index = world();
        let resolver = CountryResolver::new();
        let civ = index.get(6).unwrap();
        assert_eq!(resolver.match_kind("civ", civ), Some(MatchKind::IsoAlpha3));
    }
}
