//! Text normalization for query matching.

use unicode_normalization::UnicodeNormalization;

/// Normalizes text for comparison.
///
/// Lowercases, applies Unicode compatibility decomposition (NFKD), drops
/// every character that is not an ASCII word character, whitespace or a
/// hyphen, then trims surrounding whitespace. Diacritics decompose into
/// combining marks and are dropped, so `"Côte d'Ivoire"` becomes
/// `"cote divoire"`.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(s: &str) -> String {
    let kept: String = s
        .to_lowercase()
        .nfkd()
        .filter(|&c| is_kept(c))
        // NFKD can surface uppercase ASCII from compatibility characters.
        .map(|c| c.to_ascii_lowercase())
        .collect();

    kept.trim().to_string()
}

fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_lowercases_and_trims() {
        assert_eq!(normalize("  United States  "), "united states");
    }

    #[test]
    fn test_strips_diacritics() {
        assert_eq!(normalize("Côte d'Ivoire"), "cote divoire");
        assert_eq!(normalize("São Tomé and Príncipe"), "sao tome and principe");
        assert_eq!(normalize("Curaçao"), "curacao");
    }

    #[test]
    fn test_keeps_hyphen_and_underscore() {
        assert_eq!(normalize("Guinea-Bissau"), "guinea-bissau");
        assert_eq!(normalize("iso_a3"), "iso_a3");
    }

    #[test]
    fn test_drops_punctuation() {
        assert_eq!(normalize("Korea, Rep. (South)"), "korea rep south");
    }

    #[test]
    fn test_compatibility_characters_fold_to_ascii() {
        // Fullwidth letters decompose to ASCII under NFKD.
        assert_eq!(normalize("ＪＰＮ"), "jpn");
        assert_eq!(normalize("ℌaiti"), "haiti");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert_eq!(normalize(" \t\n "), "");
        assert_eq!(normalize("?!"), "");
    }

    #[test]
    fn test_non_latin_scripts_are_dropped() {
        assert_eq!(normalize("日本"), "");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(s in any::<String>()) {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_output_has_no_surrounding_whitespace(s in "\\PC*") {
            let n = normalize(&s);
            prop_assert_eq!(n.trim(), n.as_str());
        }
    }
}
