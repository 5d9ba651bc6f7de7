//! Text normalization shared by both filter passes.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::token::CONNECTORS;

/// Directory names of the form `<ordinal>_<name>`.
static ORDINAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+_(.+)$").expect("valid ordinal regex"));

/// Applies Unicode compatibility composition (NFKC).
pub fn nfkc(text: &str) -> String {
    text.nfkc().collect()
}

/// Strips leading and trailing connector characters.
pub fn strip_connectors(text: &str) -> &str {
    text.trim_matches(|c| CONNECTORS.contains(&c))
}

/// Normalizes a raw candidate into the form terms are stored in.
///
/// NFKC, then trim whitespace, then strip connector characters from both ends.
pub fn normalize_term(raw: &str) -> String {
    let normalized = nfkc(raw);
    strip_connectors(normalized.trim()).to_string()
}

/// Length in characters, which is what every length rule counts.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Derives an entity name from its directory name by dropping an ordinal prefix.
///
/// `"3_ExampleCo"` becomes `"ExampleCo"`; names without a prefix are returned as-is.
pub fn entity_name_from_dirname(dirname: &str) -> &str {
    ORDINAL_PREFIX
        .captures(dirname)
        .and_then(|caps| caps.get(1))
        .map_or(dirname, |m| m.as_str())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_term_strips_connectors_after_nfkc() {
        assert_eq!(normalize_term("・ガバナンス体制／"), "ガバナンス体制");
        assert_eq!(normalize_term("－ＲＯＥ－"), "ROE");
        assert_eq!(normalize_term("  資本・業務提携  "), "資本・業務提携");
    }

    #[test]
    fn normalize_term_can_empty_out() {
        assert_eq!(normalize_term("・/-"), "");
    }

    #[test]
    fn char_len_counts_characters() {
        assert_eq!(char_len("売上高"), 3);
        assert_eq!(char_len("ROE"), 3);
    }

    #[test]
    fn entity_name_drops_ordinal() {
        assert_eq!(entity_name_from_dirname("1_ExampleCo"), "ExampleCo");
        assert_eq!(entity_name_from_dirname("12_株式会社サンプル"), "株式会社サンプル");
        assert_eq!(entity_name_from_dirname("ExampleCo"), "ExampleCo");
        assert_eq!(entity_name_from_dirname("1_"), "1_");
        assert_eq!(entity_name_from_dirname("A_1_B"), "A_1_B");
    }
}
