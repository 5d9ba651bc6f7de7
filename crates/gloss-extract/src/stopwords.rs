//! Built-in word lists used by the filters.

use std::collections::HashSet;

use crate::normalize::nfkc;

/// Words rejected at extraction time.
pub const EXTRACTION_STOPWORDS: &[&str] = &[
    "当社", "本書", "重要", "内容", "場合", "以下", "なお", "また", "及び", "並びに", "その他",
    "各", "等",
];

/// Generic words rejected during refinement.
pub const GENERIC_STOPWORDS: &[&str] = &[
    "会社", "期間", "事項", "可能", "状況", "方法", "当該", "上記", "記載", "提出", "書類", "年度",
    "月", "日", "時点", "現在", "当期", "当社",
];

/// Filing and form vocabulary that never makes a useful glossary entry.
pub const FORM_TERMS: &[&str] = &[
    "EDINET",
    "EDINET提出書類",
    "提出書類",
    "有価証券報告書",
    "有価証券報告",
    "証券報告",
];

/// An exact-match word set.
///
/// Entries are NFKC-normalized on insertion so they compare equal to normalized terms.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    /// Normalized words.
    words: HashSet<String>,
}

impl StopwordSet {
    /// Builds a set from built-in words plus configured extras.
    pub fn new<S: AsRef<str>>(builtin: &[&str], extra: &[S]) -> Self {
        let words = builtin
            .iter()
            .copied()
            .chain(extra.iter().map(AsRef::as_ref))
            .map(|w| nfkc(w.trim()))
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// The pass-1 set with configured extras.
    pub fn extraction<S: AsRef<str>>(extra: &[S]) -> Self {
        Self::new(EXTRACTION_STOPWORDS, extra)
    }

    /// The pass-2 generic set with configured extras.
    pub fn generic<S: AsRef<str>>(extra: &[S]) -> Self {
        Self::new(GENERIC_STOPWORDS, extra)
    }

    /// The form vocabulary.
    pub fn form_terms() -> Self {
        Self::new::<&str>(FORM_TERMS, &[])
    }

    /// Returns true if `word` is in the set.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_extraction_words() {
        let set = StopwordSet::extraction::<&str>(&[]);
        assert!(set.contains("当社"));
        assert!(set.contains("等"));
        assert!(!set.contains("売上高"));
        assert_eq!(set.len(), EXTRACTION_STOPWORDS.len());
    }

    #[test]
    fn extras_are_normalized() {
        let set = StopwordSet::generic(&["  ＫＰＩ ".to_string(), String::new()]);
        assert!(set.contains("KPI"));
        assert!(set.contains("時点"));
        assert_eq!(set.len(), GENERIC_STOPWORDS.len() + 1);
    }

    #[test]
    fn form_terms_are_exact() {
        let set = StopwordSet::form_terms();
        assert!(set.contains("EDINET提出書類"));
        assert!(!set.contains("EDINETコード"));
    }
}
