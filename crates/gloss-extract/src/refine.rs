//! Refinement rules applied to persisted output.
//!
//! These rules are stricter than the extraction filter and aware of the layout noise
//! that filings leave behind: cover-page vocabulary, footnote markers, unit annotations,
//! and fragments of dates and parentheses.

use std::{collections::HashSet, sync::LazyLock};

use gloss_config::{ExtractSettings, RefineSettings};
use regex::Regex;

use crate::{
    filter::{CandidateFilter, Rejection},
    normalize::char_len,
    record::TermRecord,
    stopwords::StopwordSet,
};

/// Filing identifier codes such as `E01234`.
static FILING_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"E\d{5}").expect("valid filing code regex"));

/// Digits with numeric punctuation or slashes.
static NUMERIC_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d,.\-–—/]+$").expect("valid numeric regex"));

/// Footnote markers `(1)` and `1)`.
static FOOTNOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\(\d+\)|\d+\))$").expect("valid footnote regex"));

/// Page fractions like `3 / 120`.
static PAGE_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s*/\s*\d+$").expect("valid page fraction regex"));

/// Date fragments anywhere in the word.
static DATE_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}年|\d{1,2}月\d{0,2}日?|\d{4}/\d{1,2}/\d{1,2}|\d{4}-\d{1,2}-\d{1,2}")
        .expect("valid date fragment regex")
});

/// Month-day fragments with the month number cut off, like `月31日`.
static MONTH_LEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^月\d+日?$").expect("valid month regex"));

/// A bare month like `3月`.
static MONTH_TRAILING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+月$").expect("valid month regex"));

/// Units and annotation words.
static UNIT_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"単位|百万円|千円|円|株|％|%|回|人|件|台|社|日|月|年").expect("valid unit regex")
});

/// Phone numbers.
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b0\d{1,4}-\d{1,4}-\d{3,4}\b").expect("valid phone regex"));

/// Postal addresses: prefecture, then municipality, then a block marker.
static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(東京都|北海道|(京都|大阪)府|.{2,3}県).*(市|区|町|村).*(丁目|番|号|\d{1,4}-\d{1,4})")
        .expect("valid address regex")
});

/// Strings that only appear on filing cover pages.
const COVER_MARKERS: &[&str] = &[
    "EDINET提出書類",
    "【表紙】",
    "【提出",
    "財務局長",
    "電話番号",
    "【会社名】",
    "【英訳名】",
    "【代表者",
];

/// Parentheses, ASCII and fullwidth.
const PARENS: &[char] = &['(', ')', '（', '）'];

/// Share of digits above which a short description counts as a number dump.
const MAX_DIGIT_SHARE: f64 = 0.35;

/// Descriptions at least this long are never judged by digit share.
const DIGIT_SHARE_MAX_LEN: usize = 120;

/// Shortest description worth keeping.
const MIN_DESCRIPTION_CHARS: usize = 10;

/// Word filter for the refinement pass of one entity.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    /// The extraction rules, applied first.
    extraction: CandidateFilter,
    /// Filing form vocabulary.
    form_terms: StopwordSet,
    /// Generic stopwords including configured extras.
    generic: StopwordSet,
    /// Entity name as derived from the directory name.
    entity: String,
}

impl NoiseFilter {
    /// Creates a filter for the named entity.
    pub fn new(extract: &ExtractSettings, refine: &RefineSettings, entity: &str) -> Self {
        Self {
            extraction: CandidateFilter::new(extract, entity),
            form_terms: StopwordSet::form_terms(),
            generic: StopwordSet::generic(&refine.stopwords),
            entity: entity.to_string(),
        }
    }

    /// Returns the first rule `word` breaks, if any.
    pub fn rejection(&self, word: &str) -> Option<Rejection> {
        let word = word.trim();
        if let Some(reason) = self.extraction.rejection(word) {
            return Some(reason);
        }

        if self.form_terms.contains(word) {
            return Some(Rejection::FormTerm);
        }
        if self.generic.contains(word) {
            return Some(Rejection::GenericStopword);
        }
        if FILING_CODE.is_match(word) {
            return Some(Rejection::FilingCode);
        }
        if word.contains(['【', '】']) {
            return Some(Rejection::BracketMarker);
        }
        if NUMERIC_PUNCT.is_match(word) {
            return Some(Rejection::NumericPunctuation);
        }
        if FOOTNOTE.is_match(word) {
            return Some(Rejection::Footnote);
        }
        if PAGE_FRACTION.is_match(word) {
            return Some(Rejection::PageFraction);
        }
        if DATE_FRAGMENT.is_match(word) {
            return Some(Rejection::DateFragment);
        }
        if MONTH_LEADING.is_match(word) || MONTH_TRAILING.is_match(word) {
            return Some(Rejection::MonthFragment);
        }
        if !parens_balanced(word) {
            return Some(Rejection::UnbalancedParentheses);
        }
        if is_unit_fragment(word) {
            return Some(Rejection::UnitFragment);
        }
        if word == self.entity {
            return Some(Rejection::EntityName);
        }

        None
    }

    /// Keeps the words that pass, dropping later duplicates.
    pub fn filter_words<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        let mut seen = HashSet::new();
        words
            .iter()
            .map(|w| w.as_ref().trim())
            .filter(|w| self.rejection(w).is_none())
            .filter(|w| seen.insert(*w))
            .map(str::to_string)
            .collect()
    }
}

/// Returns true when both parenthesis kinds are balanced by count.
fn parens_balanced(word: &str) -> bool {
    let count = |c: char| word.chars().filter(|&x| x == c).count();
    count('(') == count(')') && count('（') == count('）')
}

/// Unit and annotation leftovers: a unit word next to any parenthesis (which covers a
/// trailing `)` cut from a longer annotation), or a `単位:` label.
fn is_unit_fragment(word: &str) -> bool {
    (word.contains(PARENS) && UNIT_FRAGMENT.is_match(word))
        || (word.ends_with(':') && word.contains("単位"))
}

/// Returns true if a description is not a useful illustration of its term.
pub fn is_noisy_description(description: &str) -> bool {
    let text = description.trim();
    if text.is_empty() {
        return true;
    }
    if COVER_MARKERS.iter().any(|m| text.contains(m)) {
        return true;
    }
    if PHONE.is_match(text) || ADDRESS.is_match(text) {
        return true;
    }

    let len = char_len(text);
    let digits = text.chars().filter(char::is_ascii_digit).count();
    #[allow(clippy::cast_precision_loss)]
    let share = digits as f64 / len.max(1) as f64;
    if share > MAX_DIGIT_SHARE && len < DIGIT_SHARE_MAX_LEN {
        return true;
    }

    len < MIN_DESCRIPTION_CHARS
}

/// Drops a record's description if it is noisy. Returns true if one was dropped.
pub fn scrub_description(record: &mut TermRecord) -> bool {
    if record
        .description
        .as_deref()
        .is_some_and(is_noisy_description)
    {
        record.description = None;
        return true;
    }
    false
}
