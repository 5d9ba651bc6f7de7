//! Extraction-time candidate filter.
//!
//! The rules here are local to a single word: whether a word is accepted never depends
//! on which other words were seen or in what order.

use std::{fmt, sync::LazyLock};

use gloss_config::ExtractSettings;
use regex::Regex;

use crate::{
    normalize::{char_len, nfkc, normalize_term},
    stopwords::StopwordSet,
};

/// Only decimal digits.
static ALL_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid digits regex"));

/// Digits and numeric punctuation.
static DIGITS_AND_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d,.\-–—ー]+$").expect("valid numeric punctuation regex"));

/// Only hiragana.
static ALL_HIRAGANA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ぁ-ゖ]+$").expect("valid hiragana regex"));

/// Complete date literals.
static DATE_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}年\d{1,2}月\d{1,2}日|\d{4}/\d{1,2}/\d{1,2}|\d{4}-\d{1,2}-\d{1,2})$")
        .expect("valid date regex")
});

/// Chapter, section, and period markers such as `第3章` or `12期`.
static SECTION_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(第?\d+(章|節|項|期)|\d+(章|節|項))$").expect("valid section regex")
});

/// Nothing but non-word characters.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\W_]+$").expect("valid non-word regex"));

/// Legal-entity marker that makes a term a company name rather than a concept.
const LEGAL_ENTITY_MARKER: &str = "株式会社";

/// How many characters a term may add to the entity name before it stops being a
/// variant of that name.
const ENTITY_VARIANT_SLACK: usize = 4;

/// Why a word was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Nothing left after normalization.
    Empty,
    /// Too short or too long.
    Length {
        /// Length in characters.
        len: usize,
    },
    /// Extraction stopword.
    Stopword,
    /// Digits only.
    AllDigits,
    /// Digits and numeric punctuation only.
    NumericPunctuation,
    /// Hiragana only.
    AllHiragana,
    /// A full date.
    DateLiteral,
    /// A chapter or section marker.
    SectionMarker,
    /// Part of a URL.
    Url,
    /// Contains a legal-entity marker.
    LegalEntity,
    /// The entity's own name.
    EntityName,
    /// A short variant of the entity's name.
    EntityNameVariant,
    /// Only symbols and punctuation.
    NonWord,
    /// Filing or form vocabulary.
    FormTerm,
    /// Generic refinement stopword.
    GenericStopword,
    /// Contains a filing identifier code.
    FilingCode,
    /// Contains a cover-page bracket.
    BracketMarker,
    /// A footnote marker like `(1)`.
    Footnote,
    /// A page fraction like `3/120`.
    PageFraction,
    /// Contains a date fragment.
    DateFragment,
    /// A bare month or day fragment.
    MonthFragment,
    /// Parentheses do not balance.
    UnbalancedParentheses,
    /// A unit or annotation fragment.
    UnitFragment,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty after normalization"),
            Self::Length { len } => write!(f, "length {len} out of range"),
            Self::Stopword => write!(f, "stopword"),
            Self::AllDigits => write!(f, "digits only"),
            Self::NumericPunctuation => write!(f, "digits and punctuation only"),
            Self::AllHiragana => write!(f, "hiragana only"),
            Self::DateLiteral => write!(f, "date"),
            Self::SectionMarker => write!(f, "section marker"),
            Self::Url => write!(f, "url"),
            Self::LegalEntity => write!(f, "legal entity marker"),
            Self::EntityName => write!(f, "entity name"),
            Self::EntityNameVariant => write!(f, "entity name variant"),
            Self::NonWord => write!(f, "symbols only"),
            Self::FormTerm => write!(f, "filing form term"),
            Self::GenericStopword => write!(f, "generic stopword"),
            Self::FilingCode => write!(f, "filing code"),
            Self::BracketMarker => write!(f, "bracket marker"),
            Self::Footnote => write!(f, "footnote marker"),
            Self::PageFraction => write!(f, "page fraction"),
            Self::DateFragment => write!(f, "date fragment"),
            Self::MonthFragment => write!(f, "month fragment"),
            Self::UnbalancedParentheses => write!(f, "unbalanced parentheses"),
            Self::UnitFragment => write!(f, "unit fragment"),
        }
    }
}

/// Pass-1 filter for one entity.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    /// Stopwords including configured extras.
    stopwords: StopwordSet,
    /// Minimum term length in characters.
    min_chars: usize,
    /// Maximum term length in characters.
    max_chars: usize,
    /// NFKC-normalized entity name.
    entity: String,
}

impl CandidateFilter {
    /// Creates a filter for the named entity.
    pub fn new(settings: &ExtractSettings, entity: &str) -> Self {
        Self {
            stopwords: StopwordSet::extraction(&settings.stopwords),
            min_chars: settings.min_term_chars,
            max_chars: settings.max_term_chars,
            entity: nfkc(entity.trim()),
        }
    }

    /// The normalized entity name this filter guards against.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Normalizes a raw candidate and returns it if it passes every rule.
    pub fn accept(&self, raw: &str) -> Result<String, Rejection> {
        let word = normalize_term(raw);
        match self.rejection(&word) {
            Some(reason) => Err(reason),
            None => Ok(word),
        }
    }

    /// Checks an already normalized word, returning the first rule it breaks.
    pub fn rejection(&self, word: &str) -> Option<Rejection> {
        if word.is_empty() {
            return Some(Rejection::Empty);
        }

        let len = char_len(word);
        if len < self.min_chars || len > self.max_chars {
            return Some(Rejection::Length { len });
        }
        if self.stopwords.contains(word) {
            return Some(Rejection::Stopword);
        }

        let patterns: [(&Regex, Rejection); 5] = [
            (&*ALL_DIGITS, Rejection::AllDigits),
            (&*DIGITS_AND_PUNCT, Rejection::NumericPunctuation),
            (&*ALL_HIRAGANA, Rejection::AllHiragana),
            (&*DATE_LITERAL, Rejection::DateLiteral),
            (&*SECTION_MARKER, Rejection::SectionMarker),
        ];
        if let Some((_, reason)) = patterns.into_iter().find(|(re, _)| re.is_match(word)) {
            return Some(reason);
        }

        if word.to_lowercase().contains("http") {
            return Some(Rejection::Url);
        }
        if word.contains(LEGAL_ENTITY_MARKER) {
            return Some(Rejection::LegalEntity);
        }
        if let Some(reason) = self.entity_rejection(word, len) {
            return Some(reason);
        }
        if NON_WORD.is_match(word) {
            return Some(Rejection::NonWord);
        }

        None
    }

    /// Rejects the entity name and short words built around it.
    fn entity_rejection(&self, word: &str, len: usize) -> Option<Rejection> {
        if self.entity.is_empty() {
            return None;
        }
        if word == self.entity {
            return Some(Rejection::EntityName);
        }
        if word.contains(&self.entity) && len <= char_len(&self.entity) + ENTITY_VARIANT_SLACK {
            return Some(Rejection::EntityNameVariant);
        }
        None
    }
}
