//! The enriched term record persisted as one NDJSON line.

use serde::{Deserialize, Serialize};

use crate::tag::{Category, ConceptType};

/// Part of speech recorded for every term.
pub const POS_NOUN: &str = "noun";

/// A glossary entry.
///
/// Serialized as `{"word", "description"?, "metadata"}`. `description` is omitted when
/// no usable context snippet exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    /// The term.
    pub word: String,
    /// Context snippet illustrating the term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags and provenance.
    pub metadata: RecordMetadata,
}

impl TermRecord {
    /// Creates a record.
    pub fn new(word: impl Into<String>, description: Option<String>, metadata: RecordMetadata) -> Self {
        Self {
            word: word.into(),
            description,
            metadata,
        }
    }
}

/// Record metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    /// Part of speech, always [`POS_NOUN`] for generated records.
    pub pos: String,
    /// Concept type.
    pub concept_type: ConceptType,
    /// Category, omitted when no rule applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Source label.
    pub source: String,
    /// Entity name.
    pub entity: String,
}

impl RecordMetadata {
    /// Creates metadata for a noun term.
    pub fn noun(
        concept_type: ConceptType,
        category: Option<Category>,
        source: &str,
        entity: &str,
    ) -> Self {
        Self {
            pos: POS_NOUN.to_string(),
            concept_type,
            category,
            source: source.to_string(),
            entity: entity.to_string(),
        }
    }
}
