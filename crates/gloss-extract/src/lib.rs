//! Terminology candidate extraction for gloss.
//!
//! The pipeline for one entity runs in a fixed order:
//!
//! 1. **Segmentation**: a [`Tokenizer`] turns page text into tokens, which are cut into
//!    runs of nouns and connectors
//! 2. **Phrase building**: every run yields single nouns plus bounded multi-token phrases
//! 3. **Filtering**: [`CandidateFilter`] normalizes each candidate and rejects noise
//! 4. **Aggregation**: [`FrequencyAggregator`] counts survivors and ranks them
//! 5. **Tagging**: [`TermTagger`] attaches a concept type and category
//!
//! [`TermExtractor`] drives the whole sequence. The refinement pass over persisted
//! output reuses the extraction rules through [`NoiseFilter`].

#![warn(missing_docs)]

mod aggregate;
mod context;
mod filter;
mod normalize;
mod phrase;
mod pipeline;
mod record;
mod refine;
mod segment;
mod stopwords;
mod tag;
mod token;

pub use aggregate::{FrequencyAggregator, RankedTerm, RankedTerms};
pub use context::ContextExtractor;
pub use filter::{CandidateFilter, Rejection};
pub use normalize::{char_len, entity_name_from_dirname, nfkc, normalize_term, strip_connectors};
pub use phrase::{PhraseLimits, build_candidates};
pub use pipeline::{CandidateVerdict, ExtractionOutcome, TermExtractor};
pub use record::{POS_NOUN, RecordMetadata, TermRecord};
pub use refine::{NoiseFilter, is_noisy_description, scrub_description};
pub use segment::{RunToken, Segments, TextChunks, TokenKind, classify, segments};
pub use stopwords::{EXTRACTION_STOPWORDS, FORM_TERMS, GENERIC_STOPWORDS, StopwordSet};
pub use tag::{
    CATEGORY_RULES, CONCEPT_RULES, Category, ConceptType, Marker, Rule, TermTagger, category,
    concept_type, first_match,
};
pub use token::{CONNECTORS, PosMajor, PosMinor, ScriptTokenizer, Token, Tokenizer, is_connector};
