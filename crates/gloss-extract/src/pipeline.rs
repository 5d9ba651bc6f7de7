//! Per-entity extraction pipeline.

use gloss_config::Config;
use tracing::debug;

use crate::{
    aggregate::{FrequencyAggregator, RankedTerms},
    context::ContextExtractor,
    filter::{CandidateFilter, Rejection},
    phrase::{PhraseLimits, build_candidates},
    record::TermRecord,
    segment::segments,
    tag::TermTagger,
    token::Tokenizer,
};

/// The verdict on one raw candidate, for inspection output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateVerdict {
    /// Candidate as produced by the phrase builder.
    pub candidate: String,
    /// Normalized word if accepted, otherwise the rule that rejected it.
    pub outcome: Result<String, Rejection>,
}

/// Everything pass 1 produces for one entity.
#[derive(Debug, Clone, Default)]
pub struct ExtractionOutcome {
    /// Records in ranking order.
    pub records: Vec<TermRecord>,
    /// Distinct accepted candidates before the cap.
    pub unique_candidates: usize,
    /// True when singletons were dropped to honor the cap.
    pub pruned_singletons: bool,
}

impl ExtractionOutcome {
    /// The ordered word list matching [`Self::records`].
    pub fn words(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.word.as_str()).collect()
    }
}

/// Runs segmentation, phrase building, filtering, and counting over the pages of one
/// entity's documents.
pub struct TermExtractor<'a> {
    /// Shared tokenizer.
    tokenizer: &'a dyn Tokenizer,
    /// Extraction filter for this entity.
    filter: CandidateFilter,
    /// Context snippet extractor.
    contexts: ContextExtractor,
    /// Counts and first contexts.
    aggregator: FrequencyAggregator,
    /// Metadata tagger for this entity.
    tagger: TermTagger,
    /// Phrase window limits.
    limits: PhraseLimits,
    /// Tokenizer chunk size in characters.
    chunk_chars: usize,
    /// Maximum number of terms kept.
    max_terms: usize,
}

impl<'a> TermExtractor<'a> {
    /// Creates an extractor for the named entity.
    pub fn new(tokenizer: &'a dyn Tokenizer, config: &Config, entity: &str) -> Self {
        let extract = &config.extract;
        Self {
            tokenizer,
            filter: CandidateFilter::new(extract, entity),
            contexts: ContextExtractor::new(config.context.clone()),
            aggregator: FrequencyAggregator::new(),
            tagger: TermTagger::new(config.output.source_label.as_str(), entity),
            limits: PhraseLimits {
                max_tokens: extract.max_phrase_tokens,
                max_chars: extract.max_term_chars,
            },
            chunk_chars: extract.chunk_chars,
            max_terms: extract.max_terms,
        }
    }

    /// Raw candidates of a page, in text order, duplicates included.
    pub fn candidates<'p>(&'p self, page: &'p str) -> impl Iterator<Item = String> + 'p {
        segments(page, self.tokenizer, self.chunk_chars)
            .flat_map(move |run| build_candidates(&run, self.limits))
    }

    /// Counts the accepted candidates of one page.
    ///
    /// The first time a word yields a usable snippet from a page it becomes the word's
    /// context; later pages never replace it.
    pub fn add_page(&mut self, page: &str) {
        let accepted: Vec<String> = self
            .candidates(page)
            .filter_map(|candidate| self.filter.accept(&candidate).ok())
            .collect();
        debug!(accepted = accepted.len(), "scanned page");

        for word in accepted {
            self.aggregator.add(&word);
            if self.aggregator.needs_context(&word)
                && let Some(context) = self.contexts.extract(page, &word)
            {
                self.aggregator.offer_context(&word, context);
            }
        }
    }

    /// Reports every candidate of a page with its filter verdict, without counting.
    pub fn inspect_page(&self, page: &str) -> Vec<CandidateVerdict> {
        self.candidates(page)
            .map(|candidate| {
                let outcome = self.filter.accept(&candidate);
                CandidateVerdict { candidate, outcome }
            })
            .collect()
    }

    /// Ranks, caps, and tags the counted terms.
    pub fn finish(self) -> ExtractionOutcome {
        let RankedTerms {
            terms,
            unique_candidates,
            pruned_singletons,
        } = self.aggregator.finish(self.max_terms);

        let records = terms
            .into_iter()
            .map(|term| {
                let metadata = self.tagger.tag(&term.word);
                TermRecord::new(term.word, term.context, metadata)
            })
            .collect();

        ExtractionOutcome {
            records,
            unique_candidates,
            pruned_singletons,
        }
    }
}
