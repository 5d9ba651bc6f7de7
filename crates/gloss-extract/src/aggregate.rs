//! Per-entity frequency aggregation and ranking.

use std::collections::{HashMap, hash_map::Entry};

/// A ranked term with its frequency and first usable context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedTerm {
    /// Normalized term.
    pub word: String,
    /// Number of accepted occurrences across all documents.
    pub count: usize,
    /// First context snippet found for the term.
    pub context: Option<String>,
}

/// Result of finishing an aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedTerms {
    /// Terms ordered by count descending, then word in codepoint order.
    pub terms: Vec<RankedTerm>,
    /// Distinct accepted candidates seen before any cut.
    pub unique_candidates: usize,
    /// True when singletons were dropped because the cut fell at count one.
    pub pruned_singletons: bool,
}

/// Accumulates accepted candidates for one entity.
///
/// Owned by a single entity's run and consumed by [`FrequencyAggregator::finish`].
#[derive(Debug, Default)]
pub struct FrequencyAggregator {
    /// Occurrence counts per word.
    counts: HashMap<String, usize>,
    /// First context per word. Never overwritten once set.
    contexts: HashMap<String, String>,
}

impl FrequencyAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one accepted occurrence of `word`.
    pub fn add(&mut self, word: &str) {
        match self.counts.get_mut(word) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(word.to_string(), 1);
            }
        }
    }

    /// Returns true while no context has been stored for `word`.
    pub fn needs_context(&self, word: &str) -> bool {
        !self.contexts.contains_key(word)
    }

    /// Stores the context for `word` unless one is already present.
    pub fn offer_context(&mut self, word: &str, context: String) {
        if let Entry::Vacant(slot) = self.contexts.entry(word.to_string()) {
            slot.insert(context);
        }
    }

    /// Number of distinct words counted so far.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns true if nothing has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Ranks the counted words and keeps at most `cap` of them.
    ///
    /// When there are more distinct words than `cap` and the word ranked at position
    /// `cap` was seen only once, every singleton is dropped first, which can leave fewer
    /// than `cap` terms.
    pub fn finish(self, cap: usize) -> RankedTerms {
        let Self {
            counts,
            mut contexts,
        } = self;
        let unique_candidates = counts.len();

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_unstable_by(|(wa, ca), (wb, cb)| cb.cmp(ca).then_with(|| wa.cmp(wb)));

        let mut pruned_singletons = false;
        if ranked.len() > cap
            && let Some((_, cutoff)) = cap.checked_sub(1).and_then(|idx| ranked.get(idx))
            && *cutoff <= 1
        {
            ranked.retain(|(_, count)| *count >= 2);
            pruned_singletons = true;
        }
        ranked.truncate(cap);

        let terms = ranked
            .into_iter()
            .map(|(word, count)| {
                let context = contexts.remove(&word);
                RankedTerm {
                    word,
                    count,
                    context,
                }
            })
            .collect();

        RankedTerms {
            terms,
            unique_candidates,
            pruned_singletons,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn words(ranked: &RankedTerms) -> Vec<&str> {
        ranked.terms.iter().map(|t| t.word.as_str()).collect()
    }

    fn add_n(agg: &mut FrequencyAggregator, word: &str, n: usize) {
        for _ in 0..n {
            agg.add(word);
        }
    }

    #[test]
    fn orders_by_count_then_word() {
        let mut agg = FrequencyAggregator::new();
        add_n(&mut agg, "C", 5);
        add_n(&mut agg, "B", 3);
        add_n(&mut agg, "A", 3);

        let ranked = agg.finish(10_000);
        assert_eq!(words(&ranked), vec!["C", "A", "B"]);
        assert_eq!(ranked.terms[0].count, 5);
        assert_eq!(ranked.unique_candidates, 3);
        assert!(!ranked.pruned_singletons);
    }

    #[test]
    fn tie_break_is_codepoint_order() {
        let mut agg = FrequencyAggregator::new();
        for w in ["売上", "ROE", "ガバナンス", "KPI"] {
            agg.add(w);
        }
        assert_eq!(
            words(&agg.finish(10)),
            vec!["KPI", "ROE", "ガバナンス", "売上"]
        );
    }

    #[test]
    fn singletons_pruned_when_cut_falls_on_count_one() {
        let mut agg = FrequencyAggregator::new();
        for i in 0..10_001 {
            agg.add(&format!("w{i:05}"));
        }
        add_n(&mut agg, "w00000", 1);
        add_n(&mut agg, "w00001", 2);

        let ranked = agg.finish(10_000);
        assert!(ranked.pruned_singletons);
        assert_eq!(ranked.unique_candidates, 10_001);
        assert_eq!(words(&ranked), vec!["w00001", "w00000"]);
        assert!(ranked.terms.iter().all(|t| t.count >= 2));
    }

    #[test]
    fn plain_truncation_when_cut_is_above_one() {
        let mut agg = FrequencyAggregator::new();
        add_n(&mut agg, "a", 4);
        add_n(&mut agg, "b", 3);
        add_n(&mut agg, "c", 2);
        agg.add("d");

        let ranked = agg.finish(3);
        assert!(!ranked.pruned_singletons);
        assert_eq!(words(&ranked), vec!["a", "b", "c"]);
    }

    #[test]
    fn no_pruning_at_or_below_cap() {
        let mut agg = FrequencyAggregator::new();
        agg.add("a");
        agg.add("b");
        let ranked = agg.finish(2);
        assert_eq!(ranked.terms.len(), 2);
        assert!(!ranked.pruned_singletons);
    }

    #[test]
    fn zero_cap_keeps_nothing() {
        let mut agg = FrequencyAggregator::new();
        agg.add("a");
        let ranked = agg.finish(0);
        assert!(ranked.terms.is_empty());
        assert_eq!(ranked.unique_candidates, 1);
    }

    #[test]
    fn first_context_wins() {
        let mut agg = FrequencyAggregator::new();
        agg.add("売上高");
        assert!(agg.needs_context("売上高"));
        agg.offer_context("売上高", "最初の文脈です。".to_string());
        agg.offer_context("売上高", "二番目の文脈です。".to_string());
        assert!(!agg.needs_context("売上高"));

        let ranked = agg.finish(10);
        assert_eq!(ranked.terms[0].context.as_deref(), Some("最初の文脈です。"));
    }

    #[test]
    fn empty_aggregator() {
        let agg = FrequencyAggregator::new();
        assert!(agg.is_empty());
        assert_eq!(agg.finish(10), RankedTerms::default());
    }
}
