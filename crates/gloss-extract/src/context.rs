//! Illustrative context snippets for terms.

use gloss_config::ContextSettings;

use crate::normalize::char_len;

/// Sentence terminator used to trim snippets.
const SENTENCE_END: char = '。';

/// Marker appended to snippets cut at the length limit.
const ELLIPSIS: char = '…';

/// Extracts a short snippet around the first occurrence of a term in a page.
#[derive(Debug, Clone)]
pub struct ContextExtractor {
    /// Window and length limits.
    settings: ContextSettings,
}

impl ContextExtractor {
    /// Creates an extractor with the given limits.
    pub fn new(settings: ContextSettings) -> Self {
        Self { settings }
    }

    /// Returns the snippet for `term` in `page`, if the page yields a usable one.
    ///
    /// The window spans `chars_before` characters before the match and `chars_after`
    /// after it. Whitespace runs collapse to a single space. The window is then narrowed
    /// to the sentence containing the term, bounded by `。` on either side. Snippets
    /// shorter than `min_chars` are discarded; longer than `max_chars` are cut and get a
    /// trailing `…`.
    pub fn extract(&self, page: &str, term: &str) -> Option<String> {
        if term.is_empty() {
            return None;
        }
        let start = page.find(term)?;
        let end = start + term.len();

        let left = chars_back(page, start, self.settings.chars_before);
        let right = chars_forward(page, end, self.settings.chars_after);
        let window = page[left..right]
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        let term_start = window.find(term)?;
        let term_end = term_start + term.len();
        let from = window[..term_start]
            .rfind(SENTENCE_END)
            .map_or(0, |pos| pos + SENTENCE_END.len_utf8());
        let to = window[term_end..]
            .find(SENTENCE_END)
            .map_or(window.len(), |pos| term_end + pos + SENTENCE_END.len_utf8());

        let snippet = window[from..to].trim();
        if char_len(snippet) < self.settings.min_chars {
            return None;
        }
        if char_len(snippet) <= self.settings.max_chars {
            return Some(snippet.to_string());
        }

        let mut cut: String = snippet
            .chars()
            .take(self.settings.max_chars)
            .collect::<String>()
            .trim_end()
            .to_string();
        cut.push(ELLIPSIS);
        Some(cut)
    }
}

impl Default for ContextExtractor {
    fn default() -> Self {
        Self::new(ContextSettings::default())
    }
}

/// Byte offset `n` characters before `end`, clamped to the start of the text.
fn chars_back(text: &str, end: usize, n: usize) -> usize {
    if n == 0 {
        return end;
    }
    text[..end]
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map_or(end, |(idx, _)| idx)
}

/// Byte offset `n` characters after `start`, clamped to the end of the text.
fn chars_forward(text: &str, start: usize, n: usize) -> usize {
    text[start..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(idx, _)| start + idx)
}
