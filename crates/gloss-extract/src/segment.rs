//! Segmentation of a token stream into runs of term-ish tokens.
//!
//! Long page texts are tokenized in bounded chunks. The resulting token stream is
//! consumed once and cut at every token that cannot be part of a term; the maximal
//! runs in between are what the phrase builder works on.

use std::{mem, sync::LazyLock, vec};

use regex::Regex;

use crate::token::{CONNECTORS, PosMajor, PosMinor, Token, Tokenizer, is_connector};

/// Surfaces made only of ASCII letters and digits.
static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid alphanumeric regex"));

/// Role of a token inside a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Noun, or an alphanumeric token treated as one.
    Noun,
    /// Connector symbol joining nouns.
    Connector,
}

/// A token that belongs to a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunToken {
    /// Surface form.
    pub surface: String,
    /// Role in the run.
    pub kind: TokenKind,
}

impl RunToken {
    /// Creates a run token.
    pub fn new(surface: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            surface: surface.into(),
            kind,
        }
    }
}

/// Returns true for nouns that can head or extend a term.
fn is_term_noun(token: &Token) -> bool {
    token.major == PosMajor::Noun
        && !matches!(
            token.minor,
            PosMinor::Number | PosMinor::NonIndependent | PosMinor::Pronoun | PosMinor::Suffix
        )
}

/// Classifies a token, or returns `None` when it is a boundary.
pub fn classify(token: &Token) -> Option<TokenKind> {
    if is_term_noun(token) || ALPHANUMERIC.is_match(&token.surface) {
        Some(TokenKind::Noun)
    } else if is_connector(&token.surface) {
        Some(TokenKind::Connector)
    } else {
        None
    }
}

/// Returns true for characters that never occur inside a term.
fn breaks_terms(c: char) -> bool {
    c.is_whitespace() || (!c.is_alphanumeric() && !CONNECTORS.contains(&c))
}

/// Splits text into chunks of at most `max_chars` characters.
///
/// A cut backs off to just after the last `。` or newline inside the chunk. Without one
/// it backs off to just after the last character that cannot be part of a term, and
/// only cuts at the limit when the whole chunk is word characters.
#[derive(Debug, Clone)]
pub struct TextChunks<'a> {
    /// Text not yet handed out.
    rest: &'a str,
    /// Chunk size limit in characters.
    max_chars: usize,
}

impl<'a> TextChunks<'a> {
    /// Creates a chunk iterator. A limit of zero is treated as one.
    pub fn new(text: &'a str, max_chars: usize) -> Self {
        Self {
            rest: text,
            max_chars: max_chars.max(1),
        }
    }
}

impl<'a> Iterator for TextChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let Some((limit, _)) = self.rest.char_indices().nth(self.max_chars) else {
            return Some(mem::take(&mut self.rest));
        };

        let window = &self.rest[..limit];
        let after = |pos: usize| pos + window[pos..].chars().next().map_or(1, char::len_utf8);
        let cut = window
            .rfind(['。', '\n'])
            .or_else(|| window.rfind(breaks_terms))
            .map_or(limit, after);

        let (chunk, rest) = self.rest.split_at(cut);
        self.rest = rest;
        Some(chunk)
    }
}

/// Lazy iterator over the term-ish runs of a text.
///
/// Created by [`segments`]. Runs continue across chunk boundaries; each run is
/// non-empty. The iterator walks the token stream once and cannot be restarted.
pub struct Segments<'a> {
    /// Shared tokenizer.
    tokenizer: &'a dyn Tokenizer,
    /// Remaining text chunks.
    chunks: TextChunks<'a>,
    /// Tokens of the current chunk not yet classified.
    pending: vec::IntoIter<Token>,
    /// Run being accumulated.
    run: Vec<RunToken>,
}

/// Segments `text` into runs, tokenizing `chunk_chars` characters at a time.
pub fn segments<'a>(text: &'a str, tokenizer: &'a dyn Tokenizer, chunk_chars: usize) -> Segments<'a> {
    Segments {
        tokenizer,
        chunks: TextChunks::new(text, chunk_chars),
        pending: Vec::new().into_iter(),
        run: Vec::new(),
    }
}

impl Iterator for Segments<'_> {
    type Item = Vec<RunToken>;

    fn next(&mut self) -> Option<Vec<RunToken>> {
        loop {
            if let Some(token) = self.pending.next() {
                match classify(&token) {
                    Some(kind) => self.run.push(RunToken {
                        surface: token.surface,
                        kind,
                    }),
                    None if !self.run.is_empty() => return Some(mem::take(&mut self.run)),
                    None => {}
                }
                continue;
            }

            match self.chunks.next() {
                Some(chunk) => self.pending = self.tokenizer.tokenize(chunk).into_iter(),
                None if self.run.is_empty() => return None,
                None => return Some(mem::take(&mut self.run)),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::token::ScriptTokenizer;

    /// Tokenizer returning a fixed token list regardless of input.
    struct FixedTokenizer(Vec<Token>);

    impl Tokenizer for FixedTokenizer {
        fn tokenize(&self, _text: &str) -> Vec<Token> {
            self.0.clone()
        }
    }

    fn run_surfaces(runs: Vec<Vec<RunToken>>) -> Vec<Vec<String>> {
        runs.into_iter()
            .map(|run| run.into_iter().map(|t| t.surface).collect())
            .collect()
    }

    #[test]
    fn classify_nouns_and_connectors() {
        let noun = Token::new("売上", PosMajor::Noun, PosMinor::General);
        assert_eq!(classify(&noun), Some(TokenKind::Noun));

        let dot = Token::new("・", PosMajor::Symbol, PosMinor::General);
        assert_eq!(classify(&dot), Some(TokenKind::Connector));

        let particle = Token::new("の", PosMajor::Particle, PosMinor::General);
        assert_eq!(classify(&particle), None);
    }

    #[test]
    fn classify_excludes_dependent_nouns() {
        for minor in [
            PosMinor::NonIndependent,
            PosMinor::Pronoun,
            PosMinor::Suffix,
        ] {
            let token = Token::new("こと", PosMajor::Noun, minor);
            assert_eq!(classify(&token), None, "{minor:?}");
        }
    }

    #[test]
    fn classify_alphanumeric_as_noun() {
        let number = Token::new("2024", PosMajor::Noun, PosMinor::Number);
        assert_eq!(classify(&number), Some(TokenKind::Noun));

        let symbol = Token::new("ESG", PosMajor::Symbol, PosMinor::General);
        assert_eq!(classify(&symbol), Some(TokenKind::Noun));

        let kanji_number = Token::new("三", PosMajor::Noun, PosMinor::Number);
        assert_eq!(classify(&kanji_number), None);
    }

    #[test]
    fn segments_split_on_boundaries() {
        let runs: Vec<_> =
            segments("当社のガバナンス体制を強化した。", &ScriptTokenizer, 10_000).collect();
        assert_eq!(
            run_surfaces(runs),
            vec![
                vec!["当社"],
                vec!["ガバナンス", "体制"],
                vec!["強化"],
            ]
        );
    }

    #[test]
    fn segments_keep_connectors_inside_runs() {
        let runs: Vec<_> = segments("資本・業務提携", &ScriptTokenizer, 10_000).collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0][1], RunToken::new("・", TokenKind::Connector));
    }

    #[test]
    fn trailing_run_is_emitted() {
        let tokenizer = FixedTokenizer(vec![
            Token::new("は", PosMajor::Particle, PosMinor::General),
            Token::new("事業", PosMajor::Noun, PosMinor::General),
        ]);
        let runs: Vec<_> = segments("x", &tokenizer, 10).collect();
        assert_eq!(run_surfaces(runs), vec![vec!["事業"]]);
    }

    #[test]
    fn runs_continue_across_chunks() {
        // Every chunk yields the same noun, so the whole text is one run.
        let tokenizer = FixedTokenizer(vec![Token::new("事業", PosMajor::Noun, PosMinor::General)]);
        let runs: Vec<_> = segments("abcdef", &tokenizer, 2).collect();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 3);
    }

    #[test]
    fn no_runs_from_boundary_only_text() {
        assert_eq!(segments("。、「」", &ScriptTokenizer, 100).count(), 0);
        assert_eq!(segments("", &ScriptTokenizer, 100).count(), 0);
    }

    #[test]
    fn chunks_back_off_to_sentence_end() {
        let chunks: Vec<_> = TextChunks::new("売上高。販管費増加", 6).collect();
        assert_eq!(chunks, vec!["売上高。", "販管費増加"]);
    }

    #[test]
    fn chunks_back_off_to_word_break() {
        let chunks: Vec<_> = TextChunks::new("当社、ガバナンス体制", 8).collect();
        assert_eq!(chunks, vec!["当社、", "ガバナンス体制"]);

        let chunks: Vec<_> = TextChunks::new("ESG 資本・業務提携", 8).collect();
        assert_eq!(chunks, vec!["ESG ", "資本・業務提携"]);
    }

    #[test]
    fn chunks_cut_hard_without_sentence_end() {
        let chunks: Vec<_> = TextChunks::new("abcdefg", 3).collect();
        assert_eq!(chunks, vec!["abc", "def", "g"]);
    }

    #[test]
    fn chunking_does_not_change_runs() {
        let text = "当社の売上高は増加した。\n当社のガバナンス体制を強化した。".repeat(20);
        let whole: Vec<_> = segments(&text, &ScriptTokenizer, 100_000).collect();
        let chunked: Vec<_> = segments(&text, &ScriptTokenizer, 16).collect();
        assert_eq!(whole, chunked);
    }
}
