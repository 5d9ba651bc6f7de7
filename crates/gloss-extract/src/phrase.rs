//! Candidate generation from runs.

use crate::{
    normalize::{char_len, strip_connectors},
    segment::{RunToken, TokenKind},
    token::is_connector,
};

/// Limits applied while building phrase candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseLimits {
    /// Maximum number of tokens in one window.
    pub max_tokens: usize,
    /// Maximum phrase length in characters after connector stripping.
    pub max_chars: usize,
}

/// Builds every candidate string for one run.
///
/// Each noun yields itself. Each window of up to `max_tokens` tokens starting at a
/// position yields its concatenation (connectors stripped from both ends) when the window
/// holds at least two nouns and the result fits in `max_chars`. Duplicates are expected;
/// frequency counting happens downstream.
pub fn build_candidates(run: &[RunToken], limits: PhraseLimits) -> Vec<String> {
    let mut out = Vec::new();

    for start in 0..run.len() {
        let head = &run[start];
        if head.kind == TokenKind::Noun && !is_connector(&head.surface) {
            out.push(head.surface.clone());
        }

        let mut text = String::new();
        let mut nouns = 0;
        for token in run[start..].iter().take(limits.max_tokens) {
            text.push_str(&token.surface);
            if token.kind == TokenKind::Noun {
                nouns += 1;
            }
            if nouns < 2 {
                continue;
            }
            let phrase = strip_connectors(&text);
            if !phrase.is_empty() && char_len(phrase) <= limits.max_chars {
                out.push(phrase.to_string());
            }
        }
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;

    const LIMITS: PhraseLimits = PhraseLimits {
        max_tokens: 6,
        max_chars: 40,
    };

    fn noun(s: &str) -> RunToken {
        RunToken::new(s, TokenKind::Noun)
    }

    fn conn(s: &str) -> RunToken {
        RunToken::new(s, TokenKind::Connector)
    }

    #[test]
    fn two_nouns() {
        let run = [noun("ガバナンス"), noun("体制")];
        assert_eq!(
            build_candidates(&run, LIMITS),
            vec!["ガバナンス", "ガバナンス体制", "体制"]
        );
    }

    #[test]
    fn single_noun_run() {
        assert_eq!(build_candidates(&[noun("売上高")], LIMITS), vec!["売上高"]);
    }

    #[test]
    fn connectors_are_kept_inside_and_stripped_at_edges() {
        let run = [noun("資本"), conn("・"), noun("業務"), noun("提携"), conn("・")];
        let out = build_candidates(&run, LIMITS);
        assert!(out.contains(&"資本・業務".to_string()));
        assert!(out.contains(&"資本・業務提携".to_string()));
        assert!(!out.iter().any(|c| c.ends_with('・') || c.starts_with('・')));
        assert!(!out.contains(&"・".to_string()));
    }

    #[test]
    fn window_needs_two_nouns() {
        let run = [noun("資本"), conn("・"), conn("/")];
        assert_eq!(build_candidates(&run, LIMITS), vec!["資本"]);
    }

    #[test]
    fn window_is_bounded_by_token_count() {
        let run: Vec<_> = ["A", "B", "C", "D"].into_iter().map(noun).collect();
        let limits = PhraseLimits {
            max_tokens: 2,
            max_chars: 40,
        };
        let out = build_candidates(&run, limits);
        assert!(out.contains(&"AB".to_string()));
        assert!(!out.contains(&"ABC".to_string()));
    }

    #[test]
    fn phrases_over_char_limit_are_dropped() {
        let run = [noun("あいうえおかきくけこ"), noun("さしすせそ")];
        let limits = PhraseLimits {
            max_tokens: 6,
            max_chars: 12,
        };
        let out = build_candidates(&run, limits);
        assert_eq!(out, vec!["あいうえおかきくけこ", "さしすせそ"]);
    }

    #[test]
    fn empty_run_yields_nothing() {
        assert!(build_candidates(&[], LIMITS).is_empty());
    }
}
