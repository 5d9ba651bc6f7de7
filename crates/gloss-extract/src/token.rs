//! Tokens and the tokenizer seam.
//!
//! The pipeline only needs a surface string and a coarse part-of-speech per token, so
//! any morphological analyzer can sit behind [`Tokenizer`]. [`ScriptTokenizer`] is the
//! built-in implementation: it splits on changes of writing script, which is a usable
//! approximation of noun boundaries in Japanese business prose.

/// Major part-of-speech class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosMajor {
    /// Nouns, including proper nouns and numerals.
    Noun,
    /// Particles and other function words.
    Particle,
    /// Verbs.
    Verb,
    /// Adjectives.
    Adjective,
    /// Punctuation, whitespace, and other symbols.
    Symbol,
    /// Anything else.
    Other,
}

/// Minor part-of-speech class, refining [`PosMajor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosMinor {
    /// Ordinary member of the major class.
    General,
    /// Proper noun.
    ProperNoun,
    /// Numeral.
    Number,
    /// Dependent noun that cannot stand alone.
    NonIndependent,
    /// Pronoun.
    Pronoun,
    /// Suffix attached to a preceding word.
    Suffix,
    /// Whitespace.
    Space,
}

/// One token produced by a [`Tokenizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface form as it appears in the text.
    pub surface: String,
    /// Major part of speech.
    pub major: PosMajor,
    /// Minor part of speech.
    pub minor: PosMinor,
}

impl Token {
    /// Creates a token.
    pub fn new(surface: impl Into<String>, major: PosMajor, minor: PosMinor) -> Self {
        Self {
            surface: surface.into(),
            major,
            minor,
        }
    }
}

/// Splits a text chunk into part-of-speech tagged tokens.
///
/// Implementations hold no per-call state; one instance is shared by reference across
/// every entity in a run.
pub trait Tokenizer {
    /// Tokenizes `text` into an ordered token sequence.
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Characters that join nouns into compounds (`・`, dashes, slashes).
pub const CONNECTORS: &[char] = &['・', '-', '－', '‐', '/', '／'];

/// Returns true if `surface` is exactly one connector character.
pub fn is_connector(surface: &str) -> bool {
    let mut chars = surface.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if CONNECTORS.contains(&c))
}

/// Writing-script classes used by [`ScriptTokenizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Script {
    /// CJK ideographs and iteration marks.
    Kanji,
    /// Katakana including the prolonged sound mark.
    Katakana,
    /// Hiragana.
    Hiragana,
    /// ASCII letters and digits.
    Ascii,
    /// Letters and digits from other scripts.
    OtherWord,
    /// Connector punctuation, one token per character.
    Connector,
    /// Whitespace runs.
    Space,
    /// Any other punctuation or symbol, one token per character.
    Symbol,
}

impl Script {
    /// Classifies one character.
    fn of(ch: char) -> Self {
        if CONNECTORS.contains(&ch) {
            return Self::Connector;
        }
        match ch {
            '\u{3041}'..='\u{309f}' => Self::Hiragana,
            '\u{30a0}'..='\u{30ff}' | '\u{31f0}'..='\u{31ff}' => Self::Katakana,
            '\u{3005}'..='\u{3007}'
            | '\u{3400}'..='\u{4dbf}'
            | '\u{4e00}'..='\u{9fff}'
            | '\u{f900}'..='\u{faff}' => Self::Kanji,
            c if c.is_ascii_alphanumeric() => Self::Ascii,
            c if c.is_whitespace() => Self::Space,
            c if c.is_alphanumeric() => Self::OtherWord,
            _ => Self::Symbol,
        }
    }

    /// Whether consecutive characters of this script merge into one token.
    fn groups(self) -> bool {
        !matches!(self, Self::Connector | Self::Symbol)
    }
}

/// Dictionary-free tokenizer that cuts text wherever the writing script changes.
///
/// Kanji, katakana, and other-script word runs become nouns; ASCII alphanumeric runs
/// become proper nouns (or numerals when all digits); hiragana runs become particles;
/// connectors, whitespace, and punctuation become symbols.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptTokenizer;

impl ScriptTokenizer {
    /// Creates the tokenizer.
    pub fn new() -> Self {
        Self
    }

    /// Assigns a part of speech to a finished run.
    fn token(surface: &str, script: Script) -> Token {
        let (major, minor) = match script {
            Script::Kanji | Script::Katakana | Script::OtherWord => {
                (PosMajor::Noun, PosMinor::General)
            }
            Script::Ascii if surface.bytes().all(|b| b.is_ascii_digit()) => {
                (PosMajor::Noun, PosMinor::Number)
            }
            Script::Ascii => (PosMajor::Noun, PosMinor::ProperNoun),
            Script::Hiragana => (PosMajor::Particle, PosMinor::General),
            Script::Space => (PosMajor::Symbol, PosMinor::Space),
            Script::Connector | Script::Symbol => (PosMajor::Symbol, PosMinor::General),
        };
        Token::new(surface, major, minor)
    }
}

impl Tokenizer for ScriptTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut start = 0;
        let mut current: Option<Script> = None;

        for (idx, ch) in text.char_indices() {
            let script = Script::of(ch);
            if let Some(prev) = current
                && (prev != script || !prev.groups())
            {
                tokens.push(Self::token(&text[start..idx], prev));
                start = idx;
            }
            current = Some(script);
        }
        if let Some(prev) = current {
            tokens.push(Self::token(&text[start..], prev));
        }

        tokens
    }
}
