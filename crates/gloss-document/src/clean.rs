//! Page text cleaning applied to every converted page.

use unicode_normalization::UnicodeNormalization;

/// Normalizes raw page text before tokenization.
///
/// Applies NFKC, turns no-break and ideographic spaces into ASCII spaces, collapses runs
/// of spaces and tabs, converts CRLF/CR line endings to LF, and trims the result.
pub fn clean_page_text(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect();
    let mut out = String::with_capacity(normalized.len());
    let mut chars = normalized.chars().peekable();
    let mut in_space = false;

    while let Some(ch) = chars.next() {
        match ch {
            ' ' | '\t' | '\u{00a0}' | '\u{3000}' => {
                if !in_space {
                    out.push(' ');
                    in_space = true;
                }
                continue;
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\n');
            }
            _ => out.push(ch),
        }
        in_space = false;
    }

    out.trim().to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn applies_nfkc() {
        assert_eq!(clean_page_text("ＡＢＣ１２３"), "ABC123");
        assert_eq!(clean_page_text("ｶﾞﾊﾞﾅﾝｽ"), "ガバナンス");
    }

    #[test]
    fn collapses_spaces_and_tabs() {
        assert_eq!(clean_page_text("売上高 \t  増加"), "売上高 増加");
        assert_eq!(clean_page_text("売上高\u{3000}\u{3000}増加"), "売上高 増加");
    }

    #[test]
    fn normalizes_line_endings() {
        assert_eq!(clean_page_text("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn trims_page() {
        assert_eq!(clean_page_text("  \n本文\n  "), "本文");
        assert_eq!(clean_page_text(" \t "), "");
    }
}
