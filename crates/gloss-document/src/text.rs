//! Plain text documents.

use std::{fs, path::Path};

use crate::{ConvertedDocument, DocumentConverter, DocumentError};

/// Page separator in plain text documents.
const FORM_FEED: char = '\u{0c}';

/// Converts UTF-8 text files, treating form feeds as page breaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextConverter;

impl DocumentConverter for TextConverter {
    fn convert(&self, path: &Path) -> Result<ConvertedDocument, DocumentError> {
        let bytes = fs::read(path).map_err(|source| DocumentError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(ConvertedDocument::from_raw_pages(text.split(FORM_FEED)))
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn splits_pages_on_form_feed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.txt");
        fs::write(&path, "一頁目の本文。\u{0c}\u{0c}三頁目の本文。").unwrap();

        let doc = TextConverter.convert(&path).unwrap();
        assert_eq!(doc.pages, vec!["一頁目の本文。", "", "三頁目の本文。"]);
        assert_eq!(doc.info.total_pages, 3);
        assert_eq!(doc.info.pages_with_text, 2);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let result = TextConverter.convert(&dir.path().join("absent.txt"));
        assert!(matches!(result, Err(DocumentError::ReadFile { .. })));
    }
}
