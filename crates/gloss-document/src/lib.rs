//! Document conversion for gloss.
//!
//! Turns source documents into ordered, cleaned page texts plus extraction diagnostics.
//! The term pipeline only ever sees [`ConvertedDocument`] values, so any backend that
//! implements [`DocumentConverter`] can be plugged in.
//!
//! Built-in backends:
//! - [`TextConverter`] for `.txt`/`.md`/`.text` files, with form feeds as page breaks
//! - [`PdfConverter`] for `.pdf` files

#![warn(missing_docs)]

mod clean;
mod error;
mod pdf;
mod text;

use std::path::Path;

pub use clean::clean_page_text;
pub use error::DocumentError;
pub use pdf::PdfConverter;
pub use text::TextConverter;
use tracing::debug;

/// Page counts reported alongside converted text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Number of pages the backend produced.
    pub total_pages: usize,
    /// Number of pages with non-empty text after cleaning.
    pub pages_with_text: usize,
}

/// A document converted to cleaned page texts.
#[derive(Debug, Clone, Default)]
pub struct ConvertedDocument {
    /// Cleaned page texts in document order. Empty pages are kept as empty strings.
    pub pages: Vec<String>,
    /// Page diagnostics.
    pub info: PageInfo,
}

impl ConvertedDocument {
    /// Builds a document from raw page texts, cleaning each one.
    pub fn from_raw_pages<I, S>(raw_pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pages: Vec<String> = raw_pages
            .into_iter()
            .map(|page| clean_page_text(page.as_ref()))
            .collect();
        let info = PageInfo {
            total_pages: pages.len(),
            pages_with_text: pages.iter().filter(|p| !p.is_empty()).count(),
        };
        Self { pages, info }
    }

    /// Returns true if no page carries extractable text.
    pub fn is_unextractable(&self) -> bool {
        self.info.pages_with_text == 0
    }

    /// Iterates over the non-empty pages.
    pub fn text_pages(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .map(String::as_str)
            .filter(|p| !p.is_empty())
    }
}

/// A backend that converts a document file into page texts.
pub trait DocumentConverter {
    /// Converts the document at `path`.
    fn convert(&self, path: &Path) -> Result<ConvertedDocument, DocumentError>;
}

/// Converter that dispatches on file extension to the built-in backends.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConverter {
    /// Backend for plain text files.
    text: TextConverter,
    /// Backend for PDF files.
    pdf: PdfConverter,
}

impl DefaultConverter {
    /// Creates a converter with the built-in backends.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a backend exists for this path's extension.
    pub fn supports(path: &Path) -> bool {
        backend_for(path).is_some()
    }
}

impl DocumentConverter for DefaultConverter {
    fn convert(&self, path: &Path) -> Result<ConvertedDocument, DocumentError> {
        let doc = match backend_for(path) {
            Some(Backend::Text) => self.text.convert(path)?,
            Some(Backend::Pdf) => self.pdf.convert(path)?,
            None => {
                return Err(DocumentError::UnsupportedFileType {
                    path: path.to_path_buf(),
                });
            }
        };
        debug!(
            path = %path.display(),
            total_pages = doc.info.total_pages,
            pages_with_text = doc.info.pages_with_text,
            "converted document"
        );
        Ok(doc)
    }
}

/// Built-in conversion backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    /// Plain text.
    Text,
    /// PDF.
    Pdf,
}

/// Picks the backend for a path by its (case-insensitive) extension.
fn backend_for(path: &Path) -> Option<Backend> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "txt" | "text" | "md" => Some(Backend::Text),
        "pdf" => Some(Backend::Pdf),
        _ => None,
    }
}
