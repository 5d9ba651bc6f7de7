//! PDF documents via `pdf-extract`.

use std::{
    io::{self, ErrorKind},
    panic::{self, AssertUnwindSafe},
    path::Path,
};

use crate::{ConvertedDocument, DocumentConverter, DocumentError};

/// Converts PDF files to one text string per page.
///
/// Scanned PDFs without a text layer convert successfully but report zero pages with
/// text; callers decide how to treat them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfConverter;

impl DocumentConverter for PdfConverter {
    fn convert(&self, path: &Path) -> Result<ConvertedDocument, DocumentError> {
        if !path.is_file() {
            return Err(DocumentError::ReadFile {
                path: path.to_path_buf(),
                source: io::Error::from(ErrorKind::NotFound),
            });
        }

        // The backend panics on some malformed inputs.
        let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_by_pages(path)
        }));

        match extracted {
            Ok(Ok(pages)) => Ok(ConvertedDocument::from_raw_pages(pages)),
            Ok(Err(e)) => Err(DocumentError::Convert {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => Err(DocumentError::Convert {
                path: path.to_path_buf(),
                message: String::from("PDF backend panicked"),
            }),
        }
    }
}
