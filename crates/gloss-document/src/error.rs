//! Error types for document conversion.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when converting documents to page text.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Unsupported file type.
    #[error("unsupported file type: {path}")]
    UnsupportedFileType {
        /// Path to the unsupported file.
        path: PathBuf,
    },

    /// The conversion backend failed on a supported file.
    #[error("failed to extract text from {path}: {message}")]
    Convert {
        /// Path to the document.
        path: PathBuf,
        /// Backend error message.
        message: String,
    },
}
