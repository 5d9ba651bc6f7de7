//! Error types for the gloss-store crate.

use std::{io, path::PathBuf};

use gloss_config::ConfigError;
use gloss_document::DocumentError;
use thiserror::Error;

/// Errors raised while generating or refining glossary artifacts.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The resources or output root does not exist.
    #[error("directory not found: {path}")]
    MissingRoot {
        /// The missing root.
        path: PathBuf,
    },

    /// The root exists but holds no entity directories.
    #[error("no entity directories in {path}")]
    NoEntities {
        /// The empty root.
        path: PathBuf,
    },

    /// A persisted artifact expected by refinement is absent.
    #[error("missing artifact: {path}")]
    MissingArtifact {
        /// Path of the missing file.
        path: PathBuf,
    },

    /// Failed to read a file or directory.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write a file or create a directory.
    #[error("failed to write {path}: {source}")]
    WriteFile {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A record line is not valid JSON for a term record.
    #[error("{path}:{line}: invalid record: {source}")]
    ParseRecord {
        /// Path of the record file.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be serialized.
    #[error("failed to serialize record: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Document conversion failed.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Configuration could not be applied.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl StoreError {
    /// Creates a `ReadFile` error.
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a `WriteFile` error.
    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WriteFile {
            path: path.into(),
            source,
        }
    }
}
