//! Non-fatal diagnostics collected while generating an entity.

use std::fmt;

/// Something worth recording about an entity's run that did not stop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityNote {
    /// No file in the entity folder matched the include patterns.
    NoDocuments,
    /// A document produced no text, which usually means a scanned PDF.
    UnextractableDocument {
        /// File name of the document.
        file: String,
    },
    /// Singleton candidates were dropped to honor the term cap.
    SingletonsPruned {
        /// Distinct candidates before pruning.
        unique: usize,
    },
}

impl fmt::Display for EntityNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDocuments => write!(f, "no source documents found"),
            Self::UnextractableDocument { file } => write!(
                f,
                "{file}: no page yielded text (possibly a scanned document)"
            ),
            Self::SingletonsPruned { unique } => write!(
                f,
                "{unique} distinct candidates exceeded the cap; kept only terms seen at least twice"
            ),
        }
    }
}
