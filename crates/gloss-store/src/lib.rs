//! Entity discovery, artifact storage, and the two pipeline stages for gloss.
//!
//! Layout on disk:
//!
//! ```text
//! <resources>/<slug>/*.pdf           source documents, one folder per entity
//! <output>/<slug>/wordList/wordList.txt
//! <output>/<slug>/metadata/wordList.jsonl
//! <output>/<slug>/worklog.md
//! ```
//!
//! [`Generator`] runs extraction over the resources tree and writes the artifacts.
//! [`refine_all`] later re-reads the artifacts, applies the stricter noise filter, and
//! rewrites them in place so both lists keep the same words in the same order.

#![warn(missing_docs)]

mod artifacts;
mod entity;
mod error;
mod generate;
mod notes;
mod refine;
pub mod worklog;

pub use artifacts::{
    ArtifactPaths, METADATA_DIR, RECORDS_FILE, WORD_LIST_DIR, WORD_LIST_FILE, WORKLOG_FILE,
    read_records, read_word_list, write_records, write_word_list,
};
pub use entity::{Entity, discover_entities};
pub use error::StoreError;
pub use generate::{DocumentSummary, EntityReport, Generator, ProgressReporter, SilentReporter};
pub use notes::EntityNote;
pub use refine::{
    FilteredArtifacts, LoadedArtifacts, RefineReport, RefineStats, SynchronizedArtifacts,
    refine_all, refine_entity,
};
