//! The generate stage: source documents to persisted glossary artifacts.

use std::path::{Path, PathBuf};

use gloss_config::{Config, DocumentPatterns};
use gloss_document::{DocumentConverter, PageInfo};
use gloss_extract::{ExtractionOutcome, TermExtractor, Tokenizer};
use tracing::{debug, info, warn};

use crate::{
    Entity, EntityNote, StoreError,
    artifacts::{self, ArtifactPaths},
    discover_entities, worklog,
};

/// Page statistics of one converted document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSummary {
    /// File name of the document.
    pub file: String,
    /// Page counts reported by the converter.
    pub info: PageInfo,
}

/// Outcome of generating one entity.
#[derive(Debug, Clone)]
pub struct EntityReport {
    /// The entity.
    pub entity: Entity,
    /// Documents processed, in order.
    pub documents: Vec<DocumentSummary>,
    /// Distinct accepted candidates before the cap.
    pub unique_candidates: usize,
    /// Terms written to the artifacts.
    pub terms: usize,
    /// Non-fatal diagnostics.
    pub notes: Vec<EntityNote>,
    /// Directory the artifacts were written to.
    pub output_dir: PathBuf,
}

/// Progress callbacks for batch generation.
pub trait ProgressReporter {
    /// Called before an entity is processed.
    fn on_entity_start(&mut self, entity: &Entity, current: usize, total: usize);

    /// Called after an entity's artifacts were written.
    fn on_entity_done(&mut self, report: &EntityReport);
}

/// A reporter that ignores all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn on_entity_start(&mut self, _entity: &Entity, _current: usize, _total: usize) {}
    fn on_entity_done(&mut self, _report: &EntityReport) {}
}

/// Runs extraction for entities and writes their artifacts.
pub struct Generator<'a> {
    /// The loaded configuration.
    config: &'a Config,
    /// Compiled document include patterns.
    patterns: DocumentPatterns,
    /// Document conversion backend.
    converter: &'a dyn DocumentConverter,
    /// Shared tokenizer.
    tokenizer: &'a dyn Tokenizer,
}

impl<'a> Generator<'a> {
    /// Creates a generator, compiling the configured include patterns.
    pub fn new(
        config: &'a Config,
        converter: &'a dyn DocumentConverter,
        tokenizer: &'a dyn Tokenizer,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            config,
            patterns: config.document_patterns()?,
            converter,
            tokenizer,
        })
    }

    /// Generates artifacts for every entity under `resources_root`.
    ///
    /// Entities are processed in name order. The first fatal error stops the batch.
    pub fn generate_all<R: ProgressReporter>(
        &self,
        resources_root: &Path,
        output_root: &Path,
        reporter: &mut R,
    ) -> Result<Vec<EntityReport>, StoreError> {
        let entities = discover_entities(resources_root)?;
        let total = entities.len();

        let mut reports = Vec::with_capacity(total);
        for (idx, entity) in entities.into_iter().enumerate() {
            reporter.on_entity_start(&entity, idx + 1, total);
            let report = self.generate_entity(entity, output_root)?;
            reporter.on_entity_done(&report);
            reports.push(report);
        }
        Ok(reports)
    }

    /// Extracts one entity's terms and writes the word list, records, and worklog.
    pub fn generate_entity(
        &self,
        entity: Entity,
        output_root: &Path,
    ) -> Result<EntityReport, StoreError> {
        info!(entity = %entity.slug, "generating");
        let documents = entity.documents(&self.patterns)?;

        let mut notes = Vec::new();
        if documents.is_empty() {
            notes.push(EntityNote::NoDocuments);
        }

        let mut extractor = TermExtractor::new(self.tokenizer, self.config, &entity.name);
        let mut summaries = Vec::with_capacity(documents.len());
        for path in &documents {
            let (summary, note) = self.scan_document(path, &mut extractor)?;
            summaries.push(summary);
            notes.extend(note);
        }

        let outcome = extractor.finish();
        if outcome.pruned_singletons {
            notes.push(EntityNote::SingletonsPruned {
                unique: outcome.unique_candidates,
            });
        }
        for note in &notes {
            warn!(entity = %entity.slug, "{note}");
        }

        let paths = ArtifactPaths::for_entity(output_root, &entity.slug);
        let report = EntityReport {
            documents: summaries,
            unique_candidates: outcome.unique_candidates,
            terms: outcome.records.len(),
            notes,
            output_dir: paths.dir.clone(),
            entity,
        };
        self.persist(&paths, &outcome, &report)?;

        info!(
            entity = %report.entity.slug,
            unique = report.unique_candidates,
            terms = report.terms,
            "generated"
        );
        Ok(report)
    }

    /// Converts one document and feeds its text pages to the extractor.
    ///
    /// A document that converts to no text becomes a note. Any conversion error is
    /// returned and stops the batch.
    fn scan_document(
        &self,
        path: &Path,
        extractor: &mut TermExtractor<'_>,
    ) -> Result<(DocumentSummary, Option<EntityNote>), StoreError> {
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let doc = self.converter.convert(path)?;

        debug!(
            path = %path.display(),
            total_pages = doc.info.total_pages,
            pages_with_text = doc.info.pages_with_text,
            "scanning document"
        );
        for page in doc.text_pages() {
            extractor.add_page(page);
        }

        let note = doc
            .is_unextractable()
            .then(|| EntityNote::UnextractableDocument { file: file.clone() });
        Ok((
            DocumentSummary {
                file,
                info: doc.info,
            },
            note,
        ))
    }

    /// Writes the two artifacts and a fresh worklog.
    fn persist(
        &self,
        paths: &ArtifactPaths,
        outcome: &ExtractionOutcome,
        report: &EntityReport,
    ) -> Result<(), StoreError> {
        paths.create_dirs()?;
        artifacts::write_word_list(&paths.word_list, &outcome.words())?;
        artifacts::write_records(&paths.records, &outcome.records)?;
        let max_terms = self.config.extract.max_terms;
        let log = worklog::render_generate(report, max_terms, &worklog::timestamp());
        worklog::write(&paths.worklog, &log)
    }
}
