//! The refine stage: a stricter second pass over persisted artifacts.
//!
//! Each stage is its own type, so an entity's artifacts can only move through
//! load, filter, synchronize, and persist in that order:
//!
//! ```text
//! LoadedArtifacts --filter--> FilteredArtifacts --synchronize--> SynchronizedArtifacts --persist--> RefineStats
//! ```

use std::{collections::HashMap, path::Path};

use gloss_config::Config;
use gloss_extract::{NoiseFilter, TermRecord, TermTagger, scrub_description};
use tracing::{debug, info};

use crate::{
    Entity, StoreError,
    artifacts::{self, ArtifactPaths},
    discover_entities, worklog,
};

/// Counts from one refinement run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefineStats {
    /// Words read from the word list.
    pub words_in: usize,
    /// Words written back.
    pub words_out: usize,
    /// Records read from the record list.
    pub records_in: usize,
    /// Records written back.
    pub records_out: usize,
    /// Descriptions removed as noise.
    pub descriptions_dropped: usize,
}

impl RefineStats {
    /// Number of words removed from the word list.
    pub const fn words_removed(&self) -> usize {
        self.words_in.saturating_sub(self.words_out)
    }
}

/// Refinement outcome for one entity.
#[derive(Debug, Clone)]
pub struct RefineReport {
    /// The refined entity.
    pub entity: Entity,
    /// Its counts.
    pub stats: RefineStats,
}

/// Both artifacts as read from disk.
#[derive(Debug)]
pub struct LoadedArtifacts {
    /// Where the artifacts live.
    paths: ArtifactPaths,
    /// Word list lines.
    words: Vec<String>,
    /// Parsed records.
    records: Vec<TermRecord>,
}

impl LoadedArtifacts {
    /// Reads both artifacts of an entity output directory.
    pub fn load(entity_dir: &Path) -> Result<Self, StoreError> {
        let paths = ArtifactPaths::new(entity_dir);
        let words = artifacts::read_word_list(&paths.word_list)?;
        let records = artifacts::read_records(&paths.records)?;
        Ok(Self {
            paths,
            words,
            records,
        })
    }

    /// Words as loaded.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Records as loaded.
    pub fn records(&self) -> &[TermRecord] {
        &self.records
    }

    /// Drops rejected words and records.
    pub fn filter(self, noise: &NoiseFilter) -> FilteredArtifacts {
        let stats = RefineStats {
            words_in: self.words.len(),
            records_in: self.records.len(),
            ..RefineStats::default()
        };

        let words = noise.filter_words(&self.words);
        let records = self
            .records
            .into_iter()
            .filter_map(|mut record| {
                record.word = record.word.trim().to_string();
                noise.rejection(&record.word).is_none().then_some(record)
            })
            .collect();

        FilteredArtifacts {
            paths: self.paths,
            words,
            records,
            stats,
        }
    }
}

/// Artifacts after the noise filter, not yet aligned with each other.
#[derive(Debug)]
pub struct FilteredArtifacts {
    /// Where the artifacts live.
    paths: ArtifactPaths,
    /// Surviving words, deduplicated.
    words: Vec<String>,
    /// Surviving records, in file order.
    records: Vec<TermRecord>,
    /// Counts so far.
    stats: RefineStats,
}

impl FilteredArtifacts {
    /// Surviving words.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Rebuilds the records in word-list order, one per word.
    ///
    /// The first record of a word wins and has its description scrubbed. Words
    /// without a record get a freshly tagged one.
    pub fn synchronize(self, tagger: &TermTagger) -> SynchronizedArtifacts {
        let mut by_word: HashMap<String, TermRecord> = HashMap::new();
        for record in self.records {
            by_word.entry(record.word.clone()).or_insert(record);
        }

        let mut descriptions_dropped = 0;
        let records: Vec<TermRecord> = self
            .words
            .iter()
            .map(|word| match by_word.remove(word) {
                Some(mut record) => {
                    if scrub_description(&mut record) {
                        descriptions_dropped += 1;
                    }
                    record
                }
                None => {
                    debug!(word, "tagging word without a record");
                    TermRecord::new(word.clone(), None, tagger.tag(word))
                }
            })
            .collect();

        SynchronizedArtifacts {
            paths: self.paths,
            stats: RefineStats {
                words_out: self.words.len(),
                records_out: records.len(),
                descriptions_dropped,
                ..self.stats
            },
            words: self.words,
            records,
        }
    }
}

/// Artifacts holding exactly the same words in the same order.
#[derive(Debug)]
pub struct SynchronizedArtifacts {
    /// Where the artifacts live.
    paths: ArtifactPaths,
    /// Final words.
    words: Vec<String>,
    /// Final records, aligned with `words`.
    records: Vec<TermRecord>,
    /// Final counts.
    stats: RefineStats,
}

impl SynchronizedArtifacts {
    /// Final records.
    pub fn records(&self) -> &[TermRecord] {
        &self.records
    }

    /// Overwrites both artifacts and appends a refinement section to the worklog.
    pub fn persist(self, entity: &str) -> Result<RefineStats, StoreError> {
        artifacts::write_word_list(&self.paths.word_list, &self.words)?;
        artifacts::write_records(&self.paths.records, &self.records)?;
        let section = worklog::render_refine(&self.stats, &worklog::timestamp());
        worklog::append(&self.paths.worklog, entity, &section)?;
        Ok(self.stats)
    }
}

/// Refines one entity's artifacts in place.
pub fn refine_entity(entity: &Entity, config: &Config) -> Result<RefineStats, StoreError> {
    let noise = NoiseFilter::new(&config.extract, &config.refine, &entity.name);
    let tagger = TermTagger::new(config.output.source_label.as_str(), entity.name.as_str());

    let stats = LoadedArtifacts::load(&entity.dir)?
        .filter(&noise)
        .synchronize(&tagger)
        .persist(&entity.name)?;

    debug!(
        entity = %entity.slug,
        words_in = stats.words_in,
        words_out = stats.words_out,
        records_in = stats.records_in,
        records_out = stats.records_out,
        descriptions_dropped = stats.descriptions_dropped,
        "refined"
    );
    Ok(stats)
}

/// Refines every entity directory under `output_root`, in name order.
///
/// The first missing or malformed artifact stops the batch.
pub fn refine_all(output_root: &Path, config: &Config) -> Result<Vec<RefineReport>, StoreError> {
    let entities = discover_entities(output_root)?;
    let mut reports = Vec::with_capacity(entities.len());
    for entity in entities {
        info!(entity = %entity.slug, "refining");
        let stats = refine_entity(&entity, config)?;
        reports.push(RefineReport { entity, stats });
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use gloss_extract::{ConceptType, RecordMetadata};
    use tempfile::TempDir;

    use super::*;

    fn record(word: &str, description: Option<&str>) -> TermRecord {
        TermRecord::new(
            word,
            description.map(str::to_string),
            RecordMetadata::noun(ConceptType::Other, None, "有価証券報告書", "ExampleCo"),
        )
    }

    fn seed(words: &[&str], records: &[TermRecord]) -> (TempDir, Entity) {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("1_ExampleCo");
        let paths = ArtifactPaths::new(&dir);
        paths.create_dirs().unwrap();
        artifacts::write_word_list(&paths.word_list, words).unwrap();
        artifacts::write_records(&paths.records, records).unwrap();
        let entity = Entity::from_dir(&dir).unwrap();
        (root, entity)
    }

    #[test]
    fn filters_and_synchronizes() {
        let description = "当社の売上高は前期比で増加した。";
        let (_root, entity) = seed(
            &["売上高", "E01234", "ROE", "売上高", "体制"],
            &[
                record("体制", Some("短い")),
                record("売上高", Some(description)),
                record("E01234", None),
                record("売上高", None),
                record("不要語", None),
            ],
        );

        let stats = refine_entity(&entity, &Config::default()).unwrap();
        assert_eq!(
            stats,
            RefineStats {
                words_in: 5,
                words_out: 3,
                records_in: 5,
                records_out: 3,
                descriptions_dropped: 1,
            }
        );

        let paths = ArtifactPaths::new(&entity.dir);
        let words = artifacts::read_word_list(&paths.word_list).unwrap();
        let records = artifacts::read_records(&paths.records).unwrap();
        assert_eq!(words, vec!["売上高", "ROE", "体制"]);
        let record_words: Vec<_> = records.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(record_words, vec!["売上高", "ROE", "体制"]);

        assert_eq!(records[0].description.as_deref(), Some(description));
        assert_eq!(records[1].metadata.concept_type, ConceptType::Metric);
        assert_eq!(records[1].description, None);
        assert_eq!(records[2].description, None);
    }

    #[test]
    fn only_kept_records_count_as_dropped() {
        let description = "当社の売上高は前期比で増加した。";
        let (_root, entity) = seed(
            &["売上高"],
            &[
                record("売上高", Some(description)),
                record("売上高", Some("短い")),
                record("孤立語", Some("短い")),
            ],
        );

        let stats = refine_entity(&entity, &Config::default()).unwrap();
        assert_eq!(stats.descriptions_dropped, 0);
        assert_eq!(stats.records_out, 1);

        let paths = ArtifactPaths::new(&entity.dir);
        let records = artifacts::read_records(&paths.records).unwrap();
        assert_eq!(records[0].description.as_deref(), Some(description));
    }

    #[test]
    fn second_pass_changes_nothing() {
        let (_root, entity) = seed(
            &["売上高", "(1)", "ガバナンス体制"],
            &[record("売上高", None), record("(1)", None)],
        );
        let config = Config::default();
        refine_entity(&entity, &config).unwrap();

        let paths = ArtifactPaths::new(&entity.dir);
        let words_once = fs::read_to_string(&paths.word_list).unwrap();
        let records_once = fs::read_to_string(&paths.records).unwrap();

        let stats = refine_entity(&entity, &config).unwrap();
        assert_eq!(stats.words_removed(), 0);
        assert_eq!(stats.descriptions_dropped, 0);
        assert_eq!(fs::read_to_string(&paths.word_list).unwrap(), words_once);
        assert_eq!(fs::read_to_string(&paths.records).unwrap(), records_once);

        let log = fs::read_to_string(&paths.worklog).unwrap();
        assert!(log.starts_with("# Worklog: ExampleCo\n"));
        assert_eq!(log.matches("## Refinement").count(), 2);
    }

    #[test]
    fn missing_records_is_an_error() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("1_ExampleCo");
        let paths = ArtifactPaths::new(&dir);
        paths.create_dirs().unwrap();
        artifacts::write_word_list(&paths.word_list, &["売上高"]).unwrap();

        let result = LoadedArtifacts::load(&dir);
        assert!(matches!(result, Err(StoreError::MissingArtifact { .. })));
    }

    #[test]
    fn stages_expose_intermediate_state() {
        let (_root, entity) = seed(&["売上高", "当社"], &[record("当社", None)]);
        let config = Config::default();
        let noise = NoiseFilter::new(&config.extract, &config.refine, &entity.name);
        let tagger = TermTagger::new("有価証券報告書", "ExampleCo");

        let loaded = LoadedArtifacts::load(&entity.dir).unwrap();
        assert_eq!(loaded.words().len(), 2);
        assert_eq!(loaded.records().len(), 1);

        let filtered = loaded.filter(&noise);
        assert_eq!(filtered.words(), ["売上高"]);

        let synced = filtered.synchronize(&tagger);
        assert_eq!(synced.records()[0].word, "売上高");
        assert_eq!(synced.records()[0].metadata.concept_type, ConceptType::Metric);
    }
}
