//! On-disk layout and I/O for the two parallel output artifacts.
//!
//! Per entity, under `<output>/<slug>/`:
//! - `wordList/wordList.txt`: one term per line
//! - `metadata/wordList.jsonl`: one [`TermRecord`] per line, in the same order
//! - `worklog.md`: human-readable run log

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use gloss_extract::TermRecord;

use crate::StoreError;

/// Directory holding the plain word list.
pub const WORD_LIST_DIR: &str = "wordList";
/// File name of the plain word list.
pub const WORD_LIST_FILE: &str = "wordList.txt";
/// Directory holding the enriched records.
pub const METADATA_DIR: &str = "metadata";
/// File name of the enriched records.
pub const RECORDS_FILE: &str = "wordList.jsonl";
/// File name of the worklog.
pub const WORKLOG_FILE: &str = "worklog.md";

/// Paths of one entity's artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// The entity's output directory.
    pub dir: PathBuf,
    /// Plain word list.
    pub word_list: PathBuf,
    /// Enriched record list.
    pub records: PathBuf,
    /// Worklog.
    pub worklog: PathBuf,
}

impl ArtifactPaths {
    /// Artifact paths inside an entity output directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            word_list: dir.join(WORD_LIST_DIR).join(WORD_LIST_FILE),
            records: dir.join(METADATA_DIR).join(RECORDS_FILE),
            worklog: dir.join(WORKLOG_FILE),
            dir,
        }
    }

    /// Artifact paths for an entity slug under an output root.
    pub fn for_entity(output_root: &Path, slug: &str) -> Self {
        Self::new(output_root.join(slug))
    }

    /// Creates the artifact directories.
    pub fn create_dirs(&self) -> Result<(), StoreError> {
        for path in [&self.word_list, &self.records] {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| StoreError::write(parent, e))?;
            }
        }
        Ok(())
    }
}

/// Reads a file, mapping a missing file to `MissingArtifact`.
fn read_artifact(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => StoreError::MissingArtifact {
            path: path.to_path_buf(),
        },
        _ => StoreError::read(path, e),
    })
}

/// Reads the word list: non-empty lines, trimmed.
pub fn read_word_list(path: &Path) -> Result<Vec<String>, StoreError> {
    let contents = read_artifact(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Writes the word list, one newline-terminated term per line.
pub fn write_word_list<S: AsRef<str>>(path: &Path, words: &[S]) -> Result<(), StoreError> {
    let mut contents = String::new();
    for word in words {
        contents.push_str(word.as_ref());
        contents.push('\n');
    }
    fs::write(path, contents).map_err(|e| StoreError::write(path, e))
}

/// Reads the record list, skipping blank lines.
pub fn read_records(path: &Path) -> Result<Vec<TermRecord>, StoreError> {
    let contents = read_artifact(path)?;
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line.trim()).map_err(|source| StoreError::ParseRecord {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })
        })
        .collect()
}

/// Writes the record list as NDJSON with non-ASCII text kept verbatim.
pub fn write_records(path: &Path, records: &[TermRecord]) -> Result<(), StoreError> {
    let mut contents = String::new();
    for record in records {
        contents.push_str(&serde_json::to_string(record).map_err(StoreError::Serialize)?);
        contents.push('\n');
    }
    fs::write(path, contents).map_err(|e| StoreError::write(path, e))
}

#[cfg(test)]
mod tests {
    use gloss_extract::{ConceptType, RecordMetadata};
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn layout() {
        let paths = ArtifactPaths::for_entity(Path::new("/out"), "1_ExampleCo");
        assert_eq!(paths.dir, Path::new("/out/1_ExampleCo"));
        assert_eq!(
            paths.word_list,
            Path::new("/out/1_ExampleCo/wordList/wordList.txt")
        );
        assert_eq!(
            paths.records,
            Path::new("/out/1_ExampleCo/metadata/wordList.jsonl")
        );
        assert_eq!(paths.worklog, Path::new("/out/1_ExampleCo/worklog.md"));
    }

    #[test]
    fn word_list_io() {
        let dir = TempDir::new().unwrap();
        let paths = ArtifactPaths::new(dir.path());
        paths.create_dirs().unwrap();

        write_word_list(&paths.word_list, &["売上高", "ROE"]).unwrap();
        assert_eq!(
            fs::read_to_string(&paths.word_list).unwrap(),
            "売上高\nROE\n"
        );

        fs::write(&paths.word_list, " 売上高 \n\n\nROE").unwrap();
        assert_eq!(read_word_list(&paths.word_list).unwrap(), vec!["売上高", "ROE"]);
    }

    #[test]
    fn records_are_written_verbatim() {
        let dir = TempDir::new().unwrap();
        let paths = ArtifactPaths::new(dir.path());
        paths.create_dirs().unwrap();

        let meta = RecordMetadata::noun(ConceptType::Metric, None, "有価証券報告書", "例");
        let records = vec![TermRecord::new("売上高", None, meta)];
        write_records(&paths.records, &records).unwrap();

        let text = fs::read_to_string(&paths.records).unwrap();
        assert!(text.contains("\"売上高\""));
        assert!(text.ends_with('\n'));
        assert_eq!(read_records(&paths.records).unwrap(), records);
    }

    #[test]
    fn bad_record_line_reports_position() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.jsonl");
        fs::write(&path, "\n{not json}\n").unwrap();

        match read_records(&path) {
            Err(StoreError::ParseRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_artifacts_are_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wordList.txt");
        assert!(matches!(
            read_word_list(&path),
            Err(StoreError::MissingArtifact { .. })
        ));
    }
}
