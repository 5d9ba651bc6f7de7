//! Entity and document discovery.
//!
//! An entity is a direct subdirectory of the resources root (or of the output root,
//! during refinement). Its documents are the regular files directly inside it that match
//! the configured include globs.

use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
};

use gloss_config::DocumentPatterns;
use gloss_extract::entity_name_from_dirname;
use walkdir::{DirEntry, WalkDir};

use crate::StoreError;

/// A named subject with its own folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Directory name, ordinal prefix included. Names the output folder.
    pub slug: String,
    /// Display name with any `<ordinal>_` prefix removed.
    pub name: String,
    /// The entity's directory.
    pub dir: PathBuf,
}

impl Entity {
    /// Builds an entity from its directory. Returns `None` for paths without a UTF-8
    /// file name.
    pub fn from_dir(dir: &Path) -> Option<Self> {
        let slug = dir.file_name()?.to_str()?.to_string();
        let name = entity_name_from_dirname(&slug).to_string();
        Some(Self {
            slug,
            name,
            dir: dir.to_path_buf(),
        })
    }

    /// Lists the entity's documents in file-name order.
    pub fn documents(&self, patterns: &DocumentPatterns) -> Result<Vec<PathBuf>, StoreError> {
        let mut documents = Vec::new();
        for entry in shallow_walk(&self.dir) {
            let entry = entry.map_err(|e| StoreError::read(&self.dir, io::Error::from(e)))?;
            if entry.file_type().is_file() && patterns.matches(entry.path()) {
                documents.push(entry.into_path());
            }
        }
        Ok(documents)
    }
}

/// Lists the entities under `root`, sorted by directory name.
///
/// Fails with `MissingRoot` when `root` is not a directory and with `NoEntities` when it
/// has no visible subdirectories.
pub fn discover_entities(root: &Path) -> Result<Vec<Entity>, StoreError> {
    if !root.is_dir() {
        return Err(StoreError::MissingRoot {
            path: root.to_path_buf(),
        });
    }

    let mut entities = Vec::new();
    for entry in shallow_walk(root) {
        let entry = entry.map_err(|e| StoreError::read(root, io::Error::from(e)))?;
        if !entry.file_type().is_dir() || is_hidden(entry.file_name()) {
            continue;
        }
        if let Some(entity) = Entity::from_dir(entry.path()) {
            entities.push(entity);
        }
    }

    if entities.is_empty() {
        return Err(StoreError::NoEntities {
            path: root.to_path_buf(),
        });
    }
    Ok(entities)
}

/// Walks the direct children of `dir` in file-name order.
fn shallow_walk(dir: &Path) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
}

/// Checks if a file name is hidden (starts with '.').
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn patterns() -> DocumentPatterns {
        DocumentPatterns::compile(&["*.pdf".to_string(), "*.txt".to_string()]).unwrap()
    }

    #[test]
    fn entity_name_drops_ordinal() {
        let entity = Entity::from_dir(Path::new("/data/2_ExampleCo")).unwrap();
        assert_eq!(entity.slug, "2_ExampleCo");
        assert_eq!(entity.name, "ExampleCo");
    }

    #[test]
    fn discovers_sorted_subdirectories() {
        let root = TempDir::new().unwrap();
        for name in ["2_Beta", "1_Alpha", ".cache"] {
            fs::create_dir(root.path().join(name)).unwrap();
        }
        fs::write(root.path().join("notes.txt"), "x").unwrap();

        let entities = discover_entities(root.path()).unwrap();
        let slugs: Vec<_> = entities.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["1_Alpha", "2_Beta"]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("nope");
        assert!(matches!(
            discover_entities(&missing),
            Err(StoreError::MissingRoot { .. })
        ));
    }

    #[test]
    fn root_without_entities_is_an_error() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("stray.pdf"), "x").unwrap();
        assert!(matches!(
            discover_entities(root.path()),
            Err(StoreError::NoEntities { .. })
        ));
    }

    #[test]
    fn documents_match_patterns_in_name_order() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("1_Alpha");
        fs::create_dir_all(dir.join("nested")).unwrap();
        for name in ["b.pdf", "a.TXT", "image.png", "nested/c.pdf"] {
            fs::write(dir.join(name), "x").unwrap();
        }

        let entity = Entity::from_dir(&dir).unwrap();
        let docs = entity.documents(&patterns()).unwrap();
        let names: Vec<_> = docs
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.TXT", "b.pdf"]);
    }
}
