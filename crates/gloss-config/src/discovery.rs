//! Locating `.gloss.toml` files for a working directory.
//!
//! Project files are collected from the working directory upward. A file declaring
//! `root = true` seals the chain: nothing above it is read, and neither is the global
//! `~/.gloss.toml`.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".gloss.toml";

/// Project config files found above a directory.
#[derive(Debug, Default)]
struct ProjectConfigs {
    /// Files in precedence order, closest first.
    files: Vec<PathBuf>,
    /// Whether a `root = true` file ended the walk.
    sealed: bool,
}

impl ProjectConfigs {
    /// Walks from `start` to the filesystem root.
    fn collect(start: &Path) -> Self {
        let mut found = Self::default();
        let candidates = start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .filter(|path| path.is_file());
        for path in candidates {
            found.sealed = is_root_config(&path);
            found.files.push(path);
            if found.sealed {
                break;
            }
        }
        found
    }
}

/// Lists the configuration files that apply to `cwd`.
///
/// Paths come in precedence order: closest project file first, the global file last.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let ProjectConfigs { mut files, sealed } = ProjectConfigs::collect(cwd);
    if sealed {
        return files;
    }
    if let Some(global) = global_config_path().filter(|path| path.is_file())
        && !files.contains(&global)
    {
        files.push(global);
    }
    files
}

/// Path of the global configuration file, `~/.gloss.toml`.
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    /// Writes `content` to `<root>/<dir>/.gloss.toml`, creating `dir`.
    fn write_config(root: &TempDir, dir: &str, content: &str) -> PathBuf {
        let dir = root.path().join(dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn empty_tree_has_no_project_files() {
        let root = TempDir::new().unwrap();
        let deep = root.path().join("resources/1_ExampleCo");
        fs::create_dir_all(&deep).unwrap();

        let found = ProjectConfigs::collect(&deep);
        assert!(found.files.iter().all(|p| !p.starts_with(root.path())));
    }

    #[test]
    fn closest_file_comes_first() {
        let root = TempDir::new().unwrap();
        let outer = write_config(&root, "", "[output]\nsource_label = \"outer\"\n");
        let inner = write_config(&root, "project/sub", "[output]\nsource_label = \"inner\"\n");

        let found = ProjectConfigs::collect(&root.path().join("project/sub"));
        let local: Vec<_> = found
            .files
            .into_iter()
            .filter(|p| p.starts_with(root.path()))
            .collect();
        assert_eq!(local, vec![inner, outer]);
    }

    #[test]
    fn root_file_seals_the_chain() {
        let root = TempDir::new().unwrap();
        write_config(&root, "", "");
        let project = write_config(&root, "project", "root = true\n");
        fs::create_dir_all(root.path().join("project/output")).unwrap();

        let found = ProjectConfigs::collect(&root.path().join("project/output"));
        assert!(found.sealed);
        assert_eq!(found.files, vec![project.clone()]);
        assert_eq!(
            discover_config_files(&root.path().join("project/output")),
            vec![project]
        );
    }

    #[test]
    fn directory_named_like_a_config_is_skipped() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("project").join(CONFIG_FILENAME)).unwrap();
        let outer = write_config(&root, "", "root = true\n");

        let found = ProjectConfigs::collect(&root.path().join("project"));
        assert_eq!(found.files, vec![outer]);
    }

    #[test]
    fn global_path_uses_config_filename() {
        if let Some(path) = global_config_path() {
            assert!(path.ends_with(CONFIG_FILENAME));
        }
    }
}
