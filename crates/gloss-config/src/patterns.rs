//! Document include pattern compilation and matching.

use std::path::Path;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};

use crate::ConfigError;

/// Compiled glob patterns selecting source documents inside an entity folder.
///
/// Patterns match against the file name only, since documents are looked up directly
/// inside each entity directory.
#[derive(Debug)]
pub struct DocumentPatterns {
    /// Compiled include patterns.
    include: GlobSet,
}

impl DocumentPatterns {
    /// Compiles include patterns into a single matcher.
    pub fn compile(patterns: &[String]) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(compile_glob(pattern)?);
        }
        let include = builder.build().map_err(|e| ConfigError::InvalidPattern {
            pattern: String::from("<combined document include patterns>"),
            source: e,
        })?;
        Ok(Self { include })
    }

    /// Checks whether a document path matches any include pattern.
    ///
    /// Returns `false` for paths without a file name.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.include.is_match(Path::new(name)))
    }
}

/// Compiles a single glob pattern.
///
/// Matching is case-insensitive so `REPORT.PDF` is picked up by `*.pdf`.
fn compile_glob(pattern: &str) -> Result<Glob, ConfigError> {
    GlobBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source: e,
        })
}
