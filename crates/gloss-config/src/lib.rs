//! Configuration system for gloss.
//!
//! gloss uses TOML configuration files named `.gloss.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.gloss.toml` files found, then loading `~/.gloss.toml` as the global config with lowest
//! precedence.
//!
//! Every setting has a default, so running without any configuration file is normal.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod patterns;
mod templates;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawContextSettings, RawDocumentSettings, RawExtractSettings, RawOutputSettings,
    RawRefineSettings, parse_config_file, parse_config_str,
};
pub use patterns::DocumentPatterns;
use serde::{Deserialize, Serialize};
pub use templates::local_template;

/// Top-level merged configuration for gloss.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.gloss.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Candidate extraction and pass-1 filtering settings.
    pub extract: ExtractSettings,
    /// Context snippet settings.
    pub context: ContextSettings,
    /// Source document selection.
    pub documents: DocumentSettings,
    /// Settings for the persisted artifacts.
    pub output: OutputSettings,
    /// Pass-2 refinement settings.
    pub refine: RefineSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.gloss.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Compiles the document include patterns.
    pub fn document_patterns(&self) -> Result<DocumentPatterns, ConfigError> {
        DocumentPatterns::compile(&self.documents.include)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same shape as a `.gloss.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            extract: &self.extract,
            context: &self.context,
            documents: &self.documents,
            output: &self.output,
            refine: &self.refine,
        };
        toml::to_string_pretty(&serializable).map_err(ConfigError::SerializeToml)
    }
}

/// Settings for candidate extraction and the pass-1 filter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractSettings {
    /// Maximum number of terms kept per entity.
    pub max_terms: usize,
    /// Minimum term length in characters.
    pub min_term_chars: usize,
    /// Maximum term length in characters.
    pub max_term_chars: usize,
    /// Maximum number of tokens joined into one phrase candidate.
    pub max_phrase_tokens: usize,
    /// Characters handed to the tokenizer at a time.
    pub chunk_chars: usize,
    /// Extra stopwords added to the built-in pass-1 set.
    pub stopwords: Vec<String>,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            max_terms: 10_000,
            min_term_chars: 2,
            max_term_chars: 40,
            max_phrase_tokens: 6,
            chunk_chars: 10_000,
            stopwords: Vec::new(),
        }
    }
}

/// Settings for first-occurrence context snippets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContextSettings {
    /// Characters taken before the match.
    pub chars_before: usize,
    /// Characters taken after the match.
    pub chars_after: usize,
    /// Snippets shorter than this are discarded.
    pub min_chars: usize,
    /// Snippets longer than this are truncated with an ellipsis.
    pub max_chars: usize,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            chars_before: 80,
            chars_after: 140,
            min_chars: 6,
            max_chars: 160,
        }
    }
}

/// Settings for selecting source documents inside an entity folder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DocumentSettings {
    /// Glob patterns matched against document file names.
    pub include: Vec<String>,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            include: vec!["*.pdf".to_string(), "*.txt".to_string()],
        }
    }
}

/// Settings for the persisted artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Label written to each record's `metadata.source`.
    pub source_label: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            source_label: String::from("有価証券報告書"),
        }
    }
}

/// Settings for the pass-2 refinement filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RefineSettings {
    /// Extra generic stopwords added to the built-in pass-2 set.
    pub stopwords: Vec<String>,
}

/// Borrowed view of the settings sections for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Extraction settings.
    extract: &'a ExtractSettings,
    /// Context settings.
    context: &'a ContextSettings,
    /// Document settings.
    documents: &'a DocumentSettings,
    /// Output settings.
    output: &'a OutputSettings,
    /// Refinement settings.
    refine: &'a RefineSettings,
}
