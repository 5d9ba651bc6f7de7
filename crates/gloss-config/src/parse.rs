//! Configuration file parsing.
//!
//! Parses individual `.gloss.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Extraction settings section.
    pub extract: Option<RawExtractSettings>,
    /// Context settings section.
    pub context: Option<RawContextSettings>,
    /// Document selection section.
    pub documents: Option<RawDocumentSettings>,
    /// Output settings section.
    pub output: Option<RawOutputSettings>,
    /// Refinement settings section.
    pub refine: Option<RawRefineSettings>,
}

/// Raw extraction settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawExtractSettings {
    /// Maximum number of terms kept per entity.
    pub max_terms: Option<usize>,
    /// Minimum term length in characters.
    pub min_term_chars: Option<usize>,
    /// Maximum term length in characters.
    pub max_term_chars: Option<usize>,
    /// Maximum number of tokens in one phrase candidate.
    pub max_phrase_tokens: Option<usize>,
    /// Characters handed to the tokenizer at a time.
    pub chunk_chars: Option<usize>,
    /// Extra pass-1 stopwords.
    pub stopwords: Option<Vec<String>>,
}

/// Raw context snippet settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawContextSettings {
    /// Characters taken before the match.
    pub chars_before: Option<usize>,
    /// Characters taken after the match.
    pub chars_after: Option<usize>,
    /// Minimum snippet length.
    pub min_chars: Option<usize>,
    /// Maximum snippet length before truncation.
    pub max_chars: Option<usize>,
}

/// Raw document selection settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDocumentSettings {
    /// Glob pattern(s) matched against document file names.
    /// Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub include: Option<Vec<String>>,
}

/// Raw output settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOutputSettings {
    /// Label written to each record's `metadata.source`.
    pub source_label: Option<String>,
}

/// Raw refinement settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRefineSettings {
    /// Extra pass-2 generic stopwords.
    pub stopwords: Option<Vec<String>>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.extract.is_none());
        assert!(config.context.is_none());
        assert!(config.documents.is_none());
        assert!(config.output.is_none());
        assert!(config.refine.is_none());
    }

    #[test]
    fn test_parse_extract_settings() {
        let toml = r#"
[extract]
max_terms = 500
max_phrase_tokens = 4
stopwords = ["弊社", "同社"]
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let extract = config.extract.unwrap();
        assert_eq!(extract.max_terms, Some(500));
        assert_eq!(extract.max_phrase_tokens, Some(4));
        assert!(extract.min_term_chars.is_none());
        assert_eq!(
            extract.stopwords,
            Some(vec!["弊社".to_string(), "同社".to_string()])
        );
    }

    #[test]
    fn test_parse_context_settings() {
        let toml = r#"
[context]
chars_before = 40
max_chars = 100
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let context = config.context.unwrap();
        assert_eq!(context.chars_before, Some(40));
        assert_eq!(context.max_chars, Some(100));
        assert!(context.chars_after.is_none());
    }

    #[test]
    fn test_parse_include_single_string() {
        let toml = r#"
[documents]
include = "*.pdf"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(
            config.documents.unwrap().include,
            Some(vec!["*.pdf".to_string()])
        );
    }

    #[test]
    fn test_parse_include_list() {
        let toml = r#"
[documents]
include = ["*.pdf", "*.md"]
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(
            config.documents.unwrap().include,
            Some(vec!["*.pdf".to_string(), "*.md".to_string()])
        );
    }

    #[test]
    fn test_parse_output_and_refine() {
        let toml = r#"
root = true

[output]
source_label = "統合報告書"

[refine]
stopwords = ["概要"]
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.root, Some(true));
        assert_eq!(
            config.output.unwrap().source_label,
            Some("統合報告書".to_string())
        );
        assert_eq!(
            config.refine.unwrap().stopwords,
            Some(vec!["概要".to_string()])
        );
    }

    #[test]
    fn test_parse_invalid_toml() {
        let toml = "this is not valid toml [[[";
        let result = parse_config_str(toml, Path::new("test.toml"));
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }
}
