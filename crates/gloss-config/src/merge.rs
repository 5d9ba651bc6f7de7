//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying
//! precedence rules.

use std::path::PathBuf;

use crate::{
    Config, ContextSettings, DocumentSettings, ExtractSettings, OutputSettings, RefineSettings,
    parse::{
        RawConfig, RawContextSettings, RawDocumentSettings, RawExtractSettings,
        RawOutputSettings, RawRefineSettings,
    },
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to
/// CWD), lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings and include patterns: first defined value wins
/// - Stopword lists: unioned across all files, lowest precedence first
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    if configs.is_empty() {
        return Config::default();
    }

    let mut config = Config {
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(PathBuf::from),
        ..Config::default()
    };

    // Lowest precedence first so higher precedence overwrites.
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(ref extract) = raw.extract {
            apply_raw_extract(&mut config.extract, extract);
        }
        if let Some(ref context) = raw.context {
            apply_raw_context(&mut config.context, context);
        }
        if let Some(ref documents) = raw.documents {
            apply_raw_documents(&mut config.documents, documents);
        }
        if let Some(ref output) = raw.output {
            apply_raw_output(&mut config.output, output);
        }
        if let Some(ref refine) = raw.refine {
            apply_raw_refine(&mut config.refine, refine);
        }
    }

    config
}

/// Applies raw extraction settings to result.
fn apply_raw_extract(result: &mut ExtractSettings, raw: &RawExtractSettings) {
    if let Some(v) = raw.max_terms {
        result.max_terms = v;
    }
    if let Some(v) = raw.min_term_chars {
        result.min_term_chars = v;
    }
    if let Some(v) = raw.max_term_chars {
        result.max_term_chars = v;
    }
    if let Some(v) = raw.max_phrase_tokens {
        result.max_phrase_tokens = v;
    }
    if let Some(v) = raw.chunk_chars {
        result.chunk_chars = v;
    }
    if let Some(ref words) = raw.stopwords {
        extend_unique(&mut result.stopwords, words);
    }
}

/// Applies raw context settings to result.
fn apply_raw_context(result: &mut ContextSettings, raw: &RawContextSettings) {
    if let Some(v) = raw.chars_before {
        result.chars_before = v;
    }
    if let Some(v) = raw.chars_after {
        result.chars_after = v;
    }
    if let Some(v) = raw.min_chars {
        result.min_chars = v;
    }
    if let Some(v) = raw.max_chars {
        result.max_chars = v;
    }
}

/// Applies raw document settings to result.
fn apply_raw_documents(result: &mut DocumentSettings, raw: &RawDocumentSettings) {
    if let Some(ref include) = raw.include {
        result.include = include.clone();
    }
}

/// Applies raw output settings to result.
fn apply_raw_output(result: &mut OutputSettings, raw: &RawOutputSettings) {
    if let Some(ref label) = raw.source_label {
        result.source_label = label.clone();
    }
}

/// Applies raw refinement settings to result.
fn apply_raw_refine(result: &mut RefineSettings, raw: &RawRefineSettings) {
    if let Some(ref words) = raw.stopwords {
        extend_unique(&mut result.stopwords, words);
    }
}

/// Appends words not already present, preserving order.
fn extend_unique(target: &mut Vec<String>, words: &[String]) {
    for word in words {
        if !target.contains(word) {
            target.push(word.clone());
        }
    }
}
