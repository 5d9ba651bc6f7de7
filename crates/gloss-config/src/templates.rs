//! Configuration template for `gloss init`.
//!
//! The template is stored as a valid TOML file and returned as a commented-out example
//! configuration.

/// Local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Returns the local configuration template as a commented-out example.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Converts a valid TOML template into a commented-out example config.
///
/// Lines that are already comments are preserved as-is. Non-comment, non-empty
/// lines get a "# " prefix. Empty lines are preserved.
fn comment_template(template: &str) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    for line in template.lines() {
        if !line.is_empty() && !line.starts_with('#') {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{Config, ParsedConfig, merge_configs, parse::parse_config_str};

    #[test]
    fn local_template_parses_as_valid_toml() {
        let result = parse_config_str(LOCAL_TEMPLATE, Path::new("config.toml"));
        assert!(result.is_ok(), "local template failed to parse: {result:?}");
    }

    #[test]
    fn local_template_matches_defaults() {
        let raw = parse_config_str(LOCAL_TEMPLATE, Path::new("/t/config.toml")).unwrap();
        let merged = merge_configs(&[ParsedConfig {
            path: Path::new("/t/config.toml").to_path_buf(),
            config: raw,
        }]);
        let defaults = Config::default();
        assert_eq!(merged.extract, defaults.extract);
        assert_eq!(merged.context, defaults.context);
        assert_eq!(merged.documents, defaults.documents);
        assert_eq!(merged.output, defaults.output);
        assert_eq!(merged.refine, defaults.refine);
    }

    #[test]
    fn commented_template_parses_as_empty_config() {
        let commented = local_template();
        let raw = parse_config_str(&commented, Path::new("config.toml")).unwrap();
        assert!(raw.extract.is_none());
        assert!(raw.root.is_none());
    }

    #[test]
    fn comment_template_preserves_existing_comments() {
        let input = "# This is a comment\nkey = \"value\"\n";
        let result = comment_template(input);
        assert_eq!(result, "# This is a comment\n# key = \"value\"\n");
    }

    #[test]
    fn comment_template_preserves_empty_lines() {
        let input = "key1 = \"a\"\n\nkey2 = \"b\"\n";
        let result = comment_template(input);
        assert_eq!(result, "# key1 = \"a\"\n\n# key2 = \"b\"\n");
    }
}
