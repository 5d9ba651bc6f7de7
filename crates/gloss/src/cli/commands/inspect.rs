//! Implementation of `gloss inspect`.

use std::{collections::HashMap, path::Path, process::ExitCode};

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use gloss_document::{DefaultConverter, DocumentConverter, PageInfo};
use gloss_extract::{CandidateVerdict, ScriptTokenizer, TermExtractor, entity_name_from_dirname};
use serde::Serialize;

use crate::cli::{args::InspectCommand, context::CommandContext};

/// One distinct candidate with its verdict and how often it was produced.
#[derive(Debug, Serialize)]
struct CandidateRow {
    /// Candidate as built from the token run.
    candidate: String,
    /// Times the candidate was produced.
    seen: usize,
    /// Normalized word when accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    word: Option<String>,
    /// Rejection reason when rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection: Option<String>,
}

/// JSON output for `gloss inspect --json`.
#[derive(Serialize)]
struct JsonInspectOutput<'a> {
    /// Inspected file.
    file: String,
    /// Entity name used by the entity rules.
    entity: &'a str,
    /// Pages the converter produced.
    total_pages: usize,
    /// Pages with text.
    pages_with_text: usize,
    /// Distinct candidates in first-seen order.
    candidates: &'a [CandidateRow],
}

/// Shows each candidate of one document with its accept or reject verdict.
pub fn run(ctx: &CommandContext, cmd: &InspectCommand) -> ExitCode {
    let path = ctx.resolve(&cmd.file);
    if !path.is_file() {
        eprintln!("error: file not found: {}", cmd.file.display());
        return ExitCode::FAILURE;
    }

    let doc = match DefaultConverter::new().convert(&path) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let entity = cmd
        .entity
        .clone()
        .unwrap_or_else(|| entity_from_parent(&path));
    let extractor = TermExtractor::new(&ScriptTokenizer, &ctx.config, &entity);
    let verdicts = doc.text_pages().flat_map(|page| extractor.inspect_page(page));
    let rows: Vec<CandidateRow> = collapse(verdicts)
        .into_iter()
        .filter(|row| !cmd.rejected || row.rejection.is_some())
        .collect();

    if cmd.json {
        let output = JsonInspectOutput {
            file: path.display().to_string(),
            entity: &entity,
            total_pages: doc.info.total_pages,
            pages_with_text: doc.info.pages_with_text,
            candidates: &rows,
        };
        return match serde_json::to_string_pretty(&output) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: failed to serialize JSON: {e}");
                ExitCode::FAILURE
            }
        };
    }

    print_summary(&path, &entity, doc.info, &rows);
    ExitCode::SUCCESS
}

/// Entity name derived from the document's parent directory, or empty.
fn entity_from_parent(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .map(|name| entity_name_from_dirname(name).to_string())
        .unwrap_or_default()
}

/// Merges repeated candidates, keeping first-seen order.
fn collapse(verdicts: impl Iterator<Item = CandidateVerdict>) -> Vec<CandidateRow> {
    let mut rows: Vec<CandidateRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for verdict in verdicts {
        if let Some(&i) = index.get(&verdict.candidate) {
            rows[i].seen += 1;
            continue;
        }
        index.insert(verdict.candidate.clone(), rows.len());
        let (word, rejection) = match verdict.outcome {
            Ok(word) => (Some(word), None),
            Err(reason) => (None, Some(reason.to_string())),
        };
        rows.push(CandidateRow {
            candidate: verdict.candidate,
            seen: 1,
            word,
            rejection,
        });
    }
    rows
}

/// Prints the document header and the candidate table.
fn print_summary(path: &Path, entity: &str, info: PageInfo, rows: &[CandidateRow]) {
    println!("--- {} ---", path.display());
    println!(
        "pages: {} ({} with text)",
        info.total_pages, info.pages_with_text
    );
    println!("entity: {}", if entity.is_empty() { "-" } else { entity });
    let accepted = rows.iter().filter(|r| r.word.is_some()).count();
    println!(
        "candidates: {} distinct, {accepted} accepted",
        rows.len()
    );
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Candidate", "Seen", "Result"]);
    for row in rows {
        let result = match (&row.word, &row.rejection) {
            (Some(word), _) if *word == row.candidate => String::from("accepted"),
            (Some(word), _) => format!("accepted as {word}"),
            (None, Some(reason)) => format!("rejected: {reason}"),
            (None, None) => String::new(),
        };
        table.add_row(vec![
            Cell::new(&row.candidate),
            Cell::new(row.seen),
            Cell::new(result),
        ]);
    }
    println!("{table}");
}

#[cfg(test)]
mod tests {
    use gloss_extract::Rejection;

    use super::*;

    fn verdict(candidate: &str, outcome: Result<&str, Rejection>) -> CandidateVerdict {
        CandidateVerdict {
            candidate: candidate.to_string(),
            outcome: outcome.map(str::to_string),
        }
    }

    #[test]
    fn collapse_counts_repeats_in_order() {
        let rows = collapse(
            vec![
                verdict("売上高", Ok("売上高")),
                verdict("当社", Err(Rejection::Stopword)),
                verdict("売上高", Ok("売上高")),
            ]
            .into_iter(),
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].candidate, "売上高");
        assert_eq!(rows[0].seen, 2);
        assert_eq!(rows[0].word.as_deref(), Some("売上高"));
        assert!(rows[1].rejection.is_some());
    }

    #[test]
    fn entity_defaults_to_parent_directory() {
        assert_eq!(
            entity_from_parent(Path::new("/data/1_ExampleCo/report.pdf")),
            "ExampleCo"
        );
        assert_eq!(entity_from_parent(Path::new("report.pdf")), "");
    }
}
