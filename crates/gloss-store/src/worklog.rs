//! Markdown worklog written next to each entity's artifacts.

use std::{fs, io::ErrorKind, path::Path};

use chrono::{Local, SecondsFormat};

use crate::{
    EntityReport, RefineStats, StoreError,
    artifacts::{METADATA_DIR, WORD_LIST_DIR},
};

/// Current local time, RFC 3339 at second precision.
pub fn timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Title line of a worklog.
fn title(entity: &str) -> String {
    format!("# Worklog: {entity}\n")
}

/// Renders the worklog for a generation run.
pub fn render_generate(report: &EntityReport, max_terms: usize, run_at: &str) -> String {
    let total_pages: usize = report.documents.iter().map(|d| d.info.total_pages).sum();
    let text_pages: usize = report.documents.iter().map(|d| d.info.pages_with_text).sum();
    let inputs = if report.documents.is_empty() {
        String::from("none")
    } else {
        report
            .documents
            .iter()
            .map(|d| d.file.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut lines = vec![
        title(&report.entity.name),
        format!("- Run at: {run_at}"),
        format!("- Source: `{}`", report.entity.dir.display()),
        format!("- Input documents: {inputs}"),
        format!("- Pages: {total_pages} total ({text_pages} with extractable text)"),
        format!("- Unique candidates: {}", report.unique_candidates),
        format!("- Terms written: {} (cap {max_terms})", report.terms),
        String::new(),
        String::from("## Procedure"),
        String::from("- Extracted page text and collected noun-centred term candidates"),
        String::from(
            "- Filtered out stopwords, function words, numbers, dates, section markers, URLs, and the entity name",
        ),
        format!("- Deduplicated and kept up to {max_terms} terms by frequency"),
        format!("- Wrote `{WORD_LIST_DIR}/` and `{METADATA_DIR}/` with minimal tags per term"),
    ];

    if !report.notes.is_empty() {
        lines.push(String::new());
        lines.push(String::from("## Notes"));
        lines.extend(report.notes.iter().map(|note| format!("- {note}")));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Renders the section appended by a refinement run.
pub fn render_refine(stats: &RefineStats, run_at: &str) -> String {
    let lines = [
        String::from("## Refinement"),
        format!("- Run at: {run_at}"),
        format!(
            "- Terms: {} -> {} ({} removed)",
            stats.words_in,
            stats.words_out,
            stats.words_removed()
        ),
        format!("- Records: {} -> {}", stats.records_in, stats.records_out),
        format!("- Descriptions dropped: {}", stats.descriptions_dropped),
        String::from(
            "- Rules: filing form terms, filing codes, date and unit fragments, footnotes, generic words, and the entity name",
        ),
    ];
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Writes a fresh worklog, replacing any previous one.
pub fn write(path: &Path, contents: &str) -> Result<(), StoreError> {
    fs::write(path, contents).map_err(|e| StoreError::write(path, e))
}

/// Appends a section to a worklog, creating it with a title if absent.
///
/// Existing content is kept; only trailing whitespace is normalized.
pub fn append(path: &Path, entity: &str, section: &str) -> Result<(), StoreError> {
    let mut contents = match fs::read_to_string(path) {
        Ok(existing) => existing.trim_end().to_string(),
        Err(e) if e.kind() == ErrorKind::NotFound => title(entity).trim_end().to_string(),
        Err(e) => return Err(StoreError::read(path, e)),
    };
    contents.push_str("\n\n");
    contents.push_str(section);
    if !contents.ends_with('\n') {
        contents.push('\n');
    }
    write(path, &contents)
}
