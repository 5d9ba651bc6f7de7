//! Implementation of `gloss generate`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use gloss_document::DefaultConverter;
use gloss_extract::ScriptTokenizer;
use gloss_store::{Entity, EntityReport, Generator, ProgressReporter};

use crate::cli::{args::GenerateCommand, context::CommandContext};

/// Prints one progress line per entity to stderr.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_entity_start(&mut self, entity: &Entity, current: usize, total: usize) {
        eprintln!("[{current}/{total}] {}", entity.slug);
    }

    fn on_entity_done(&mut self, report: &EntityReport) {
        for note in &report.notes {
            eprintln!("  note: {note}");
        }
    }
}

/// Extracts glossaries for every entity under the resources directory.
pub fn run(ctx: &CommandContext, cmd: &GenerateCommand) -> ExitCode {
    let resources = ctx.resolve(&cmd.resources);
    let output = ctx.resolve(&cmd.output);

    let converter = DefaultConverter::new();
    let generator = match Generator::new(&ctx.config, &converter, &ScriptTokenizer) {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let reports = match generator.generate_all(&resources, &output, &mut ConsoleReporter) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", summary_table(&reports));
    println!(
        "Wrote {} entit{} to {}",
        reports.len(),
        if reports.len() == 1 { "y" } else { "ies" },
        output.display()
    );
    ExitCode::SUCCESS
}

/// Builds the per-entity summary table.
fn summary_table(reports: &[EntityReport]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        "Entity",
        "Documents",
        "Pages",
        "Candidates",
        "Terms",
        "Notes",
    ]);
    for report in reports {
        let total_pages: usize = report.documents.iter().map(|d| d.info.total_pages).sum();
        let text_pages: usize = report
            .documents
            .iter()
            .map(|d| d.info.pages_with_text)
            .sum();
        table.add_row(vec![
            Cell::new(&report.entity.slug),
            Cell::new(report.documents.len()),
            Cell::new(format!("{text_pages}/{total_pages}")),
            Cell::new(report.unique_candidates),
            Cell::new(report.terms),
            Cell::new(report.notes.len()),
        ]);
    }
    table
}
