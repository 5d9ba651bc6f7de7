//! Implementation of `gloss refine`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use gloss_store::{RefineReport, RefineStats, refine_all};

use crate::cli::{args::RefineCommand, context::CommandContext};

/// Re-filters every entity's artifacts under the output directory.
pub fn run(ctx: &CommandContext, cmd: &RefineCommand) -> ExitCode {
    let output = ctx.resolve(&cmd.output);

    let reports = match refine_all(&output, &ctx.config) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", stats_table(&reports));
    let total = totals(&reports);
    println!(
        "Total: {} -> {} terms ({} removed), {} descriptions dropped",
        total.words_in,
        total.words_out,
        total.words_removed(),
        total.descriptions_dropped
    );
    ExitCode::SUCCESS
}

/// Sums the stats of every entity.
fn totals(reports: &[RefineReport]) -> RefineStats {
    reports
        .iter()
        .fold(RefineStats::default(), |acc, report| RefineStats {
            words_in: acc.words_in + report.stats.words_in,
            words_out: acc.words_out + report.stats.words_out,
            records_in: acc.records_in + report.stats.records_in,
            records_out: acc.records_out + report.stats.records_out,
            descriptions_dropped: acc.descriptions_dropped + report.stats.descriptions_dropped,
        })
}

/// Builds the per-entity stats table.
fn stats_table(reports: &[RefineReport]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Entity", "Terms", "Removed", "Records", "Descriptions dropped"]);
    for report in reports {
        let stats = &report.stats;
        table.add_row(vec![
            Cell::new(&report.entity.slug),
            Cell::new(format!("{} -> {}", stats.words_in, stats.words_out)),
            Cell::new(stats.words_removed()),
            Cell::new(format!("{} -> {}", stats.records_in, stats.records_out)),
            Cell::new(stats.descriptions_dropped),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use gloss_store::Entity;

    use super::*;

    fn report(slug: &str, words_in: usize, words_out: usize) -> RefineReport {
        RefineReport {
            entity: Entity::from_dir(&Path::new("/out").join(slug)).unwrap(),
            stats: RefineStats {
                words_in,
                words_out,
                records_in: words_in,
                records_out: words_out,
                descriptions_dropped: 1,
            },
        }
    }

    #[test]
    fn totals_sum_every_entity() {
        let total = totals(&[report("1_A", 10, 7), report("2_B", 5, 5)]);
        assert_eq!(total.words_in, 15);
        assert_eq!(total.words_out, 12);
        assert_eq!(total.words_removed(), 3);
        assert_eq!(total.descriptions_dropped, 2);
    }
}
