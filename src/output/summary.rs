use std::fmt::Write;

use comfy_table::Cell;

use super::styling::{heading, muted, success, warning};
use super::tables::{color_coded_failures_cell, create_table, cyan_header};
use crate::archive::ArchiveReport;

/// Prints the per-project archiving summary to stdout.
pub fn print_summary(report: &ArchiveReport) {
    println!("{}", render_summary(report));
}

/// Renders one table row per archived project plus an overall line.
///
/// Failed jobs are listed by id under the table so each skip stays visible.
pub fn render_summary(report: &ArchiveReport) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "📁 {}", heading("Archived traces"));

    let mut table = create_table();
    table.set_header(cyan_header(&["Project", "ID", "Directory", "Saved", "Failed"]));
    for project in &report.projects {
        table.add_row(vec![
            Cell::new(&project.project.name),
            Cell::new(project.project.id),
            Cell::new(project.directory.display()),
            Cell::new(project.saved),
            color_coded_failures_cell(project.failures.len()),
        ]);
    }
    let _ = writeln!(output, "{table}");

    let failed: Vec<String> = report
        .projects
        .iter()
        .flat_map(|p| {
            p.failures
                .iter()
                .map(move |f| format!("  {} job {}: {}", p.project.name, f.job_id, f.reason))
        })
        .collect();
    if !failed.is_empty() {
        let _ = writeln!(output, "{}", warning("Skipped jobs:"));
        for line in failed {
            let _ = writeln!(output, "{}", muted(line));
        }
    }

    let elapsed = report
        .finished_at
        .map(|end| (end - report.started_at).num_seconds())
        .unwrap_or_default();
    let _ = write!(
        output,
        "{} {} traces saved, {} failed across {} projects in {}s",
        success("✓"),
        report.saved(),
        report.failed(),
        report.projects.len(),
        elapsed
    );

    output
}
