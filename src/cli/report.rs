//! Report formatting and printing utilities.
//!
//! Summaries go to stdout; recovered failures go to stderr so the two
//! streams can be redirected independently. Everything is writer-injected
//! to keep the formatting testable without capturing the process streams.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    CommandResult, CommandSummary, GraphSummary, InitSummary, ListSummary, UnitStatus,
};
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult) {
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    print_to(result, &mut out, &mut err);
}

pub fn print_to<O: Write, E: Write>(result: &CommandResult, out: &mut O, err: &mut E) {
    match &result.summary {
        CommandSummary::Graph(summary) => print_graph(summary, out, err),
        CommandSummary::List(summary) => print_list(summary, out),
        CommandSummary::Init(summary) => print_init(summary, out),
    }
}

fn print_graph<O: Write, E: Write>(summary: &GraphSummary, out: &mut O, err: &mut E) {
    let _ = writeln!(
        out,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} {} from {} {} ({} {} scanned) to {}",
            summary.edge_count,
            pluralize(summary.edge_count, "edge", "edges"),
            summary.modules_built,
            pluralize(summary.modules_built, "module", "modules"),
            summary.units_scanned,
            pluralize(summary.units_scanned, "unit", "units"),
            summary.output.display()
        )
        .green()
    );

    if summary.failures.is_empty() {
        return;
    }

    for failure in &summary.failures {
        let _ = writeln!(err, "{} {}", "warning:".bold().yellow(), failure);
    }
    let _ = writeln!(
        err,
        "{} {} {} could not be processed",
        FAILURE_MARK.red(),
        summary.failures.len(),
        pluralize(summary.failures.len(), "descriptor", "descriptors")
    );
}

fn print_list<O: Write>(summary: &ListSummary, out: &mut O) {
    let mut descriptor_count = 0;
    let mut scanned_count = 0;

    for unit in &summary.units {
        match &unit.status {
            UnitStatus::Skipped => {
                let _ = writeln!(out, "{} {}", unit.name.bold(), "(skipped)".dimmed());
            }
            UnitStatus::Error { reason } => {
                let _ = writeln!(out, "{} {} {}", unit.name.bold(), "error:".bold().red(), reason);
                scanned_count += 1;
            }
            UnitStatus::Loaded { descriptors } => {
                let _ = writeln!(
                    out,
                    "{} ({} {})",
                    unit.name.bold(),
                    descriptors.len(),
                    pluralize(descriptors.len(), "module", "modules")
                );
                for descriptor in descriptors {
                    let _ = writeln!(out, "  {}", descriptor);
                }
                descriptor_count += descriptors.len();
                scanned_count += 1;
            }
        }
    }

    let _ = writeln!(
        out,
        "\n{} {} {} in {} {}",
        SUCCESS_MARK.green(),
        descriptor_count,
        pluralize(descriptor_count, "descriptor", "descriptors"),
        scanned_count,
        pluralize(scanned_count, "unit", "units")
    );
}

fn print_init<O: Write>(summary: &InitSummary, out: &mut O) {
    if summary.created {
        let _ = writeln!(
            out,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

fn pluralize(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}
