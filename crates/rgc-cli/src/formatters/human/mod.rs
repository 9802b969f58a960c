//! Human-readable formatter for analysis reports.

mod tree;

#[cfg(test)]
mod tests;

use colored::*;
use rgc_core::{AnalysisReport, AnalysisWarning, WarningKind};
use std::collections::BTreeMap;

pub use tree::{render_cycle, render_trees};

pub struct HumanFormatter;

pub fn print_report(report: &AnalysisReport) {
    println!("\n{}", "rgc Analysis Results".bold());
    println!("====================\n");

    let result = &report.result;
    println!(
        "{} ({}):",
        "Used components".green().bold(),
        result.used_count
    );
    print_lines(&render_trees(&result.used));

    println!(
        "\n{} ({}):",
        "Unused components".yellow().bold(),
        result.unused_count
    );
    print_lines(&render_trees(&result.unused));

    if !report.orphaned_cycles.is_empty() {
        println!(
            "\n{} ({}):",
            "Orphaned cycles".red().bold(),
            report.orphaned_cycles.len()
        );
        for (idx, cycle) in report.orphaned_cycles.iter().enumerate() {
            println!("  Cycle {} ({} components):", idx + 1, cycle.len());
            println!("     {}", render_cycle(cycle));
        }
        if !report.orphaned.is_empty() {
            println!("  Unreachable from any root:");
            for line in render_trees(&report.orphaned) {
                println!("    {}", line);
            }
        }
    }

    if !report.warnings.is_empty() {
        print_warnings(&report.warnings);
    }

    let stats = &report.statistics;
    println!("\nStatistics:");
    println!("  Directories listed: {}", stats.directories_listed);
    println!("  Files scanned: {}", stats.files_scanned);
    println!("  Files skipped: {}", stats.files_skipped);
    println!("  Components: {}", stats.components);
    println!("  Composes edges: {}", stats.edges);
    println!("  Duration: {}ms", stats.duration_ms);

    if !report.complete {
        println!(
            "\n{}",
            "Deadline expired: results are partial".red().bold()
        );
    }
}

fn print_lines(lines: &[String]) {
    if lines.is_empty() {
        println!("  (none)");
    }
    for line in lines {
        println!("  {}", line);
    }
}

fn print_warnings(warnings: &[AnalysisWarning]) {
    println!(
        "\n{} ({}):",
        "Warnings".yellow().bold(),
        warnings.len()
    );
    for (kind, group) in group_warnings(warnings) {
        println!("  {} ({}):", kind, group.len());
        for warning in group {
            if warning.path.is_empty() {
                println!("    {}", warning.message);
            } else {
                println!("    {}: {}", warning.path, warning.message);
            }
        }
    }
}

/// Warnings grouped by kind, in kind order, keeping report order inside a group.
pub(crate) fn group_warnings(
    warnings: &[AnalysisWarning],
) -> BTreeMap<WarningKind, Vec<&AnalysisWarning>> {
    let mut grouped: BTreeMap<WarningKind, Vec<&AnalysisWarning>> = BTreeMap::new();
    for warning in warnings {
        grouped.entry(warning.kind).or_default().push(warning);
    }
    grouped
}
