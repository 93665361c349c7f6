// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use super::runner::RunReport;
use crate::io::StlSummary;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a repair and render run
    pub fn report_run(output: &str, report: &RunReport) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Rendered:".bold(), output.cyan());
        println!("{}", "━".repeat(80).bright_black());

        if let Some(repair) = &report.repair {
            println!("{}", "Repair:".bold());
            Self::print_count("Points merged", repair.points_moved);
            Self::print_count("Sticks welded", repair.sticks_welded);
            Self::print_count("Duplicates removed", repair.duplicates_removed);
            Self::print_count("Infill added", repair.infill_added);
            println!(
                "  {} {}",
                "Time:".bright_black(),
                Self::format_duration(report.repair_time).yellow()
            );
        }

        let render = &report.render;
        println!("\n{}", "Mesh:".bold());
        Self::print_count("Members", render.members_rendered);
        if render.members_skipped > 0 {
            Self::print_count("Outside print area", render.members_skipped);
        }
        println!(
            "  {} {} domes, {} discs, {} balls, {} flush",
            "Caps:".bright_black(),
            render.domes.to_string().cyan(),
            render.discs.to_string().cyan(),
            render.balls.to_string().cyan(),
            render.flush.to_string().cyan()
        );
        Self::print_count("Facets", render.facets_written());
        if render.facets_dropped > 0 {
            Self::report_warning(&format!(
                "{} facets dropped for negative or non-finite coordinates",
                render.facets_dropped
            ));
        }
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(report.render_time).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report what an STL file contains
    pub fn report_inspect(file: &str, summary: &StlSummary) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "File:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        if summary.is_consistent() {
            println!("{} {}", "✅".green(), "Facet count matches header".green().bold());
        } else {
            println!(
                "{} {}",
                "❌".red(),
                format!(
                    "Header claims {} facets, found {}",
                    summary.header_facets, summary.facets
                )
                .red()
                .bold()
            );
        }
        Self::print_count("Facets", summary.facets);
        Self::print_count("Vertices", summary.vertices);
        println!(
            "  {} [{:.3}, {:.3}, {:.3}] .. [{:.3}, {:.3}, {:.3}]",
            "Bounds:".bright_black(),
            summary.min[0],
            summary.min[1],
            summary.min[2],
            summary.max[0],
            summary.max[1],
            summary.max[2]
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    fn print_count(name: &str, value: usize) {
        println!(
            "  {} {}",
            format!("{}:", name).bright_black(),
            value.to_string().cyan()
        );
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }

    /// Print progress message
    pub fn progress(message: &str) {
        println!("{} {}...", "⏳".bright_blue(), message.bright_black());
    }
}
