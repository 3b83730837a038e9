use std::fmt::Write;

use strum::IntoEnumIterator;

use crate::analysis::TrendSummary;
use crate::domain::Strength;
use crate::models::CorrelationReport;
use crate::utils::time_utils::format_timestamp;

const NAME_WIDTH: usize = 20;
const CELL_WIDTH: usize = 8;

/// Short column label for the heatmap grid
fn abbreviate(name: &str) -> String {
    name.chars().take(CELL_WIDTH - 1).collect()
}

/// Plain-text rendering of a report: heatmap grid, ranked pair list, warnings.
pub fn render_table(report: &CorrelationReport, trends: &[TrendSummary]) -> String {
    let mut out = String::new();
    let matrix = &report.matrix;

    let _ = writeln!(
        out,
        "Correlation analysis ({} range, {} p-values) generated {}",
        report.time_range,
        report.p_value_method,
        format_timestamp(report.generated_at)
    );
    let _ = writeln!(out);

    // --- Matrix ---
    let _ = write!(out, "{:<NAME_WIDTH$}", "");
    for name in &matrix.factors {
        let _ = write!(out, "{:>CELL_WIDTH$}", abbreviate(name));
    }
    let _ = writeln!(out);
    for (i, name) in matrix.factors.iter().enumerate() {
        let _ = write!(out, "{:<NAME_WIDTH$}", name);
        for r in &matrix.coefficients[i] {
            let _ = write!(out, "{:>CELL_WIDTH$.2}", r);
        }
        let _ = writeln!(out);
    }
    let _ = writeln!(out);

    // --- Pairs ---
    let _ = writeln!(
        out,
        "{:<NAME_WIDTH$} {:<NAME_WIDTH$} {:>7} {:>6} {:<7} {:<9} {:<10} {:>5}",
        "Factor 1", "Factor 2", "r", "p", "signif.", "relation", "strength", "n"
    );
    for result in report.ranked_results() {
        let _ = write!(
            out,
            "{:<NAME_WIDTH$} {:<NAME_WIDTH$} {:>7.3} {:>6.2} {:<7} {:<9} {:<10} {:>5}",
            result.factor1,
            result.factor2,
            result.correlation,
            result.p_value,
            result.significance,
            result.relationship,
            result.strength,
            result.observations
        );
        if let Some(reason) = &result.insufficient {
            let _ = write!(out, "  (insufficient data: {})", reason);
        }
        let _ = writeln!(out);
    }

    // --- Summary ---
    let summary = report.summary();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} pairs: {} high, {} medium, {} low significance, {} with insufficient data",
        summary.pair_count,
        summary.high_significance,
        summary.medium_significance,
        summary.low_significance,
        summary.insufficient_pairs
    );
    let by_strength: Vec<String> = Strength::iter()
        .map(|strength| {
            let n = report
                .results
                .iter()
                .filter(|r| r.insufficient.is_none() && r.strength == strength)
                .count();
            format!("{} {}", n, strength)
        })
        .collect();
    let _ = writeln!(out, "By strength: {}", by_strength.join(", "));
    if let Some(best) = &summary.strongest_positive {
        let _ = writeln!(
            out,
            "Strongest positive: {} / {} (r = {:.3})",
            best.factor1, best.factor2, best.correlation
        );
    }
    if let Some(worst) = &summary.strongest_negative {
        let _ = writeln!(
            out,
            "Strongest negative: {} / {} (r = {:.3})",
            worst.factor1, worst.factor2, worst.correlation
        );
    }

    if !trends.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:<NAME_WIDTH$} {:<8} {:<10} {:>12} {:>6}",
            "Trend", "dir.", "strength", "slope", "R²"
        );
        for trend in trends {
            let _ = writeln!(
                out,
                "{:<NAME_WIDTH$} {:<8} {:<10} {:>12.5} {:>6.3}",
                trend.factor, trend.direction, trend.strength, trend.slope, trend.r_squared
            );
        }
    }

    if report.is_partial() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Warning: partial result, skipped factors:");
        for skip in &report.skipped {
            let _ = writeln!(out, "  - {}", skip);
        }
    }

    out
}
