//! Rendering of correlation reports for the terminal and for machine consumers.

pub mod table;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::TrendSummary;
use crate::models::{CorrelationReport, ReportSummary};

pub use table::render_table;

#[derive(Serialize)]
struct JsonDocument<'a> {
    report: &'a CorrelationReport,
    summary: ReportSummary,
    #[serde(skip_serializing_if = "no_trends")]
    trends: &'a [TrendSummary],
}

fn no_trends(trends: &&[TrendSummary]) -> bool {
    trends.is_empty()
}

/// Pretty JSON with the report, its summary and optional trends
pub fn render_json(report: &CorrelationReport, trends: &[TrendSummary]) -> Result<String> {
    let doc = JsonDocument {
        report,
        summary: report.summary(),
        trends,
    };
    serde_json::to_string_pretty(&doc).context("Failed to serialize correlation report")
}
