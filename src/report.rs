// src/report.rs
// =============================================================================
// Renders an InvestigationSummary as a JSON or plain-text report.
//
// JSON: the summary serialized as-is, pretty-printed. serde_json writes
// non-ASCII characters (emoji, accented names...) literally.
//
// Text: a fixed layout
//   banner
//   summary fields
//   ACCOUNTS FOUND list
//   DETAILED RESULTS, one block per site
// =============================================================================

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::probe::InvestigationSummary;

/// Report formats; any other name is rejected by clap when parsing `-o`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Json,
    Txt,
}

/// Builds the report text for a summary
pub fn generate_report(summary: &InvestigationSummary, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(summary).context("Failed to serialize report")
        }
        ReportFormat::Txt => Ok(text_report(summary)),
    }
}

fn text_report(summary: &InvestigationSummary) -> String {
    let mut lines = vec![
        "=".repeat(60),
        "DETECTUM-OSINT INVESTIGATION REPORT".to_string(),
        "=".repeat(60),
        format!("Username: {}", summary.username),
        format!("Investigation Date: {}", summary.investigation_date.to_rfc3339()),
        format!("Total Sites Checked: {}", summary.total_sites_checked),
        format!("Accounts Found: {}", summary.accounts_found),
        format!("Success Rate: {}", summary.success_rate),
        String::new(),
        "ACCOUNTS FOUND:".to_string(),
        "-".repeat(30),
    ];

    lines.extend(summary.found_sites.iter().map(|site| format!("✅ {}", site)));

    lines.push(String::new());
    lines.push("DETAILED RESULTS:".to_string());
    lines.push("-".repeat(30));

    for (site, outcome) in &summary.detailed_results {
        let status = if outcome.exists { "✅ FOUND" } else { "❌ NOT FOUND" };
        lines.push(format!("{}: {}", site, status));
        if !outcome.url.is_empty() {
            lines.push(format!("  URL: {}", outcome.url));
        }
        if let Some(error) = &outcome.error_kind {
            lines.push(format!("  Error: {}", error));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
