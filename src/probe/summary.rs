// src/probe/summary.rs
// =============================================================================
// The aggregator: turns per-site outcomes into an InvestigationSummary.
// =============================================================================

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::ProbeOutcome;

/// Everything learned about one username in one run.
///
/// Field order is the key order of the JSON report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestigationSummary {
    pub username: String,
    pub investigation_date: DateTime<Utc>,
    pub total_sites_checked: usize,
    pub accounts_found: usize,
    /// e.g. "50.00%", or "0%" when nothing was checked
    pub success_rate: String,
    /// Sites where the account exists, in result order
    pub found_sites: Vec<String>,
    /// One outcome per checked site
    pub detailed_results: IndexMap<String, ProbeOutcome>,
}

/// Builds the summary for a finished set of outcomes
pub fn summarize(username: &str, results: IndexMap<String, ProbeOutcome>) -> InvestigationSummary {
    let found_sites: Vec<String> = results
        .iter()
        .filter(|(_, outcome)| outcome.exists)
        .map(|(site, _)| site.clone())
        .collect();

    let total = results.len();
    let found = found_sites.len();

    InvestigationSummary {
        username: username.to_string(),
        investigation_date: Utc::now(),
        total_sites_checked: total,
        accounts_found: found,
        success_rate: success_rate(found, total),
        found_sites,
        detailed_results: results,
    }
}

/// Formats found/total as a percentage with two decimals
pub fn success_rate(found: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.2}%", found as f64 / total as f64 * 100.0)
}
