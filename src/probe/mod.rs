// src/probe/mod.rs
// =============================================================================
// The probing engine: checks one username against many sites at once.
//
// Submodules:
// - http: fetches a profile page (the request executor)
// - classify: decides whether a fetched page is a real profile
// - coordinator: picks the sites and runs all probes concurrently
// - summary: folds per-site outcomes into the investigation summary
// =============================================================================

mod classify;
mod coordinator;
mod http;
mod summary;

pub use classify::Verdict;
pub use coordinator::investigate;
pub use summary::InvestigationSummary;

#[cfg(test)]
pub use summary::summarize;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The result of probing a single site.
///
/// Serialized keys match the JSON report format:
/// `exists`, `url`, `status_code`, `error_type`, `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub exists: bool,
    /// Profile URL with the username filled in
    pub url: String,
    /// HTTP status, absent when the request never completed
    pub status_code: Option<u16>,
    /// Why the account was not found, or why the probe failed
    #[serde(rename = "error_type")]
    pub error_kind: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ProbeOutcome {
    pub fn new(url: String, status_code: Option<u16>, verdict: &Verdict) -> Self {
        Self {
            exists: verdict.exists(),
            url,
            status_code,
            error_kind: verdict.error_kind(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_json_keys() {
        let outcome = ProbeOutcome::new(
            "https://a.example/alice".to_string(),
            Some(200),
            &Verdict::NotFound,
        );
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["exists"], false);
        assert_eq!(value["url"], "https://a.example/alice");
        assert_eq!(value["status_code"], 200);
        assert_eq!(value["error_type"], "Not Found");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_failed_outcome_has_no_status() {
        let verdict = Verdict::Failed("Request timed out".to_string());
        let outcome = ProbeOutcome::new("https://a.example/alice".to_string(), None, &verdict);
        assert!(!outcome.exists);
        assert_eq!(outcome.status_code, None);
        assert_eq!(outcome.error_kind.as_deref(), Some("Request timed out"));
    }
}
