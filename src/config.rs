// src/config.rs
// =============================================================================
// Tunable settings for one investigation run.
//
// Every value has a default matching the reference behaviour of the tool:
// - 30 second total timeout per request
// - at most 100 requests in flight overall
// - at most 10 requests in flight against the same host
// - the first 500 catalog entries when no site list is given
//
// The CLI (src/cli.rs) can override each of these.
// =============================================================================

use std::time::Duration;

/// User-Agent header sent with every probe
pub const DEFAULT_USER_AGENT: &str = "Detectum-OSINT/1.0 (Cybersecurity Investigation Tool)";

/// Settings for the probing engine
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Total time allowed for one request, including redirects and body
    pub timeout: Duration,
    /// Maximum number of probes in flight at once
    pub max_connections: usize,
    /// Maximum number of probes in flight against a single host
    pub max_connections_per_host: usize,
    /// How many catalog entries to check when no explicit site list is given.
    /// Relies on the catalog being ordered by popularity.
    pub selection_limit: usize,
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_connections: 100,
            max_connections_per_host: 10,
            selection_limit: 500,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
