// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// Usage:
//   detectum-osint <USERNAME> [-s SITE...] [-o json|txt] [-f FILE] [-v]
//
// Besides the investigation options, a few flags tune the probing engine
// (catalog path, site limit, timeout and connection limits). Their defaults
// come from ProbeConfig.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::ProbeConfig;
use crate::report::ReportFormat;

#[derive(Parser, Debug)]
#[command(
    name = "detectum-osint",
    version,
    about = "Detectum-OSINT - check which websites a username is registered on",
    long_about = "Detectum-OSINT probes a catalog of websites for a username and reports \
                  on which of them an account appears to exist. No API keys required.",
    after_help = "Developed by Vishal Coodye for Detectum Cybersecurity, Republic of Mauritius"
)]
pub struct Cli {
    /// Username to investigate
    pub username: String,

    /// Specific sites to check (default: the first --limit sites of the catalog)
    ///
    /// Names not present in the catalog are ignored.
    #[arg(short, long, num_args = 1..)]
    pub sites: Option<Vec<String>>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Json)]
    pub output: ReportFormat,

    /// Output file path (if not specified, prints to stdout)
    #[arg(short = 'f', long)]
    pub output_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the sites.json catalog
    #[arg(long, env = "DETECTUM_CATALOG", default_value = "data/sites.json")]
    pub catalog: PathBuf,

    /// Number of catalog entries to check when --sites is not given
    #[arg(long, default_value_t = 500)]
    pub limit: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Maximum number of requests in flight
    #[arg(long, default_value_t = 100)]
    pub max_connections: usize,

    /// Maximum number of requests in flight against one host
    #[arg(long, default_value_t = 10)]
    pub max_per_host: usize,
}

impl Cli {
    /// Engine settings from the command-line flags
    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            timeout: Duration::from_secs(self.timeout),
            max_connections: self.max_connections,
            max_connections_per_host: self.max_per_host,
            selection_limit: self.limit,
            ..ProbeConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_arguments() {
        let cli = Cli::try_parse_from(["detectum-osint", "alice"]).unwrap();
        assert_eq!(cli.username, "alice");
        assert_eq!(cli.sites, None);
        assert_eq!(cli.output, ReportFormat::Json);
        assert!(cli.output_file.is_none());
        assert!(!cli.verbose);

        let config = cli.probe_config();
        assert_eq!(config.selection_limit, 500);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_connections, 100);
        assert_eq!(config.max_connections_per_host, 10);
    }

    #[test]
    fn test_full_arguments() {
        let cli = Cli::try_parse_from([
            "detectum-osint",
            "alice",
            "-s",
            "GitHub",
            "Reddit",
            "-o",
            "txt",
            "-f",
            "report.txt",
            "-v",
            "--limit",
            "20",
        ])
        .unwrap();
        assert_eq!(
            cli.sites,
            Some(vec!["GitHub".to_string(), "Reddit".to_string()])
        );
        assert_eq!(cli.output, ReportFormat::Txt);
        assert_eq!(cli.output_file, Some(PathBuf::from("report.txt")));
        assert!(cli.verbose);
        assert_eq!(cli.probe_config().selection_limit, 20);
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        let result = Cli::try_parse_from(["detectum-osint", "alice", "-o", "xml"]);
        assert!(result.is_err());
    }
}
