// src/main.rs
// =============================================================================
// Entry point of the detectum-osint CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr, so the report on stdout stays clean)
// 3. Load the site catalog and run the investigation
// 4. Print or save the report
// 5. Exit with proper code (0 = done, 1 = interrupted or failed)
//
// Ctrl-C aborts the whole investigation at once: probes still in flight are
// dropped and no partial report is written.
// =============================================================================

mod catalog; // src/catalog/ - the sites.json catalog
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - engine settings
mod probe; // src/probe/ - concurrent probing engine
mod report; // src/report.rs - JSON and text reports

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    print_banner();

    std::process::exit(execute(cli).await);
}

// Runs the investigation and maps the result to an exit code.
// Whichever finishes first wins; the other future is dropped.
async fn execute(cli: Cli) -> i32 {
    tokio::select! {
        result = run(cli) => match result {
            Ok(()) => 0,
            Err(e) => {
                tracing::error!("Investigation failed: {:#}", e);
                println!("❌ Error: {:#}", e);
                1
            }
        },
        _ = interrupted() => {
            println!("\n⚠️  Investigation interrupted by user");
            1
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    println!("🔍 Starting investigation for username: {}", cli.username);
    println!("⏱️  This may take several minutes depending on the number of sites...");
    println!();

    let catalog = catalog::load_catalog(&cli.catalog);
    if catalog.is_empty() {
        println!("⚠️  No sites found in catalog {}", cli.catalog.display());
    }

    let summary = probe::investigate(
        &catalog,
        &cli.username,
        cli.sites.as_deref(),
        cli.probe_config(),
    )
    .await?;

    let report = report::generate_report(&summary, cli.output)?;

    match &cli.output_file {
        Some(path) => {
            std::fs::write(path, &report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("📄 Report saved to: {}", path.display());
        }
        None => {
            println!("📊 INVESTIGATION RESULTS:");
            println!("{}", "=".repeat(50));
            println!("{}", report);
        }
    }

    println!();
    println!("{}", "=".repeat(50));
    println!("🎯 Investigation completed for: {}", summary.username);
    println!(
        "📈 Found {} accounts out of {} sites checked",
        summary.accounts_found, summary.total_sites_checked
    );
    println!("📊 Success rate: {}", summary.success_rate);
    println!("{}", "=".repeat(50));

    Ok(())
}

// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

// RUST_LOG wins over --verbose when set
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,detectum_osint=debug"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn print_banner() {
    println!("{}", "=".repeat(70));
    println!("🕵️‍♂️  DETECTUM-OSINT - Advanced OSINT Investigation Tool");
    println!("{}", "=".repeat(70));
    println!("Developed by Vishal Coodye for Detectum Cybersecurity");
    println!("Republic of Mauritius | Professional Cybersecurity Solutions");
    println!("{}", "=".repeat(70));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    // A catalog with no sites, so nothing touches the network
    fn empty_catalog(dir: &Path) -> String {
        let path = dir.join("sites.json");
        std::fs::write(&path, "{}").unwrap();
        path.display().to_string()
    }

    #[tokio::test]
    async fn test_report_is_saved_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = empty_catalog(dir.path());
        let output = dir.path().join("report.json");
        let output_arg = output.display().to_string();

        let cli = Cli::try_parse_from([
            "detectum-osint",
            "alice",
            "--catalog",
            catalog.as_str(),
            "-f",
            output_arg.as_str(),
        ])
        .unwrap();

        assert_eq!(execute(cli).await, 0);

        let saved = std::fs::read_to_string(&output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&saved).unwrap();
        assert_eq!(value["username"], "alice");
        assert_eq!(value["total_sites_checked"], 0);
        assert_eq!(value["success_rate"], "0%");
    }

    #[tokio::test]
    async fn test_write_failure_exits_with_1() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = empty_catalog(dir.path());
        let output = dir.path().join("missing-dir").join("report.txt");
        let output_arg = output.display().to_string();

        let cli = Cli::try_parse_from([
            "detectum-osint",
            "alice",
            "--catalog",
            catalog.as_str(),
            "-o",
            "txt",
            "-f",
            output_arg.as_str(),
        ])
        .unwrap();

        assert_eq!(execute(cli).await, 1);
        assert!(!output.exists());
    }
}
