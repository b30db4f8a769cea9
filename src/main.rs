//! Linktrace main entry point
//!
//! This is the command-line interface for the Linktrace shortest
//! link-path finder.

use anyhow::Context;
use clap::Parser;
use linktrace::config::load_config;
use linktrace::explain::explain;
use linktrace::output::{print_narrative, write_run_log};
use linktrace::search::{build_http_client, Orchestrator, SearchLimits};
use linktrace::url::{normalize, Site};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Linktrace: shortest link-path finder
///
/// Linktrace searches a content website for the shortest chain of in-site
/// links connecting a start page to a target page, then explains each hop
/// with the sentence that carries the link.
#[derive(Parser, Debug)]
#[command(name = "linktrace")]
#[command(version = "1.0.0")]
#[command(about = "Finds the shortest link path between two pages of a site", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Search only; skip the sentence-extraction pass
    #[arg(long)]
    no_explain: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    let site = Site::from_config(&config.site)?;
    let client = build_http_client(&config.http)?;

    let start = normalize(&site, &config.search.start_reference)
        .context("invalid start-reference in config")?;
    let target = normalize(&site, &config.search.final_reference)
        .context("invalid final-reference in config")?;

    tracing::info!("Searching for a path from {} to {}", start, target);

    let limits = SearchLimits {
        max_concurrent_fetches: config.search.max_concurrent_fetches as usize,
        max_depth: match config.search.max_depth {
            0 => None,
            n => Some(n as usize),
        },
    };

    let orchestrator = Orchestrator::new(client.clone(), site.clone(), limits);

    // Terminal failures (unreachable start page, exhausted frontier, depth
    // cap) carry labeled Display messages; anyhow prints them once on exit.
    let outcome = orchestrator.run(&start, &target).await?;

    tracing::info!(
        "Path found: {} hops, {} pages visited",
        outcome.hops(),
        outcome.visited.len()
    );

    // Run log: every admitted page, written once after a successful search
    let log_path = PathBuf::from(&config.output.log_path);
    write_run_log(&log_path, &outcome.visited)
        .with_context(|| format!("failed to write run log to {}", log_path.display()))?;

    if cli.no_explain {
        for (index, page) in outcome.path.iter().enumerate() {
            println!("{}. {}", index + 1, page);
        }
        return Ok(());
    }

    // Explanation pass: independent of the search, per-hop failures are
    // reported in place
    let reports = explain(&client, &site, &outcome.path).await;
    print_narrative(&reports);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linktrace=info,warn"),
            1 => EnvFilter::new("linktrace=debug,info"),
            2 => EnvFilter::new("linktrace=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
