//! SearchMaster main entry point
//!
//! This is the command-line interface for the SearchMaster reconnaissance tool.

use clap::{ArgGroup, Parser};
use colored::Colorize;
use searchmaster::config::{load_config_or_default, validate};
use searchmaster::filter::FilterOptions;
use searchmaster::output::ConsoleSink;
use searchmaster::scan::{ScanPlan, Scanner};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// SearchMaster: search-engine reconnaissance
///
/// SearchMaster runs dork and plain queries for a search term, fetches every
/// result page and reports the HTML pages that actually contain the term.
#[derive(Parser, Debug)]
#[command(name = "searchmaster")]
#[command(version)]
#[command(about = "SearchMaster - An advanced search reconnaissance tool", long_about = None)]
#[command(group(
    ArgGroup::new("scan_type")
        .required(true)
        .multiple(true)
        .args(["dork", "normal", "all"])
))]
struct Cli {
    /// The term to search for
    #[arg(value_name = "SEARCH_TERM")]
    search_term: String,

    /// Perform a dork scan
    #[arg(short, long)]
    dork: bool,

    /// Perform a normal scan
    #[arg(short, long)]
    normal: bool,

    /// Perform both dork and normal scans
    #[arg(short, long)]
    all: bool,

    /// Output file to save results
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Show unavailable URLs (reserved)
    #[arg(short, long)]
    unavailable: bool,

    /// Show available URLs (reserved)
    #[arg(short = 'v', long)]
    available: bool,

    /// Filter results for social media links
    #[arg(short, long)]
    social: bool,

    /// Filter results for file links
    #[arg(short, long)]
    file: bool,

    /// Number of search results to retrieve per query
    #[arg(short, long, value_name = "N")]
    results: Option<usize>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (--verbose, --verbose --verbose, ...)
    #[arg(long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

const BANNERS: [&str; 3] = [
    r#"
   ____                      _     __  __           _
  / ___|  ___  __ _ _ __ ___| |__ |  \/  | __ _ ___| |_ ___ _ __
  \___ \ / _ \/ _` | '__/ __| '_ \| |\/| |/ _` / __| __/ _ \ '__|
   ___) |  __/ (_| | | | (__| | | | |  | | (_| \__ \ ||  __/ |
  |____/ \___|\__,_|_|  \___|_| |_|_|  |_|\__,_|___/\__\___|_|
"#,
    r#"
   .-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.-.
   |   S E A R C H   ::   M A S T E R     |
   '-'-'-'-'-'-'-'-'-'-'-'-'-'-'-'-'-'-'-'-'
"#,
    r#"
   [ dork ] --> [ fetch ] --> [ match ] --> [ report ]
                  searchmaster
"#,
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);
    display_banner();

    let mut config = load_config_or_default(cli.config.as_deref())?;
    if let Some(results) = cli.results {
        config.scan.results_per_query = results;
        validate(&config)?;
    }

    let plan = ScanPlan::new(Some(cli.search_term.as_str()), cli.dork, cli.normal, cli.all)?
        .with_filters(FilterOptions {
            social: cli.social,
            files: cli.file,
        })
        .with_output(cli.output);

    if cli.unavailable || cli.available {
        tracing::debug!("--unavailable and --available are accepted but have no effect");
    }

    tracing::info!(
        "Dorks: {}, results per query: {}, timeout: {}s",
        config.dorks.len(),
        config.scan.results_per_query,
        config.scan.timeout_secs
    );

    let scanner = Scanner::new(config)?;
    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let report = scanner.run(&plan, &ConsoleSink, &cancel).await;

    if report.interrupted {
        report.render_partial(&ConsoleSink);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("searchmaster=info,warn"),
            1 => EnvFilter::new("searchmaster=debug,info"),
            2 => EnvFilter::new("searchmaster=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints one of the banners, picked from the clock
fn display_banner() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as usize)
        .unwrap_or(0);
    let banner = BANNERS[nanos % BANNERS.len()];
    println!("{}", banner.cyan().bold());
}

/// Cancels the scan on the first Ctrl-C and exits on the second
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::warn!("Unable to listen for interrupt signal");
            return;
        }

        eprintln!(
            "{}",
            "\nInterrupted! Displaying collected results...\n".red()
        );
        cancel.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });
}
