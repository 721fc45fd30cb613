//! Linksieve main entry point
//!
//! This is the command-line interface for the Linksieve outbound link auditor.

use anyhow::{Context, Result};
use clap::Parser;
use linksieve::config::{load_config, validate, OutputFormat};
use linksieve::report::{export_table, print_diagnostics, print_statistics};
use linksieve::url::canonical_seed;
use linksieve::{crawl, normalize, Config, CrawlReport, ExportError, Mode};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Linksieve: an outbound link auditor
///
/// Linksieve crawls every internal page reachable from a seed URL and
/// reports the external links it finds. It can list them all, only the
/// broken ones, or only those answering with a permanent redirect.
#[derive(Parser, Debug)]
#[command(name = "linksieve")]
#[command(version = "1.0.0")]
#[command(about = "An outbound link auditor", long_about = None)]
struct Cli {
    /// Seed URL to crawl; prompted for when omitted
    #[arg(value_name = "URL")]
    url: Option<String>,

    /// Which external links to report; prompted for when omitted
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Maximum number of pages fetched at once
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// Directory exports are written under
    #[arg(short, long, value_name = "DIR")]
    output: Option<String>,

    /// Export file format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let interactive = cli.url.is_none() || cli.mode.is_none();

    let mut url = cli.url.clone();
    let mut mode = cli.mode;

    loop {
        let seed = match url.take() {
            Some(seed) => seed,
            None => prompt_seed()?,
        };
        let selected = match mode.take() {
            Some(mode) => mode,
            None => prompt_mode()?,
        };

        let report = crawl(&seed, selected, &config)
            .await
            .with_context(|| format!("Crawl of {} failed", seed))?;

        handle_report(&report, &config, interactive)?;

        if !interactive || !prompt_yes_no("Scan another site? (y/n): ")? {
            break;
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linksieve=info,warn"),
            1 => EnvFilter::new("linksieve=debug,info"),
            2 => EnvFilter::new("linksieve=trace,debug"),
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

/// Loads the config file if any, applies command-line overrides and validates
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(timeout) = cli.timeout {
        config.crawler.request_timeout_secs = timeout;
    }
    if let Some(workers) = cli.workers {
        config.crawler.max_concurrent_pages = workers;
    }
    if let Some(directory) = &cli.output {
        config.output.directory = directory.clone();
    }
    if let Some(format) = cli.format {
        config.output.format = format;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Prints the run summary and exports the table
fn handle_report(report: &CrawlReport, config: &Config, interactive: bool) -> Result<()> {
    println!();
    print_diagnostics(&report.diagnostics);
    print_statistics(&report.statistics);
    println!();

    if report.table.is_empty() {
        println!("No {} found for {}", report.mode.folder_name().replace('_', " "), report.seed);
        return Ok(());
    }

    loop {
        match export_table(&report.table, &report.seed, &config.output) {
            Ok(path) => {
                println!("✓ {} rows exported to: {}", report.table.len(), path.display());
                return Ok(());
            }
            Err(ExportError::AlreadyExists(path)) if interactive => {
                println!("File {} already exists.", path.display());
                if !prompt_yes_no("Retry export? (y/n): ")? {
                    return Ok(());
                }
            }
            Err(e) => return Err(e).context("Export failed"),
        }
    }
}

/// Prints a prompt and reads one trimmed line from stdin
fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        anyhow::bail!("Input closed");
    }
    Ok(line.trim().to_string())
}

/// Prompts until a valid seed URL is entered; returns it normalized
fn prompt_seed() -> Result<String> {
    loop {
        let input = read_line("Enter the site URL (e.g. https://example.com): ")?;
        match canonical_seed(&input) {
            Ok(seed) => return Ok(seed),
            Err(e) => println!("Invalid URL '{}': {}. Please try again.", normalize(&input), e),
        }
    }
}

/// Prompts until a valid mode number or name is entered
fn prompt_mode() -> Result<Mode> {
    println!("Choose what to report:");
    for mode in Mode::ALL {
        println!("  {}. {}", mode.number(), mode.description());
    }

    loop {
        match read_line("Mode (1/2/3): ")?.parse::<Mode>() {
            Ok(mode) => return Ok(mode),
            Err(e) => println!("{}. Please enter 1, 2 or 3.", e),
        }
    }
}

/// Prompts for a yes/no answer; anything but y/yes counts as no
fn prompt_yes_no(prompt: &str) -> Result<bool> {
    let answer = read_line(prompt)?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}
