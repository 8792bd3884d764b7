//! AWACS main entry point
//!
//! This is the command-line interface for the AWACS site checker.

use anyhow::Context;
use awacs::config::{load_config, ArgumentOverrides, FileConfig, RunArguments};
use awacs::crawler::crawl;
use awacs::output::{exit_code, formatter_for, write_report, EXIT_FATAL};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Crawl through a domain and check every page for errors
///
/// Scope should be a website directory, e.g. https://www.in10.nl/nieuws
#[derive(Parser, Debug)]
#[command(name = "awacs")]
#[command(version)]
#[command(about = "Crawl through a domain and check every page for errors", long_about = None)]
struct Cli {
    /// Website directory to crawl, e.g. https://www.in10.nl/nieuws
    #[arg(value_name = "SCOPE")]
    scope: Option<String>,

    /// Do not show warnings in the results
    #[arg(long)]
    errors_only: bool,

    /// Suppress all output, returning only an exit code
    #[arg(long, conflicts_with_all = ["debug", "verbose"])]
    silent: bool,

    /// Verbose action output, no visual effects
    #[arg(long)]
    debug: bool,

    /// Skip slow checks
    #[arg(long)]
    fast: bool,

    /// HTTP Basic Authentication username
    #[arg(long)]
    username: Option<String>,

    /// HTTP Basic Authentication password
    #[arg(long)]
    password: Option<String>,

    /// Write the results as CSV
    #[arg(long)]
    csv: bool,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn overrides(&self) -> ArgumentOverrides {
        ArgumentOverrides {
            scope: self.scope.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            fast: self.fast,
            errors_only: self.errors_only,
            silent: self.silent,
            debug: self.debug,
            csv: self.csv,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.debug, cli.silent);

    match run(&cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{:#}", e);
            if !cli.silent {
                eprintln!("awacs: {:#}", e);
            }
            ExitCode::from(EXIT_FATAL as u8)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so the report on stdout stays machine-readable.
fn setup_logging(verbose: u8, debug: bool, silent: bool) {
    let filter = if silent {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose.max(u8::from(debug)) {
            0 => EnvFilter::new("awacs=info,warn"),
            1 => EnvFilter::new("awacs=debug,info"),
            _ => EnvFilter::new("awacs=trace,debug"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Resolves the run arguments, crawls, renders the report and returns the exit code
async fn run(cli: &Cli) -> anyhow::Result<u8> {
    let arguments = load_arguments(cli)?;

    tracing::info!(
        "Scope: {} (authentication: {}, fast: {})",
        arguments.scope,
        if arguments.credentials().is_some() {
            "enabled"
        } else {
            "disabled"
        },
        arguments.fast
    );

    let errors_only = arguments.errors_only;
    let formatter = formatter_for(&arguments);

    let report = crawl(arguments).await.context("Crawl failed")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(formatter.as_ref(), &report, &mut out).context("Failed to write report")?;

    Ok(exit_code(&report, errors_only) as u8)
}

/// Merges the optional config file with the command line
fn load_arguments(cli: &Cli) -> anyhow::Result<RunArguments> {
    let file = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => FileConfig::default(),
    };

    let arguments = file
        .into_arguments(cli.overrides())
        .context("Invalid arguments")?;

    Ok(arguments)
}
