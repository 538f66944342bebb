use anyhow::{Context, Result};
use clap::{error::ErrorKind, Parser};
use std::path::PathBuf;

use pwnear::commands::{self, CheckOptions};
use pwnear::config::Config;
use pwnear::corpus::Corpus;
use pwnear::exit_codes;
use pwnear::interrupt::{setup_ctrlc_handler, CancelToken};
use pwnear::output::{HelpResponse, JsonError, Output, VersionResponse};
use pwnear::prompt;

/// Version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "pwnear")]
#[command(version = VERSION)]
#[command(
    about = "Check a password against a list of leaked passwords, tolerating typos",
    long_about = None
)]
#[command(
    after_help = "Exit codes: 0 = check completed (any match count), 2 = usage error, \
10 = operational failure, 11 = password list unavailable, 12 = configuration error, \
130 = interrupted."
)]
struct Cli {
    /// Print the matching entries from the password list
    #[arg(long)]
    show_matching: bool,

    /// Maximum edit distance for a leaked password to count as a match. Default: 3
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    max_distance: Option<i64>,

    /// Password list, one entry per line (overrides PWNEAR_CORPUS and config file)
    #[arg(long, value_name = "PATH")]
    corpus: Option<PathBuf>,

    /// Worker threads for the scan (0 = one per CPU). Default: 1
    #[arg(short = 'j', long, value_name = "N")]
    jobs: Option<usize>,

    /// Stop at the first match instead of collecting all of them
    #[arg(long)]
    any: bool,

    /// Read the password from the first line of stdin instead of prompting
    #[arg(long)]
    password_stdin: bool,

    /// Path to config file (default: ./pwnear.toml)
    #[arg(long = "config")]
    config_path: Option<PathBuf>,

    /// Minimal output (results and errors only)
    #[arg(long)]
    quiet: bool,

    /// Show resolved settings and scan timing
    #[arg(long)]
    verbose: bool,

    /// Output as JSON instead of human-readable text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() {
    // Load .env file if present (before parsing CLI so env vars are available)
    let _ = dotenvy::dotenv();

    // Check for --json flag early (before full parsing) for error handling
    let json_mode = std::env::args().any(|arg| arg == "--json");

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if json_mode {
                match e.kind() {
                    ErrorKind::DisplayHelp => {
                        HelpResponse::new(e.to_string()).print();
                        std::process::exit(exit_codes::SUCCESS);
                    }
                    ErrorKind::DisplayVersion => {
                        VersionResponse::new(VERSION.to_string()).print();
                        std::process::exit(exit_codes::SUCCESS);
                    }
                    _ => {
                        JsonError::with_code("usage_error", e.to_string(), None).print();
                        std::process::exit(exit_codes::USAGE);
                    }
                }
            } else {
                // Human mode: let clap print its formatted output
                e.exit();
            }
        }
    };

    let output = Output::new(cli.json, cli.quiet, cli.verbose);

    if let Err(e) = run(cli, &output).await {
        let code = exit_codes::for_error(&e);
        if json_mode {
            let full_chain = format!("{e:#}");
            let details = (full_chain != e.to_string()).then_some(full_chain);
            JsonError::with_code(exit_codes::error_code(&e), e.to_string(), details).print();
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(code);
    }

    output.flush();
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    let config = Config::load(cli.config_path.as_deref())?;

    // Threshold is validated before the password list is opened
    let settings = config.match_settings(cli.max_distance, cli.jobs, cli.any)?;
    let options = CheckOptions {
        corpus_path: config.corpus_path(cli.corpus.as_deref()),
        settings,
        show_matching: cli.show_matching,
    };

    // Open the list before prompting so a missing file fails immediately
    let corpus = Corpus::open(&options.corpus_path)?;

    // Terminal and stdin reads block, keep them off the async workers
    let from_stdin = cli.password_stdin;
    let password = tokio::task::spawn_blocking(move || prompt::read_password(from_stdin))
        .await
        .context("password prompt task failed")??;

    let cancel = CancelToken::new();
    setup_ctrlc_handler(cancel.clone());

    let report = {
        let options = options.clone();
        let output = output.clone();
        tokio::task::spawn_blocking(move || {
            commands::run_check(&password, corpus, &options, &cancel, &output)
        })
        .await
        .context("scan task failed")??
    };

    if report.scanned == 0 {
        output.warn(&format!(
            "Warning: password list {} is empty",
            options.corpus_path.display()
        ));
    }

    if output.is_json() {
        commands::print_json(&report, &options.corpus_path, options.show_matching)?;
    } else {
        commands::print_human(&report, options.show_matching, output);
    }

    Ok(())
}
