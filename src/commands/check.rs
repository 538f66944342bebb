//! Check command: scan the password list for near matches of one password.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::corpus::Corpus;
use crate::interrupt::CancelToken;
use crate::matcher::{self, CheckReport, MatchSettings, MaxDistance};
use crate::output::{schema, JsonOutput, Output};

/// Everything the check needs, resolved before the corpus is touched.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub corpus_path: PathBuf,
    pub settings: MatchSettings,
    pub show_matching: bool,
}

/// JSON payload for `pwnear --json`.
#[derive(Debug, Serialize)]
pub struct CheckJson<'a> {
    pub corpus: String,
    pub max_distance: MaxDistance,
    pub scanned: usize,
    pub match_count: usize,
    pub compromised: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub first_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<&'a [String]>,
}

impl<'a> CheckJson<'a> {
    pub fn new(report: &'a CheckReport, corpus: &Path, show_matching: bool) -> Self {
        Self {
            corpus: corpus.display().to_string(),
            max_distance: report.max_distance,
            scanned: report.scanned,
            match_count: report.match_count,
            compromised: report.is_compromised(),
            first_only: report.first_only,
            matches: show_matching.then_some(report.matches.as_slice()),
        }
    }
}

/// Scan an opened corpus, on a rayon pool sized to `settings.jobs` when
/// more than one worker is requested.
///
/// Blocking; callers on an async runtime should use `spawn_blocking`.
pub fn run_check(
    password: &str,
    corpus: Corpus,
    options: &CheckOptions,
    cancel: &CancelToken,
    output: &Output,
) -> Result<CheckReport> {
    output.verbose(&format!(
        "Corpus: {} | max distance: {} | jobs: {}{}",
        options.corpus_path.display(),
        options.settings.max_distance,
        options.settings.jobs,
        if options.settings.first_only {
            " | stop at first match"
        } else {
            ""
        }
    ));

    let started = Instant::now();

    let report = if options.settings.jobs > 1 && !options.settings.first_only {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.settings.jobs)
            .build()
            .context("start scan worker pool")?;
        pool.install(|| matcher::check(password, corpus, &options.settings, cancel))?
    } else {
        matcher::check(password, corpus, &options.settings, cancel)?
    };

    output.verbose(&format!(
        "Scanned {} entries in {:.2?}",
        report.scanned,
        started.elapsed()
    ));
    Ok(report)
}

pub fn print_human(report: &CheckReport, show_matching: bool, output: &Output) {
    let plural = if report.match_count == 1 { "" } else { "s" };
    let summary = format!("Found {} matching password{}.", report.match_count, plural);

    if report.is_compromised() {
        output.data(&summary.red().to_string());
    } else {
        output.data(&summary.green().to_string());
    }

    if report.first_only && report.is_compromised() {
        output.info(&format!(
            "Stopped at the first match after {} entries.",
            report.scanned
        ));
    }

    if show_matching {
        for m in &report.matches {
            output.data(&format!("  {}", m));
        }
    } else if report.is_compromised() {
        output.info("Re-run with --show-matching to list them.");
    }
}

pub fn print_json(report: &CheckReport, corpus: &Path, show_matching: bool) -> Result<()> {
    JsonOutput::new(schema::CHECK, CheckJson::new(report, corpus, show_matching)).print()?;
    Ok(())
}
