//! Corpus matcher: exhaustive scan of a password list for entries within an
//! edit-distance threshold of the query.
//!
//! Every operation takes the corpus as a lazy, single-pass iterator of
//! `Result<String, MatchError>`, so a read failure halfway through the file
//! fails the whole scan instead of producing a silently truncated match set.

use std::fmt;
use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;

use crate::distance::edit_distance_slices;
use crate::interrupt::CancelToken;

/// Default threshold when neither CLI nor config sets one.
pub const DEFAULT_MAX_DISTANCE: usize = 3;

/// Number of corpus entries handed to rayon at a time by the parallel scan.
pub const BATCH_SIZE: usize = 8192;

/// Errors surfaced by the matcher and its corpus source.
#[derive(Debug)]
pub enum MatchError {
    /// The corpus could not be opened, read to completion, or decoded.
    CorpusUnavailable { path: PathBuf, reason: String },
    /// A negative threshold was requested.
    InvalidThreshold(i64),
    /// The scan was cancelled before it finished.
    Cancelled,
}

impl MatchError {
    /// Stable machine-readable code (used in JSON error output).
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::CorpusUnavailable { .. } => "corpus_unavailable",
            MatchError::InvalidThreshold(_) => "invalid_threshold",
            MatchError::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::CorpusUnavailable { path, reason } => write!(
                f,
                "Could not read the password list {}: {}",
                path.display(),
                reason
            ),
            MatchError::InvalidThreshold(value) => write!(
                f,
                "Invalid max distance {}: must be zero or greater",
                value
            ),
            MatchError::Cancelled => write!(f, "Scan cancelled"),
        }
    }
}

impl std::error::Error for MatchError {}

/// Inclusive edit-distance threshold. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MaxDistance(usize);

impl MaxDistance {
    /// Validate a user-supplied threshold. Values beyond `usize::MAX`
    /// (32-bit targets) saturate, since they already accept every entry.
    pub fn new(value: i64) -> Result<Self, MatchError> {
        if value < 0 {
            return Err(MatchError::InvalidThreshold(value));
        }
        Ok(MaxDistance(usize::try_from(value).unwrap_or(usize::MAX)))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for MaxDistance {
    fn default() -> Self {
        MaxDistance(DEFAULT_MAX_DISTANCE)
    }
}

impl fmt::Display for MaxDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scan parameters resolved from CLI, environment and config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSettings {
    pub max_distance: MaxDistance,
    /// Worker threads for the scan; 1 means sequential.
    pub jobs: usize,
    /// Stop at the first match instead of collecting the full set.
    pub first_only: bool,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            max_distance: MaxDistance::default(),
            jobs: 1,
            first_only: false,
        }
    }
}

/// Outcome of a `check`, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub max_distance: MaxDistance,
    /// Number of corpus entries examined.
    pub scanned: usize,
    pub match_count: usize,
    pub matches: Vec<String>,
    /// True when the scan stopped at the first match.
    pub first_only: bool,
}

impl CheckReport {
    pub fn is_compromised(&self) -> bool {
        self.match_count > 0
    }
}

/// Query decoded once per scan.
struct Query {
    chars: Vec<char>,
}

impl Query {
    fn new(query: &str) -> Self {
        Self {
            chars: query.chars().collect(),
        }
    }

    /// `buf` is scratch space for the decoded candidate, reused across calls.
    fn within(&self, candidate: &str, max_distance: MaxDistance, buf: &mut Vec<char>) -> bool {
        buf.clear();
        buf.extend(candidate.chars());
        // Length difference is a lower bound on the distance.
        if self.chars.len().abs_diff(buf.len()) > max_distance.get() {
            return false;
        }
        edit_distance_slices(&self.chars, &buf[..]) <= max_distance.get()
    }
}

struct ScanOutcome {
    matches: Vec<String>,
    scanned: usize,
}

fn scan_sequential<I>(
    query: &str,
    corpus: I,
    max_distance: MaxDistance,
    stop_at_first: bool,
    cancel: &CancelToken,
) -> Result<ScanOutcome, MatchError>
where
    I: IntoIterator<Item = Result<String, MatchError>>,
{
    let query = Query::new(query);
    let mut matches = Vec::new();
    let mut scanned = 0;
    let mut buf = Vec::new();

    for entry in corpus {
        if cancel.is_cancelled() {
            return Err(MatchError::Cancelled);
        }
        let candidate = entry?;
        scanned += 1;
        if query.within(&candidate, max_distance, &mut buf) {
            matches.push(candidate);
            if stop_at_first {
                break;
            }
        }
    }

    Ok(ScanOutcome { matches, scanned })
}

fn scan_parallel<I>(
    query: &str,
    corpus: I,
    max_distance: MaxDistance,
    cancel: &CancelToken,
) -> Result<ScanOutcome, MatchError>
where
    I: IntoIterator<Item = Result<String, MatchError>>,
{
    let query = Query::new(query);
    let mut entries = corpus.into_iter();
    let mut matches = Vec::new();
    let mut scanned = 0;
    let mut batch: Vec<String> = Vec::with_capacity(BATCH_SIZE);

    loop {
        for entry in entries.by_ref().take(BATCH_SIZE) {
            batch.push(entry?);
            if cancel.is_cancelled() {
                break;
            }
        }
        if batch.is_empty() {
            break;
        }

        // Indexed collect keeps the batch in corpus order; one scratch
        // buffer per rayon job.
        let hits: Vec<bool> = batch
            .par_iter()
            .map_init(Vec::new, |buf, candidate| {
                !cancel.is_cancelled() && query.within(candidate, max_distance, buf)
            })
            .collect();

        // A cancel during the batch leaves `hits` incomplete.
        if cancel.is_cancelled() {
            return Err(MatchError::Cancelled);
        }

        scanned += batch.len();
        matches.extend(
            batch
                .drain(..)
                .zip(hits)
                .filter_map(|(candidate, hit)| hit.then_some(candidate)),
        );
    }

    Ok(ScanOutcome { matches, scanned })
}

/// Collect every corpus entry within `max_distance` of `query`, in corpus
/// order. Duplicates are kept and the whole corpus is always scanned.
pub fn find_matches<I>(
    query: &str,
    corpus: I,
    max_distance: MaxDistance,
    cancel: &CancelToken,
) -> Result<Vec<String>, MatchError>
where
    I: IntoIterator<Item = Result<String, MatchError>>,
{
    scan_sequential(query, corpus, max_distance, false, cancel).map(|o| o.matches)
}

/// Same result as [`find_matches`], with distances computed on the current
/// rayon pool. The corpus is still read lazily, one batch at a time.
pub fn find_matches_parallel<I>(
    query: &str,
    corpus: I,
    max_distance: MaxDistance,
    cancel: &CancelToken,
) -> Result<Vec<String>, MatchError>
where
    I: IntoIterator<Item = Result<String, MatchError>>,
{
    scan_parallel(query, corpus, max_distance, cancel).map(|o| o.matches)
}

/// First corpus entry within `max_distance` of `query`, stopping as soon as
/// one is found.
pub fn any_match<I>(
    query: &str,
    corpus: I,
    max_distance: MaxDistance,
    cancel: &CancelToken,
) -> Result<Option<String>, MatchError>
where
    I: IntoIterator<Item = Result<String, MatchError>>,
{
    scan_sequential(query, corpus, max_distance, true, cancel).map(|o| o.matches.into_iter().next())
}

/// Run the scan selected by `settings` and summarize it.
///
/// `first_only` always scans sequentially; otherwise `jobs > 1` selects the
/// parallel scan. The caller decides which rayon pool the parallel scan runs on.
pub fn check<I>(
    query: &str,
    corpus: I,
    settings: &MatchSettings,
    cancel: &CancelToken,
) -> Result<CheckReport, MatchError>
where
    I: IntoIterator<Item = Result<String, MatchError>>,
{
    let outcome = if settings.first_only {
        scan_sequential(query, corpus, settings.max_distance, true, cancel)?
    } else if settings.jobs > 1 {
        scan_parallel(query, corpus, settings.max_distance, cancel)?
    } else {
        scan_sequential(query, corpus, settings.max_distance, false, cancel)?
    };

    Ok(CheckReport {
        max_distance: settings.max_distance,
        scanned: outcome.scanned,
        match_count: outcome.matches.len(),
        matches: outcome.matches,
        first_only: settings.first_only,
    })
}
