//! Exit code policy for pwnear.
//!
//! ## Completed checks (0)
//!
//! A check that scanned the whole password list exits `0` whether or not
//! matches were found. The match count is the answer, not the exit code.
//!
//! ## Usage errors (2)
//!
//! Bad command-line arguments (clap's own code).
//!
//! ## Operational Failures (10+)
//!
//! Failures that mean the check did not run use codes >= 10:
//! - `10` = General operational failure
//! - `11` = Corpus unavailable (password list missing, unreadable, not UTF-8)
//! - `12` = Configuration error (bad config file, negative threshold)
//!
//! This separation keeps "could not read the password list" from ever
//! looking like "0 matches found".

/// Exit code: check completed
pub const SUCCESS: i32 = 0;

/// Exit code: usage error
pub const USAGE: i32 = 2;

/// Exit code: general operational failure
pub const OPERATIONAL_FAILURE: i32 = 10;

/// Exit code: corpus could not be opened or read
pub const CORPUS_UNAVAILABLE: i32 = 11;

/// Exit code: configuration error
pub const CONFIG_ERROR: i32 = 12;

/// Exit code: interrupted by Ctrl+C (SIGINT)
pub const INTERRUPTED: i32 = 130;

/// Map an application error to its exit code by inspecting the error chain.
pub fn for_error(err: &anyhow::Error) -> i32 {
    use crate::config::ConfigError;
    use crate::matcher::MatchError;

    for cause in err.chain() {
        if let Some(match_err) = cause.downcast_ref::<MatchError>() {
            return match match_err {
                MatchError::CorpusUnavailable { .. } => CORPUS_UNAVAILABLE,
                MatchError::InvalidThreshold(_) => CONFIG_ERROR,
                MatchError::Cancelled => INTERRUPTED,
            };
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return CONFIG_ERROR;
        }
    }
    OPERATIONAL_FAILURE
}

/// Machine-readable error code for JSON output.
pub fn error_code(err: &anyhow::Error) -> &'static str {
    use crate::config::ConfigError;
    use crate::matcher::MatchError;

    for cause in err.chain() {
        if let Some(match_err) = cause.downcast_ref::<MatchError>() {
            return match_err.code();
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return "config_error";
        }
    }
    "internal_error"
}
