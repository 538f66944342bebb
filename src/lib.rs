//! Typo-tolerant leaked-password check.
//!
//! [`distance`] holds the Levenshtein metric and [`matcher`] the exhaustive
//! corpus scan built on it. The remaining modules are the CLI plumbing around
//! them: reading the password list, prompting, configuration and output.

pub mod commands;
pub mod config;
pub mod corpus;
pub mod distance;
pub mod exit_codes;
pub mod interrupt;
pub mod matcher;
pub mod output;
pub mod prompt;
