//! Command implementations for pwnear CLI.

mod check;

pub use check::{print_human, print_json, run_check, CheckOptions};
