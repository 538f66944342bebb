//! Cooperative cancellation for corpus scans.
//!
//! A scan checks its [`CancelToken`] before every candidate. The Ctrl+C
//! handler flips the token; a second Ctrl+C exits immediately.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag observed by running scans.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Scans stop before their next candidate.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Set up Ctrl+C handling for a running scan.
///
/// The first Ctrl+C cancels the token so the scan can unwind and report;
/// a second one exits the process with the interrupted code.
pub fn setup_ctrlc_handler(cancel_token: CancelToken) {
    use crate::exit_codes;

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }

        eprintln!("\nInterrupted (Ctrl+C). Stopping scan...");
        cancel_token.cancel();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(exit_codes::INTERRUPTED);
        }
    });
}
