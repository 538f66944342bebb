//! Tests use the compiled binary (CARGO_BIN_EXE_pwnear) instead of `cargo run`
//! for faster and more reliable execution.

use std::process::Command;

/// Get the path to the compiled pwnear binary
fn pwnear_binary() -> String {
    env!("CARGO_BIN_EXE_pwnear").to_string()
}

#[test]
fn test_help_lists_flags() {
    let output = Command::new(pwnear_binary())
        .args(["--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: pwnear"));
    assert!(stdout.contains("--show-matching"));
    assert!(stdout.contains("--max-distance"));
    assert!(stdout.contains("--password-stdin"));
    assert!(stdout.contains("Exit codes"));
}

#[test]
fn test_version() {
    let output = Command::new(pwnear_binary())
        .args(["--version"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_json_version() {
    let output = Command::new(pwnear_binary())
        .args(["--json", "--version"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("version output should be JSON");
    assert_eq!(json["ok"], true);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let output = Command::new(pwnear_binary())
        .args(["--no-such-flag"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}
