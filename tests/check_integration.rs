//! Integration tests for the password check.
//!
//! Guarantees tested:
//! - Match count is always printed; entries only with --show-matching
//! - Exit code 0 whether or not matches are found
//! - Missing password list exits non-zero with a distinct message
//! - Negative --max-distance is rejected before the list is read
//!
//! Tests use the compiled binary (CARGO_BIN_EXE_pwnear) instead of `cargo run`
//! for faster and more reliable execution.

mod common;

use common::{stderr, stdout, TestProject};

#[test]
fn test_reports_match_count() {
    let project = TestProject::new().with_default_corpus(&["password", "password1", "letmein"]);
    let output = project.run("password", &["--max-distance", "1"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Found 2 matching passwords."), "stdout: {}", out);
    assert!(!out.contains("letmein"));
    assert!(!out.contains("password1"), "matches must not be listed by default");
}

#[test]
fn test_show_matching_lists_in_corpus_order() {
    let project = TestProject::new().with_default_corpus(&["password1", "letmein", "password"]);
    let output = project.run("password", &["--max-distance", "1", "--show-matching"]);

    assert!(output.status.success());
    let out = stdout(&output);
    let first = out.find("password1").expect("password1 listed");
    let second = out.find("  password\n").expect("password listed");
    assert!(first < second);
    assert!(!out.contains("letmein"));
}

#[test]
fn test_no_matches_still_succeeds() {
    let project = TestProject::new().with_default_corpus(&["123456", "qwerty"]);
    let output = project.run("correct horse battery staple", &[]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Found 0 matching passwords."));
}

#[test]
fn test_default_threshold_is_three() {
    let project = TestProject::new().with_default_corpus(&["abcdefg", "abcd", "abcdefgh"]);
    let output = project.run("abcdefgh", &["--show-matching"]);

    assert!(output.status.success());
    let out = stdout(&output);
    // abcd is 4 deletions away, outside the default threshold
    assert!(out.contains("Found 2 matching passwords."), "stdout: {}", out);
    assert!(!out.contains("  abcd\n"));
}

#[test]
fn test_missing_corpus_is_distinct_failure() {
    let project = TestProject::new();
    let output = project.run("password", &[]);

    assert_eq!(output.status.code(), Some(11));
    let err = stderr(&output);
    assert!(err.contains("Could not read the password list"), "stderr: {}", err);
    assert!(!stdout(&output).contains("matching passwords"));
}

#[test]
fn test_invalid_utf8_corpus_is_unavailable() {
    let project = TestProject::new();
    let path = project.write_file("bad.txt", b"password\n\xff\xfe\n");
    let output = project.run("password", &["--corpus", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(11));
    assert!(!stdout(&output).contains("Found"));
}

#[test]
fn test_negative_threshold_rejected_before_corpus() {
    // No corpus exists: the threshold error must win
    let project = TestProject::new();
    let output = project.run("password", &["--max-distance", "-1"]);

    assert_eq!(output.status.code(), Some(12));
    assert!(stderr(&output).contains("Invalid max distance -1"));
}

#[test]
fn test_zero_threshold_is_exact() {
    let project = TestProject::new().with_default_corpus(&["hunter2", "hunter3", "hunter2"]);
    let output = project.run("hunter2", &["--max-distance", "0"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Found 2 matching passwords."));
}

#[test]
fn test_corpus_flag_overrides_default() {
    let project = TestProject::new().with_default_corpus(&["zzzzzzzz"]);
    let custom = project.write_corpus("custom.txt", &["letmein"]);
    let output = project.run("letmein", &["--corpus", custom.to_str().unwrap()]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Found 1 matching password."));
}

#[test]
fn test_corpus_from_config_file() {
    let project = TestProject::new();
    project.write_corpus("list.txt", &["dragon", "dragons", "monkey"]);
    project.write_file(
        "pwnear.toml",
        b"[corpus]\npath = \"list.txt\"\n\n[matching]\nmax_distance = 1\n",
    );
    let output = project.run("dragon", &[]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Found 2 matching passwords."));
}

#[test]
fn test_bad_config_is_config_error() {
    let project = TestProject::new().with_default_corpus(&["a"]);
    project.write_file("pwnear.toml", b"[matching]\nmax_distance = \"three\"\n");
    let output = project.run("a", &[]);

    assert_eq!(output.status.code(), Some(12));
    assert!(stderr(&output).contains("Failed to parse"));
}

#[test]
fn test_parallel_jobs_same_output() {
    let entries: Vec<String> = (0..500).map(|i| format!("pass{}", i)).collect();
    let refs: Vec<&str> = entries.iter().map(String::as_str).collect();
    let project = TestProject::new().with_default_corpus(&refs);

    let sequential = project.run("pass42", &["--show-matching", "--max-distance", "1"]);
    let parallel = project.run(
        "pass42",
        &["--show-matching", "--max-distance", "1", "--jobs", "4"],
    );

    assert!(sequential.status.success());
    assert!(parallel.status.success());
    assert_eq!(stdout(&sequential), stdout(&parallel));
}

#[test]
fn test_any_stops_at_first_match() {
    let project = TestProject::new().with_default_corpus(&["zzz", "password1", "password"]);
    let output = project.run("password", &["--any", "--show-matching", "--max-distance", "1"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Found 1 matching password."), "stdout: {}", out);
    assert!(out.contains("password1"));
}

#[test]
fn test_empty_corpus_warns() {
    let project = TestProject::new();
    project.write_file("empty.txt", b"");
    let output = project.run("password", &["--corpus", "empty.txt"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Found 0 matching passwords."));
    assert!(stderr(&output).contains("is empty"));
}

#[test]
fn test_verbose_reports_settings() {
    let project = TestProject::new().with_default_corpus(&["a"]);
    let output = project.run("a", &["--verbose", "--max-distance", "2"]);

    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("max distance: 2"), "stderr: {}", err);
    assert!(err.contains("Scanned 1 entries"));
}

#[test]
fn test_missing_password_on_stdin() {
    let project = TestProject::new().with_default_corpus(&["a"]);
    let output = std::process::Command::new(common::pwnear_binary())
        .arg("--password-stdin")
        .current_dir(project.path())
        .env_remove("PWNEAR_CORPUS")
        .stdin(std::process::Stdio::null())
        .output()
        .expect("Failed to execute pwnear");

    assert_eq!(output.status.code(), Some(10));
    assert!(stderr(&output).contains("No password provided"));
}
