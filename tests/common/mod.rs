//! Common test infrastructure for pwnear integration tests.
//!
//! Provides:
//! - TestProject: temp directory with a password list and optional config
//! - Helpers to run the compiled binary with a password on stdin

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Get the path to the compiled pwnear binary
pub fn pwnear_binary() -> String {
    env!("CARGO_BIN_EXE_pwnear").to_string()
}

/// A temp directory used as the working directory for one test.
pub struct TestProject {
    pub dir: tempfile::TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a password list at the default location (data/passwords.txt).
    pub fn with_default_corpus(self, entries: &[&str]) -> Self {
        let data = self.path().join("data");
        std::fs::create_dir_all(&data).expect("Failed to create data dir");
        write_lines(&data.join("passwords.txt"), entries);
        self
    }

    /// Write a password list at `name` and return its absolute path.
    pub fn write_corpus(&self, name: &str, entries: &[&str]) -> PathBuf {
        let path = self.path().join(name);
        write_lines(&path, entries);
        path
    }

    pub fn write_file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    /// Run pwnear in this project with `password` on stdin.
    pub fn run(&self, password: &str, args: &[&str]) -> Output {
        let mut child = Command::new(pwnear_binary())
            .arg("--password-stdin")
            .args(args)
            .current_dir(self.path())
            .env_remove("PWNEAR_CORPUS")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to execute pwnear");

        {
            let mut stdin = child.stdin.take().expect("stdin not piped");
            // The process may exit before reading stdin (setup errors)
            let _ = writeln!(stdin, "{}", password);
        }

        child.wait_with_output().expect("Failed to wait for pwnear")
    }
}

fn write_lines(path: &Path, entries: &[&str]) {
    let mut contents = entries.join("\n");
    contents.push('\n');
    std::fs::write(path, contents).expect("Failed to write corpus");
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Parse JSON from stdout, panicking with helpful message on failure
pub fn parse_json(output: &Output) -> serde_json::Value {
    let out = stdout(output);
    serde_json::from_str(&out).unwrap_or_else(|e| {
        panic!(
            "Failed to parse JSON: {}\nstdout: {}\nstderr: {}",
            e,
            out,
            stderr(output)
        )
    })
}
