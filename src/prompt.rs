//! Reading the password to check.

use anyhow::{bail, Context, Result};
use dialoguer::Password;
use std::io::BufRead;

/// Prompt on the terminal without echo.
pub fn read_password_interactive() -> Result<String> {
    Password::new()
        .with_prompt("Password")
        .allow_empty_password(true)
        .interact()
        .context("read password from terminal")
}

/// Read the password from stdin when `from_stdin` is set, otherwise prompt.
/// Blocks; call from a blocking context.
pub fn read_password(from_stdin: bool) -> Result<String> {
    if from_stdin {
        read_password_line(std::io::stdin().lock())
    } else {
        read_password_interactive()
    }
}

/// Read a single line from `reader`, stripping its line terminator.
/// Used for `--password-stdin`.
pub fn read_password_line<R: BufRead>(mut reader: R) -> Result<String> {
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .context("read password from stdin")?;
    if read == 0 {
        bail!("No password provided on stdin");
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
