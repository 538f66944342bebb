//! Password list reader.
//!
//! Yields one entry per line with only the line terminator (`\n` or `\r\n`)
//! removed. Blank lines are entries too. Any I/O or UTF-8 error becomes
//! `MatchError::CorpusUnavailable` and ends the stream.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::matcher::MatchError;

/// Default corpus location, relative to the working directory.
pub const DEFAULT_CORPUS_PATH: &str = "data/passwords.txt";

/// Lazy, single-pass stream of corpus entries.
pub struct Corpus<R = BufReader<File>> {
    path: PathBuf,
    reader: R,
    buf: String,
    done: bool,
}

impl Corpus {
    /// Open a corpus file. Fails with `CorpusUnavailable` if it cannot be opened.
    pub fn open(path: &Path) -> Result<Self, MatchError> {
        let file = File::open(path).map_err(|e| MatchError::CorpusUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if file.metadata().map(|m| m.is_dir()).unwrap_or(false) {
            return Err(MatchError::CorpusUnavailable {
                path: path.to_path_buf(),
                reason: "is a directory".to_string(),
            });
        }
        Ok(Self::from_reader(path, BufReader::new(file)))
    }
}

impl<R: BufRead> Corpus<R> {
    /// Wrap any buffered reader. `path` is only used in error messages.
    pub fn from_reader(path: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            path: path.into(),
            reader,
            buf: String::new(),
            done: false,
        }
    }
}

/// Strip one trailing line terminator.
fn strip_line_terminator(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

impl<R: BufRead> Iterator for Corpus<R> {
    type Item = Result<String, MatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.buf.clear();
        match self.reader.read_line(&mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                let mut line = std::mem::take(&mut self.buf);
                strip_line_terminator(&mut line);
                Some(Ok(line))
            }
            Err(e) => {
                self.done = true;
                Some(Err(MatchError::CorpusUnavailable {
                    path: self.path.clone(),
                    reason: e.to_string(),
                }))
            }
        }
    }
}
