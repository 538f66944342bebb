use anyhow::{bail, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::corpus::DEFAULT_CORPUS_PATH;
use crate::matcher::{MatchError, MatchSettings, MaxDistance};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pwnear.toml";

/// Environment variable overriding the corpus path.
pub const CORPUS_ENV: &str = "PWNEAR_CORPUS";

/// Configuration file could not be found, parsed or validated.
#[derive(Debug)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Main configuration structure loaded from pwnear.toml
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub corpus: Option<CorpusConfig>,
    pub matching: Option<MatchingConfig>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct CorpusConfig {
    pub path: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct MatchingConfig {
    pub max_distance: Option<i64>,
    /// 0 means one worker per available CPU
    pub jobs: Option<usize>,
}

impl Config {
    /// Load config from file, or return default if no config exists.
    /// If an explicit path is provided via --config, it MUST exist (error if not).
    /// If no path is provided, check ./pwnear.toml (use default if not found).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                if !p.exists() {
                    bail!(ConfigError(format!(
                        "Config file not found: {}",
                        p.display()
                    )));
                }
                p
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    default_path
                } else {
                    return Ok(Config::default());
                }
            }
        };

        let contents = fs::read_to_string(config_path).map_err(|e| {
            ConfigError(format!("Failed to read {}: {}", config_path.display(), e))
        })?;
        Self::parse(&contents, config_path)
    }

    fn parse(contents: &str, source: &Path) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| ConfigError(format!("Failed to parse {}: {}", source.display(), e)))?;
        Ok(config)
    }

    /// Corpus path with resolution order: CLI > PWNEAR_CORPUS > config > default
    pub fn corpus_path(&self, cli_path: Option<&Path>) -> PathBuf {
        self.resolve_corpus_path(cli_path, std::env::var(CORPUS_ENV).ok())
    }

    fn resolve_corpus_path(&self, cli_path: Option<&Path>, env_path: Option<String>) -> PathBuf {
        if let Some(p) = cli_path {
            return p.to_path_buf();
        }
        if let Some(p) = env_path.filter(|p| !p.is_empty()) {
            return PathBuf::from(p);
        }
        self.corpus
            .as_ref()
            .and_then(|c| c.path.as_deref())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CORPUS_PATH))
    }

    /// Threshold with resolution order: CLI > config > default.
    /// Negative values are rejected here, before any corpus is opened.
    pub fn max_distance(&self, cli_value: Option<i64>) -> Result<MaxDistance, MatchError> {
        match cli_value.or_else(|| self.matching.as_ref().and_then(|m| m.max_distance)) {
            Some(v) => MaxDistance::new(v),
            None => Ok(MaxDistance::default()),
        }
    }

    /// Worker count with resolution order: CLI > config > 1.
    /// 0 expands to the number of available CPUs.
    pub fn jobs(&self, cli_value: Option<usize>) -> usize {
        let jobs = cli_value
            .or_else(|| self.matching.as_ref().and_then(|m| m.jobs))
            .unwrap_or(1);
        if jobs == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            jobs
        }
    }

    /// Build scan settings from config and CLI overrides.
    pub fn match_settings(
        &self,
        cli_max_distance: Option<i64>,
        cli_jobs: Option<usize>,
        first_only: bool,
    ) -> Result<MatchSettings, MatchError> {
        Ok(MatchSettings {
            max_distance: self.max_distance(cli_max_distance)?,
            jobs: self.jobs(cli_jobs),
            first_only,
        })
    }
}
