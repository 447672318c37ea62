//! Configuration loading from tickbench.toml
//!
//! Calibration thresholds can be set in a `tickbench.toml` file at the
//! project root, discovered by walking up from the current directory.
//! Built-in defaults apply when no file is found; CLI flags override both.

use crate::runner::Settings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors surfaced while loading or interpreting
/// `tickbench.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The config file is not valid TOML for this schema.
    #[error("invalid config in {path}: {source}")]
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// A duration string was empty.
    #[error("empty duration string")]
    EmptyDuration,
    /// A duration string had an unparsable numeric part.
    #[error("invalid duration number: {0}")]
    InvalidDurationNumber(String),
    /// A duration string used an unrecognized unit suffix.
    #[error("unknown duration unit: {0}")]
    UnknownDurationUnit(String),
    /// A duration string resolved to zero or a negative span, which would
    /// make every attempt trivially stable.
    #[error("duration must be positive: {0}")]
    NonPositiveDuration(String),
}

/// Harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HarnessConfig {
    /// Runner configuration.
    #[serde(default)]
    pub runner: RunnerConfig,
}

/// Calibration thresholds as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Minimum measurement window (e.g., "500ms", "2s").
    #[serde(default = "default_min_time")]
    pub min_time: String,
    /// Hard ceiling on the iteration count of a single attempt.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            min_time: default_min_time(),
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_min_time() -> String {
    "500ms".to_string()
}
fn default_max_iterations() -> u64 {
    1_000_000_000
}

impl HarnessConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Try to discover and load configuration by walking up from the current
    /// directory.
    ///
    /// Returns `Ok(None)` only when no `tickbench.toml` exists anywhere on
    /// the path; a file that exists but cannot be read or parsed is an
    /// error, not a silent fallback to defaults.
    pub fn discover() -> Result<Option<Self>, ConfigError> {
        let Ok(dir) = std::env::current_dir() else {
            return Ok(None);
        };
        Self::discover_from(&dir)
    }

    /// Discovery walk starting from an explicit directory.
    fn discover_from(start: &Path) -> Result<Option<Self>, ConfigError> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join("tickbench.toml");
            if config_path.exists() {
                return Self::load(&config_path).map(Some);
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Resolve the configured thresholds into runner [`Settings`].
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        Ok(Settings {
            max_iterations: self.runner.max_iterations,
            min_time_ns: parse_duration(&self.runner.min_time)?,
        })
    }
}

/// Parse a duration string (e.g., "500ms", "2s", "1m") to nanoseconds.
pub fn parse_duration(s: &str) -> Result<i64, ConfigError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ConfigError::EmptyDuration);
    }

    // Find where the number ends and the unit begins
    let (num_part, unit_part) = s
        .char_indices()
        .find(|(_, c)| c.is_alphabetic())
        .map(|(i, _)| s.split_at(i))
        .unwrap_or((s, "s"));

    let value: f64 = num_part
        .parse()
        .map_err(|_| ConfigError::InvalidDurationNumber(num_part.to_string()))?;

    let multiplier: i64 = match unit_part.to_lowercase().as_str() {
        "ns" => 1,
        "us" => 1_000,
        "ms" => 1_000_000,
        "s" | "" => 1_000_000_000,
        "m" | "min" => 60_000_000_000,
        _ => return Err(ConfigError::UnknownDurationUnit(unit_part.to_string())),
    };

    let ns = (value * multiplier as f64) as i64;
    if ns <= 0 {
        return Err(ConfigError::NonPositiveDuration(s.to_string()));
    }
    Ok(ns)
}
