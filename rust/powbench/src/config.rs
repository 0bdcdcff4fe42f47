//! Harness configuration.
//!
//! Values come from built-in defaults, then an optional `powbench.toml`
//! (current directory, then ancestors), then command-line flags.

use crate::error::BenchError;
use crate::report::OutputFormat;
use powbench_core::{InputBounds, DEFAULT_MEDIUM, DEFAULT_SIZE, DEFAULT_SMALL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "powbench.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Iterations run and discarded before measuring.
    pub warmup_iterations: u32,
    /// Iterations that produce samples.
    pub measurement_iterations: u32,
    /// Worker processes to run sequentially; 0 measures in-process.
    pub forks: u32,
    /// Minimum wall time of one iteration, in milliseconds.
    pub iteration_ms: u64,
    /// Seed for the input arrays. Drawn from OS entropy when absent.
    pub seed: Option<u64>,
    /// Elements per input array.
    pub size: usize,
    /// Upper bound of the small range.
    pub small: i32,
    /// Width of the medium range.
    pub medium: i32,
    /// Regex over benchmark names.
    pub filter: Option<String>,
    pub format: OutputFormat,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: 2,
            measurement_iterations: 5,
            forks: 1,
            iteration_ms: 1000,
            seed: None,
            size: DEFAULT_SIZE,
            small: DEFAULT_SMALL,
            medium: DEFAULT_MEDIUM,
            filter: None,
            format: OutputFormat::Text,
        }
    }
}

impl BenchConfig {
    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, BenchError> {
        let content = std::fs::read_to_string(path).map_err(|source| BenchError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| BenchError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find `powbench.toml` in `start` or its ancestors and load it.
    ///
    /// A missing file is `Ok(None)`; a file that exists but does not parse
    /// is an error.
    pub fn discover_from(start: &Path) -> Result<Option<(PathBuf, Self)>, BenchError> {
        let mut dir = start.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let cfg = Self::load_from(&candidate)?;
                return Ok(Some((candidate, cfg)));
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// [`BenchConfig::discover_from`] starting at the current directory.
    pub fn discover() -> Result<Option<(PathBuf, Self)>, BenchError> {
        let cwd = std::env::current_dir()?;
        Self::discover_from(&cwd)
    }

    pub fn bounds(&self) -> InputBounds {
        InputBounds {
            small: self.small,
            medium: self.medium,
        }
    }

    pub fn iteration_time(&self) -> Duration {
        Duration::from_millis(self.iteration_ms)
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        if self.measurement_iterations == 0 {
            return Err(BenchError::InvalidConfig(
                "measurement_iterations must be at least 1".into(),
            ));
        }
        if self.iteration_ms == 0 {
            return Err(BenchError::InvalidConfig(
                "iteration_ms must be at least 1".into(),
            ));
        }
        if self.size == 0 {
            return Err(BenchError::InvalidConfig("size must be at least 1".into()));
        }
        if !self.bounds().is_valid() {
            return Err(BenchError::InvalidConfig(format!(
                "input ranges [1, {}] and [{}, {}+{}) must be non-empty and stay within 1..=2^30",
                self.small, self.small, self.small, self.medium
            )));
        }
        Ok(())
    }

    /// Starter `powbench.toml`.
    pub fn default_template() -> &'static str {
        r#"# powbench configuration
# Command-line flags override anything set here.

warmup_iterations = 2
measurement_iterations = 5
forks = 1
iteration_ms = 1000

# Fix the seed to reproduce input arrays across runs.
# seed = 42

size = 50
small = 10000
medium = 100000000

# filter = "Fast$"
format = "text"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_two_warmup_five_measured_one_fork() {
        let cfg = BenchConfig::default();
        assert_eq!(cfg.warmup_iterations, 2);
        assert_eq!(cfg.measurement_iterations, 5);
        assert_eq!(cfg.forks, 1);
        assert_eq!(cfg.size, 50);
        assert_eq!(cfg.iteration_time(), Duration::from_secs(1));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn template_parses_to_defaults() {
        let cfg: BenchConfig = toml::from_str(BenchConfig::default_template()).expect("parse");
        assert_eq!(cfg, BenchConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg: BenchConfig = toml::from_str("seed = 9\nforks = 0\nformat = \"json\"\n").unwrap();
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.forks, 0);
        assert_eq!(cfg.format, OutputFormat::Json);
        assert_eq!(cfg.measurement_iterations, 5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<BenchConfig>("warmups = 3\n").is_err());
    }

    #[test]
    fn validation_errors() {
        let cases = [
            BenchConfig {
                measurement_iterations: 0,
                ..Default::default()
            },
            BenchConfig {
                iteration_ms: 0,
                ..Default::default()
            },
            BenchConfig {
                size: 0,
                ..Default::default()
            },
            BenchConfig {
                small: 0,
                ..Default::default()
            },
            BenchConfig {
                medium: i32::MAX,
                ..Default::default()
            },
        ];
        for cfg in cases {
            assert!(
                matches!(cfg.validate(), Err(BenchError::InvalidConfig(_))),
                "{:?}",
                cfg
            );
        }
    }

    #[test]
    fn zero_warmup_is_allowed() {
        let cfg = BenchConfig {
            warmup_iterations: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
