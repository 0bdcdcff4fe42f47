//! Forked trials.
//!
//! Each fork re-runs the current executable as a worker with the resolved
//! configuration in [`WORKER_ENV`]. The worker generates its own inputs,
//! runs warmup and measurement, and prints a [`TrialOutput`] as JSON on
//! stdout. Forks run strictly one after another.

use crate::config::BenchConfig;
use crate::driver::CaseSamples;
use crate::error::BenchError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::info;

/// Environment variable carrying the worker's configuration as JSON.
pub const WORKER_ENV: &str = "POWBENCH_WORKER_CONFIG";
/// Flag that switches the binary into worker mode.
pub const WORKER_FLAG: &str = "--fork-worker";

/// Samples produced by one trial, in-process or forked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialOutput {
    pub seed: u64,
    pub cases: Vec<CaseSamples>,
}

/// Run `config.forks` workers of the current executable.
pub fn run_forks(config: &BenchConfig) -> Result<Vec<TrialOutput>, BenchError> {
    let exe = std::env::current_exe()?;
    run_forks_with(&exe, config)
}

/// Run `config.forks` workers of `exe`, sequentially.
pub fn run_forks_with(exe: &Path, config: &BenchConfig) -> Result<Vec<TrialOutput>, BenchError> {
    let payload = serde_json::to_string(config)?;
    (1..=config.forks)
        .map(|index| {
            info!(fork = index, of = config.forks, "starting fork");
            spawn_worker(exe, &payload, index)
        })
        .collect()
}

fn spawn_worker(exe: &Path, payload: &str, index: u32) -> Result<TrialOutput, BenchError> {
    let output = Command::new(exe)
        .arg(WORKER_FLAG)
        .env(WORKER_ENV, payload)
        .stdin(Stdio::null())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|e| BenchError::Fork {
            index,
            message: format!("failed to spawn '{}': {}", exe.display(), e),
        })?;

    if !output.status.success() {
        return Err(BenchError::Fork {
            index,
            message: format!("worker exited with {}", output.status),
        });
    }

    serde_json::from_slice(&output.stdout).map_err(|e| BenchError::Fork {
        index,
        message: format!("unreadable worker output: {}", e),
    })
}

/// Configuration handed to this process by its parent.
pub fn worker_config() -> Result<BenchConfig, BenchError> {
    let payload = std::env::var(WORKER_ENV).map_err(|_| {
        BenchError::InvalidConfig(format!("{} set without {}", WORKER_FLAG, WORKER_ENV))
    })?;
    Ok(serde_json::from_str(&payload)?)
}
