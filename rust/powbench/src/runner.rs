//! Top-level run: one in-process trial or a sequence of forked ones.

use crate::config::BenchConfig;
use crate::driver::{CaseSamples, Driver, DriverOptions};
use crate::error::BenchError;
use crate::fork::{self, TrialOutput};
use crate::report::{CaseResult, RunReport};
use crate::table::BenchTable;
use chrono::Utc;
use powbench_core::{entropy_seed, InputSet};
use tracing::info;

/// Build the (possibly filtered) table a config selects.
pub fn table_for(config: &BenchConfig) -> Result<BenchTable, BenchError> {
    let table = BenchTable::standard(config.size);
    match &config.filter {
        Some(pattern) => table.filtered(pattern),
        None => Ok(table),
    }
}

/// Generate inputs and run warmup plus measurement for every selected case
/// in the current process.
pub fn trial(config: &BenchConfig) -> Result<TrialOutput, BenchError> {
    config.validate()?;
    let table = table_for(config)?;
    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = entropy_seed();
            info!(seed, "no seed configured, drew one from OS entropy");
            seed
        }
    };
    let inputs = InputSet::from_seed(seed, &config.bounds(), config.size);
    let driver = Driver::new(table, inputs, DriverOptions::from(config));
    Ok(TrialOutput {
        seed,
        cases: driver.run(),
    })
}

/// Run the configured benchmark and summarise it.
pub fn execute(config: &BenchConfig) -> Result<RunReport, BenchError> {
    config.validate()?;
    // Surface filter errors before spawning anything.
    let table = table_for(config)?;
    info!(
        cases = table.len(),
        warmup = config.warmup_iterations,
        iterations = config.measurement_iterations,
        forks = config.forks,
        "starting benchmark run"
    );

    let started_at = Utc::now();
    let trials = if config.forks == 0 {
        vec![trial(config)?]
    } else {
        fork::run_forks(config)?
    };

    let seeds = trials.iter().map(|t| t.seed).collect();
    let results = merge(trials)
        .into_iter()
        .filter_map(CaseResult::from_samples)
        .collect();

    Ok(RunReport {
        started_at,
        seeds,
        config: config.clone(),
        results,
    })
}

/// Concatenate samples of equally named cases across trials, keeping the
/// order in which cases first appear.
pub fn merge(trials: Vec<TrialOutput>) -> Vec<CaseSamples> {
    let mut merged: Vec<CaseSamples> = Vec::new();
    for trial in trials {
        for case in trial.cases {
            match merged.iter_mut().find(|m| m.name == case.name) {
                Some(existing) => existing.samples_us.extend(case.samples_us),
                None => merged.push(case),
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(name: &str, xs: &[f64]) -> CaseSamples {
        CaseSamples {
            name: name.to_string(),
            ops_per_invocation: 50,
            samples_us: xs.to_vec(),
        }
    }

    #[test]
    fn merge_concatenates_by_name() {
        let a = TrialOutput {
            seed: 1,
            cases: vec![samples("x", &[1.0]), samples("y", &[2.0])],
        };
        let b = TrialOutput {
            seed: 2,
            cases: vec![samples("y", &[3.0]), samples("x", &[4.0])],
        };
        let merged = merge(vec![a, b]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "x");
        assert_eq!(merged[0].samples_us, vec![1.0, 4.0]);
        assert_eq!(merged[1].samples_us, vec![2.0, 3.0]);
    }

    #[test]
    fn trial_uses_configured_seed() {
        let cfg = BenchConfig {
            seed: Some(77),
            forks: 0,
            warmup_iterations: 0,
            measurement_iterations: 1,
            iteration_ms: 1,
            filter: Some("^smallPowerFast$".into()),
            ..Default::default()
        };
        let out = trial(&cfg).unwrap();
        assert_eq!(out.seed, 77);
        assert_eq!(out.cases.len(), 1);
        assert_eq!(out.cases[0].name, "smallPowerFast");
    }

    #[test]
    fn execute_rejects_invalid_config_early() {
        let cfg = BenchConfig {
            measurement_iterations: 0,
            ..Default::default()
        };
        assert!(matches!(execute(&cfg), Err(BenchError::InvalidConfig(_))));
    }
}
