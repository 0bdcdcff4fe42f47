//! Warmup and measurement loop over a [`BenchTable`].

use crate::config::BenchConfig;
use crate::table::{BenchCase, BenchTable};
use powbench_core::InputSet;
use serde::{Deserialize, Serialize};
use std::hint::black_box;
use std::time::{Duration, Instant};
use tracing::debug;

/// Invocations between clock reads.
const BATCH: u64 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverOptions {
    pub warmup_iterations: u32,
    pub measurement_iterations: u32,
    pub iteration_time: Duration,
}

impl From<&BenchConfig> for DriverOptions {
    fn from(cfg: &BenchConfig) -> Self {
        Self {
            warmup_iterations: cfg.warmup_iterations,
            measurement_iterations: cfg.measurement_iterations,
            iteration_time: cfg.iteration_time(),
        }
    }
}

/// Measured scores of one case, in microseconds per operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSamples {
    pub name: String,
    pub ops_per_invocation: usize,
    pub samples_us: Vec<f64>,
}

/// Runs every case of a table against one fixed input set.
pub struct Driver {
    table: BenchTable,
    inputs: InputSet,
    options: DriverOptions,
}

impl Driver {
    pub fn new(table: BenchTable, inputs: InputSet, options: DriverOptions) -> Self {
        Self {
            table,
            inputs,
            options,
        }
    }

    pub fn inputs(&self) -> &InputSet {
        &self.inputs
    }

    /// Run the whole table in order, one case at a time.
    pub fn run(&self) -> Vec<CaseSamples> {
        self.table.iter().map(|case| self.run_case(case)).collect()
    }

    pub fn run_case(&self, case: &BenchCase) -> CaseSamples {
        for i in 0..self.options.warmup_iterations {
            let score = self.iteration(case);
            debug!(case = %case.name, iteration = i + 1, score, "warmup");
        }
        let samples_us = (0..self.options.measurement_iterations)
            .map(|i| {
                let score = self.iteration(case);
                debug!(case = %case.name, iteration = i + 1, score, "measure");
                score
            })
            .collect();
        CaseSamples {
            name: case.name.clone(),
            ops_per_invocation: case.ops_per_invocation,
            samples_us,
        }
    }

    /// One timed iteration: invoke `case` until `iteration_time` has
    /// elapsed and return the average microseconds per operation.
    fn iteration(&self, case: &BenchCase) -> f64 {
        let values = self.inputs.get(case.range).values();
        let op = case.op;
        let mut invocations: u64 = 0;
        let start = Instant::now();
        let elapsed = loop {
            for _ in 0..BATCH {
                black_box(op(black_box(values)));
            }
            invocations += BATCH;
            let elapsed = start.elapsed();
            if elapsed >= self.options.iteration_time {
                break elapsed;
            }
        };
        let ops = invocations as f64 * case.ops_per_invocation.max(1) as f64;
        elapsed.as_secs_f64() * 1e6 / ops
    }
}
