//! powbench
//!
//! Harness for the next-power-of-two micro-benchmark: a table of named
//! operations, a warmup/measurement driver, sequential forked trials and
//! text/CSV/JSON reports.

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod fork;
pub mod report;
pub mod runner;
pub mod stats;
pub mod table;

pub use config::BenchConfig;
pub use driver::{CaseSamples, Driver, DriverOptions};
pub use error::BenchError;
pub use report::{OutputFormat, RunReport};
pub use table::{BenchCase, BenchTable};
