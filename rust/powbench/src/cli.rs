//! Command-line flags. Every flag is optional; without any the standard
//! suite runs with defaults.

use crate::config::BenchConfig;
use crate::report::OutputFormat;
use clap::Parser as ClapParser;
use std::path::PathBuf;

#[derive(ClapParser, Debug, Default)]
#[command(
    name = "powbench",
    version,
    about = "Benchmark next-power-of-two: doubling loop versus bit smearing"
)]
pub struct Cli {
    /// Warmup iterations per benchmark
    #[arg(long)]
    pub warmup: Option<u32>,

    /// Measurement iterations per benchmark
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Worker processes to run sequentially (0 = measure in-process)
    #[arg(long)]
    pub forks: Option<u32>,

    /// Minimum duration of one iteration in milliseconds
    #[arg(long)]
    pub iteration_ms: Option<u64>,

    /// Seed for the input arrays
    #[arg(long)]
    pub seed: Option<u64>,

    /// Elements per input array
    #[arg(long)]
    pub size: Option<usize>,

    /// Only run benchmarks whose name matches this regex
    #[arg(long)]
    pub filter: Option<String>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Config file (default: powbench.toml in this or a parent directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print a starter powbench.toml and exit
    #[arg(long)]
    pub print_config: bool,

    #[arg(long = "fork-worker", hide = true)]
    pub fork_worker: bool,
}

impl Cli {
    /// Overlay the flags that were given on top of `base`.
    pub fn apply(&self, base: BenchConfig) -> BenchConfig {
        BenchConfig {
            warmup_iterations: self.warmup.unwrap_or(base.warmup_iterations),
            measurement_iterations: self.iterations.unwrap_or(base.measurement_iterations),
            forks: self.forks.unwrap_or(base.forks),
            iteration_ms: self.iteration_ms.unwrap_or(base.iteration_ms),
            seed: self.seed.or(base.seed),
            size: self.size.unwrap_or(base.size),
            small: base.small,
            medium: base.medium,
            filter: self.filter.clone().or(base.filter),
            format: self.format.unwrap_or(base.format),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_keeps_config() {
        let cli = Cli::try_parse_from(["powbench"]).unwrap();
        let base = BenchConfig {
            seed: Some(3),
            ..Default::default()
        };
        assert_eq!(cli.apply(base.clone()), base);
        assert!(!cli.fork_worker);
    }

    #[test]
    fn flags_override_file_values() {
        let cli = Cli::try_parse_from([
            "powbench",
            "--warmup",
            "0",
            "--iterations",
            "10",
            "--forks",
            "2",
            "--seed",
            "99",
            "--filter",
            "Slow$",
            "--format",
            "csv",
        ])
        .unwrap();
        let base = BenchConfig {
            seed: Some(1),
            small: 500,
            ..Default::default()
        };
        let cfg = cli.apply(base);
        assert_eq!(cfg.warmup_iterations, 0);
        assert_eq!(cfg.measurement_iterations, 10);
        assert_eq!(cfg.forks, 2);
        assert_eq!(cfg.seed, Some(99));
        assert_eq!(cfg.filter.as_deref(), Some("Slow$"));
        assert_eq!(cfg.format, OutputFormat::Csv);
        assert_eq!(cfg.small, 500);
    }

    #[test]
    fn worker_flag_is_accepted() {
        let cli = Cli::try_parse_from(["powbench", "--fork-worker"]).unwrap();
        assert!(cli.fork_worker);
    }

    #[test]
    fn bad_format_is_rejected() {
        assert!(Cli::try_parse_from(["powbench", "--format", "xml"]).is_err());
    }
}
