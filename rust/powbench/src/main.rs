//! powbench runner
//!
//! Runs the next-power-of-two benchmark suite and prints the report to
//! stdout. Logs go to stderr.

use clap::Parser as ClapParser;
use powbench::cli::Cli;
use powbench::{fork, report, runner, BenchConfig, BenchError};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn red(s: &str) -> String {
    format!("\x1b[31m{}\x1b[0m", s)
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("powbench=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<BenchConfig, BenchError> {
    let base = match &cli.config {
        Some(path) => BenchConfig::load_from(path)?,
        None => match BenchConfig::discover()? {
            Some((path, cfg)) => {
                info!(path = %path.display(), "loaded config");
                cfg
            }
            None => BenchConfig::default(),
        },
    };
    Ok(cli.apply(base))
}

fn run(cli: Cli) -> Result<(), BenchError> {
    if cli.fork_worker {
        let config = fork::worker_config()?;
        let output = runner::trial(&config)?;
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }
    if cli.print_config {
        print!("{}", BenchConfig::default_template());
        return Ok(());
    }

    let config = load_config(&cli)?;
    let run_report = runner::execute(&config)?;
    print!("{}", report::render(&run_report, config.format)?);
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", red("error:"), e);
            ExitCode::FAILURE
        }
    }
}
