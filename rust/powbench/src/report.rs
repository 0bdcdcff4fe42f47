//! Run reports in text, CSV and JSON form.

use crate::config::BenchConfig;
use crate::driver::CaseSamples;
use crate::error::BenchError;
use crate::stats::Summary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

pub const MODE: &str = "avgt";
pub const UNITS: &str = "us/op";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Csv,
    Json,
}

/// Summary of one case across all forks.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub name: String,
    pub mode: &'static str,
    pub units: &'static str,
    pub ops_per_invocation: usize,
    #[serde(flatten)]
    pub summary: Summary,
    pub samples_us: Vec<f64>,
}

impl CaseResult {
    /// `None` when the case produced no samples.
    pub fn from_samples(case: CaseSamples) -> Option<Self> {
        let summary = Summary::from_samples(&case.samples_us)?;
        Some(Self {
            name: case.name,
            mode: MODE,
            units: UNITS,
            ops_per_invocation: case.ops_per_invocation,
            summary,
            samples_us: case.samples_us,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    /// Input seed of each trial, in fork order.
    pub seeds: Vec<u64>,
    pub config: BenchConfig,
    pub results: Vec<CaseResult>,
}

pub fn render(report: &RunReport, format: OutputFormat) -> Result<String, BenchError> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Csv => Ok(render_csv(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)? + "\n"),
    }
}

fn render_text(report: &RunReport) -> String {
    let seeds: Vec<String> = report.seeds.iter().map(|s| s.to_string()).collect();
    let name_width = report
        .results
        .iter()
        .map(|r| r.name.len())
        .chain(std::iter::once("Benchmark".len()))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "# Run started {}, seed(s): {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        seeds.join(", ")
    );
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<name_width$}  {:>4}  {:>3}  {:>10}    {:>10}  {}",
        "Benchmark", "Mode", "Cnt", "Score", "Error", "Units"
    );
    for r in &report.results {
        let error = match r.summary.error {
            Some(e) => format!("± {:>10.4}", e),
            None => " ".repeat(12),
        };
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>4}  {:>3}  {:>10.4}  {}  {}",
            r.name, r.mode, r.summary.count, r.summary.mean, error, r.units
        );
    }
    out
}

fn render_csv(report: &RunReport) -> String {
    let mut out = String::from("name,mode,count,score,error,stddev,min,max,units\n");
    for r in &report.results {
        let _ = writeln!(
            out,
            "{},{},{},{:.6},{},{:.6},{:.6},{:.6},{}",
            r.name,
            r.mode,
            r.summary.count,
            r.summary.mean,
            r.summary
                .error
                .map_or("N/A".to_string(), |e| format!("{:.6}", e)),
            r.summary.stddev,
            r.summary.min,
            r.summary.max,
            r.units,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> RunReport {
        let case = |name: &str, xs: &[f64]| {
            CaseResult::from_samples(CaseSamples {
                name: name.to_string(),
                ops_per_invocation: 50,
                samples_us: xs.to_vec(),
            })
            .unwrap()
        };
        RunReport {
            started_at: DateTime::parse_from_rfc3339("2026-10-18T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            seeds: vec![42],
            config: BenchConfig::default(),
            results: vec![
                case("smallPowerFast", &[0.001, 0.002, 0.003]),
                case("mediumPowerSlow", &[0.5]),
            ],
        }
    }

    #[test]
    fn text_has_header_and_rows() {
        let text = render(&report(), OutputFormat::Text).unwrap();
        assert!(text.contains("seed(s): 42"));
        assert!(text.contains("Benchmark"));
        let row = text.lines().find(|l| l.starts_with("smallPowerFast")).unwrap();
        assert!(row.contains("avgt"));
        assert!(row.contains("0.0020"));
        assert!(row.contains('±'));
        assert!(row.ends_with("us/op"));
        let single = text.lines().find(|l| l.starts_with("mediumPowerSlow")).unwrap();
        assert!(!single.contains('±'));
    }

    #[test]
    fn csv_rows() {
        let csv = render(&report(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("name,mode,count,score"));
        assert!(lines[1].starts_with("smallPowerFast,avgt,3,0.002000,"));
        assert!(lines[2].contains(",N/A,"));
    }

    #[test]
    fn json_is_parseable() {
        let json = render(&report(), OutputFormat::Json).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["seeds"][0], 42);
        assert_eq!(v["results"][0]["name"], "smallPowerFast");
        assert_eq!(v["results"][0]["count"], 3);
        assert_eq!(v["results"][0]["units"], "us/op");
        assert!(v["results"][1]["error"].is_null());
        assert_eq!(v["config"]["measurement_iterations"], 5);
    }
}
