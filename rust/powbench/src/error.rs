//! Harness errors. Anything here aborts the run with exit code 1.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("cannot read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid toml in '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid benchmark filter '{pattern}': {source}")]
    Filter {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("no benchmark matches filter '{0}'")]
    NoMatch(String),
    #[error("duplicate benchmark name '{0}'")]
    DuplicateCase(String),
    #[error("fork {index}: {message}")]
    Fork { index: u32, message: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
