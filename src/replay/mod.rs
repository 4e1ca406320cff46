// Replay Experiment Statistics (H3: Replayability & Determinism)
//
// Summarizes replay trials into descriptive statistics and a determinism verdict:
// - SRA (State Reconstruction Accuracy): mean, sample std dev, 95% CI
// - Replay time: median and 95th percentile
// - Hash uniqueness: every computed state hash must be identical
//
// The hypothesis holds only when SRA is exactly 1.0 AND exactly one distinct
// state hash was observed. Hashes equal to the "unknown" sentinel were never
// computed and do not count towards uniqueness.
//
// Implementation:
// - Uses statrs (crates.io) for mean, Bessel-corrected standard deviation
//   and the order-statistic median, all on f64
// - Exclusive-method percentile (rank p*(n+1)) for the 95th percentile

mod config;
mod quantile;
mod record;
mod summary;

pub use config::ReplayConfig;
pub use quantile::{exclusive_percentile, median};
pub use record::{load_trials, parse_trials, TrialRecord, UNKNOWN_HASH};
pub use summary::{
    summarize, summarize_with, Conclusion, HashAnalysis, ReplaySummary, ReplayTimeStats,
    SraStats, HYPOTHESIS_LABEL,
};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or summarizing replay trials
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("No results to analyze")]
    NoData,

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Malformed trial record on line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid replay configuration: {0}")]
    InvalidConfig(String),

    #[error("Statistics computation failed: {0}")]
    Computation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for replay analysis operations
pub type Result<T> = std::result::Result<T, ReplayError>;
