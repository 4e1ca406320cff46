// Trial records: one JSON object per line (JSONL), produced by the replay harness
//
// {"sra_score": 1.0, "replay_time_ms": 142, "im_hash": "abc123"}
//
// `im_hash` may be the sentinel "unknown" when the harness could not hash the
// reconstructed state. A missing or non-string hash is kept as `None`; both
// count as "no hash" when the summary checks determinism.

use super::{ReplayError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Sentinel hash value for trials whose state hash could not be computed
pub const UNKNOWN_HASH: &str = "unknown";

/// A single replay trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// State reconstruction accuracy in [0, 1]
    pub sra_score: f64,

    /// Wall-clock replay duration in milliseconds
    pub replay_time_ms: f64,

    /// Hash of the reconstructed state; `None` when the record had no usable hash
    #[serde(default, deserialize_with = "hash_or_none")]
    pub im_hash: Option<String>,
}

impl TrialRecord {
    pub fn new(sra_score: f64, replay_time_ms: f64, im_hash: impl Into<String>) -> Self {
        Self {
            sra_score,
            replay_time_ms,
            im_hash: Some(im_hash.into()),
        }
    }

    /// Trial whose record carried no state hash
    pub fn without_hash(sra_score: f64, replay_time_ms: f64) -> Self {
        Self {
            sra_score,
            replay_time_ms,
            im_hash: None,
        }
    }

    /// The computed state hash, or `None` if it is absent or equals `unknown_sentinel`
    pub fn state_hash(&self, unknown_sentinel: &str) -> Option<&str> {
        self.im_hash
            .as_deref()
            .filter(|hash| *hash != unknown_sentinel)
    }
}

fn hash_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(hash) => Ok(Some(hash)),
        other => {
            tracing::warn!("Non-string im_hash {} treated as unknown", other);
            Ok(None)
        }
    }
}

/// Parse JSONL trial records from a reader
///
/// Blank lines are skipped. Any other line that is not a valid trial record
/// fails the whole parse with its 1-based line number.
pub fn parse_trials<R: BufRead>(reader: R) -> Result<Vec<TrialRecord>> {
    let mut trials = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record: TrialRecord =
            serde_json::from_str(&line).map_err(|source| ReplayError::MalformedRecord {
                line: index + 1,
                source,
            })?;

        if !(0.0..=1.0).contains(&record.sra_score) {
            tracing::warn!(
                "Line {}: sra_score {} outside [0, 1]",
                index + 1,
                record.sra_score
            );
        }

        trials.push(record);
    }

    Ok(trials)
}

/// Load JSONL trial records from a file
///
/// # Example
///
/// ```no_run
/// use evalstats::replay::load_trials;
///
/// # fn main() -> anyhow::Result<()> {
/// let trials = load_trials("experiments/replay_results.jsonl")?;
/// println!("Loaded {} trials", trials.len());
/// # Ok(())
/// # }
/// ```
pub fn load_trials<P: AsRef<Path>>(path: P) -> Result<Vec<TrialRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReplayError::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let trials = parse_trials(BufReader::new(file))?;
    tracing::debug!("Loaded {} trials from {}", trials.len(), path.display());

    Ok(trials)
}
