// Replay summary: descriptive statistics and determinism verdict
//
// The summary keeps full precision in memory. The persisted JSON report rounds
// SRA figures to 4 decimals and truncates replay times to whole milliseconds;
// conclusion flags are always derived from the unrounded mean.

use super::config::ReplayConfig;
use super::quantile::{exclusive_percentile, median};
use super::record::TrialRecord;
use super::{ReplayError, Result};
use serde::{Deserialize, Serialize, Serializer};
use statrs::statistics::Statistics;
use std::collections::HashSet;

/// Hypothesis evaluated by the replay experiment
pub const HYPOTHESIS_LABEL: &str = "H3: Replayability & Determinism";

/// Number of distinct state hashes a deterministic replay must produce
const EXPECTED_UNIQUE_HASHES: usize = 1;

/// State reconstruction accuracy statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SraStats {
    #[serde(serialize_with = "round4")]
    pub mean: f64,

    /// Sample standard deviation (n - 1); 0 for a single trial
    #[serde(serialize_with = "round4")]
    pub std_dev: f64,

    /// Lower bound of the normal-approximation 95% CI, clamped to 0
    #[serde(serialize_with = "round4")]
    pub ci_95_lower: f64,

    /// Upper bound of the normal-approximation 95% CI, clamped to 1
    #[serde(serialize_with = "round4")]
    pub ci_95_upper: f64,
}

/// Replay duration statistics in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayTimeStats {
    #[serde(serialize_with = "whole_ms")]
    pub median: f64,

    #[serde(serialize_with = "whole_ms")]
    pub p95: f64,
}

/// State hash uniqueness check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashAnalysis {
    /// Distinct hashes, excluding the "unknown" sentinel
    pub unique_hashes: usize,
    pub is_deterministic: bool,
    pub expected: usize,
}

/// Final verdict flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conclusion {
    /// Mean SRA is exactly 1.0
    pub sra_perfect: bool,
    pub deterministic: bool,
    pub hypothesis_supported: bool,
}

/// Summary of a replay experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub hypothesis: String,
    pub trials: usize,
    pub sra: SraStats,
    pub replay_time_ms: ReplayTimeStats,
    pub hash_analysis: HashAnalysis,
    pub conclusion: Conclusion,
}

fn round4<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 10_000.0).round() / 10_000.0)
}

fn whole_ms<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_i64(value.trunc() as i64)
}

/// Summarize replay trials with the default configuration
///
/// # Example
/// ```
/// use evalstats::replay::{summarize, TrialRecord};
///
/// let trials: Vec<TrialRecord> = (0..10)
///     .map(|i| TrialRecord::new(1.0, 100.0 + 10.0 * i as f64, "abc123"))
///     .collect();
///
/// let summary = summarize(&trials).unwrap();
/// assert!(summary.conclusion.hypothesis_supported);
/// ```
pub fn summarize(trials: &[TrialRecord]) -> Result<ReplaySummary> {
    summarize_with(trials, &ReplayConfig::default())
}

/// Summarize replay trials
///
/// Fails with [`ReplayError::NoData`] on an empty collection.
pub fn summarize_with(trials: &[TrialRecord], config: &ReplayConfig) -> Result<ReplaySummary> {
    config.validate().map_err(ReplayError::InvalidConfig)?;

    if trials.is_empty() {
        return Err(ReplayError::NoData);
    }

    let n = trials.len();
    let sra_scores: Vec<f64> = trials.iter().map(|t| t.sra_score).collect();
    let replay_times: Vec<f64> = trials.iter().map(|t| t.replay_time_ms).collect();

    let sra = sra_statistics(&sra_scores, config.z_score);

    let replay_time_ms = ReplayTimeStats {
        median: median(&replay_times)?,
        p95: exclusive_percentile(&replay_times, config.percentile)?,
    };

    let unique_hashes = trials
        .iter()
        .filter_map(|t| t.state_hash(&config.unknown_hash))
        .collect::<HashSet<_>>()
        .len();
    let is_deterministic = unique_hashes == EXPECTED_UNIQUE_HASHES;

    let sra_perfect = sra.mean == 1.0;

    let summary = ReplaySummary {
        hypothesis: HYPOTHESIS_LABEL.to_string(),
        trials: n,
        sra,
        replay_time_ms,
        hash_analysis: HashAnalysis {
            unique_hashes,
            is_deterministic,
            expected: EXPECTED_UNIQUE_HASHES,
        },
        conclusion: Conclusion {
            sra_perfect,
            deterministic: is_deterministic,
            hypothesis_supported: sra_perfect && is_deterministic,
        },
    };

    tracing::debug!(
        "Summarized {} trials: sra_mean={}, unique_hashes={}, supported={}",
        n,
        summary.sra.mean,
        unique_hashes,
        summary.conclusion.hypothesis_supported
    );

    Ok(summary)
}

fn sra_statistics(scores: &[f64], z_score: f64) -> SraStats {
    let n = scores.len();
    let mean = scores.iter().mean();

    // No variance is estimable from one trial; the CI collapses to the mean
    let (std_dev, margin) = if n > 1 {
        let std_dev = scores.iter().std_dev();
        (std_dev, z_score * std_dev / (n as f64).sqrt())
    } else {
        (0.0, 0.0)
    };

    SraStats {
        mean,
        std_dev,
        ci_95_lower: (mean - margin).max(0.0),
        ci_95_upper: (mean + margin).min(1.0),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "✅ YES"
    } else {
        "❌ NO"
    }
}

impl ReplaySummary {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let rule = "=".repeat(60);
        let mut report = String::new();

        report.push_str(&format!("{}\n", rule));
        report.push_str("  Replay Experiment Statistics (H3)\n");
        report.push_str(&format!("{}\n\n", rule));

        report.push_str(&format!("Trials: {}\n\n", self.trials));

        report.push_str("SRA (State Reconstruction Accuracy):\n");
        report.push_str(&format!("  Mean:       {:.4}\n", self.sra.mean));
        report.push_str(&format!("  Std Dev:    {:.4}\n", self.sra.std_dev));
        report.push_str(&format!(
            "  95% CI:     [{:.4}, {:.4}]\n\n",
            self.sra.ci_95_lower, self.sra.ci_95_upper
        ));

        report.push_str("Replay Performance:\n");
        report.push_str(&format!(
            "  Median Time: {} ms\n",
            self.replay_time_ms.median.trunc() as i64
        ));
        report.push_str(&format!(
            "  P95 Time:    {} ms\n\n",
            self.replay_time_ms.p95.trunc() as i64
        ));

        report.push_str("Determinism Check:\n");
        report.push_str(&format!(
            "  Unique Hashes: {} (expected: {})\n",
            self.hash_analysis.unique_hashes, self.hash_analysis.expected
        ));
        report.push_str(&format!(
            "  Deterministic: {}\n\n",
            yes_no(self.hash_analysis.is_deterministic)
        ));

        report.push_str("Conclusion:\n");
        report.push_str(&format!(
            "  SRA Perfect (1.00):     {}\n",
            yes_no(self.conclusion.sra_perfect)
        ));
        report.push_str(&format!(
            "  Fully Deterministic:    {}\n",
            yes_no(self.conclusion.deterministic)
        ));
        report.push_str(&format!(
            "  Hypothesis Supported:   {}\n\n",
            yes_no(self.conclusion.hypothesis_supported)
        ));

        if self.conclusion.hypothesis_supported {
            report.push_str(
                "🎉 H3 VALIDATED: Event sourcing provides deterministic state reconstruction\n",
            );
        } else {
            report.push_str(
                "⚠️  H3 NOT VALIDATED: Investigate non-determinism or replay failures\n",
            );
        }

        report.push_str(&format!("{}\n", rule));
        report
    }

    /// Serialize to the persisted JSON report format
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ReplayError::Computation(format!("Failed to serialize summary: {}", e)))
    }
}
