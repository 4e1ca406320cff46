// Configuration for replay summarization
//
// The defaults reproduce the reference analysis exactly: a 1.96 normal
// quantile for the 95% CI, the 95th percentile of replay time and the
// "unknown" hash sentinel.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::record::UNKNOWN_HASH;

/// Configuration for replay summarization
///
/// # Example
/// ```
/// use evalstats::replay::ReplayConfig;
///
/// let config = ReplayConfig::default();
/// assert_eq!(config.z_score, 1.96);
/// assert_eq!(config.percentile, 95);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Standard normal quantile for the SRA confidence interval
    ///
    /// 1.96 gives the two-sided 95% normal-approximation interval
    /// `mean ± z * std / sqrt(n)`.
    pub z_score: f64,

    /// Replay time percentile to report (1..=99)
    pub percentile: u32,

    /// Hash value meaning "state hash was not computed"
    pub unknown_hash: String,

    /// File name of the persisted JSON report, written next to the input
    pub output_file_name: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            z_score: 1.96,
            percentile: 95,
            unknown_hash: UNKNOWN_HASH.to_string(),
            output_file_name: "replay_statistics.json".to_string(),
        }
    }
}

impl ReplayConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string; omitted keys keep their defaults
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.z_score.is_finite() && self.z_score > 0.0) {
            return Err(format!("z_score must be positive, got {}", self.z_score));
        }

        if !(1..=99).contains(&self.percentile) {
            return Err(format!(
                "percentile must be in 1..=99, got {}",
                self.percentile
            ));
        }

        if self.output_file_name.is_empty() {
            return Err("output_file_name must not be empty".to_string());
        }

        Ok(())
    }
}
