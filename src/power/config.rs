// Configuration for power and sample-size computations

use super::TailMode;
use serde::{Deserialize, Serialize};

/// Parameters shared by power evaluation and sample-size search
///
/// # Example
/// ```
/// use evalstats::power::PowerConfig;
///
/// let config = PowerConfig::bonferroni(0.05, 3);
/// assert!((config.alpha - 0.05 / 3.0).abs() < 1e-12);
/// assert_eq!(config.search_bound, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    /// Significance level (default 0.05)
    pub alpha: f64,

    /// Power the sample-size search must reach (default 0.80)
    pub target_power: f64,

    /// Default: one-tailed (directional hypotheses)
    pub tail: TailMode,

    /// First sample size evaluated by the search
    pub search_start: usize,

    /// Largest sample size the search may return; going past it is an error
    pub search_bound: usize,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            target_power: 0.80,
            tail: TailMode::OneTailed,
            search_start: 10,
            search_bound: 1000,
        }
    }
}

impl PowerConfig {
    /// Configuration with explicit alpha, target power and tail mode
    pub fn new(alpha: f64, target_power: f64, tail: TailMode) -> Self {
        Self {
            alpha,
            target_power,
            tail,
            ..Self::default()
        }
    }

    /// Bonferroni-corrected configuration: alpha = family_alpha / comparisons
    ///
    /// Three hypotheses at a family-wise 0.05 give the 0.017 per-test level.
    pub fn bonferroni(family_alpha: f64, comparisons: usize) -> Self {
        Self {
            alpha: family_alpha / comparisons.max(1) as f64,
            ..Self::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(format!("alpha must be in (0, 1), got {}", self.alpha));
        }

        if !(self.target_power > 0.0 && self.target_power < 1.0) {
            return Err(format!(
                "target_power must be in (0, 1), got {}",
                self.target_power
            ));
        }

        if self.search_start < 2 {
            return Err(format!(
                "search_start must be >= 2 for a t-test, got {}",
                self.search_start
            ));
        }

        if self.search_start > self.search_bound {
            return Err(format!(
                "search_start ({}) must not exceed search_bound ({})",
                self.search_start, self.search_bound
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PowerConfig::default();
        assert_eq!(config.alpha, 0.05);
        assert_eq!(config.target_power, 0.80);
        assert_eq!(config.tail, TailMode::OneTailed);
        assert_eq!(config.search_start, 10);
        assert_eq!(config.search_bound, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bonferroni_three_hypotheses() {
        let config = PowerConfig::bonferroni(0.05, 3);
        assert!((config.alpha - 0.016_666_666).abs() < 1e-6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bonferroni_zero_comparisons() {
        assert_eq!(PowerConfig::bonferroni(0.05, 0).alpha, 0.05);
    }

    #[test]
    fn test_invalid_alpha() {
        assert!(PowerConfig::new(0.0, 0.8, TailMode::OneTailed)
            .validate()
            .is_err());
        assert!(PowerConfig::new(1.5, 0.8, TailMode::OneTailed)
            .validate()
            .is_err());
    }

    #[test]
    fn test_invalid_target_power() {
        assert!(PowerConfig::new(0.05, 1.0, TailMode::OneTailed)
            .validate()
            .is_err());
    }

    #[test]
    fn test_invalid_search_range() {
        let config = PowerConfig {
            search_start: 1,
            ..PowerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = PowerConfig {
            search_start: 50,
            search_bound: 20,
            ..PowerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tail_mode_serde() {
        let config: PowerConfig = serde_json::from_str(r#"{"tail": "two-tailed"}"#).unwrap();
        assert_eq!(config.tail, TailMode::TwoTailed);
        assert_eq!(config.alpha, 0.05);
    }
}
