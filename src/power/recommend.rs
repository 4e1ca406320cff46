// Power calculator: one power evaluation plus a sample-size recommendation
//
// Pure core of the interactive calculator. The caller supplies n, d and
// alpha; the tail mode and target power come from the PowerConfig.

use super::config::PowerConfig;
use super::effect_size::{interpret_cohens_d, EffectSize};
use super::sample_size::find_sample_size;
use super::ttest::power_paired_t_test;
use super::{PowerError, Result, TailMode};
use serde::Serialize;

/// What to do about the planned sample size
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Recommendation {
    /// Planned n already reaches the target power
    Sufficient,

    /// Increase the sample size to `n`
    IncreaseSampleSize { n: usize },

    /// No n up to `bound` reaches the target power
    Unreachable { bound: usize },
}

/// Calculator output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerRecommendation {
    pub n: usize,
    pub effect_size: f64,
    pub label: EffectSize,
    pub alpha: f64,
    pub tail: TailMode,
    pub power: f64,
    pub target_power: f64,
    pub recommendation: Recommendation,
}

/// Evaluate paired t-test power at `n` and recommend a sample size when it
/// falls short of `config.target_power`
///
/// `alpha` overrides `config.alpha`.
///
/// # Example
/// ```
/// use evalstats::power::{recommend, PowerConfig, Recommendation};
///
/// let result = recommend(20, 0.5, 0.017, &PowerConfig::default()).unwrap();
/// assert_eq!(result.recommendation, Recommendation::IncreaseSampleSize { n: 38 });
/// ```
pub fn recommend(n: usize, d: f64, alpha: f64, config: &PowerConfig) -> Result<PowerRecommendation> {
    let config = PowerConfig {
        alpha,
        ..config.clone()
    };
    config.validate().map_err(PowerError::InvalidParameter)?;

    let power = power_paired_t_test(n, d, alpha, config.tail)?;

    let recommendation = if power >= config.target_power {
        Recommendation::Sufficient
    } else {
        match find_sample_size(d, &config) {
            Ok(n) => Recommendation::IncreaseSampleSize { n },
            Err(PowerError::SearchBoundExceeded { bound, .. }) => {
                Recommendation::Unreachable { bound }
            }
            Err(e) => return Err(e),
        }
    };

    Ok(PowerRecommendation {
        n,
        effect_size: d,
        label: interpret_cohens_d(d),
        alpha,
        tail: config.tail,
        power,
        target_power: config.target_power,
        recommendation,
    })
}

impl PowerRecommendation {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let target = self.target_power * 100.0;
        let mut report = String::new();

        report.push_str("Results:\n");
        report.push_str(&format!("  Sample size: n = {}\n", self.n));
        report.push_str(&format!(
            "  Effect size: d = {} ({})\n",
            self.effect_size, self.label
        ));
        report.push_str(&format!("  Significance: α = {} ({})\n", self.alpha, self.tail));
        report.push_str(&format!(
            "  Power: {:.4} ({:.1}%)\n\n",
            self.power,
            self.power * 100.0
        ));

        match &self.recommendation {
            Recommendation::Sufficient => {
                report.push_str(&format!("✅ Power is sufficient (≥{:.0}%)\n", target));
            }
            Recommendation::IncreaseSampleSize { n } => {
                report.push_str(&format!(
                    "⚠️  Power is below {:.0}%. Consider increasing sample size.\n",
                    target
                ));
                report.push_str(&format!(
                    "    Recommended: n = {} for {:.0}% power\n",
                    n, target
                ));
            }
            Recommendation::Unreachable { bound } => {
                report.push_str(&format!(
                    "⚠️  Power is below {:.0}%. Consider increasing sample size.\n",
                    target
                ));
                report.push_str(&format!(
                    "❌ No sample size up to {} reaches {:.0}% power for d = {}\n",
                    bound, target, self.effect_size
                ));
            }
        }

        report
    }
}
