// Power Analysis for Paired and One-Sample t-Tests
//
// Computes achieved power for a planned sample size, or the minimum sample
// size reaching a target power, for:
// - H1 (correctness): paired t-test, system A vs system B on matched prompts
// - H2 (retrieval quality): one-sample t-test of a mean against a threshold
//
// Model: under the alternative the t statistic follows a noncentral t
// distribution with df = n - 1 and noncentrality ncp = d * sqrt(n), so
//
//     power = 1 - F_nct(t_crit; n - 1, d * sqrt(n))
//
// where t_crit is the (1 - alpha) or (1 - alpha/2) quantile of the central t.
//
// Scientific Foundation:
// [1] Cohen, J. (1988). Statistical Power Analysis for the Behavioral Sciences
//     (2nd ed.). Effect size benchmarks d = 0.2 / 0.5 / 0.8.
// [2] Lenth, R. V. (1989). Algorithm AS 243: Cumulative distribution function
//     of the non-central t distribution. Applied Statistics 38(1), 185-189.
//
// Implementation:
// - Uses statrs (crates.io) for the central Student's t quantile, the
//   regularized incomplete beta and ln-gamma needed by AS 243

mod config;
mod effect_size;
mod noncentral_t;
mod recommend;
mod sample_size;
mod table;
mod ttest;

pub use config::PowerConfig;
pub use effect_size::{interpret_cohens_d, EffectSize};
pub use noncentral_t::noncentral_t_cdf;
pub use recommend::{recommend, PowerRecommendation, Recommendation};
pub use sample_size::{find_sample_size, sample_size_paired_t_test};
pub use table::{
    build_power_tables, OneSampleGrid, OneSampleRow, PairedGrid, PairedRow, PowerTables,
    SampleSizeGrid, SampleSizeRow, Scenario, TableConfig,
};
pub use ttest::{
    critical_value, effect_size_from_threshold, noncentrality, power_one_sample_t_test,
    power_paired_t_test,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by power and sample-size computations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PowerError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(
        "Sample size exceeded {bound} for d={effect_size}, power={target_power}, alpha={alpha}"
    )]
    SearchBoundExceeded {
        effect_size: f64,
        target_power: f64,
        alpha: f64,
        bound: usize,
    },

    #[error("Distribution error: {0}")]
    Distribution(String),
}

/// Result type for power analysis operations
pub type Result<T> = std::result::Result<T, PowerError>;

/// Directionality of the hypothesis test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TailMode {
    /// Directional alternative (e.g. B > A); critical value at 1 - alpha
    #[default]
    OneTailed,
    /// Non-directional alternative; critical value at 1 - alpha/2
    TwoTailed,
}

impl TailMode {
    pub fn from_one_tailed(one_tailed: bool) -> Self {
        if one_tailed {
            TailMode::OneTailed
        } else {
            TailMode::TwoTailed
        }
    }

    pub fn is_one_tailed(self) -> bool {
        self == TailMode::OneTailed
    }
}

impl std::fmt::Display for TailMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TailMode::OneTailed => write!(f, "one-tailed"),
            TailMode::TwoTailed => write!(f, "two-tailed"),
        }
    }
}
