// Cohen's (1988) benchmarks for standardized effect sizes

use serde::{Deserialize, Serialize};
use std::fmt;

const SMALL: f64 = 0.2;
const MEDIUM: f64 = 0.5;
const LARGE: f64 = 0.8;

/// Qualitative magnitude of a Cohen's d
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectSize {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectSize {
    pub fn as_str(self) -> &'static str {
        match self {
            EffectSize::Negligible => "negligible",
            EffectSize::Small => "small",
            EffectSize::Medium => "medium",
            EffectSize::Large => "large",
        }
    }
}

impl fmt::Display for EffectSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify |d|: below 0.2 negligible, [0.2, 0.5) small, [0.5, 0.8) medium,
/// 0.8 and above large
///
/// # Example
/// ```
/// use evalstats::power::{interpret_cohens_d, EffectSize};
///
/// assert_eq!(interpret_cohens_d(0.5), EffectSize::Medium);
/// assert_eq!(interpret_cohens_d(0.49).to_string(), "small");
/// ```
pub fn interpret_cohens_d(d: f64) -> EffectSize {
    match d.abs() {
        m if m >= LARGE => EffectSize::Large,
        m if m >= MEDIUM => EffectSize::Medium,
        m if m >= SMALL => EffectSize::Small,
        _ => EffectSize::Negligible,
    }
}
