// Minimum sample size search
//
// Linear scan from `search_start` upward. Power is non-decreasing in n, so
// the first n meeting the target is the smallest one in the search range.
// The scan stops with an error once n passes `search_bound`.

use super::config::PowerConfig;
use super::ttest::power_paired_t_test;
use super::{PowerError, Result, TailMode};

/// Smallest n in `[search_start, search_bound]` whose paired t-test power
/// reaches `config.target_power`
///
/// Fails with [`PowerError::SearchBoundExceeded`] when no n in range does.
pub fn find_sample_size(d: f64, config: &PowerConfig) -> Result<usize> {
    config.validate().map_err(PowerError::InvalidParameter)?;

    let mut n = config.search_start;
    loop {
        let power = power_paired_t_test(n, d, config.alpha, config.tail)?;
        tracing::trace!("sample size search: n={} power={:.6}", n, power);

        if power >= config.target_power {
            tracing::debug!(
                "n={} reaches power {:.4} (target {}) for d={}, alpha={}",
                n,
                power,
                config.target_power,
                d,
                config.alpha
            );
            return Ok(n);
        }

        n += 1;
        if n > config.search_bound {
            return Err(PowerError::SearchBoundExceeded {
                effect_size: d,
                target_power: config.target_power,
                alpha: config.alpha,
                bound: config.search_bound,
            });
        }
    }
}

/// Required number of pairs for a paired t-test to reach `target_power`
///
/// # Example
/// ```
/// use evalstats::power::{sample_size_paired_t_test, TailMode};
///
/// let n = sample_size_paired_t_test(0.5, 0.80, 0.05, TailMode::OneTailed).unwrap();
/// assert_eq!(n, 27);
/// ```
pub fn sample_size_paired_t_test(
    d: f64,
    target_power: f64,
    alpha: f64,
    tail: TailMode,
) -> Result<usize> {
    find_sample_size(d, &PowerConfig::new(alpha, target_power, tail))
}
