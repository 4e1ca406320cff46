// Order statistics for replay timings
//
// Median: order-statistic median on f64 (middle value, or the mean of the two
// middle values for even n).
//
// Percentile: exclusive method. The sorted data is split into 100
// equal-probability bins using rank p*(n+1)/100; the rank is clamped to
// [1, n-1] so ranks past either end extrapolate linearly from the outermost
// pair. With 10 samples the 95th percentile therefore lies above the maximum.

use super::{ReplayError, Result};
use statrs::statistics::{Data, OrderStatistics};

const BINS: i64 = 100;

/// Median of the values (order-statistic definition)
pub fn median(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(ReplayError::NoData);
    }

    let len = values.len();
    let mut data = Data::new(values.to_vec());

    // order_statistic is 1-based
    let value = if len % 2 == 1 {
        data.order_statistic(len / 2 + 1)
    } else {
        let lower = data.order_statistic(len / 2);
        let upper = data.order_statistic(len / 2 + 1);
        (lower + upper) / 2.0
    };

    if value.is_nan() {
        return Err(ReplayError::Computation(
            "Failed to compute median: NaN in replay times".to_string(),
        ));
    }

    Ok(value)
}

/// The `percentile`-th cut point of 100 equal-probability bins (exclusive method)
///
/// A single value is its own percentile. `percentile` must be in 1..=99.
pub fn exclusive_percentile(values: &[f64], percentile: u32) -> Result<f64> {
    if values.is_empty() {
        return Err(ReplayError::NoData);
    }
    if !(1..=99).contains(&percentile) {
        return Err(ReplayError::InvalidConfig(format!(
            "percentile must be in 1..=99, got {}",
            percentile
        )));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let len = sorted.len();
    if len == 1 {
        return Ok(sorted[0]);
    }

    let scaled = i64::from(percentile) * (len as i64 + 1);
    let j = (scaled / BINS).clamp(1, len as i64 - 1);
    let delta = scaled - j * BINS;

    let lower = sorted[j as usize - 1];
    let upper = sorted[j as usize];

    Ok((lower * (BINS - delta) as f64 + upper * delta as f64) / BINS as f64)
}
