//! Summary statistics over possibly-missing values.
//!
//! Peer multiples are frequently undefined, so every function here skips
//! non-finite inputs and returns `None` when nothing is left.

use serde::{Deserialize, Serialize};

/// Mean, median and count of the defined values in a sample.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Arithmetic mean of the defined values.
    pub mean: Option<f64>,
    /// Median of the defined values.
    pub median: Option<f64>,
    /// Number of defined values.
    pub count: usize,
}

impl Summary {
    /// Summarise the defined entries of `values`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasador_core::stats::Summary;
    ///
    /// let summary = Summary::from_options(&[Some(10.0), None, Some(20.0), Some(30.0)]);
    /// assert_eq!(summary.count, 3);
    /// assert_eq!(summary.median, Some(20.0));
    /// ```
    #[must_use]
    pub fn from_options(values: &[Option<f64>]) -> Self {
        let defined: Vec<f64> = values.iter().flatten().copied().collect();
        Self::from_values(&defined)
    }

    /// Summarise `values`, ignoring NaN and infinities.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        let finite = finite(values);
        Self {
            mean: mean(&finite),
            median: median(&finite),
            count: finite.len(),
        }
    }
}

fn finite(values: &[f64]) -> Vec<f64> {
    values.iter().filter(|x| x.is_finite()).copied().collect()
}

/// Arithmetic mean of the finite values.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    let finite = finite(values);
    if finite.is_empty() {
        return None;
    }
    Some(finite.iter().sum::<f64>() / finite.len() as f64)
}

/// Median of the finite values; the average of the middle pair for even counts.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted = finite(values);
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

/// Sample standard deviation (N-1 denominator) of the finite values.
///
/// Returns `None` for fewer than two values.
#[must_use]
pub fn sample_std(values: &[f64]) -> Option<f64> {
    let finite = finite(values);
    let n = finite.len();
    if n < 2 {
        return None;
    }
    let mean = finite.iter().sum::<f64>() / n as f64;

    // Bessel's correction
    let variance = finite.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    Some(variance.sqrt())
}

/// Compound annual growth rate from `start` to `end` over `years`.
///
/// Returns `None` when `start` is not positive, `years` is not positive, or
/// either value is not finite.
#[must_use]
pub fn annualized_return(start: f64, end: f64, years: f64) -> Option<f64> {
    if !(start.is_finite() && end.is_finite() && years.is_finite()) {
        return None;
    }
    if start <= 0.0 || years <= 0.0 || end < 0.0 {
        return None;
    }
    Some((end / start).powf(1.0 / years) - 1.0)
}
