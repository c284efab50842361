//! Safe aggregates over possibly-empty, possibly-NaN numeric sequences.
//!
//! Every derived metric in the workspace goes through these helpers, so they
//! share one missing-value policy: a NaN is an absent observation. It is
//! skipped by aggregates and never turned into an error.

/// Returns the arithmetic mean of the finite values in `values`.
///
/// NaN and infinite entries are treated as absent. Returns `0.0` when the
/// input is empty or contains no finite value.
///
/// # Examples
///
/// ```
/// # use signal_stats::numeric::safe_mean;
/// assert_eq!(safe_mean([]), 0.0);
/// assert_eq!(safe_mean([f64::NAN, f64::NAN]), 0.0);
/// assert_eq!(safe_mean([2.0, 4.0, f64::NAN]), 3.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn safe_mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

/// Restricts `value` to the closed range `[lower, upper]`.
///
/// Unlike [`f64::clamp`], this never panics: if `lower > upper` the upper
/// bound wins, and a NaN `value` is returned as `lower`.
///
/// # Examples
///
/// ```
/// # use signal_stats::numeric::clamp;
/// assert_eq!(clamp(120.0, 0.0, 100.0), 100.0);
/// assert_eq!(clamp(-5.0, 0.0, 100.0), 0.0);
/// assert_eq!(clamp(40.0, 0.0, 40.0), 40.0);
/// ```
#[must_use]
pub fn clamp(value: f64, lower: f64, upper: f64) -> f64 {
    lower.max(value).min(upper)
}

/// [`clamp`] with the score bounds `[0, 100]`.
#[must_use]
pub fn clamp_percent(value: f64) -> f64 {
    clamp(value, 0.0, 100.0)
}

/// Computes a trailing rolling mean with a minimum of one observation.
///
/// Position `i` holds the mean of the finite values among
/// `series[i + 1 - window..=i]` (fewer at the start of the series), so the
/// output has the same length as the input and position 0 is the value
/// itself. A window holding no finite value yields NaN.
///
/// A `window` of 0 is treated as 1.
///
/// # Examples
///
/// ```
/// # use signal_stats::numeric::rolling_average;
/// assert_eq!(rolling_average(&[10.0], 5), vec![10.0]);
/// assert_eq!(rolling_average(&[10.0, 20.0, 30.0], 2), vec![10.0, 15.0, 25.0]);
/// ```
#[must_use]
pub fn rolling_average(series: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    (0..series.len())
        .map(|end| {
            let start = (end + 1).saturating_sub(window);
            let slice = &series[start..=end];
            if slice.iter().any(|v| v.is_finite()) {
                safe_mean(slice.iter().copied())
            } else {
                f64::NAN
            }
        })
        .collect()
}
