/// Returns the percentage of finite `values` strictly below `value`.
///
/// The denominator is the full population size, missing entries included,
/// so a table with gaps ranks against every row it has. Returns `0.0` for an
/// empty population.
///
/// # Examples
///
/// ```
/// use signal_stats::percentiles::percentile_rank;
///
/// let values = [10.0, 20.0, 30.0, 40.0];
/// assert_eq!(percentile_rank(&values, 30.0), 50.0);
/// assert_eq!(percentile_rank(&values, 10.0), 0.0);
/// assert_eq!(percentile_rank(&values, 45.0), 100.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn percentile_rank(values: &[f64], value: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let below = values.iter().filter(|v| **v < value).count();
    below as f64 / values.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_population() {
        assert_eq!(percentile_rank(&[], 1.0), 0.0);
    }

    #[test]
    fn test_missing_values_count_in_denominator() {
        assert_eq!(percentile_rank(&[1.0, f64::NAN, 3.0, 5.0], 4.0), 50.0);
    }

    #[test]
    fn test_ties_are_not_below() {
        assert_eq!(percentile_rank(&[2.0, 2.0, 2.0, 2.0], 2.0), 0.0);
    }
}
