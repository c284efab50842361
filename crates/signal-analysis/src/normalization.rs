//! Feature extraction and z-score standardization
//!
//! The similarity engine works on a rectangular matrix of numeric features.
//! This module builds that matrix from a [`LeagueStats`] table and fits the
//! per-column standardization parameters.
//!
//! # Overview
//!
//! 1. Extract a [`FeatureMatrix`] (missing values filled with `0.0`)
//! 2. Fit a [`FeatureScaler`] on the whole matrix (one [`ColumnScale`] per column)
//! 3. Transform rows into zero-mean, unit-variance vectors
//!
//! The scaler is always fitted on the entire league table, never on a
//! query-dependent subset.
//!
//! # Example
//!
//! ```
//! use signal_analysis::{
//!     league::{LeagueStats, LeagueStatsRow},
//!     normalization::{FeatureMatrix, FeatureScaler},
//! };
//!
//! let league = LeagueStats::new(vec![
//!     LeagueStatsRow::new("A", "AAA", [("Points", 10.0)]),
//!     LeagueStatsRow::new("B", "BBB", [("Points", 30.0)]),
//! ]);
//! let matrix = FeatureMatrix::from_league(&league, &["Points".to_string()]).unwrap();
//! let scaler = FeatureScaler::fit(&matrix);
//! assert_eq!(scaler.transform(&matrix.rows[0]), vec![-1.0]);
//! assert_eq!(scaler.transform(&matrix.rows[1]), vec![1.0]);
//! ```

use std::iter;

use signal_stats::descriptive::DescriptiveStats;

use crate::league::LeagueStats;

/// Rectangular numeric feature matrix, one row per league row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    /// Feature column names, in matrix column order
    pub columns: Vec<String>,
    /// Row-major values; every entry is finite
    pub rows: Vec<Vec<f64>>,
}

/// Standardization parameters for a single feature column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnScale {
    /// Column mean over the fitted table
    pub mean: f64,
    /// Population standard deviation, or `1.0` for a constant column
    pub scale: f64,
}

/// Per-column z-score standardization fitted on a [`FeatureMatrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureScaler {
    /// Mapping from matrix column to its parameters
    pub columns: Vec<ColumnScale>,
}

impl FeatureMatrix {
    /// Extracts `feature_columns` from `league`.
    ///
    /// Missing and non-finite values become `0.0`.
    ///
    /// # Returns
    ///
    /// `None` if the table is empty or any requested column is absent from it.
    #[must_use]
    pub fn from_league(league: &LeagueStats, feature_columns: &[String]) -> Option<Self> {
        if league.is_empty()
            || feature_columns
                .iter()
                .any(|column| !league.has_column(column))
        {
            return None;
        }

        let rows = league
            .rows
            .iter()
            .map(|row| {
                feature_columns
                    .iter()
                    .map(|column| row.value_or_zero(column))
                    .collect()
            })
            .collect();
        Some(Self {
            columns: feature_columns.to_vec(),
            rows,
        })
    }

    /// Returns the values of matrix column `index`.
    pub fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row[index])
    }
}

impl ColumnScale {
    /// Fits a column's mean and scale.
    ///
    /// A zero-variance column keeps a scale of `1.0` so it standardizes to
    /// all zeros instead of dividing by zero.
    #[must_use]
    pub fn fit<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let Some(stats) = DescriptiveStats::new(values) else {
            return Self {
                mean: 0.0,
                scale: 1.0,
            };
        };
        // Relative epsilon so large-magnitude constant columns still count as constant
        let scale = if stats.std_dev <= f64::EPSILON * stats.mean.abs().max(1.0) {
            1.0
        } else {
            stats.std_dev
        };
        Self {
            mean: stats.mean,
            scale,
        }
    }

    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        (value - self.mean) / self.scale
    }
}

impl FeatureScaler {
    /// Fits one [`ColumnScale`] per matrix column.
    #[must_use]
    pub fn fit(matrix: &FeatureMatrix) -> Self {
        let columns = (0..matrix.columns.len())
            .map(|index| ColumnScale::fit(matrix.column(index)))
            .collect();
        Self { columns }
    }

    /// Standardizes a single feature vector.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `row` does not have one value per fitted column.
    #[must_use]
    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        debug_assert_eq!(row.len(), self.columns.len());
        iter::zip(&self.columns, row)
            .map(|(scale, value)| scale.apply(*value))
            .collect()
    }

    /// Standardizes every row of `matrix`.
    #[must_use]
    pub fn transform_matrix(&self, matrix: &FeatureMatrix) -> Vec<Vec<f64>> {
        matrix.rows.iter().map(|row| self.transform(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::league::LeagueStatsRow;

    use super::*;

    fn features(columns: &[&str]) -> Vec<String> {
        columns.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_missing_column_is_none() {
        let league = LeagueStats::new(vec![LeagueStatsRow::new("A", "AAA", [("Points", 1.0)])]);
        assert!(FeatureMatrix::from_league(&league, &features(&["Points", "Assists"])).is_none());
        let empty = LeagueStats::default();
        assert!(FeatureMatrix::from_league(&empty, &features(&["Points"])).is_none());
    }

    #[test]
    fn test_missing_values_filled_with_zero() {
        let league = LeagueStats::new(vec![
            LeagueStatsRow::new("A", "AAA", [("Points", 4.0), ("Assists", f64::NAN)]),
            LeagueStatsRow::new("B", "BBB", [("Points", 6.0)]),
            LeagueStatsRow::new("C", "CCC", [("Assists", 2.0)]),
        ]);
        let matrix =
            FeatureMatrix::from_league(&league, &features(&["Points", "Assists"])).unwrap();
        assert_eq!(
            matrix.rows,
            vec![vec![4.0, 0.0], vec![6.0, 0.0], vec![0.0, 2.0]]
        );
    }

    #[test]
    fn test_standardized_columns_have_zero_mean_unit_variance() {
        let league = LeagueStats::new(
            [1.0, 2.0, 3.0, 4.0]
                .iter()
                .map(|v| LeagueStatsRow::new("P", "T", [("Points", *v), ("Assists", v * 10.0)]))
                .collect(),
        );
        let matrix =
            FeatureMatrix::from_league(&league, &features(&["Points", "Assists"])).unwrap();
        let scaler = FeatureScaler::fit(&matrix);
        let standardized = scaler.transform_matrix(&matrix);
        for col in 0..2 {
            let values = standardized.iter().map(|row| row[col]).collect::<Vec<_>>();
            let stats = DescriptiveStats::new(values).unwrap();
            assert!(stats.mean.abs() < 1e-12);
            assert!((stats.std_dev - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_constant_column_keeps_unit_scale() {
        let scale = ColumnScale::fit([5.0, 5.0, 5.0]);
        assert_eq!(scale.scale, 1.0);
        assert_eq!(scale.apply(5.0), 0.0);
    }
}
