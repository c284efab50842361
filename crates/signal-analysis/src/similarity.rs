//! Nearest-neighbor player comparisons
//!
//! Players are compared on standardized feature vectors (see
//! [`normalization`](crate::normalization)) with Euclidean distance. The `k`
//! nearest players other than the query player become its comps, each with a
//! similarity score in `[0, 1]`:
//!
//! ```text
//! similarity = 1 - distance / max(max_distance, SIMILARITY_EPSILON)
//! ```
//!
//! where `max_distance` is taken over the `k` returned comps. The closest
//! comp scores nearest to 1, the farthest scores exactly 0 (unless every
//! distance is below the epsilon).
//!
//! # Ordering
//!
//! Comps come back by ascending distance. Equal distances keep input row
//! order, so repeated queries over the same table return identical results.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    league::{LeagueStats, LeagueStatsRow},
    normalization::{FeatureMatrix, FeatureScaler},
};

/// Number of comps returned when the caller does not choose.
pub const DEFAULT_COMP_COUNT: usize = 3;
/// Lower bound on the normalizing distance.
pub const SIMILARITY_EPSILON: f64 = 1e-6;

/// A league row returned as a comp, with its similarity to the query player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    #[serde(flatten)]
    pub row: LeagueStatsRow,
    pub similarity_score: f64,
}

/// A neighbor found by [`SimilarityIndex::nearest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row index in the fitted league table
    pub index: usize,
    /// Euclidean distance in standardized feature space
    pub distance: f64,
}

/// A fitted similarity model over one league table.
///
/// The index owns a copy of the table it was fitted on and is immutable
/// afterwards, so it can be shared across threads.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    league: LeagueStats,
    feature_columns: Vec<String>,
    scaler: FeatureScaler,
    vectors: Vec<Vec<f64>>,
}

impl SimilarityIndex {
    /// Standardizes `feature_columns` over `league` and indexes every row.
    ///
    /// # Returns
    ///
    /// `None` if the table is empty or any feature column is absent.
    #[must_use]
    pub fn fit(league: &LeagueStats, feature_columns: &[String]) -> Option<Self> {
        let Some(matrix) = FeatureMatrix::from_league(league, feature_columns) else {
            debug!(
                rows = league.len(),
                ?feature_columns,
                "similarity index not fitted: empty table or missing feature column"
            );
            return None;
        };
        let scaler = FeatureScaler::fit(&matrix);
        let vectors = scaler.transform_matrix(&matrix);
        Some(Self {
            league: league.clone(),
            feature_columns: feature_columns.to_vec(),
            scaler,
            vectors,
        })
    }

    #[must_use]
    pub fn league(&self) -> &LeagueStats {
        &self.league
    }

    #[must_use]
    pub fn feature_columns(&self) -> &[String] {
        &self.feature_columns
    }

    #[must_use]
    pub fn scaler(&self) -> &FeatureScaler {
        &self.scaler
    }

    /// Returns the standardized vector of row `index`.
    #[must_use]
    pub fn vector(&self, index: usize) -> Option<&[f64]> {
        self.vectors.get(index).map(Vec::as_slice)
    }

    /// Returns the `k` rows nearest to row `query`, excluding `query` itself.
    ///
    /// Fewer than `k` neighbors are returned only when the table has fewer
    /// than `k + 1` rows.
    #[must_use]
    pub fn nearest(&self, query: usize, k: usize) -> Vec<Neighbor> {
        let Some(target) = self.vectors.get(query) else {
            return vec![];
        };
        let mut neighbors = self
            .vectors
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != query)
            .map(|(index, vector)| Neighbor {
                index,
                distance: euclidean_distance(target, vector),
            })
            .collect::<Vec<_>>();
        neighbors.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.index.cmp(&b.index))
        });
        neighbors.truncate(k);
        neighbors
    }

    /// Returns the `k` comps of `player_name` (exact match on the player
    /// column; the first matching row is the query).
    ///
    /// Returns an empty result when the player is not in the table.
    #[must_use]
    pub fn comps(&self, player_name: &str, k: usize) -> Vec<ComparisonRow> {
        let Some(query) = self.league.position_of(player_name) else {
            debug!(player_name, "no comps: player not found in league table");
            return vec![];
        };
        let neighbors = self.nearest(query, k);
        let max_distance = neighbors
            .iter()
            .map(|neighbor| neighbor.distance)
            .max_by(f64::total_cmp)
            .unwrap_or(0.0);
        let denominator = max_distance.max(SIMILARITY_EPSILON);

        neighbors
            .into_iter()
            .map(|neighbor| ComparisonRow {
                row: self.league.rows[neighbor.index].clone(),
                similarity_score: 1.0 - neighbor.distance / denominator,
            })
            .collect()
    }
}

/// Finds the `k` players most similar to `player_name` on `feature_columns`.
///
/// Returns an empty result if the table is empty, a feature column is
/// absent, or the player is not found. The scaler is fitted on the full
/// table on every call; use [`SimilarityIndex`] or
/// [`SimilarityIndexCache`](crate::index_cache::SimilarityIndexCache) to
/// reuse a fit.
///
/// # Examples
///
/// ```
/// use signal_analysis::{
///     league::{LeagueStats, LeagueStatsRow},
///     similarity::find_player_comps,
/// };
///
/// let league = LeagueStats::new(vec![
///     LeagueStatsRow::new("A", "AAA", [("Points", 20.0)]),
///     LeagueStatsRow::new("B", "BBB", [("Points", 20.0)]),
///     LeagueStatsRow::new("C", "CCC", [("Points", 5.0)]),
/// ]);
/// let comps = find_player_comps(&league, "A", &["Points".to_string()], 3);
/// assert_eq!(comps.len(), 2);
/// assert_eq!(comps[0].row.player, "B");
/// assert_eq!(comps[0].similarity_score, 1.0);
/// assert_eq!(comps[1].similarity_score, 0.0);
/// ```
#[must_use]
pub fn find_player_comps(
    league_stats: &LeagueStats,
    player_name: &str,
    feature_columns: &[String],
    k: usize,
) -> Vec<ComparisonRow> {
    SimilarityIndex::fit(league_stats, feature_columns)
        .map(|index| index.comps(player_name, k))
        .unwrap_or_default()
}

/// Euclidean distance between two equal-length vectors.
#[must_use]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Orders comps by descending similarity score (ties keep their order).
///
/// The engine returns comps by distance; this is the display order.
pub fn sort_by_similarity(comps: &mut [ComparisonRow]) {
    comps.sort_by(|a, b| b.similarity_score.total_cmp(&a.similarity_score));
}
