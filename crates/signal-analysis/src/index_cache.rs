//! Shared cache of fitted similarity indexes
//!
//! Fitting a [`SimilarityIndex`] is cheap, but a host serving many sessions
//! over the same league snapshot can skip refitting by keeping indexes here.
//! Entries are keyed by a [`LeagueFingerprint`] of the table contents plus
//! the feature columns, so a changed table never hits a stale entry. Evicting
//! entries for superseded snapshots is up to the host ([`SimilarityIndexCache::clear`]).

use std::{
    collections::HashMap,
    hash::{DefaultHasher, Hash, Hasher},
    sync::Arc,
};

use parking_lot::RwLock;
use tracing::debug;

use crate::{league::LeagueStats, similarity::SimilarityIndex};

/// Content fingerprint of a league table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeagueFingerprint {
    pub season: String,
    pub rows: usize,
    pub checksum: u64,
}

impl LeagueFingerprint {
    /// Computes the fingerprint of `league`.
    ///
    /// The checksum covers player, team and season labels and every feature
    /// column name and value bit pattern, in row order.
    #[must_use]
    pub fn of(league: &LeagueStats) -> Self {
        let mut hasher = DefaultHasher::new();
        for row in &league.rows {
            row.player.hash(&mut hasher);
            row.team.hash(&mut hasher);
            row.season.hash(&mut hasher);
            for (column, value) in &row.features {
                column.hash(&mut hasher);
                value.map(f64::to_bits).hash(&mut hasher);
            }
        }
        Self {
            season: league.season().to_owned(),
            rows: league.len(),
            checksum: hasher.finish(),
        }
    }
}

type CacheKey = (LeagueFingerprint, Vec<String>);

/// Thread-safe map from league snapshot to fitted index.
#[derive(Debug, Default)]
pub struct SimilarityIndexCache {
    entries: RwLock<HashMap<CacheKey, Arc<SimilarityIndex>>>,
}

impl SimilarityIndexCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached index for `league` and `feature_columns`, fitting
    /// and inserting it on a miss.
    ///
    /// Returns `None` (and caches nothing) when the index cannot be fitted.
    pub fn get_or_fit(
        &self,
        league: &LeagueStats,
        feature_columns: &[String],
    ) -> Option<Arc<SimilarityIndex>> {
        let key = (LeagueFingerprint::of(league), feature_columns.to_vec());
        if let Some(index) = self.entries.read().get(&key) {
            debug!(season = %key.0.season, rows = key.0.rows, "similarity index cache hit");
            return Some(Arc::clone(index));
        }

        debug!(season = %key.0.season, rows = key.0.rows, "similarity index cache miss");
        let index = Arc::new(SimilarityIndex::fit(league, feature_columns)?);
        let mut entries = self.entries.write();
        // Another thread may have fitted the same snapshot in the meantime
        let index = entries.entry(key).or_insert(index);
        Some(Arc::clone(index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
