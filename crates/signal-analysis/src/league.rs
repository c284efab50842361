//! League-wide per-player season tables
//!
//! A [`LeagueStats`] table holds one [`LeagueStatsRow`] per player for a
//! season. Rows carry identity columns (`Player`, `Team`, `Season`,
//! `LastUpdated`) plus named numeric feature columns such as `Points`,
//! `Assists`, `UsageRate` or `TrueShootingPct`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Column name of the player identifier.
pub const PLAYER_COLUMN: &str = "Player";
/// Column name of the team identifier.
pub const TEAM_COLUMN: &str = "Team";

/// Feature columns used for similarity and league profiles by default.
pub const DEFAULT_FEATURE_COLUMNS: [&str; 5] = [
    "Points",
    "Assists",
    "Rebounds",
    "UsageRate",
    "TrueShootingPct",
];

/// One player's season line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueStatsRow {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "Team", default)]
    pub team: String,
    #[serde(rename = "Season", default)]
    pub season: String,
    #[serde(
        rename = "LastUpdated",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_updated: Option<DateTime<Utc>>,
    /// Numeric feature columns; `None` marks a missing value.
    #[serde(flatten)]
    pub features: BTreeMap<String, Option<f64>>,
}

impl LeagueStatsRow {
    /// Creates a row from identity columns and `(column, value)` pairs.
    pub fn new<I, S>(player: impl Into<String>, team: impl Into<String>, features: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            player: player.into(),
            team: team.into(),
            season: String::new(),
            last_updated: None,
            features: features
                .into_iter()
                .map(|(column, value)| (column.into(), value.is_finite().then_some(value)))
                .collect(),
        }
    }

    /// Returns the value of `column`, or NaN when it is missing.
    #[must_use]
    pub fn value(&self, column: &str) -> f64 {
        self.features
            .get(column)
            .copied()
            .flatten()
            .unwrap_or(f64::NAN)
    }

    /// Returns the value of `column`, or `0.0` when it is missing.
    #[must_use]
    pub fn value_or_zero(&self, column: &str) -> f64 {
        let value = self.value(column);
        if value.is_finite() { value } else { 0.0 }
    }
}

/// A season's league-wide player table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeagueStats {
    pub rows: Vec<LeagueStatsRow>,
}

impl LeagueStats {
    #[must_use]
    pub fn new(rows: Vec<LeagueStatsRow>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if any row carries the feature `column`.
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.rows.iter().any(|row| row.features.contains_key(column))
    }

    /// Returns the subset of `columns` present in the table, in the given order.
    #[must_use]
    pub fn available_columns<S>(&self, columns: &[S]) -> Vec<String>
    where
        S: AsRef<str>,
    {
        columns
            .iter()
            .map(AsRef::as_ref)
            .filter(|column| self.has_column(column))
            .map(str::to_owned)
            .collect()
    }

    /// Returns the values of `column` in row order, NaN where missing.
    #[must_use]
    pub fn column(&self, column: &str) -> Vec<f64> {
        self.rows.iter().map(|row| row.value(column)).collect()
    }

    /// Returns the index of the first row whose player name equals `player`.
    #[must_use]
    pub fn position_of(&self, player: &str) -> Option<usize> {
        self.rows.iter().position(|row| row.player == player)
    }

    /// Returns the season label of the table (taken from the first row).
    #[must_use]
    pub fn season(&self) -> &str {
        self.rows.first().map_or("", |row| row.season.as_str())
    }
}

impl FromIterator<LeagueStatsRow> for LeagueStats {
    fn from_iter<T: IntoIterator<Item = LeagueStatsRow>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
