//! Per-game tables for a single player or team
//!
//! A [`GameLog`] is the cleaned output of a data loader: one [`GameLogRow`]
//! per game, with an optional date, an optional home flag and a map of
//! numeric statistics keyed by the upstream column name (`PTS`, `AST`,
//! `MIN`, `PLUS_MINUS`, ...).
//!
//! # Serialization
//!
//! Rows serialize flat, the way the upstream APIs shape them:
//!
//! ```json
//! [
//!   { "GAME_DATE": "2024-01-05", "IS_HOME": true, "MATCHUP": "LAL vs. BOS", "PTS": 31.0, "MIN": 36.0 },
//!   { "GAME_DATE": "2024-01-07", "IS_HOME": false, "PTS": null }
//! ]
//! ```
//!
//! A `null` statistic is a missing value; it is read back as `f64::NAN` by
//! [`GameLogRow::value`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Column name of the game date.
pub const GAME_DATE_COLUMN: &str = "GAME_DATE";
/// Column name of the derived home-game flag.
pub const IS_HOME_COLUMN: &str = "IS_HOME";
/// Column name of the matchup label (`"LAL vs. BOS"` at home, `"LAL @ BOS"` away).
pub const MATCHUP_COLUMN: &str = "MATCHUP";

/// One game for one player or team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameLogRow {
    #[serde(
        rename = "GAME_DATE",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub game_date: Option<NaiveDate>,
    #[serde(rename = "IS_HOME", default, skip_serializing_if = "Option::is_none")]
    pub is_home: Option<bool>,
    #[serde(rename = "MATCHUP", default, skip_serializing_if = "Option::is_none")]
    pub matchup: Option<String>,
    /// Numeric statistics; `None` marks a missing value.
    #[serde(flatten)]
    pub stats: BTreeMap<String, Option<f64>>,
}

impl GameLogRow {
    /// Creates a row from a date and `(column, value)` pairs.
    pub fn new<I, S>(game_date: Option<NaiveDate>, stats: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            game_date,
            is_home: None,
            matchup: None,
            stats: stats
                .into_iter()
                .map(|(column, value)| (column.into(), value.is_finite().then_some(value)))
                .collect(),
        }
    }

    /// Sets the home flag.
    #[must_use]
    pub fn with_home(mut self, is_home: bool) -> Self {
        self.is_home = Some(is_home);
        self
    }

    /// Returns the value of `column`, or NaN when it is missing.
    #[must_use]
    pub fn value(&self, column: &str) -> f64 {
        self.stats
            .get(column)
            .copied()
            .flatten()
            .unwrap_or(f64::NAN)
    }
}

/// An ordered table of games.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameLog {
    pub rows: Vec<GameLogRow>,
}

impl GameLog {
    #[must_use]
    pub fn new(rows: Vec<GameLogRow>) -> Self {
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

    /// Returns `true` if any row carries `column`.
    ///
    /// Columns are table-level: a row without the key still has the column,
    /// with a missing value.
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.rows.iter().any(|row| row.stats.contains_key(column))
    }

    /// Returns `true` if any row carries a home flag.
    #[must_use]
    pub fn has_home_flag(&self) -> bool {
        self.rows.iter().any(|row| row.is_home.is_some())
    }

    /// Returns the values of `column` in row order, NaN where missing.
    #[must_use]
    pub fn column(&self, column: &str) -> Vec<f64> {
        self.rows.iter().map(|row| row.value(column)).collect()
    }

    /// Returns the rows ordered by game date, ascending.
    ///
    /// The sort is stable. Rows without a date keep their relative order and
    /// come after every dated row.
    #[must_use]
    pub fn sorted_by_date(&self) -> Vec<&GameLogRow> {
        let mut rows = self.rows.iter().collect::<Vec<_>>();
        rows.sort_by_key(|row| (row.game_date.is_none(), row.game_date));
        rows
    }

    /// Returns the last row in date order.
    ///
    /// Undated rows sort last, so this is an undated row whenever the log
    /// has one.
    #[must_use]
    pub fn latest_game(&self) -> Option<&GameLogRow> {
        self.sorted_by_date().last().copied()
    }

    /// Returns the last `n` rows in date order.
    #[must_use]
    pub fn tail(&self, n: usize) -> Vec<&GameLogRow> {
        let sorted = self.sorted_by_date();
        let start = sorted.len().saturating_sub(n);
        sorted[start..].to_vec()
    }
}

impl FromIterator<GameLogRow> for GameLog {
    fn from_iter<T: IntoIterator<Item = GameLogRow>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 1, day)
    }

    #[test]
    fn test_sorted_by_date_puts_undated_last() {
        let log = GameLog::new(vec![
            GameLogRow::new(None, [("PTS", 1.0)]),
            GameLogRow::new(date(9), [("PTS", 2.0)]),
            GameLogRow::new(None, [("PTS", 3.0)]),
            GameLogRow::new(date(3), [("PTS", 4.0)]),
        ]);
        let points = log
            .sorted_by_date()
            .iter()
            .map(|row| row.value("PTS"))
            .collect::<Vec<_>>();
        assert_eq!(points, vec![4.0, 2.0, 1.0, 3.0]);
    }

    #[test]
    fn test_sorted_by_date_is_stable_for_equal_dates() {
        let log = GameLog::new(vec![
            GameLogRow::new(date(2), [("PTS", 1.0)]),
            GameLogRow::new(date(1), [("PTS", 2.0)]),
            GameLogRow::new(date(2), [("PTS", 3.0)]),
        ]);
        let points = log
            .sorted_by_date()
            .iter()
            .map(|row| row.value("PTS"))
            .collect::<Vec<_>>();
        assert_eq!(points, vec![2.0, 1.0, 3.0]);
    }

    #[test]
    fn test_column_is_table_level() {
        let log = GameLog::new(vec![
            GameLogRow::new(date(1), [("PTS", 10.0)]),
            GameLogRow::new(date(2), [("AST", 5.0)]),
        ]);
        assert!(log.has_column("PTS"));
        assert!(!log.has_column("REB"));
        let points = log.column("PTS");
        assert_eq!(points[0], 10.0);
        assert!(points[1].is_nan());
    }

    #[test]
    fn test_tail_returns_latest_games() {
        let log = (1..=7)
            .map(|day| GameLogRow::new(date(8 - day), [("PTS", f64::from(day))]))
            .collect::<GameLog>();
        let tail = log.tail(3);
        assert_eq!(
            tail.iter().map(|row| row.value("PTS")).collect::<Vec<_>>(),
            vec![3.0, 2.0, 1.0]
        );
        assert_eq!(log.tail(20).len(), 7);
    }

    #[test]
    fn test_json_shape() {
        let json = r#"[
            {"GAME_DATE": "2024-01-05", "IS_HOME": true, "MATCHUP": "LAL vs. BOS", "PTS": 31.0, "MIN": 36.5},
            {"PTS": null}
        ]"#;
        let log: GameLog = serde_json::from_str(json).unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.rows[0].game_date, date(5));
        assert_eq!(log.rows[0].is_home, Some(true));
        assert_eq!(log.rows[0].matchup.as_deref(), Some("LAL vs. BOS"));
        assert_eq!(log.rows[0].value("MIN"), 36.5);
        assert!(log.rows[1].value("PTS").is_nan());
        assert!(log.rows[1].game_date.is_none());
    }
}
