//! Rolling-average anomaly detection for player props
//!
//! Each game's five-game rolling average is compared against the season
//! average of the same statistic:
//!
//! - **Hot Streak**: rolling average above 120% of the season average
//! - **Cold Streak**: rolling average below 80% of the season average
//! - **Neutral**: anything else, including exact ties with a threshold and
//!   games whose rolling window holds no value
//!
//! A season average of zero is not special-cased: every game with a positive
//! rolling average is then a Hot Streak.

use serde::{Deserialize, Serialize};
use signal_stats::numeric::{rolling_average, safe_mean};
use tracing::debug;

use crate::game_log::{GameLog, GameLogRow};

/// Games in the rolling window.
pub const ROLLING_WINDOW: usize = 5;
/// Multiple of the season average above which a game is a hot streak.
pub const HOT_THRESHOLD: f64 = 1.2;
/// Multiple of the season average below which a game is a cold streak.
pub const COLD_THRESHOLD: f64 = 0.8;
/// Statistic validated when the caller does not pick one.
pub const DEFAULT_STAT_COLUMN: &str = "PTS";

/// Classification of a game's rolling average against the season average.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Signal {
    #[serde(rename = "Hot Streak")]
    #[display("Hot Streak")]
    HotStreak,
    #[serde(rename = "Cold Streak")]
    #[display("Cold Streak")]
    ColdStreak,
    #[serde(rename = "Neutral")]
    #[display("Neutral")]
    Neutral,
}

impl Signal {
    /// Classifies `rolling_average` against `season_average`.
    ///
    /// Both comparisons are strict, and a NaN rolling average is neutral.
    #[must_use]
    pub fn classify(rolling_average: f64, season_average: f64) -> Self {
        if rolling_average > season_average * HOT_THRESHOLD {
            Self::HotStreak
        } else if rolling_average < season_average * COLD_THRESHOLD {
            Self::ColdStreak
        } else {
            Self::Neutral
        }
    }
}

/// A game annotated with its rolling average, season average and signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropValidatorRow {
    #[serde(flatten)]
    pub game: GameLogRow,
    /// `None` when the rolling window holds no value.
    pub rolling_average: Option<f64>,
    pub season_average: f64,
    pub signal: Signal,
}

/// Annotates every game of `game_log` with a hot/cold/neutral signal for
/// `stat_column`.
///
/// Rows come back sorted by game date (stable; undated rows last, in input
/// order). Returns an empty result if the log is empty or no row carries
/// `stat_column`.
///
/// # Examples
///
/// ```
/// use signal_analysis::{
///     game_log::{GameLog, GameLogRow},
///     prop_validator::{Signal, build_prop_validator},
/// };
///
/// let log = [10.0, 10.0, 10.0, 30.0, 30.0, 30.0, 30.0, 30.0]
///     .into_iter()
///     .map(|pts| GameLogRow::new(None, [("PTS", pts)]))
///     .collect::<GameLog>();
/// let rows = build_prop_validator(&log, "PTS");
/// assert_eq!(rows[0].signal, Signal::ColdStreak);
/// assert_eq!(rows[7].signal, Signal::HotStreak);
/// ```
#[must_use]
pub fn build_prop_validator(game_log: &GameLog, stat_column: &str) -> Vec<PropValidatorRow> {
    if game_log.is_empty() || !game_log.has_column(stat_column) {
        debug!(
            stat_column,
            rows = game_log.len(),
            "prop validator skipped: no data for column"
        );
        return vec![];
    }

    let sorted = game_log.sorted_by_date();
    let values = sorted
        .iter()
        .map(|row| row.value(stat_column))
        .collect::<Vec<_>>();
    let rolling = rolling_average(&values, ROLLING_WINDOW);
    let season_average = safe_mean(values.iter().copied());

    sorted
        .into_iter()
        .zip(rolling)
        .map(|(game, rolling_average)| PropValidatorRow {
            game: game.clone(),
            rolling_average: rolling_average.is_finite().then_some(rolling_average),
            season_average,
            signal: Signal::classify(rolling_average, season_average),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn log_of(points: &[f64]) -> GameLog {
        points
            .iter()
            .enumerate()
            .map(|(i, pts)| {
                let day = u32::try_from(i + 1).unwrap();
                GameLogRow::new(NaiveDate::from_ymd_opt(2024, 1, day), [("PTS", *pts)])
            })
            .collect()
    }

    #[test]
    fn test_empty_log() {
        assert!(build_prop_validator(&GameLog::default(), "PTS").is_empty());
    }

    #[test]
    fn test_missing_column() {
        let log = log_of(&[10.0, 20.0]);
        assert!(build_prop_validator(&log, "AST").is_empty());
    }

    #[test]
    fn test_hot_streak_after_low_start() {
        // Season average 14; the last five games average 26.
        let mut points = vec![2.0; 5];
        points.extend([26.0; 5]);
        let rows = build_prop_validator(&log_of(&points), "PTS");
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|row| (row.season_average - 14.0).abs() < 1e-9));
        let last = rows.last().unwrap();
        assert_eq!(last.rolling_average, Some(26.0));
        assert_eq!(last.signal, Signal::HotStreak);
    }

    #[test]
    fn test_last_five_above_threshold() {
        // Season average 12.3; the last five games average 16.9.
        let mut points = vec![10.0; 10];
        points.extend([16.9; 5]);
        let rows = build_prop_validator(&log_of(&points), "PTS");
        let season_average = rows[0].season_average;
        let last = rows.last().unwrap();
        assert!(last.rolling_average.unwrap() > season_average * HOT_THRESHOLD);
        assert_eq!(last.signal, Signal::HotStreak);
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(Signal::classify(12.0, 10.0), Signal::Neutral);
        assert_eq!(Signal::classify(8.0, 10.0), Signal::Neutral);
        assert_eq!(Signal::classify(12.01, 10.0), Signal::HotStreak);
        assert_eq!(Signal::classify(7.99, 10.0), Signal::ColdStreak);
        assert_eq!(Signal::classify(f64::NAN, 10.0), Signal::Neutral);
    }

    #[test]
    fn test_zero_season_average() {
        let rows = build_prop_validator(&log_of(&[0.0, 0.0, 0.0]), "PTS");
        assert!(rows.iter().all(|row| row.signal == Signal::Neutral));
        assert_eq!(Signal::classify(0.5, 0.0), Signal::HotStreak);
    }

    #[test]
    fn test_rows_sorted_by_date() {
        let log = GameLog::new(vec![
            GameLogRow::new(NaiveDate::from_ymd_opt(2024, 2, 3), [("PTS", 30.0)]),
            GameLogRow::new(NaiveDate::from_ymd_opt(2024, 2, 1), [("PTS", 10.0)]),
        ]);
        let rows = build_prop_validator(&log, "PTS");
        assert_eq!(rows[0].rolling_average, Some(10.0));
        assert_eq!(rows[1].rolling_average, Some(20.0));
        assert_eq!(rows[0].season_average, 20.0);
        assert_eq!(rows[0].signal, Signal::ColdStreak);
        assert_eq!(rows[1].signal, Signal::Neutral);
    }

    #[test]
    fn test_missing_values_are_neutral() {
        let log = GameLog::new(vec![
            GameLogRow::new(None, [("PTS", f64::NAN)]),
            GameLogRow::new(None, [("PTS", 10.0)]),
        ]);
        let rows = build_prop_validator(&log, "PTS");
        assert_eq!(rows[0].rolling_average, None);
        assert_eq!(rows[0].signal, Signal::Neutral);
        assert_eq!(rows[1].season_average, 10.0);
    }

    #[test]
    fn test_signal_json() {
        assert_eq!(
            serde_json::to_string(&Signal::HotStreak).unwrap(),
            r#""Hot Streak""#
        );
        assert_eq!(Signal::ColdStreak.to_string(), "Cold Streak");
    }
}
