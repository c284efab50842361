//! Fatigue scoring from rest, travel and workload
//!
//! The score is a sum of three bounded components, clamped to `[0, 100]`
//! (higher means more fatigued):
//!
//! | component | formula                                   | range     |
//! |-----------|-------------------------------------------|-----------|
//! | rest      | `100 - 15 * rest_days`                    | `[0, 100]`|
//! | travel    | `10` for an away game, else `0`           | `{0, 10}` |
//! | minutes   | `minutes_last_game / 48 * 40`             | `[0, 40]` |
//!
//! Inputs are not validated. A negative `rest_days` saturates the rest
//! component at 100 and negative minutes contribute 0; the final clamp keeps
//! the score in range either way.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use signal_stats::numeric::{clamp, clamp_percent};

use crate::game_log::GameLog;

/// Fatigue points removed per day of rest.
pub const REST_DAY_RECOVERY: f64 = 15.0;
/// Flat penalty for playing away from home.
pub const TRAVEL_PENALTY: f64 = 10.0;
/// Length of a regulation game in minutes.
pub const REGULATION_MINUTES: f64 = 48.0;
/// Maximum contribution of the minutes component.
pub const MAX_MINUTES_COMPONENT: f64 = 40.0;
/// Rest days assumed when the latest game has no usable date.
pub const DEFAULT_REST_DAYS: i64 = 1;

/// Inputs of [`calculate_fatigue_score`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatigueInputs {
    /// Days since the last game (caller guarantees non-negative).
    pub rest_days: i64,
    /// Whether the next game is at home.
    pub is_home: bool,
    /// Minutes played in the last game (caller guarantees non-negative).
    pub minutes_last_game: f64,
}

impl FatigueInputs {
    /// Derives fatigue inputs from a team's game log.
    ///
    /// Rest days are counted from the last game in date order to `today`
    /// (floored at 0; [`DEFAULT_REST_DAYS`] when that game has no date). The
    /// home flag comes from the same game and defaults to home.
    ///
    /// Returns `None` for an empty log.
    #[must_use]
    pub fn from_team_log(
        team_log: &GameLog,
        minutes_last_game: f64,
        today: NaiveDate,
    ) -> Option<Self> {
        let latest = team_log.latest_game()?;
        let rest_days = latest
            .game_date
            .map_or(DEFAULT_REST_DAYS, |date| days_since(Some(date), today));
        Some(Self {
            rest_days,
            is_home: latest.is_home.unwrap_or(true),
            minutes_last_game,
        })
    }
}

/// Computes a fatigue score in `[0, 100]`; higher means more fatigued.
///
/// # Examples
///
/// ```
/// use signal_analysis::fatigue::{FatigueInputs, calculate_fatigue_score};
///
/// let rested = FatigueInputs { rest_days: 10, is_home: true, minutes_last_game: 0.0 };
/// assert_eq!(calculate_fatigue_score(&rested), 0.0);
///
/// let tired = FatigueInputs { rest_days: 0, is_home: false, minutes_last_game: 48.0 };
/// assert_eq!(calculate_fatigue_score(&tired), 100.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn calculate_fatigue_score(inputs: &FatigueInputs) -> f64 {
    let rest_component = clamp_percent(100.0 - inputs.rest_days as f64 * REST_DAY_RECOVERY);
    let travel_component = if inputs.is_home { 0.0 } else { TRAVEL_PENALTY };
    let minutes_component = clamp(
        inputs.minutes_last_game / REGULATION_MINUTES * MAX_MINUTES_COMPONENT,
        0.0,
        MAX_MINUTES_COMPONENT,
    );
    clamp_percent(rest_component + travel_component + minutes_component)
}

/// Returns the whole days from `date` to `today`, floored at 0.
///
/// A missing date counts as 0 days.
#[must_use]
pub fn days_since(date: Option<NaiveDate>, today: NaiveDate) -> i64 {
    date.map_or(0, |date| (today - date).num_days().max(0))
}

#[cfg(test)]
mod tests {
    use crate::game_log::GameLogRow;

    use super::*;

    fn score(rest_days: i64, is_home: bool, minutes_last_game: f64) -> f64 {
        calculate_fatigue_score(&FatigueInputs {
            rest_days,
            is_home,
            minutes_last_game,
        })
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_rest_component_only() {
        for rest_days in 0..12 {
            #[expect(clippy::cast_precision_loss)]
            let expected = clamp_percent(100.0 - 15.0 * rest_days as f64);
            assert_eq!(score(rest_days, true, 0.0), expected);
        }
        assert_eq!(score(0, true, 0.0), 100.0);
        assert_eq!(score(7, true, 0.0), 0.0);
    }

    #[test]
    fn test_away_full_minutes_saturates() {
        assert_eq!(score(0, false, 48.0), 100.0);
    }

    #[test]
    fn test_full_rest_floors_at_zero() {
        assert_eq!(score(10, true, 0.0), 0.0);
    }

    #[test]
    fn test_components_add_up() {
        // rest 40, travel 10, minutes 30
        assert_eq!(score(4, false, 36.0), 80.0);
    }

    #[test]
    fn test_minutes_component_capped() {
        assert_eq!(score(7, true, 96.0), 40.0);
    }

    #[test]
    fn test_negative_inputs_stay_in_range() {
        assert_eq!(score(-3, true, 0.0), 100.0);
        assert_eq!(score(7, true, -20.0), 0.0);
    }

    #[test]
    fn test_days_since() {
        assert_eq!(days_since(Some(date(1)), date(4)), 3);
        assert_eq!(days_since(Some(date(9)), date(4)), 0);
        assert_eq!(days_since(None, date(4)), 0);
    }

    #[test]
    fn test_inputs_from_team_log() {
        let log = GameLog::new(vec![
            GameLogRow::new(Some(date(5)), [("PTS", 101.0)]).with_home(false),
            GameLogRow::new(Some(date(2)), [("PTS", 99.0)]).with_home(true),
        ]);
        let inputs = FatigueInputs::from_team_log(&log, 30.0, date(7)).unwrap();
        assert_eq!(
            inputs,
            FatigueInputs {
                rest_days: 2,
                is_home: false,
                minutes_last_game: 30.0,
            }
        );
    }

    #[test]
    fn test_inputs_from_team_log_defaults() {
        let log = GameLog::new(vec![
            GameLogRow::new(Some(date(5)), [("PTS", 101.0)]),
            GameLogRow::new(None, [("PTS", 99.0)]),
        ]);
        let inputs = FatigueInputs::from_team_log(&log, 0.0, date(7)).unwrap();
        assert_eq!(inputs.rest_days, DEFAULT_REST_DAYS);
        assert!(inputs.is_home);
        assert!(FatigueInputs::from_team_log(&GameLog::default(), 0.0, date(7)).is_none());
    }
}
