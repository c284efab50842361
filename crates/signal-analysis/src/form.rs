//! Recent form and home/away splits over a game log
//!
//! These are the summary numbers shown next to the charts: how the last few
//! games compare with the season, and how a player performs at home versus
//! on the road. "Last N" always means the last N games in date order.

use serde::{Deserialize, Serialize};
use signal_stats::numeric::safe_mean;

use crate::game_log::{GameLog, GameLogRow};

/// Games in the short recent-form window.
pub const SHORT_WINDOW: usize = 5;
/// Games in the long recent-form window.
pub const LONG_WINDOW: usize = 10;
/// Statistics summarized when the caller does not choose.
pub const DEFAULT_SUMMARY_COLUMNS: [&str; 4] = ["PTS", "AST", "REB", "MIN"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentForm {
    pub stat: String,
    pub season_average: f64,
    pub last_5_average: f64,
    pub last_10_average: f64,
    pub last_5_delta: f64,
    pub last_10_delta: f64,
    /// Games among the last five above the season average.
    pub hot_games_last_5: usize,
    /// Games in the short window (fewer than five for short logs).
    pub games_last_5: usize,
}

/// Season vs last-five average for one statistic (a metric card).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSummary {
    pub stat: String,
    pub season_average: f64,
    pub recent_average: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeAwaySplit {
    pub stat: String,
    pub home_average: f64,
    pub away_average: f64,
    pub home_games: usize,
    pub away_games: usize,
}

fn mean_of(rows: &[&GameLogRow], stat: &str) -> f64 {
    safe_mean(rows.iter().map(|row| row.value(stat)))
}

/// Summarizes the last five and last ten games of `stat` against the season.
///
/// Returns `None` if the log is empty or has no `stat` column.
#[must_use]
pub fn recent_form(game_log: &GameLog, stat: &str) -> Option<RecentForm> {
    if game_log.is_empty() || !game_log.has_column(stat) {
        return None;
    }
    let season_average = safe_mean(game_log.column(stat));
    let last_5 = game_log.tail(SHORT_WINDOW);
    let last_10 = game_log.tail(LONG_WINDOW);
    let last_5_average = mean_of(&last_5, stat);
    let last_10_average = mean_of(&last_10, stat);

    Some(RecentForm {
        stat: stat.to_owned(),
        season_average,
        last_5_average,
        last_10_average,
        last_5_delta: last_5_average - season_average,
        last_10_delta: last_10_average - season_average,
        hot_games_last_5: last_5
            .iter()
            .filter(|row| row.value(stat) > season_average)
            .count(),
        games_last_5: last_5.len(),
    })
}

/// Season and last-five averages for each of `stats` the log has.
///
/// An empty log yields an empty summary.
#[must_use]
pub fn performance_summary<S>(game_log: &GameLog, stats: &[S]) -> Vec<StatSummary>
where
    S: AsRef<str>,
{
    if game_log.is_empty() {
        return vec![];
    }
    let recent = game_log.tail(SHORT_WINDOW);
    stats
        .iter()
        .map(AsRef::as_ref)
        .filter(|stat| game_log.has_column(stat))
        .map(|stat| {
            let season_average = safe_mean(game_log.column(stat));
            let recent_average = mean_of(&recent, stat);
            StatSummary {
                stat: stat.to_owned(),
                season_average,
                recent_average,
                delta: recent_average - season_average,
            }
        })
        .collect()
}

/// Home and away averages for each of `stats` the log has.
///
/// A side with no games averages `0.0`. Returns an empty result if no row
/// carries a home flag or none of the statistics exist.
#[must_use]
pub fn home_away_split<S>(game_log: &GameLog, stats: &[S]) -> Vec<HomeAwaySplit>
where
    S: AsRef<str>,
{
    if game_log.is_empty() || !game_log.has_home_flag() {
        return vec![];
    }
    let (home, away): (Vec<&GameLogRow>, Vec<&GameLogRow>) = game_log
        .rows
        .iter()
        .filter(|row| row.is_home.is_some())
        .partition(|row| row.is_home == Some(true));

    stats
        .iter()
        .map(AsRef::as_ref)
        .filter(|stat| game_log.has_column(stat))
        .map(|stat| HomeAwaySplit {
            stat: stat.to_owned(),
            home_average: mean_of(&home, stat),
            away_average: mean_of(&away, stat),
            home_games: home.len(),
            away_games: away.len(),
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
                    .with_home(i % 2 == 0)
            })
            .collect()
    }

    #[test]
    fn test_recent_form() {
        let mut points = vec![10.0; 10];
        points.extend([20.0, 20.0, 20.0, 5.0, 30.0]);
        let form = recent_form(&log_of(&points), "PTS").unwrap();
        assert_eq!(form.season_average, 13.0);
        assert_eq!(form.last_5_average, 19.0);
        assert_eq!(form.last_10_average, 14.5);
        assert_eq!(form.last_5_delta, 6.0);
        assert_eq!(form.hot_games_last_5, 4);
        assert_eq!(form.games_last_5, 5);
    }

    #[test]
    fn test_recent_form_short_log() {
        let form = recent_form(&log_of(&[8.0, 12.0]), "PTS").unwrap();
        assert_eq!(form.games_last_5, 2);
        assert_eq!(form.last_5_average, 10.0);
        assert_eq!(form.hot_games_last_5, 1);
        assert!(recent_form(&log_of(&[8.0]), "AST").is_none());
        assert!(recent_form(&GameLog::default(), "PTS").is_none());
    }

    #[test]
    fn test_performance_summary_skips_absent_columns() {
        let summary = performance_summary(&log_of(&[10.0, 20.0]), &DEFAULT_SUMMARY_COLUMNS);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].stat, "PTS");
        assert_eq!(summary[0].season_average, 15.0);
        assert_eq!(summary[0].delta, 0.0);
    }

    #[test]
    fn test_home_away_split() {
        let split = home_away_split(&log_of(&[30.0, 10.0, 20.0]), &["PTS", "AST"]);
        assert_eq!(split.len(), 1);
        assert_eq!(split[0].home_average, 25.0);
        assert_eq!(split[0].away_average, 10.0);
        assert_eq!(split[0].home_games, 2);
        assert_eq!(split[0].away_games, 1);
    }

    #[test]
    fn test_home_away_split_empty_side() {
        let log = GameLog::new(vec![GameLogRow::new(None, [("PTS", 12.0)]).with_home(true)]);
        let split = home_away_split(&log, &["PTS"]);
        assert_eq!(split[0].away_average, 0.0);
    }

    #[test]
    fn test_home_away_split_requires_flag() {
        let log = GameLog::new(vec![GameLogRow::new(None, [("PTS", 12.0)])]);
        assert!(home_away_split(&log, &["PTS"]).is_empty());
    }
}
