use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Args;
use serde::Serialize;
use signal_analysis::{
    GameLog,
    fatigue::{FatigueInputs, calculate_fatigue_score},
};
use signal_stats::numeric::safe_mean;

use crate::{command::GlobalArg, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct FatigueArg {
    /// Days since the last game
    #[arg(long, allow_negative_numbers = true)]
    rest_days: i64,
    /// The next game is on the road
    #[arg(long)]
    away: bool,
    /// Minutes played in the last game
    #[arg(long, allow_negative_numbers = true)]
    minutes: f64,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct FatigueFromLogArg {
    /// Path to the team game log JSON file
    #[arg(long)]
    team_log: PathBuf,
    /// Minutes played in the last game
    #[arg(long, conflicts_with = "player_log")]
    minutes: Option<f64>,
    /// Path to a player game log; its average minutes are used
    #[arg(long)]
    player_log: Option<PathBuf>,
    /// Date to count rest days up to (defaults to today, UTC)
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct FatigueReport {
    /// `None` when the team log is empty.
    pub inputs: Option<FatigueInputs>,
    pub fatigue_score: f64,
}

impl FatigueReport {
    pub(crate) fn from_inputs(inputs: FatigueInputs) -> Self {
        Self {
            fatigue_score: calculate_fatigue_score(&inputs),
            inputs: Some(inputs),
        }
    }

    /// Derives the report from a team's latest game.
    ///
    /// An empty team log scores `0.0`.
    pub(crate) fn from_team_log(team_log: &GameLog, minutes: f64, today: NaiveDate) -> Self {
        match FatigueInputs::from_team_log(team_log, minutes, today) {
            Some(inputs) => Self::from_inputs(inputs),
            None => {
                tracing::warn!("team game log is empty; fatigue score defaults to 0");
                Self {
                    inputs: None,
                    fatigue_score: 0.0,
                }
            }
        }
    }
}

/// Mean of a log's minutes column (`0.0` when there is none).
pub(crate) fn average_minutes(player_log: &GameLog, minutes_stat: &str) -> f64 {
    safe_mean(player_log.column(minutes_stat))
}

pub(crate) fn run(global: &GlobalArg, arg: &FatigueArg) -> anyhow::Result<()> {
    let report = FatigueReport::from_inputs(FatigueInputs {
        rest_days: arg.rest_days,
        is_home: !arg.away,
        minutes_last_game: arg.minutes,
    });
    util::save_json(&report, global.output.as_deref())
}

pub(crate) fn run_from_log(global: &GlobalArg, arg: &FatigueFromLogArg) -> anyhow::Result<()> {
    let team_log = util::read_game_log_file(global.sport, &arg.team_log)?;
    let minutes = match (&arg.player_log, arg.minutes) {
        (Some(path), _) => {
            let player_log = util::read_game_log_file(global.sport, path)?;
            average_minutes(&player_log, global.sport.minutes_stat())
        }
        (None, Some(minutes)) => minutes,
        (None, None) => 0.0,
    };
    let today = arg.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let report = FatigueReport::from_team_log(&team_log, minutes, today);
    util::save_json(&report, global.output.as_deref())
}

#[cfg(test)]
mod tests {
    use signal_analysis::game_log::GameLogRow;

    use super::*;

    #[test]
    fn test_report_from_team_log() {
        let team_log = GameLog::new(vec![
            GameLogRow::new(NaiveDate::from_ymd_opt(2024, 1, 1), [("PTS", 100.0)]).with_home(true),
            GameLogRow::new(NaiveDate::from_ymd_opt(2024, 1, 3), [("PTS", 110.0)]).with_home(false),
        ]);
        let today = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        let report = FatigueReport::from_team_log(&team_log, 36.0, today);
        let inputs = report.inputs.unwrap();
        assert_eq!(inputs.rest_days, 1);
        assert!(!inputs.is_home);
        // 85 rest + 10 travel + 30 minutes, clamped
        assert_eq!(report.fatigue_score, 100.0);
    }

    #[test]
    fn test_empty_team_log_scores_zero() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
        let report = FatigueReport::from_team_log(&GameLog::default(), 48.0, today);
        assert_eq!(report.inputs, None);
        assert_eq!(report.fatigue_score, 0.0);
    }

    #[test]
    fn test_average_minutes() {
        let log = GameLog::new(vec![
            GameLogRow::new(None, [("MIN", 30.0)]),
            GameLogRow::new(None, [("MIN", f64::NAN)]),
            GameLogRow::new(None, [("MIN", 36.0)]),
        ]);
        assert_eq!(average_minutes(&log, "MIN"), 33.0);
        assert_eq!(average_minutes(&log, "timeOnIce"), 0.0);
    }
}
