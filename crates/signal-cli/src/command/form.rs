use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use signal_analysis::{
    GameLog,
    form::{self, HomeAwaySplit, RecentForm, StatSummary},
};

use crate::{command::GlobalArg, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct FormArg {
    /// Path to the player game log JSON file
    #[arg(long)]
    game_log: PathBuf,
    /// Stat column for the recent-form trend (defaults to the sport's primary stat)
    #[arg(long)]
    stat: Option<String>,
    /// Stat columns to summarize (comma-separated; defaults per sport)
    #[arg(long, value_delimiter = ',')]
    stats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct FormReport {
    pub recent_form: Option<RecentForm>,
    pub summary: Vec<StatSummary>,
    pub home_away: Vec<HomeAwaySplit>,
}

impl FormReport {
    pub(crate) fn new<S>(game_log: &GameLog, stat: &str, summary_stats: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        Self {
            recent_form: form::recent_form(game_log, stat),
            summary: form::performance_summary(game_log, summary_stats),
            home_away: form::home_away_split(game_log, summary_stats),
        }
    }
}

pub(crate) fn run(global: &GlobalArg, arg: &FormArg) -> anyhow::Result<()> {
    let game_log = util::read_game_log_file(global.sport, &arg.game_log)?;
    let stat = arg.stat.as_deref().unwrap_or(global.sport.primary_stat());
    let report = if arg.stats.is_empty() {
        FormReport::new(&game_log, stat, global.sport.summary_stats())
    } else {
        FormReport::new(&game_log, stat, &arg.stats)
    };
    util::save_json(&report, global.output.as_deref())
}

#[cfg(test)]
mod tests {
    use signal_analysis::game_log::GameLogRow;

    use super::*;

    #[test]
    fn test_report_sections() {
        let log = GameLog::new(vec![
            GameLogRow::new(None, [("PTS", 20.0), ("MIN", 30.0)]).with_home(true),
            GameLogRow::new(None, [("PTS", 10.0), ("MIN", 34.0)]).with_home(false),
        ]);
        let report = FormReport::new(&log, "PTS", &["PTS", "MIN", "AST"]);
        assert_eq!(report.recent_form.unwrap().season_average, 15.0);
        assert_eq!(report.summary.len(), 2);
        assert_eq!(report.home_away.len(), 2);
        assert_eq!(report.home_away[1].home_average, 30.0);
    }
}
