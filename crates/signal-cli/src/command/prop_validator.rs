use std::path::PathBuf;

use clap::Args;
use signal_analysis::prop_validator::{self, PropValidatorRow};

use crate::{command::GlobalArg, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct PropValidatorArg {
    /// Path to the player game log JSON file
    #[arg(long)]
    game_log: PathBuf,
    /// Stat column to track (defaults to the sport's primary stat)
    #[arg(long)]
    stat: Option<String>,
    /// Keep only the last N games
    #[arg(long)]
    tail: Option<usize>,
}

/// Keeps the last `tail` rows (all rows when `tail` is `None`).
pub(crate) fn keep_last(
    mut rows: Vec<PropValidatorRow>,
    tail: Option<usize>,
) -> Vec<PropValidatorRow> {
    if let Some(tail) = tail {
        let skip = rows.len().saturating_sub(tail);
        rows.drain(..skip);
    }
    rows
}

pub(crate) fn run(global: &GlobalArg, arg: &PropValidatorArg) -> anyhow::Result<()> {
    let game_log = util::read_game_log_file(global.sport, &arg.game_log)?;
    let stat = arg.stat.as_deref().unwrap_or(global.sport.primary_stat());
    let rows = prop_validator::build_prop_validator(&game_log, stat);
    if rows.is_empty() {
        tracing::warn!(stat, games = game_log.len(), "no prop validator rows");
    } else {
        tracing::info!(
            stat,
            games = rows.len(),
            hot = rows.iter().filter(|row| row.signal.is_hot_streak()).count(),
            cold = rows.iter().filter(|row| row.signal.is_cold_streak()).count(),
            "classified games"
        );
    }
    util::save_json(&keep_last(rows, arg.tail), global.output.as_deref())
}
