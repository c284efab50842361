use std::path::PathBuf;

use clap::Args;
use signal_analysis::similarity;

use crate::{command::GlobalArg, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct CompsArg {
    /// Path to the league stats JSON file
    #[arg(long)]
    league: PathBuf,
    /// Full name of the player to compare
    #[arg(long)]
    player: String,
    /// Feature columns to compare on (comma-separated; defaults to the
    /// sport's feature set)
    #[arg(long, value_delimiter = ',')]
    features: Vec<String>,
    /// Number of comparable players
    #[arg(long, default_value_t = similarity::DEFAULT_COMP_COUNT)]
    k: usize,
}

pub(crate) fn run(global: &GlobalArg, arg: &CompsArg) -> anyhow::Result<()> {
    let league = util::read_league_file(global.sport, global.season(), &arg.league)?;
    let features = global.features(&arg.features);
    let comps = similarity::find_player_comps(&league, &arg.player, &features, arg.k);
    if comps.is_empty() {
        tracing::warn!(player = %arg.player, players = league.len(), "no comparable players");
    }
    util::save_json(&comps, global.output.as_deref())
}
