use std::path::PathBuf;

use clap::Args;
use signal_analysis::profile;

use crate::{command::GlobalArg, util};

#[derive(Debug, Clone, Args)]
pub(crate) struct ProfileArg {
    /// Path to the league stats JSON file
    #[arg(long)]
    league: PathBuf,
    /// Full name of the player to profile
    #[arg(long)]
    player: String,
    /// Metrics to compare (comma-separated; defaults to the sport's feature
    /// set)
    #[arg(long, value_delimiter = ',')]
    features: Vec<String>,
}

pub(crate) fn run(global: &GlobalArg, arg: &ProfileArg) -> anyhow::Result<()> {
    let league = util::read_league_file(global.sport, global.season(), &arg.league)?;
    let features = global.features(&arg.features);
    let profile = profile::league_profile(&league, &arg.player, &features);
    if profile.is_none() {
        tracing::warn!(
            player = %arg.player,
            league = %arg.league.display(),
            "no profile (unknown player or no matching metrics)"
        );
    }
    util::save_json(&profile, global.output.as_deref())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser as _;

    use super::*;
    use crate::command::{CommandArgs, Mode};

    #[test]
    fn test_missing_player_writes_null() {
        let dir = tempfile::tempdir().unwrap();
        let league = dir.path().join("league.json");
        let output = dir.path().join("profile.json");
        fs::write(
            &league,
            r#"[{ "PLAYER_NAME": "Alpha Guard", "TEAM_ABBREVIATION": "AAA", "PTS": 20.0 }]"#,
        )
        .unwrap();
        let args = CommandArgs::try_parse_from([
            "signal",
            "profile",
            "--league",
            league.to_str().unwrap(),
            "--player",
            "Nobody",
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();
        let Mode::Profile(arg) = &args.mode else {
            panic!("expected the profile subcommand");
        };
        run(&args.global, arg).unwrap();
        let written: serde_json::Value = util::read_json_file("profile", &output).unwrap();
        assert!(written.is_null());
    }
}
