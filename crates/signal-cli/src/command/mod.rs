use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use signal_source::Sport;

use crate::logging::{self, LogFormat};

use self::{
    comps::CompsArg,
    fatigue::{FatigueArg, FatigueFromLogArg},
    form::FormArg,
    profile::ProfileArg,
    prop_validator::PropValidatorArg,
    snapshot::SnapshotArg,
};

mod comps;
mod fatigue;
mod form;
mod profile;
mod prop_validator;
mod snapshot;
mod sports;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(flatten)]
    global: GlobalArg,
    /// What to compute
    #[command(subcommand)]
    mode: Mode,
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub(crate) struct GlobalArg {
    /// Sport whose column schema the input files use
    #[arg(long, global = true, default_value_t = Sport::Nba)]
    pub sport: Sport,
    /// Season label (defaults to the sport's current season)
    #[arg(long, global = true)]
    pub season: Option<String>,
    /// Output file path (stdout when omitted)
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,
    /// Log filter directive, overriding RUST_LOG
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::default())]
    pub log_format: LogFormat,
}

impl GlobalArg {
    pub(crate) fn season(&self) -> &str {
        self.season
            .as_deref()
            .unwrap_or(self.sport.config().default_season)
    }

    /// Returns `requested`, or the sport's feature columns when empty.
    pub(crate) fn features(&self, requested: &[String]) -> Vec<String> {
        if requested.is_empty() {
            self.sport
                .feature_columns()
                .iter()
                .map(|column| (*column).to_owned())
                .collect()
        } else {
            requested.to_vec()
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Fatigue score from explicit inputs
    Fatigue(#[clap(flatten)] FatigueArg),
    /// Fatigue score derived from a team game log
    FatigueFromLog(#[clap(flatten)] FatigueFromLogArg),
    /// Rolling-average streak signals over a game log
    PropValidator(#[clap(flatten)] PropValidatorArg),
    /// Most similar players in a league table
    Comps(#[clap(flatten)] CompsArg),
    /// Player vs league average and percentile per metric
    Profile(#[clap(flatten)] ProfileArg),
    /// Recent form, performance summary and home/away split
    Form(#[clap(flatten)] FormArg),
    /// Print the configuration of every supported sport
    Sports,
    /// Full player report from a directory of saved API responses
    Snapshot(#[clap(flatten)] SnapshotArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let global = &args.global;
    logging::init(global.log_level.as_deref(), global.log_format)?;
    tracing::debug!(sport = %global.sport, season = global.season(), "starting");

    match &args.mode {
        Mode::Fatigue(arg) => fatigue::run(global, arg)?,
        Mode::FatigueFromLog(arg) => fatigue::run_from_log(global, arg)?,
        Mode::PropValidator(arg) => prop_validator::run(global, arg)?,
        Mode::Comps(arg) => comps::run(global, arg)?,
        Mode::Profile(arg) => profile::run(global, arg)?,
        Mode::Form(arg) => form::run(global, arg)?,
        Mode::Sports => sports::run(global)?,
        Mode::Snapshot(arg) => snapshot::run(global, arg)?,
    }
    Ok(())
}
