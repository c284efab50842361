use serde::Serialize;
use signal_source::{
    Sport,
    sport::{SportConfig, StatColumns},
};

use crate::{command::GlobalArg, util};

#[derive(Debug, Serialize)]
struct SportEntry {
    sport: Sport,
    config: &'static SportConfig,
    stat_columns: &'static StatColumns,
}

pub(crate) fn run(global: &GlobalArg) -> anyhow::Result<()> {
    let entries = Sport::ALL
        .into_iter()
        .map(|sport| SportEntry {
            sport,
            config: sport.config(),
            stat_columns: sport.stat_columns(),
        })
        .collect::<Vec<_>>();
    util::save_json(&entries, global.output.as_deref())
}
