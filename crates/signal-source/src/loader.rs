//! The capability set every sport data source provides

use std::{fmt, io, path::PathBuf};

use serde::{Deserialize, Serialize};
use signal_analysis::{GameLog, LeagueStats};

use crate::sport::{Sport, StatColumns};

/// Part of the season a request covers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonType {
    #[default]
    #[serde(rename = "Regular Season")]
    RegularSeason,
    #[serde(rename = "Playoffs")]
    Playoffs,
}

impl SeasonType {
    /// Label the upstream APIs expect.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SeasonType::RegularSeason => "Regular Season",
            SeasonType::Playoffs => "Playoffs",
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An active player as listed by a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: i64,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

/// A team as listed by a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub id: i64,
    pub full_name: String,
    #[serde(default)]
    pub abbreviation: String,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoaderError {
    #[display("{sport} data source unavailable: {reason}")]
    Unavailable { sport: Sport, reason: String },
    #[display("failed to read {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A sport-specific source of players, teams, game logs and league tables.
///
/// Every table a loader returns is already cleaned (see
/// [`clean`](crate::clean)). A request for an entity the source has no data
/// for yields an empty table, not an error.
pub trait DataLoader {
    fn sport(&self) -> Sport;

    fn list_active_players(&self) -> Result<Vec<PlayerInfo>, LoaderError>;

    fn list_active_teams(&self) -> Result<Vec<TeamInfo>, LoaderError>;

    /// Resolves a player's full name to an id.
    fn player_id(&self, player_name: &str) -> Result<Option<i64>, LoaderError> {
        Ok(find_player(&self.list_active_players()?, player_name).map(|player| player.id))
    }

    /// Resolves a team's full name (exact match) to an id.
    fn team_id(&self, team_name: &str) -> Result<Option<i64>, LoaderError> {
        Ok(self
            .list_active_teams()?
            .into_iter()
            .find(|team| team.full_name == team_name)
            .map(|team| team.id))
    }

    fn load_player_game_log(
        &self,
        player_id: i64,
        season: &str,
        season_type: SeasonType,
    ) -> Result<GameLog, LoaderError>;

    fn load_team_game_log(
        &self,
        team_id: i64,
        season: &str,
        season_type: SeasonType,
    ) -> Result<GameLog, LoaderError>;

    fn load_league_player_stats(
        &self,
        season: &str,
        season_type: SeasonType,
    ) -> Result<LeagueStats, LoaderError>;

    fn stat_columns(&self) -> &'static StatColumns {
        self.sport().stat_columns()
    }
}

/// Finds a player by full name.
///
/// An exact case-insensitive match wins; otherwise the first player whose
/// name contains `player_name` (case-insensitive) is returned.
#[must_use]
pub fn find_player<'a>(players: &'a [PlayerInfo], player_name: &str) -> Option<&'a PlayerInfo> {
    let needle = player_name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    players
        .iter()
        .find(|player| player.full_name.to_lowercase() == needle)
        .or_else(|| {
            players
                .iter()
                .find(|player| player.full_name.to_lowercase().contains(&needle))
        })
}
