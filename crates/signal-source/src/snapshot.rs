//! A [`DataLoader`] over API responses saved to disk
//!
//! Layout under `<root>/<sport slug>/`:
//!
//! ```text
//! players.json                          active players
//! teams.json                            teams
//! league_stats/<season>.json            league table (raw records)
//! player_logs/<player id>/<season>.json player game log (raw records)
//! team_logs/<team id>/<season>.json     team game log (raw records)
//! ```
//!
//! Playoff files carry a `_playoffs` suffix (`2023-24_playoffs.json`).
//! A missing entity file is an empty table.

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde::de::DeserializeOwned;
use signal_analysis::{GameLog, LeagueStats};

use crate::{
    clean::{self, RawRecord},
    loader::{DataLoader, LoaderError, PlayerInfo, SeasonType, TeamInfo},
    sport::Sport,
};

#[derive(Debug, Clone)]
pub struct SnapshotLoader {
    sport: Sport,
    dir: PathBuf,
}

impl SnapshotLoader {
    /// Opens the snapshot of `sport` under `root`.
    ///
    /// Fails with [`LoaderError::Unavailable`] if the sport's directory does
    /// not exist.
    pub fn open(sport: Sport, root: impl AsRef<Path>) -> Result<Self, LoaderError> {
        let dir = root.as_ref().join(sport.slug());
        if !dir.is_dir() {
            return Err(LoaderError::Unavailable {
                sport,
                reason: format!("no snapshot directory at {}", dir.display()),
            });
        }
        tracing::info!(%sport, dir = %dir.display(), "opened snapshot");
        Ok(Self { sport, dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn season_file(season: &str, season_type: SeasonType) -> String {
        match season_type {
            SeasonType::RegularSeason => format!("{season}.json"),
            SeasonType::Playoffs => format!("{season}_playoffs.json"),
        }
    }

    fn read_optional<T>(&self, path: &Path) -> Result<Option<T>, LoaderError>
    where
        T: DeserializeOwned,
    {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(
                    sport = %self.sport,
                    path = %path.display(),
                    "snapshot file missing"
                );
                return Ok(None);
            }
            Err(source) => {
                return Err(LoaderError::Io {
                    path: path.to_owned(),
                    source,
                });
            }
        };
        serde_json::from_reader(BufReader::new(file))
            .map(Some)
            .map_err(|source| LoaderError::Parse {
                path: path.to_owned(),
                source,
            })
    }

    fn read_records(&self, path: &Path) -> Result<Vec<RawRecord>, LoaderError> {
        Ok(self.read_optional(path)?.unwrap_or_default())
    }

    fn load_game_log(
        &self,
        entity: &str,
        id: i64,
        season: &str,
        season_type: SeasonType,
    ) -> Result<GameLog, LoaderError> {
        let path = self
            .dir
            .join(entity)
            .join(id.to_string())
            .join(Self::season_file(season, season_type));
        let records = self.read_records(&path)?;
        let log = clean::clean_game_log(&records, self.sport);
        tracing::debug!(
            sport = %self.sport,
            entity,
            id,
            season,
            games = log.len(),
            "loaded game log"
        );
        Ok(log)
    }
}

impl DataLoader for SnapshotLoader {
    fn sport(&self) -> Sport {
        self.sport
    }

    fn list_active_players(&self) -> Result<Vec<PlayerInfo>, LoaderError> {
        Ok(self
            .read_optional(&self.dir.join("players.json"))?
            .unwrap_or_default())
    }

    fn list_active_teams(&self) -> Result<Vec<TeamInfo>, LoaderError> {
        if let Some(teams) = self.read_optional(&self.dir.join("teams.json"))? {
            return Ok(teams);
        }
        Ok(self
            .sport
            .static_teams()
            .iter()
            .map(|team| TeamInfo {
                id: team.id,
                full_name: team.full_name.to_owned(),
                abbreviation: team.abbreviation.to_owned(),
            })
            .collect())
    }

    fn load_player_game_log(
        &self,
        player_id: i64,
        season: &str,
        season_type: SeasonType,
    ) -> Result<GameLog, LoaderError> {
        self.load_game_log("player_logs", player_id, season, season_type)
    }

    fn load_team_game_log(
        &self,
        team_id: i64,
        season: &str,
        season_type: SeasonType,
    ) -> Result<GameLog, LoaderError> {
        self.load_game_log("team_logs", team_id, season, season_type)
    }

    fn load_league_player_stats(
        &self,
        season: &str,
        season_type: SeasonType,
    ) -> Result<LeagueStats, LoaderError> {
        let path = self
            .dir
            .join("league_stats")
            .join(Self::season_file(season, season_type));
        let records = self.read_records(&path)?;
        let league = clean::clean_league_stats(&records, self.sport, season, Utc::now());
        tracing::debug!(sport = %self.sport, season, players = league.len(), "loaded league stats");
        Ok(league)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;

    use super::*;

    fn write(path: &Path, value: &serde_json::Value) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, serde_json::to_vec(value).unwrap()).unwrap();
    }

    fn snapshot() -> (tempfile::TempDir, SnapshotLoader) {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nba");
        write(
            &dir.join("players.json"),
            &json!([
                { "id": 1, "full_name": "Alpha Guard" },
                { "id": 2, "full_name": "Beta Wing", "team": "BBB" },
            ]),
        );
        write(
            &dir.join("league_stats/2023-24.json"),
            &json!([
                { "PLAYER_NAME": "Alpha Guard", "TEAM_ABBREVIATION": "AAA", "PTS": 20.0 },
            ]),
        );
        write(
            &dir.join("player_logs/1/2023-24.json"),
            &json!([
                { "GAME_DATE": "2024-01-02", "MATCHUP": "AAA @ BBB", "PTS": 18 },
                { "GAME_DATE": "2024-01-04", "MATCHUP": "AAA vs. CCC", "PTS": "22" },
            ]),
        );
        let loader = SnapshotLoader::open(Sport::Nba, root.path()).unwrap();
        (root, loader)
    }

    #[test]
    fn test_open_missing_sport() {
        let root = tempfile::tempdir().unwrap();
        let err = SnapshotLoader::open(Sport::Nhl, root.path()).unwrap_err();
        assert!(matches!(err, LoaderError::Unavailable { sport: Sport::Nhl, .. }));
    }

    #[test]
    fn test_players_and_ids() {
        let (_root, loader) = snapshot();
        assert_eq!(loader.list_active_players().unwrap().len(), 2);
        assert_eq!(loader.player_id("beta wing").unwrap(), Some(2));
        assert_eq!(loader.player_id("Nobody").unwrap(), None);
        assert!(loader.list_active_teams().unwrap().is_empty());
        assert_eq!(loader.stat_columns(), Sport::Nba.stat_columns());
    }

    #[test]
    fn test_load_tables() {
        let (_root, loader) = snapshot();
        let log = loader
            .load_player_game_log(1, "2023-24", SeasonType::RegularSeason)
            .unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log.rows[1].value("PTS"), 22.0);
        assert_eq!(log.rows[1].is_home, Some(true));

        let league = loader
            .load_league_player_stats("2023-24", SeasonType::RegularSeason)
            .unwrap();
        assert_eq!(league.len(), 1);
        assert_eq!(league.rows[0].value("Assists"), 0.0);
    }

    #[test]
    fn test_missing_files_are_empty() {
        let (_root, loader) = snapshot();
        assert!(
            loader
                .load_player_game_log(2, "2023-24", SeasonType::RegularSeason)
                .unwrap()
                .is_empty()
        );
        assert!(
            loader
                .load_league_player_stats("2023-24", SeasonType::Playoffs)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_parse_error() {
        let (root, loader) = snapshot();
        fs::write(root.path().join("nba/teams.json"), "{ not json").unwrap();
        assert!(matches!(
            loader.list_active_teams().unwrap_err(),
            LoaderError::Parse { .. }
        ));
    }

    #[test]
    fn test_nhl_static_teams() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("nhl")).unwrap();
        let loader = SnapshotLoader::open(Sport::Nhl, root.path()).unwrap();
        assert_eq!(loader.list_active_teams().unwrap().len(), 32);
        assert_eq!(loader.team_id("Seattle Kraken").unwrap(), Some(55));
    }
}
