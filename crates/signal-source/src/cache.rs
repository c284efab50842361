//! Time-bounded memoization around a [`DataLoader`]
//!
//! Entity lists change rarely, league tables a few times a day and game logs
//! after every game, so each kind of result has its own time-to-live. Errors
//! are never cached.

use std::{
    collections::HashMap,
    hash::Hash,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use signal_analysis::{GameLog, LeagueStats};

use crate::{
    loader::{DataLoader, LoaderError, PlayerInfo, SeasonType, TeamInfo},
    sport::Sport,
};

/// Time-to-live of each kind of cached result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtl {
    /// Player and team lists.
    pub players_teams: Duration,
    pub league_stats: Duration,
    pub game_logs: Duration,
}

impl Default for CacheTtl {
    fn default() -> Self {
        Self {
            players_teams: Duration::from_secs(60 * 60),
            league_stats: Duration::from_secs(30 * 60),
            game_logs: Duration::from_secs(15 * 60),
        }
    }
}

impl CacheTtl {
    /// A TTL that expires every entry immediately.
    pub const DISABLED: Self = Self {
        players_teams: Duration::ZERO,
        league_stats: Duration::ZERO,
        game_logs: Duration::ZERO,
    };
}

#[derive(Debug)]
struct TtlMap<K, V> {
    ttl: Duration,
    entries: Mutex<HashMap<K, (Instant, V)>>,
}

impl<K, V> TtlMap<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn get_or_try_insert<E>(&self, key: K, load: impl FnOnce() -> Result<V, E>) -> Result<V, E> {
        let now = Instant::now();
        if let Some((stored_at, value)) = self.entries.lock().get(&key)
            && now.duration_since(*stored_at) < self.ttl
        {
            tracing::trace!("cache hit");
            return Ok(value.clone());
        }
        // The lock is not held while loading; concurrent misses may load twice.
        let value = load()?;
        self.entries
            .lock()
            .insert(key, (Instant::now(), value.clone()));
        Ok(value)
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }
}

type LogKey = (i64, String, SeasonType);
type LeagueKey = (String, SeasonType);

/// A [`DataLoader`] that memoizes another loader's results.
///
/// Keys include the season and season type; the sport is fixed by the inner
/// loader.
#[derive(Debug)]
pub struct CachedLoader<L> {
    inner: L,
    players: TtlMap<(), Vec<PlayerInfo>>,
    teams: TtlMap<(), Vec<TeamInfo>>,
    player_logs: TtlMap<LogKey, GameLog>,
    team_logs: TtlMap<LogKey, GameLog>,
    league_stats: TtlMap<LeagueKey, LeagueStats>,
}

impl<L> CachedLoader<L>
where
    L: DataLoader,
{
    #[must_use]
    pub fn new(inner: L, ttl: CacheTtl) -> Self {
        Self {
            inner,
            players: TtlMap::new(ttl.players_teams),
            teams: TtlMap::new(ttl.players_teams),
            player_logs: TtlMap::new(ttl.game_logs),
            team_logs: TtlMap::new(ttl.game_logs),
            league_stats: TtlMap::new(ttl.league_stats),
        }
    }

    #[must_use]
    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Number of cached results, expired ones included.
    #[must_use]
    pub fn cached_entries(&self) -> usize {
        self.players.len()
            + self.teams.len()
            + self.player_logs.len()
            + self.team_logs.len()
            + self.league_stats.len()
    }

    pub fn clear(&self) {
        self.players.clear();
        self.teams.clear();
        self.player_logs.clear();
        self.team_logs.clear();
        self.league_stats.clear();
        tracing::debug!(sport = %self.inner.sport(), "cleared loader cache");
    }
}

impl<L> DataLoader for CachedLoader<L>
where
    L: DataLoader,
{
    fn sport(&self) -> Sport {
        self.inner.sport()
    }

    fn list_active_players(&self) -> Result<Vec<PlayerInfo>, LoaderError> {
        self.players
            .get_or_try_insert((), || self.inner.list_active_players())
    }

    fn list_active_teams(&self) -> Result<Vec<TeamInfo>, LoaderError> {
        self.teams
            .get_or_try_insert((), || self.inner.list_active_teams())
    }

    fn load_player_game_log(
        &self,
        player_id: i64,
        season: &str,
        season_type: SeasonType,
    ) -> Result<GameLog, LoaderError> {
        self.player_logs
            .get_or_try_insert((player_id, season.to_owned(), season_type), || {
                self.inner
                    .load_player_game_log(player_id, season, season_type)
            })
    }

    fn load_team_game_log(
        &self,
        team_id: i64,
        season: &str,
        season_type: SeasonType,
    ) -> Result<GameLog, LoaderError> {
        self.team_logs
            .get_or_try_insert((team_id, season.to_owned(), season_type), || {
                self.inner.load_team_game_log(team_id, season, season_type)
            })
    }

    fn load_league_player_stats(
        &self,
        season: &str,
        season_type: SeasonType,
    ) -> Result<LeagueStats, LoaderError> {
        self.league_stats
            .get_or_try_insert((season.to_owned(), season_type), || {
                self.inner.load_league_player_stats(season, season_type)
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use signal_analysis::{game_log::GameLogRow, league::LeagueStatsRow};

    use super::*;

    #[derive(Debug, Default)]
    struct CountingLoader {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingLoader {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn hit(&self) -> Result<(), LoaderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LoaderError::Unavailable {
                    sport: Sport::Nba,
                    reason: "offline".to_owned(),
                });
            }
            Ok(())
        }
    }

    impl DataLoader for CountingLoader {
        fn sport(&self) -> Sport {
            Sport::Nba
        }

        fn list_active_players(&self) -> Result<Vec<PlayerInfo>, LoaderError> {
            self.hit()?;
            Ok(vec![PlayerInfo {
                id: 7,
                full_name: "Alpha Guard".to_owned(),
                team: None,
            }])
        }

        fn list_active_teams(&self) -> Result<Vec<TeamInfo>, LoaderError> {
            self.hit()?;
            Ok(vec![])
        }

        fn load_player_game_log(
            &self,
            _player_id: i64,
            _season: &str,
            _season_type: SeasonType,
        ) -> Result<GameLog, LoaderError> {
            self.hit()?;
            Ok(GameLog::new(vec![GameLogRow::new(None, [("PTS", 10.0)])]))
        }

        fn load_team_game_log(
            &self,
            _team_id: i64,
            _season: &str,
            _season_type: SeasonType,
        ) -> Result<GameLog, LoaderError> {
            self.hit()?;
            Ok(GameLog::default())
        }

        fn load_league_player_stats(
            &self,
            _season: &str,
            _season_type: SeasonType,
        ) -> Result<LeagueStats, LoaderError> {
            self.hit()?;
            Ok(LeagueStats::new(vec![LeagueStatsRow::new(
                "Alpha Guard",
                "AAA",
                [("Points", 20.0)],
            )]))
        }
    }

    #[test]
    fn test_results_are_memoized() {
        let loader = CachedLoader::new(CountingLoader::default(), CacheTtl::default());
        for _ in 0..3 {
            loader.list_active_players().unwrap();
            loader
                .load_league_player_stats("2023-24", SeasonType::RegularSeason)
                .unwrap();
        }
        assert_eq!(loader.player_id("alpha guard").unwrap(), Some(7));
        assert_eq!(loader.inner().calls(), 2);
        assert_eq!(loader.cached_entries(), 2);
    }

    #[test]
    fn test_keys_include_season_and_type() {
        let loader = CachedLoader::new(CountingLoader::default(), CacheTtl::default());
        loader
            .load_player_game_log(1, "2023-24", SeasonType::RegularSeason)
            .unwrap();
        loader
            .load_player_game_log(1, "2023-24", SeasonType::Playoffs)
            .unwrap();
        loader
            .load_player_game_log(1, "2022-23", SeasonType::RegularSeason)
            .unwrap();
        loader
            .load_player_game_log(1, "2023-24", SeasonType::RegularSeason)
            .unwrap();
        assert_eq!(loader.inner().calls(), 3);
    }

    #[test]
    fn test_expired_entries_reload() {
        let loader = CachedLoader::new(CountingLoader::default(), CacheTtl::DISABLED);
        loader.list_active_teams().unwrap();
        loader.list_active_teams().unwrap();
        assert_eq!(loader.inner().calls(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let inner = CountingLoader {
            fail: true,
            ..CountingLoader::default()
        };
        let loader = CachedLoader::new(inner, CacheTtl::default());
        assert!(loader.list_active_players().is_err());
        assert!(loader.list_active_players().is_err());
        assert_eq!(loader.inner().calls(), 2);
        assert_eq!(loader.cached_entries(), 0);
    }

    #[test]
    fn test_clear() {
        let loader = CachedLoader::new(CountingLoader::default(), CacheTtl::default());
        loader.list_active_players().unwrap();
        loader.clear();
        loader.list_active_players().unwrap();
        assert_eq!(loader.inner().calls(), 2);
    }
}
