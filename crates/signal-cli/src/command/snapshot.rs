use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{NaiveDate, Utc};
use clap::Args;
use serde::Serialize;
use signal_analysis::{
    GameLog, LeagueStats,
    index_cache::SimilarityIndexCache,
    profile::{self, LeagueProfile},
    prop_validator::{self, PropValidatorRow},
    similarity::{self, ComparisonRow},
};
use signal_source::{
    DataLoader, Sport,
    cache::{CacheTtl, CachedLoader},
    loader::{self, PlayerInfo, SeasonType, TeamInfo},
    snapshot::SnapshotLoader,
    sport::format_season_label,
};

use crate::{
    command::{
        GlobalArg,
        fatigue::{self, FatigueReport},
        form::FormReport,
        prop_validator::keep_last,
    },
    util,
};

#[derive(Debug, Clone, Args)]
pub(crate) struct SnapshotArg {
    /// Directory holding saved API responses (one subdirectory per sport)
    #[arg(long)]
    data_dir: PathBuf,
    /// Players to report on (full names; repeatable)
    #[arg(long, required = true)]
    player: Vec<String>,
    /// Use playoff data instead of the regular season
    #[arg(long)]
    playoffs: bool,
    /// Feature columns for comps and the league profile (comma-separated;
    /// defaults to the sport's feature set)
    #[arg(long, value_delimiter = ',')]
    features: Vec<String>,
    /// Number of comparable players
    #[arg(long, default_value_t = similarity::DEFAULT_COMP_COUNT)]
    k: usize,
    /// Keep only the last N games of the prop validator
    #[arg(long)]
    tail: Option<usize>,
    /// Date to count rest days up to (defaults to today, UTC)
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct PlayerReport {
    pub sport: Sport,
    pub season: String,
    /// Season for display (`2023–24`).
    pub season_label: String,
    pub season_type: SeasonType,
    pub player: PlayerInfo,
    pub team: Option<TeamInfo>,
    pub comps: Vec<ComparisonRow>,
    pub profile: Option<LeagueProfile>,
    pub prop_validator: Vec<PropValidatorRow>,
    pub fatigue: FatigueReport,
    pub form: FormReport,
}

/// Report settings shared by every player.
#[derive(Debug, Clone)]
pub(crate) struct ReportOptions<'a> {
    pub season: &'a str,
    pub season_type: SeasonType,
    pub features: &'a [String],
    pub k: usize,
    pub tail: Option<usize>,
    pub today: NaiveDate,
}

/// Builds player reports over one loader, sharing fetched tables and the
/// fitted similarity index between players.
pub(crate) struct ReportBuilder<'a, L> {
    loader: &'a L,
    options: ReportOptions<'a>,
    indexes: SimilarityIndexCache,
}

impl<'a, L> ReportBuilder<'a, L>
where
    L: DataLoader,
{
    pub(crate) fn new(loader: &'a L, options: ReportOptions<'a>) -> Self {
        Self {
            loader,
            options,
            indexes: SimilarityIndexCache::new(),
        }
    }

    fn league(&self) -> anyhow::Result<LeagueStats> {
        let ReportOptions {
            season,
            season_type,
            ..
        } = self.options;
        self.loader
            .load_league_player_stats(season, season_type)
            .with_context(|| format!("Failed to load {season} {season_type} league stats"))
    }

    /// Resolves the player's team through the league table, then the
    /// player list.
    fn team(&self, player: &PlayerInfo, league: &LeagueStats) -> anyhow::Result<Option<TeamInfo>> {
        let team_label = league
            .position_of(&player.full_name)
            .map(|index| league.rows[index].team.as_str())
            .filter(|team| !team.is_empty())
            .or(player.team.as_deref());
        let Some(team_label) = team_label else {
            return Ok(None);
        };
        let teams = self
            .loader
            .list_active_teams()
            .context("Failed to list teams")?;
        Ok(teams
            .into_iter()
            .find(|team| team.abbreviation == team_label || team.full_name == team_label))
    }

    fn team_log(&self, team: Option<&TeamInfo>) -> anyhow::Result<GameLog> {
        let Some(team) = team else {
            return Ok(GameLog::default());
        };
        self.loader
            .load_team_game_log(team.id, self.options.season, self.options.season_type)
            .with_context(|| format!("Failed to load the game log of {}", team.full_name))
    }

    pub(crate) fn build(&self, player_name: &str) -> anyhow::Result<PlayerReport> {
        let options = &self.options;
        let sport = self.loader.sport();
        let players = self
            .loader
            .list_active_players()
            .context("Failed to list players")?;
        let player = loader::find_player(&players, player_name)
            .cloned()
            .with_context(|| format!("Unknown {sport} player: {player_name}"))?;
        tracing::info!(player = %player.full_name, id = player.id, "building report");

        let league = self.league()?;
        let comps = self
            .indexes
            .get_or_fit(&league, options.features)
            .map(|index| index.comps(&player.full_name, options.k))
            .unwrap_or_default();
        let profile = profile::league_profile(&league, &player.full_name, options.features);

        let game_log = self
            .loader
            .load_player_game_log(player.id, options.season, options.season_type)
            .with_context(|| format!("Failed to load the game log of {}", player.full_name))?;
        let prop_validator = keep_last(
            prop_validator::build_prop_validator(&game_log, sport.primary_stat()),
            options.tail,
        );

        let team = self.team(&player, &league)?;
        if team.is_none() {
            tracing::warn!(
                player = %player.full_name,
                "team not found; fatigue uses an empty team log"
            );
        }
        let team_log = self.team_log(team.as_ref())?;
        let minutes = fatigue::average_minutes(&game_log, sport.minutes_stat());
        let fatigue = FatigueReport::from_team_log(&team_log, minutes, options.today);

        let form = FormReport::new(&game_log, sport.primary_stat(), sport.summary_stats());

        Ok(PlayerReport {
            sport,
            season: options.season.to_owned(),
            season_label: format_season_label(options.season),
            season_type: options.season_type,
            player,
            team,
            comps,
            profile,
            prop_validator,
            fatigue,
            form,
        })
    }
}

pub(crate) fn run(global: &GlobalArg, arg: &SnapshotArg) -> anyhow::Result<()> {
    let snapshot = SnapshotLoader::open(global.sport, &arg.data_dir)
        .with_context(|| format!("Failed to open snapshot in {}", arg.data_dir.display()))?;
    let loader = CachedLoader::new(snapshot, CacheTtl::default());
    let season = global.sport.api_season(global.season());
    let features = global.features(&arg.features);
    let options = ReportOptions {
        season: &season,
        season_type: if arg.playoffs {
            SeasonType::Playoffs
        } else {
            SeasonType::RegularSeason
        },
        features: &features,
        k: arg.k,
        tail: arg.tail,
        today: arg.as_of.unwrap_or_else(|| Utc::now().date_naive()),
    };
    let builder = ReportBuilder::new(&loader, options);
    let reports = arg
        .player
        .iter()
        .map(|player| builder.build(player))
        .collect::<anyhow::Result<Vec<_>>>()?;
    util::save_json(&reports, global.output.as_deref())
}
