//! Derived metrics over sports game logs and league stat tables
//!
//! This crate turns already-cleaned tables into the numbers a dashboard
//! shows. It never fetches anything: callers hand in a [`GameLog`] or a
//! [`LeagueStats`] table and get a fresh table or scalar back.
//!
//! # Overview
//!
//! ## Fatigue
//!
//! [`fatigue::calculate_fatigue_score`] maps rest days, home/away and minutes
//! played to a bounded score in `[0, 100]`. [`fatigue::FatigueInputs::from_team_log`]
//! derives those inputs from a team's most recent game.
//!
//! ## Prop Validator
//!
//! [`prop_validator::build_prop_validator`] compares a five-game rolling
//! average against the season average and labels each game as a
//! [`Signal::HotStreak`](prop_validator::Signal::HotStreak),
//! [`Signal::ColdStreak`](prop_validator::Signal::ColdStreak) or
//! [`Signal::Neutral`](prop_validator::Signal::Neutral).
//!
//! ## Player Similarity
//!
//! 1. **Extract Features** ([`normalization::FeatureMatrix`]): rectangular
//!    numeric matrix, missing values filled with `0.0`
//! 2. **Standardize** ([`normalization::FeatureScaler`]): z-score per column
//!    fitted on the whole league table
//! 3. **Index** ([`similarity::SimilarityIndex`]): Euclidean nearest-neighbor
//!    search over the standardized vectors
//! 4. **Score** ([`similarity::find_player_comps`]): the `k` closest players
//!    with a similarity score in `[0, 1]`
//!
//! Fitted indexes can be shared between callers through
//! [`index_cache::SimilarityIndexCache`].
//!
//! ## League Context
//!
//! - [`profile::league_profile`]: player vs league average and percentile per metric
//! - [`form::recent_form`], [`form::performance_summary`]: last-5 / last-10 trends
//! - [`form::home_away_split`]: home vs away averages
//!
//! # Degradation
//!
//! None of the entry points return errors. Empty tables, absent columns and
//! unknown players produce an empty result (or `None`), which the
//! presentation layer renders as "no data available".
//!
//! # Examples
//!
//! ```
//! use signal_analysis::{
//!     fatigue::{FatigueInputs, calculate_fatigue_score},
//!     league::{LeagueStats, LeagueStatsRow},
//!     similarity::find_player_comps,
//! };
//!
//! let score = calculate_fatigue_score(&FatigueInputs {
//!     rest_days: 0,
//!     is_home: false,
//!     minutes_last_game: 48.0,
//! });
//! assert_eq!(score, 100.0);
//!
//! let league = LeagueStats::new(vec![
//!     LeagueStatsRow::new("A", "AAA", [("Points", 10.0), ("Assists", 2.0)]),
//!     LeagueStatsRow::new("B", "BBB", [("Points", 11.0), ("Assists", 2.5)]),
//!     LeagueStatsRow::new("C", "CCC", [("Points", 30.0), ("Assists", 9.0)]),
//! ]);
//! let features = ["Points".to_string(), "Assists".to_string()];
//! let comps = find_player_comps(&league, "A", &features, 1);
//! assert_eq!(comps.len(), 1);
//! assert_eq!(comps[0].row.player, "B");
//! ```

pub mod fatigue;
pub mod form;
pub mod game_log;
pub mod index_cache;
pub mod league;
pub mod normalization;
pub mod profile;
pub mod prop_validator;
pub mod similarity;

pub use self::{game_log::GameLog, league::LeagueStats};
