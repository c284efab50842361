//! Sport data collaborators for the Signal analytics core
//!
//! The analysis crate never knows which sport it is looking at. This crate
//! is the sport-aware side: it describes each supported [`Sport`], defines
//! the [`DataLoader`] capability set every sport provides, and turns raw API
//! records into the cleaned [`GameLog`](signal_analysis::GameLog) and
//! [`LeagueStats`](signal_analysis::LeagueStats) tables the core consumes.
//!
//! # Modules
//!
//! - [`sport`]: supported sports, per-sport configuration and stat-column schema
//! - [`loader`]: the [`DataLoader`] trait, entity types and [`LoaderError`]
//! - [`clean`]: normalization of raw API records into core tables
//! - [`snapshot`]: [`SnapshotLoader`](snapshot::SnapshotLoader), a loader over
//!   API responses saved to disk
//! - [`cache`]: [`CachedLoader`](cache::CachedLoader), a TTL cache around any loader
//!
//! # Example
//!
//! ```no_run
//! use signal_source::{
//!     DataLoader, Sport,
//!     cache::{CacheTtl, CachedLoader},
//!     loader::SeasonType,
//!     snapshot::SnapshotLoader,
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let loader = CachedLoader::new(SnapshotLoader::open(Sport::Nba, "data")?, CacheTtl::default());
//! let league = loader.load_league_player_stats("2023-24", SeasonType::RegularSeason)?;
//! println!("{} players in the league table", league.len());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod clean;
pub mod loader;
pub mod snapshot;
pub mod sport;

pub use self::{
    loader::{DataLoader, LoaderError},
    sport::Sport,
};
