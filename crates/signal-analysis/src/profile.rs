//! Player vs league comparison per metric (radar table)

use serde::{Deserialize, Serialize};
use signal_stats::{numeric::safe_mean, percentiles::percentile_rank};

use crate::league::LeagueStats;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub metric: String,
    /// `None` when the player's value is missing.
    pub player_value: Option<f64>,
    pub league_average: f64,
    /// Share of league rows strictly below the player, in percent.
    pub percentile: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueProfile {
    pub player: String,
    pub team: String,
    pub entries: Vec<ProfileEntry>,
}

/// Compares `player_name` against the league on each of `feature_columns`
/// the table actually has.
///
/// Returns `None` if the table is empty, none of the columns exist, or the
/// player is not found.
///
/// # Examples
///
/// ```
/// use signal_analysis::{
///     league::{LeagueStats, LeagueStatsRow},
///     profile::league_profile,
/// };
///
/// let league = LeagueStats::new(vec![
///     LeagueStatsRow::new("A", "AAA", [("Points", 10.0)]),
///     LeagueStatsRow::new("B", "BBB", [("Points", 20.0)]),
///     LeagueStatsRow::new("C", "CCC", [("Points", 30.0)]),
///     LeagueStatsRow::new("D", "DDD", [("Points", 40.0)]),
/// ]);
/// let profile = league_profile(&league, "C", &["Points", "Steals"]).unwrap();
/// assert_eq!(profile.entries.len(), 1);
/// assert_eq!(profile.entries[0].league_average, 25.0);
/// assert_eq!(profile.entries[0].percentile, 50.0);
/// ```
#[must_use]
pub fn league_profile<S>(
    league: &LeagueStats,
    player_name: &str,
    feature_columns: &[S],
) -> Option<LeagueProfile>
where
    S: AsRef<str>,
{
    let columns = league.available_columns(feature_columns);
    if league.is_empty() || columns.is_empty() {
        return None;
    }
    let row = &league.rows[league.position_of(player_name)?];

    let entries = columns
        .into_iter()
        .map(|metric| {
            let values = league.column(&metric);
            let player_value = row.value(&metric);
            ProfileEntry {
                league_average: safe_mean(values.iter().copied()),
                percentile: percentile_rank(&values, player_value),
                player_value: player_value.is_finite().then_some(player_value),
                metric,
            }
        })
        .collect();

    Some(LeagueProfile {
        player: row.player.clone(),
        team: row.team.clone(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use crate::league::LeagueStatsRow;

    use super::*;

    fn league() -> LeagueStats {
        LeagueStats::new(vec![
            LeagueStatsRow::new("A", "AAA", [("Points", 10.0), ("Assists", 4.0)]),
            LeagueStatsRow::new("B", "BBB", [("Points", 20.0), ("Assists", f64::NAN)]),
            LeagueStatsRow::new("C", "CCC", [("Points", 30.0), ("Assists", 2.0)]),
        ])
    }

    #[test]
    fn test_unknown_player() {
        assert!(league_profile(&league(), "Z", &["Points"]).is_none());
    }

    #[test]
    fn test_no_available_columns() {
        assert!(league_profile(&league(), "A", &["Steals"]).is_none());
        assert!(league_profile(&LeagueStats::default(), "A", &["Points"]).is_none());
    }

    #[test]
    fn test_entries() {
        let profile = league_profile(&league(), "A", &["Points", "Assists"]).unwrap();
        assert_eq!(profile.team, "AAA");
        let points = &profile.entries[0];
        assert_eq!(points.player_value, Some(10.0));
        assert_eq!(points.league_average, 20.0);
        assert_eq!(points.percentile, 0.0);
        let assists = &profile.entries[1];
        assert_eq!(assists.league_average, 3.0);
        assert!((assists.percentile - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_player_value() {
        let profile = league_profile(&league(), "B", &["Assists"]).unwrap();
        assert_eq!(profile.entries[0].player_value, None);
        assert_eq!(profile.entries[0].percentile, 0.0);
    }
}
