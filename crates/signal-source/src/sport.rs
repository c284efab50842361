//! Supported sports and their static configuration
//!
//! Each [`Sport`] carries a [`SportConfig`] (labels, offered seasons, metric
//! groups) and a [`StatColumns`] schema naming the upstream columns of its
//! game logs. Adding a sport means adding a variant here and handling it in
//! the cleaning schema of [`clean`](crate::clean).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use signal_analysis::{
    form::DEFAULT_SUMMARY_COLUMNS, league::DEFAULT_FEATURE_COLUMNS,
    prop_validator::DEFAULT_STAT_COLUMN,
};

/// A sport with a data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sport {
    Nba,
    Nhl,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("unsupported sport '{input}' (available sports: NBA, NHL)")]
pub struct ParseSportError {
    input: String,
}

/// Static configuration of a sport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SportConfig {
    pub name: &'static str,
    pub display_name: &'static str,
    /// Seasons offered for selection, newest first, in `YYYY-YY` form.
    pub seasons: &'static [&'static str],
    pub season_format: &'static str,
    /// Season used when the caller does not pick one, in the API's own form.
    pub default_season: &'static str,
    pub metrics: &'static [(&'static str, &'static [&'static str])],
}

/// Upstream stat columns of a sport, grouped for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatColumns {
    pub groups: &'static [(&'static str, &'static [&'static str])],
    pub display_names: &'static [(&'static str, &'static str)],
}

/// A team known without asking the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticTeam {
    pub id: i64,
    pub full_name: &'static str,
    pub abbreviation: &'static str,
}

const NBA_CONFIG: SportConfig = SportConfig {
    name: "NBA",
    display_name: "NBA Basketball",
    seasons: &["2023-24", "2022-23", "2021-22"],
    season_format: "YYYY-YY",
    default_season: "2023-24",
    metrics: &[
        ("primary", &["Points", "Assists", "Rebounds", "Minutes"]),
        ("shooting", &["FG%", "3P%", "FT%"]),
        ("advanced", &["PER", "TS%", "USG%", "VORP"]),
    ],
};

const NHL_CONFIG: SportConfig = SportConfig {
    name: "NHL",
    display_name: "NHL Hockey",
    seasons: &["2023-24", "2022-23", "2021-22"],
    season_format: "YYYY-YY",
    default_season: "20232024",
    metrics: &[
        ("skater_primary", &["Goals", "Assists", "Points", "+/-"]),
        ("skater_advanced", &["TOI", "Shots", "Hits", "Blocks"]),
        ("goalie_primary", &["SV%", "GAA", "Saves", "Shutouts"]),
        ("goalie_advanced", &["Quality Starts", "High Danger Saves"]),
    ],
};

const NBA_STAT_COLUMNS: StatColumns = StatColumns {
    groups: &[
        ("basic", &["PTS", "AST", "REB", "MIN"]),
        (
            "shooting",
            &[
                "FGM", "FGA", "FG_PCT", "FG3M", "FG3A", "FG3_PCT", "FTM", "FTA", "FT_PCT",
            ],
        ),
        (
            "advanced",
            &["Points", "Assists", "Rebounds", "UsageRate", "TrueShootingPct"],
        ),
    ],
    display_names: &[
        ("PTS", "Points"),
        ("AST", "Assists"),
        ("REB", "Rebounds"),
        ("MIN", "Minutes"),
    ],
};

const NHL_STAT_COLUMNS: StatColumns = StatColumns {
    groups: &[
        (
            "skater_basic",
            &["goals", "assists", "points", "plusMinus", "shots"],
        ),
        (
            "skater_advanced",
            &["timeOnIce", "faceoffPct", "hits", "blocks"],
        ),
        (
            "goalie_basic",
            &["saves", "savePct", "goalsAgainstAvg", "shutouts"],
        ),
        (
            "goalie_advanced",
            &["qualityStarts", "goalsAgainst", "shotsAgainst"],
        ),
    ],
    display_names: &[
        ("goals", "Goals"),
        ("assists", "Assists"),
        ("points", "Points"),
        ("plusMinus", "+/-"),
        ("shots", "Shots"),
        ("timeOnIce", "TOI"),
        ("savePct", "SV%"),
        ("goalsAgainstAvg", "GAA"),
    ],
};

macro_rules! teams {
    ($(($id:expr, $name:expr, $abbr:expr)),* $(,)?) => {
        &[$(StaticTeam { id: $id, full_name: $name, abbreviation: $abbr }),*]
    };
}

const NHL_FEATURE_COLUMNS: [&str; 5] = ["Goals", "Assists", "Points", "Shots", "PlusMinus"];

/// NHL franchises for the 2023-24 season.
pub const NHL_TEAMS: &[StaticTeam] = teams![
    (1, "New Jersey Devils", "NJD"),
    (2, "New York Islanders", "NYI"),
    (3, "New York Rangers", "NYR"),
    (4, "Philadelphia Flyers", "PHI"),
    (5, "Pittsburgh Penguins", "PIT"),
    (6, "Boston Bruins", "BOS"),
    (7, "Buffalo Sabres", "BUF"),
    (8, "Montréal Canadiens", "MTL"),
    (9, "Ottawa Senators", "OTT"),
    (10, "Toronto Maple Leafs", "TOR"),
    (12, "Carolina Hurricanes", "CAR"),
    (13, "Florida Panthers", "FLA"),
    (14, "Tampa Bay Lightning", "TBL"),
    (15, "Washington Capitals", "WSH"),
    (16, "Chicago Blackhawks", "CHI"),
    (17, "Detroit Red Wings", "DET"),
    (18, "Nashville Predators", "NSH"),
    (19, "St. Louis Blues", "STL"),
    (20, "Calgary Flames", "CGY"),
    (21, "Colorado Avalanche", "COL"),
    (22, "Edmonton Oilers", "EDM"),
    (23, "Vancouver Canucks", "VAN"),
    (24, "Anaheim Ducks", "ANA"),
    (25, "Dallas Stars", "DAL"),
    (26, "Los Angeles Kings", "LAK"),
    (28, "San Jose Sharks", "SJS"),
    (29, "Columbus Blue Jackets", "CBJ"),
    (30, "Minnesota Wild", "MIN"),
    (52, "Winnipeg Jets", "WPG"),
    (53, "Utah Hockey Club", "UTA"),
    (54, "Vegas Golden Knights", "VGK"),
    (55, "Seattle Kraken", "SEA"),
];

impl Sport {
    pub const ALL: [Sport; 2] = [Sport::Nba, Sport::Nhl];

    #[must_use]
    pub fn config(self) -> &'static SportConfig {
        match self {
            Sport::Nba => &NBA_CONFIG,
            Sport::Nhl => &NHL_CONFIG,
        }
    }

    #[must_use]
    pub fn stat_columns(self) -> &'static StatColumns {
        match self {
            Sport::Nba => &NBA_STAT_COLUMNS,
            Sport::Nhl => &NHL_STAT_COLUMNS,
        }
    }

    /// Teams that are known without a data source (none for the NBA).
    #[must_use]
    pub fn static_teams(self) -> &'static [StaticTeam] {
        match self {
            Sport::Nba => &[],
            Sport::Nhl => NHL_TEAMS,
        }
    }

    /// League-table columns compared by similarity and league profiles by
    /// default, named as they are after cleaning.
    #[must_use]
    pub fn feature_columns(self) -> &'static [&'static str] {
        match self {
            Sport::Nba => &DEFAULT_FEATURE_COLUMNS,
            Sport::Nhl => &NHL_FEATURE_COLUMNS,
        }
    }

    /// Game-log column the prop validator tracks by default.
    #[must_use]
    pub fn primary_stat(self) -> &'static str {
        match self {
            Sport::Nba => DEFAULT_STAT_COLUMN,
            Sport::Nhl => "points",
        }
    }

    /// Game-log columns shown in a performance summary.
    #[must_use]
    pub fn summary_stats(self) -> &'static [&'static str] {
        match self {
            Sport::Nba => &DEFAULT_SUMMARY_COLUMNS,
            Sport::Nhl => &["goals", "assists", "points", "timeOnIce"],
        }
    }

    /// Game-log column holding minutes played.
    #[must_use]
    pub fn minutes_stat(self) -> &'static str {
        match self {
            Sport::Nba => "MIN",
            Sport::Nhl => "timeOnIce",
        }
    }

    /// Lowercase identifier, used for directory names.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Sport::Nba => "nba",
            Sport::Nhl => "nhl",
        }
    }

    /// Converts a `YYYY-YY` season label into the form the sport's API uses.
    ///
    /// The NHL API concatenates both years (`2023-24` → `20232024`). Labels
    /// that are not `YYYY-YY` are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use signal_source::Sport;
    ///
    /// assert_eq!(Sport::Nba.api_season("2023-24"), "2023-24");
    /// assert_eq!(Sport::Nhl.api_season("2023-24"), "20232024");
    /// assert_eq!(Sport::Nhl.api_season("1999-00"), "19992000");
    /// assert_eq!(Sport::Nhl.api_season("20232024"), "20232024");
    /// ```
    #[must_use]
    pub fn api_season(self, season: &str) -> String {
        match self {
            Sport::Nba => season.to_owned(),
            Sport::Nhl => {
                let Some((start, end)) = season.split_once('-') else {
                    return season.to_owned();
                };
                let (Ok(start_year), Ok(_)) = (start.parse::<u32>(), end.parse::<u32>()) else {
                    return season.to_owned();
                };
                if start.len() != 4 || end.len() != 2 {
                    return season.to_owned();
                }
                format!("{start}{}", start_year + 1)
            }
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config().name)
    }
}

impl FromStr for Sport {
    type Err = ParseSportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sport::ALL
            .into_iter()
            .find(|sport| sport.config().name.eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSportError {
                input: s.to_owned(),
            })
    }
}

/// Returns a display label for a season (`2023-24` → `2023–24`).
#[must_use]
pub fn format_season_label(season: &str) -> String {
    season.replace('-', "\u{2013}")
}
