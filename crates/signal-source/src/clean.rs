//! Normalization of raw API records into core tables
//!
//! Upstream APIs return loosely typed JSON records: numbers that arrive as
//! strings, dates in more than one layout, home/away encoded in a matchup
//! label. The functions here coerce those records into [`GameLog`] and
//! [`LeagueStats`]. Values that cannot be coerced become missing values,
//! never errors.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use signal_analysis::{
    GameLog, LeagueStats,
    game_log::{GAME_DATE_COLUMN, GameLogRow, IS_HOME_COLUMN, MATCHUP_COLUMN},
    league::LeagueStatsRow,
};

use crate::sport::Sport;

/// A raw record as returned by an upstream API.
pub type RawRecord = Map<String, Value>;

const NBA_NUMERIC_COLUMNS: &[&str] = &[
    "PTS",
    "AST",
    "REB",
    "MIN",
    "FGM",
    "FGA",
    "FG3M",
    "FG3A",
    "FTM",
    "FTA",
    "PLUS_MINUS",
];

const NHL_NUMERIC_COLUMNS: &[&str] = &[
    "goals",
    "assists",
    "points",
    "shots",
    "plusMinus",
    "timeOnIce",
];

/// NBA league-table columns and the names the core uses for them.
pub const NBA_LEAGUE_RENAMES: &[(&str, &str)] = &[
    ("PLAYER_NAME", "Player"),
    ("TEAM_ABBREVIATION", "Team"),
    ("PTS", "Points"),
    ("AST", "Assists"),
    ("REB", "Rebounds"),
    ("USG_PCT", "UsageRate"),
    ("TS_PCT", "TrueShootingPct"),
];

/// NHL skater-summary columns and the names the core uses for them.
pub const NHL_LEAGUE_RENAMES: &[(&str, &str)] = &[
    ("skaterFullName", "Player"),
    ("teamAbbrevs", "Team"),
    ("goals", "Goals"),
    ("assists", "Assists"),
    ("points", "Points"),
    ("shots", "Shots"),
    ("plusMinus", "PlusMinus"),
];

/// NHL game-log column marking home (`H`) and road (`R`) games.
const HOME_ROAD_COLUMN: &str = "homeRoadFlag";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d, %Y"];

fn numeric_columns(sport: Sport) -> &'static [&'static str] {
    match sport {
        Sport::Nba => NBA_NUMERIC_COLUMNS,
        Sport::Nhl => NHL_NUMERIC_COLUMNS,
    }
}

fn league_renames(sport: Sport) -> &'static [(&'static str, &'static str)] {
    match sport {
        Sport::Nba => NBA_LEAGUE_RENAMES,
        Sport::Nhl => NHL_LEAGUE_RENAMES,
    }
}

fn date_column(sport: Sport) -> &'static str {
    match sport {
        Sport::Nba => GAME_DATE_COLUMN,
        Sport::Nhl => "gameDate",
    }
}

/// Parses a game date.
///
/// Accepts `YYYY-MM-DD` (optionally followed by a time part) and the
/// `JAN 05, 2024` layout of the NBA game-log endpoints.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use signal_source::clean::parse_game_date;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 1, 5);
/// assert_eq!(parse_game_date("2024-01-05"), expected);
/// assert_eq!(parse_game_date("2024-01-05T00:00:00"), expected);
/// assert_eq!(parse_game_date("JAN 05, 2024"), expected);
/// assert_eq!(parse_game_date("yesterday"), None);
/// ```
#[must_use]
pub fn parse_game_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    let date_part = input.get(..10).unwrap_or(input);
    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(input, format)
            .or_else(|_| NaiveDate::parse_from_str(date_part, format))
            .ok()
    })
}

/// Coerces a JSON value into a number.
///
/// Numbers pass through; strings are parsed as decimals or as `MM:SS`
/// durations (returned in minutes). Anything else is missing.
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => parse_numeric_text(text.trim())?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn parse_numeric_text(text: &str) -> Option<f64> {
    if let Ok(number) = text.parse::<f64>() {
        return Some(number);
    }
    let (minutes, seconds) = text.split_once(':')?;
    let minutes = minutes.parse::<u32>().ok()?;
    let seconds = seconds.parse::<u32>().ok()?;
    (seconds < 60).then(|| f64::from(minutes) + f64::from(seconds) / 60.0)
}

/// Cleans raw game-log records of `sport`.
///
/// - the sport's date column becomes the row date (unparseable dates are
///   missing)
/// - the sport's numeric columns are coerced, missing when not numeric
/// - other numeric fields are kept as-is, other text fields are dropped
/// - `MATCHUP` is kept and sets the home flag (`"vs."` means a home game);
///   once any record carries `MATCHUP`, records without one are away games
/// - the NHL `homeRoadFlag` (`H`/`R`) and an existing boolean `IS_HOME` set
///   the flag as well, so already-cleaned records clean to themselves
#[must_use]
pub fn clean_game_log(records: &[RawRecord], sport: Sport) -> GameLog {
    let numeric = numeric_columns(sport);
    let date_column = date_column(sport);
    let has_matchups = records
        .iter()
        .any(|record| record.contains_key(MATCHUP_COLUMN));

    records
        .iter()
        .map(|record| {
            let mut row = GameLogRow {
                game_date: record
                    .get(date_column)
                    .or_else(|| record.get(GAME_DATE_COLUMN))
                    .and_then(Value::as_str)
                    .and_then(parse_game_date),
                ..GameLogRow::default()
            };
            for (column, value) in record {
                let column = column.as_str();
                if column == date_column || column == GAME_DATE_COLUMN {
                    continue;
                }
                // An upstream label wins over a flag from an earlier cleaning.
                if column == IS_HOME_COLUMN {
                    if let Some(is_home) = value.as_bool() {
                        row.is_home.get_or_insert(is_home);
                    }
                    continue;
                }
                if column == MATCHUP_COLUMN {
                    if let Some(matchup) = value.as_str() {
                        row.is_home = Some(matchup.contains("vs."));
                        row.matchup = Some(matchup.to_owned());
                    } else {
                        row.is_home = Some(false);
                    }
                    continue;
                }
                if column == HOME_ROAD_COLUMN {
                    match value.as_str() {
                        Some("H") => row.is_home = Some(true),
                        Some("R") => row.is_home = Some(false),
                        _ => {}
                    }
                    continue;
                }
                if numeric.contains(&column) {
                    row.stats.insert(column.to_owned(), coerce_number(value));
                } else if let Value::Number(number) = value {
                    let number = number.as_f64().filter(|v| v.is_finite());
                    row.stats.insert(column.to_owned(), number);
                }
            }
            if has_matchups && row.is_home.is_none() {
                row.is_home = Some(false);
            }
            row
        })
        .collect()
}

fn league_name<'a>(renames: &'static [(&'static str, &'static str)], column: &'a str) -> &'a str {
    renames
        .iter()
        .find(|(upstream, _)| *upstream == column)
        .map_or(column, |(_, renamed)| renamed)
}

/// Cleans raw league-table records of `sport` for `season`.
///
/// Upstream columns are renamed per the sport's table ([`NBA_LEAGUE_RENAMES`]
/// or [`NHL_LEAGUE_RENAMES`]). Each of [`Sport::feature_columns`] is coerced
/// to a number and filled with `0.0` when a record lacks it. Every row is
/// stamped with `season` and `now`.
#[must_use]
pub fn clean_league_stats(
    records: &[RawRecord],
    sport: Sport,
    season: &str,
    now: DateTime<Utc>,
) -> LeagueStats {
    let renames = league_renames(sport);
    let features = sport.feature_columns();

    records
        .iter()
        .map(|record| {
            let mut row = LeagueStatsRow {
                season: season.to_owned(),
                last_updated: Some(now),
                ..LeagueStatsRow::default()
            };
            for (column, value) in record {
                match league_name(renames, column) {
                    "Player" => row.player = value.as_str().unwrap_or_default().to_owned(),
                    "Team" => row.team = value.as_str().unwrap_or_default().to_owned(),
                    "Season" | "LastUpdated" => {}
                    name if features.contains(&name) => {
                        row.features.insert(name.to_owned(), coerce_number(value));
                    }
                    name => {
                        if let Value::Number(number) = value {
                            let number = number.as_f64().filter(|v| v.is_finite());
                            row.features.insert(name.to_owned(), number);
                        }
                    }
                }
            }
            for column in features {
                row.features.entry((*column).to_owned()).or_insert(Some(0.0));
            }
            row
        })
        .collect()
}
