use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use signal_analysis::{GameLog, LeagueStats};
use signal_source::{
    Sport,
    clean::{self, RawRecord},
};

/// Writes `value` as pretty JSON to `output_path`, or to stdout when `None`.
pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    let Some(path) = output_path else {
        return write_json(io::stdout().lock(), value).context("Failed to write JSON to stdout");
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    write_json(BufWriter::new(file), value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote report");
    Ok(())
}

fn write_json<W, T>(mut writer: W, value: &T) -> io::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Reads a game log of `sport` (raw API records or an already-cleaned log).
pub fn read_game_log_file<P>(sport: Sport, path: P) -> anyhow::Result<GameLog>
where
    P: AsRef<Path>,
{
    let records: Vec<RawRecord> = read_json_file("game log", path)?;
    Ok(clean::clean_game_log(&records, sport))
}

/// Reads a league stats table of `sport` (raw API records or an
/// already-cleaned table).
pub fn read_league_file<P>(sport: Sport, season: &str, path: P) -> anyhow::Result<LeagueStats>
where
    P: AsRef<Path>,
{
    let records: Vec<RawRecord> = read_json_file("league stats", path)?;
    Ok(clean::clean_league_stats(&records, sport, season, Utc::now()))
}
