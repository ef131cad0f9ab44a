use csv::Reader;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Serialize, Deserialize};

use super::batting::{BattingLine, TeamBatting};

/// One player's line from one game, as kept in `game_stats.csv`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Game")]
    pub game: u32,
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "AB", default)]
    pub ab: u32,
    #[serde(rename = "R", default)]
    pub runs: u32,
    #[serde(rename = "1B", default)]
    pub singles: u32,
    #[serde(rename = "2B", default)]
    pub doubles: u32,
    #[serde(rename = "3B", default)]
    pub triples: u32,
    #[serde(rename = "HR", default)]
    pub hr: u32,
    #[serde(rename = "RBI", default)]
    pub rbi: u32,
    #[serde(rename = "BB", default)]
    pub bb: u32,
    #[serde(rename = "SO", default)]
    pub so: u32,
    #[serde(rename = "SF", default)]
    pub sf: u32,
    #[serde(rename = "AB_RISP", default)]
    pub ab_risp: u32,
    #[serde(rename = "H_RISP", default)]
    pub h_risp: u32,
}

impl GameRecord {
    pub fn line(&self, name: &str) -> BattingLine {
        BattingLine {
            name: name.to_string(),
            ab: self.ab,
            runs: self.runs,
            singles: self.singles,
            doubles: self.doubles,
            triples: self.triples,
            hr: self.hr,
            rbi: self.rbi,
            bb: self.bb,
            so: self.so,
            sf: self.sf,
            ab_risp: self.ab_risp,
            h_risp: self.h_risp,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("failed to read game stats: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to read game stats: {0}")]
    Io(#[from] std::io::Error),

    #[error("no games recorded for season '{0}'")]
    UnknownSeason(String),
}

/// Loads per-game records from a CSV file
pub fn load_game_records<P: AsRef<Path>>(csv_path: P) -> Result<Vec<GameRecord>, StatsError> {
    let reader = Reader::from_path(csv_path)?;
    read_records(reader)
}

/// Loads per-game records from any reader (uploads, tests)
pub fn parse_game_records<R: Read>(input: R) -> Result<Vec<GameRecord>, StatsError> {
    read_records(Reader::from_reader(input))
}

fn read_records<R: Read>(mut reader: Reader<R>) -> Result<Vec<GameRecord>, StatsError> {
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let mut record: GameRecord = result?;
        record.player = record.player.trim().to_string();
        if record.player.is_empty() {
            continue;
        }
        records.push(record);
    }
    Ok(records)
}

/// Distinct seasons in first-seen order
pub fn seasons(records: &[GameRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        if !seen.contains(&record.season) {
            seen.push(record.season.clone());
        }
    }
    seen
}

fn in_season<'a>(records: &'a [GameRecord], season: &'a str) -> Result<Vec<&'a GameRecord>, StatsError> {
    let rows: Vec<&GameRecord> = records.iter().filter(|r| r.season == season).collect();
    if rows.is_empty() {
        return Err(StatsError::UnknownSeason(season.to_string()));
    }
    Ok(rows)
}

/// Season totals per player, players in name order
pub fn season_totals(records: &[GameRecord], team: &str, season: &str) -> Result<TeamBatting, StatsError> {
    let mut by_player: BTreeMap<&str, BattingLine> = BTreeMap::new();
    for record in in_season(records, season)? {
        by_player
            .entry(record.player.as_str())
            .or_insert_with(|| BattingLine::new(&record.player))
            .accumulate(&record.line(&record.player));
    }

    let mut batting = TeamBatting::new(team);
    for (_, line) in by_player {
        if !line.has_consistent_risp() {
            log::warn!(
                "{} has {} RISP hits but only {} hits",
                line.name,
                line.h_risp,
                line.hits()
            );
        }
        batting.add_player(line);
    }
    Ok(batting)
}

/// Team totals for each game of the season, by game number
pub fn game_totals(records: &[GameRecord], season: &str) -> Result<Vec<(u32, BattingLine)>, StatsError> {
    let mut by_game: BTreeMap<u32, BattingLine> = BTreeMap::new();
    for record in in_season(records, season)? {
        by_game
            .entry(record.game)
            .or_insert_with(|| BattingLine::new(&format!("Game {}", record.game)))
            .accumulate(&record.line(""));
    }
    Ok(by_game.into_iter().collect())
}

/// One player's game log for the season, by game number
pub fn player_games(
    records: &[GameRecord],
    season: &str,
    player: &str,
) -> Result<Vec<(u32, BattingLine)>, StatsError> {
    let mut games: Vec<(u32, BattingLine)> = in_season(records, season)?
        .into_iter()
        .filter(|r| r.player == player)
        .map(|r| (r.game, r.line(&r.player)))
        .collect();
    games.sort_by_key(|(game, _)| *game);
    Ok(games)
}
