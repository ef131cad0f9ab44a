use std::io::Write;
use std::path::PathBuf;

use softball_lineup::stats::{
    batting_order, game_totals, load_game_records, season_totals, seasons, StatsError, MIN_HITTERS, TOTALS_NAME,
};

fn shipped_games() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/game_stats.csv")
}

#[test]
fn shipped_stats_cover_both_seasons() {
    let records = load_game_records(shipped_games()).unwrap();
    let seasons = seasons(&records);
    assert!(seasons.contains(&"Fall2025".to_string()));
    assert!(seasons.contains(&"Spring2025".to_string()));

    let team = season_totals(&records, "Freebasers", "Fall2025").unwrap();
    let names: Vec<&str> = team.players.iter().map(|p| p.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    let totals = team.totals();
    assert_eq!(totals.name, TOTALS_NAME);
    let by_game: u32 = game_totals(&records, "Fall2025").unwrap().iter().map(|(_, l)| l.ab).sum();
    assert_eq!(totals.ab, by_game);
}

#[test]
fn shipped_stats_give_a_full_batting_order() {
    let records = load_game_records(shipped_games()).unwrap();
    let team = season_totals(&records, "Freebasers", "Fall2025").unwrap();
    let order = batting_order(&team, &[]).unwrap();

    assert_eq!(order.len(), team.players.len());
    assert!(order.len() >= MIN_HITTERS);
    for (i, slot) in order.iter().enumerate() {
        assert_eq!(slot.order, i + 1);
    }
}

#[test]
fn missing_columns_default_to_zero() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Season,Game,Player,AB,1B,HR").unwrap();
    writeln!(file, "Fall2025,1,Kevo,4,2,1").unwrap();
    writeln!(file, "Fall2025,2, Kevo ,3,0,0").unwrap();

    let records = load_game_records(file.path()).unwrap();
    let team = season_totals(&records, "Freebasers", "Fall2025").unwrap();
    let kevo = team.get("Kevo").unwrap();
    assert_eq!(kevo.ab, 7);
    assert_eq!(kevo.hits(), 3);
    assert_eq!(kevo.bb, 0);
    assert_eq!(kevo.obp(), 0.429);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_game_records(dir.path().join("nope.csv")),
        Err(StatsError::Csv(_))
    ));
}
