//! Runs the binary the way a coach would before a game.

use std::process::Command;

fn run(args: &[&str]) -> (bool, String, String) {
    let exe = env!("CARGO_BIN_EXE_softball-lineup");
    let output = Command::new(exe)
        .args(args)
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to start softball-lineup");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn lineup_with_absences_and_a_guest() {
    let (ok, stdout, _) = run(&[
        "lineup",
        "--unavailable",
        "Dave,KBoe,Kevo",
        "--guest",
        "Sam:1B,OF:7",
        "--details",
    ]);
    assert!(ok);
    assert!(stdout.contains("Freebasers Starting Lineup"));
    assert!(stdout.contains("Using 10 positions"));
    assert!(stdout.contains("Sam"));
    assert!(!stdout.contains("Kevo"));
}

#[test]
fn five_guests_on_a_full_roster() {
    let (ok, stdout, _) = run(&[
        "lineup", "--guest", "G1", "--guest", "G2", "--guest", "G3", "--guest", "G4", "--guest", "G5", "--details",
    ]);
    assert!(ok);
    assert!(stdout.contains("Available players: 17"));
    assert!(stdout.contains("Search: Fallback"));
}

#[test]
fn lineup_writes_text_and_csv() {
    let dir = tempfile::tempdir().unwrap();
    let text = dir.path().join("lineup.txt");
    let csv = dir.path().join("lineup.csv");

    let (ok, _, _) = run(&[
        "lineup",
        "--unavailable",
        "Dave",
        "--out",
        text.to_str().unwrap(),
        "--csv",
        csv.to_str().unwrap(),
    ]);
    assert!(ok);
    let saved = std::fs::read_to_string(&text).unwrap();
    assert!(saved.starts_with("** Freebasers Starting Lineup **"));
    assert_eq!(std::fs::read_to_string(&csv).unwrap().lines().count(), 12);
}

#[test]
fn unknown_absence_fails() {
    let (ok, _, stderr) = run(&["lineup", "--unavailable", "Nobody"]);
    assert!(!ok);
    assert!(stderr.contains("Nobody"));
}

#[test]
fn stats_and_batting_order_from_shipped_data() {
    let (ok, stdout, _) = run(&["stats", "--season", "Fall2025"]);
    assert!(ok);
    assert!(stdout.contains("Season Totals"));
    assert!(stdout.contains("TOTAL"));

    let (ok, stdout, _) = run(&["batting-order", "--season", "Fall2025", "--omit", "JG"]);
    assert!(ok);
    assert!(stdout.contains("Leadoff Hitter"));
    assert!(!stdout.contains("JG"));
}
