use std::fs::File;
use std::io::Write;

use crate::lineup::scoring::athletic_fit;
use crate::lineup::{can_play, candidate_score, Lineup, LineupRequest, Player, PREFERENCE_BONUS, ATHLETICISM_MULTIPLIER};
use crate::stats::{BattingLine, BattingSlot, StatRow};

/// Formats a player with their rating and stated preferences
pub fn format_player_details(player: &str, athleticism: u32, prefs: &[String]) -> String {
    format!("{} (Ath: {}, Prefs: [{}])", player, athleticism, prefs.join(", "))
}

fn athleticism_of(request: &LineupRequest, name: &str) -> u32 {
    request.athleticism.get(name).copied().unwrap_or(0)
}

fn prefs_of<'a>(request: &'a LineupRequest, name: &str) -> &'a [String] {
    request
        .roster
        .get(name)
        .map(|p| p.preferences.as_slice())
        .unwrap_or(&[])
}

/// Writes a lineup to a file in the format: POS player
pub fn write_lineup_to_file(
    team: &str,
    lineup: &Lineup,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;

    writeln!(file, "** {} Starting Lineup **", team)?;
    for slot in lineup.assignment.slots() {
        writeln!(file, "{:<4} {}", slot.position, slot.player)?;
    }
    if lineup.bench.is_empty() {
        writeln!(file, "Bench: [NONE]")?;
    } else {
        writeln!(file, "Bench: {}", lineup.bench.join(", "))?;
    }

    Ok(())
}

/// Prints the starting lineup and the bench
pub fn print_lineup(team: &str, lineup: &Lineup) {
    println!("\n=== {} Starting Lineup ===", team);
    println!("  {:<8} Player", "Position");
    for slot in lineup.assignment.slots() {
        println!("  {:<8} {}", slot.position, slot.player);
    }

    println!("\nSubstitutes / Bench:");
    if lineup.bench.is_empty() {
        println!("  No substitutes available");
    } else {
        println!("  {}", lineup.bench.join(", "));
    }
}

/// Prints each starter's athleticism and preferences
pub fn print_lineup_details(request: &LineupRequest, lineup: &Lineup) {
    println!("\nLineup with Athleticism and Preferences:");
    for slot in lineup.assignment.slots() {
        let details = format_player_details(
            &slot.player,
            athleticism_of(request, &slot.player),
            prefs_of(request, &slot.player),
        );
        println!("  {}: {}", slot.position, details);
    }
    println!(
        "  Search: {:?}, swaps: {}, total score: {}, nodes: {}",
        lineup.path, lineup.swaps, lineup.score, lineup.nodes_visited
    );
}

/// Prints the score breakdown of every eligible candidate at every position
pub fn print_candidate_scores(request: &LineupRequest, players: &[Player]) {
    println!("\nCandidate Scores for Each Position:");
    for spec in request.positions.iter() {
        let candidates: Vec<&Player> = players
            .iter()
            .filter(|p| can_play(p, &spec.name, &request.positions))
            .collect();
        if candidates.is_empty() {
            continue;
        }

        println!("\n{} candidates:", spec.name);
        for candidate in candidates {
            let pref_bonus = if candidate.prefers(&spec.name) { PREFERENCE_BONUS } else { 0 };
            let fit = athletic_fit(candidate, &spec.name, &request.positions) * ATHLETICISM_MULTIPLIER;
            println!(
                "  {}: Score={} (Pref={}, Ath×Imp={})",
                candidate.name,
                candidate_score(candidate, &spec.name, &request.positions),
                pref_bonus,
                fit
            );
        }
    }
}

fn print_stat_header(first: &str) {
    println!(
        "  {:<12} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>6} {:>6} {:>6} {:>6} {:>7} {:>6}",
        first, "AB", "H", "HR", "R", "RBI", "BB", "SO", "SF", "AVG", "OBP", "SLG", "OPS", "BA_RISP", "ISO"
    );
}

fn print_stat_row(row: &StatRow) {
    println!(
        "  {:<12} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>4} {:>6.3} {:>6.3} {:>6.3} {:>6.3} {:>7.3} {:>6.3}",
        row.player, row.ab, row.h, row.hr, row.r, row.rbi, row.bb, row.so, row.sf,
        row.avg, row.obp, row.slg, row.ops, row.ba_risp, row.iso
    );
}

/// Prints a stat table, optionally followed by a totals row
pub fn print_stat_table(title: &str, rows: &[StatRow], totals: Option<&StatRow>) {
    println!("\n=== {} ===", title);
    print_stat_header("Player");
    for row in rows {
        print_stat_row(row);
    }
    if let Some(totals) = totals {
        print_stat_row(totals);
    }
}

/// Prints per-game lines (team totals or one player's log)
pub fn print_game_table(title: &str, games: &[(u32, BattingLine)]) {
    println!("\n=== {} ===", title);
    print_stat_header("Game");
    for (game, line) in games {
        let mut row = line.row();
        row.player = game.to_string();
        print_stat_row(&row);
    }
}

/// Prints the batting order with the reasoning for each spot
pub fn print_batting_order(order: &[BattingSlot]) {
    println!("\n=== Optimal Batting Lineup ===");
    for slot in order {
        println!(
            "  {:>2}. {:<12} AVG {:.3}, OBP {:.3}, SLG {:.3}  [{}]",
            slot.order, slot.player, slot.avg, slot.obp, slot.slg, slot.role.label()
        );
    }

    println!("\nLineup Rationale:");
    let mut last_role = None;
    for slot in order {
        if last_role == Some(slot.role) {
            continue;
        }
        last_role = Some(slot.role);
        println!("  {}: {}", slot.role.label(), slot.role.rationale());
    }
}
