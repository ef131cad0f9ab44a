use std::collections::HashMap;
use super::eligibility::can_play;
use super::types::{Assignment, Player, PositionTable};

pub const PREFERENCE_BONUS: u64 = 1000;
pub const ATHLETICISM_MULTIPLIER: u64 = 50;

/// Athleticism weighted by the position's importance
pub fn athletic_fit(player: &Player, position: &str, positions: &PositionTable) -> u64 {
    u64::from(player.athleticism) * u64::from(positions.importance(position))
}

/// Only a literal position match earns the preference bonus; the IF/OF tokens
/// make a player eligible but score like no preference at all.
pub fn candidate_score(player: &Player, position: &str, positions: &PositionTable) -> u64 {
    let preference_bonus = if player.prefers(position) { PREFERENCE_BONUS } else { 0 };
    athletic_fit(player, position, positions)
        .saturating_mul(ATHLETICISM_MULTIPLIER)
        .saturating_add(preference_bonus)
}

// Unknown players count 0
pub fn assignment_score(
    assignment: &Assignment,
    players: &HashMap<&str, &Player>,
    positions: &PositionTable,
) -> u64 {
    assignment
        .slots()
        .iter()
        .filter_map(|slot| {
            players
                .get(slot.player.as_str())
                .map(|p| candidate_score(p, &slot.position, positions))
        })
        .sum()
}

/// Eligible candidates and their scores, precomputed per position.
///
/// Positions are indexed in table order, players in the order of the slice the
/// table was built from. Each position's candidates are sorted by descending
/// score; ties keep player order.
#[derive(Debug, Clone)]
pub struct CandidateTable {
    candidates: Vec<Vec<usize>>,
    scores: Vec<Vec<u64>>,
}

impl CandidateTable {
    pub fn build(players: &[Player], positions: &PositionTable) -> Self {
        let mut candidates = Vec::with_capacity(positions.len());
        let mut scores = Vec::with_capacity(positions.len());

        for spec in positions.iter() {
            let row: Vec<u64> = players
                .iter()
                .map(|p| candidate_score(p, &spec.name, positions))
                .collect();

            let mut eligible: Vec<usize> = players
                .iter()
                .enumerate()
                .filter(|(_, p)| can_play(p, &spec.name, positions))
                .map(|(i, _)| i)
                .collect();
            eligible.sort_by(|&a, &b| row[b].cmp(&row[a]));

            candidates.push(eligible);
            scores.push(row);
        }

        CandidateTable { candidates, scores }
    }

    pub fn position_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn player_count(&self) -> usize {
        self.scores.first().map(|row| row.len()).unwrap_or(0)
    }

    pub fn candidates(&self, position: usize) -> &[usize] {
        &self.candidates[position]
    }

    pub fn score(&self, position: usize, player: usize) -> u64 {
        self.scores[position][player]
    }

    pub fn first_uncovered(&self) -> Option<usize> {
        self.candidates.iter().position(|c| c.is_empty())
    }
}
