use serde::{Serialize, Deserialize};
use super::exhaustive::{exhaustive_search, SearchOutcome};
use super::fallback::backtrack;
use super::outfield::rebalance_outfield;
use super::scoring::{assignment_score, CandidateTable};
use super::swap::optimize_swaps;
use super::types::{index_players, Assignment, LineupError, LineupRequest, Player, PositionTable, Slot};

/// Search that produced the lineup; swaps may have changed it since
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPath {
    Exhaustive,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub assignment: Assignment,
    pub bench: Vec<String>,
    pub path: SearchPath,
    pub swaps: usize,
    /// Total candidate score of the final assignment
    pub score: u64,
    pub nodes_visited: u64,
}

fn to_assignment(picks: &[usize], players: &[Player], positions: &PositionTable) -> Assignment {
    let slots = positions
        .iter()
        .zip(picks)
        .map(|(spec, &player)| Slot {
            position: spec.name.clone(),
            player: players[player].name.clone(),
        })
        .collect();
    Assignment::new(slots)
}

/// Runs the whole lineup pipeline for one request.
///
/// Headcount and per-position coverage are checked before any search. The
/// exhaustive search runs first; if it finds nothing (or runs out of budget)
/// the backtracking search and outfield rebalance take over. The swap
/// optimizer always runs last.
pub fn plan_lineup(request: &LineupRequest) -> Result<Lineup, LineupError> {
    let players = request.players()?;
    let positions = &request.positions;

    if players.len() < positions.len() {
        return Err(LineupError::InsufficientRoster {
            available: players.len(),
            required: positions.len(),
        });
    }

    let table = CandidateTable::build(&players, positions);
    if let Some(uncovered) = table.first_uncovered() {
        let names = positions.names();
        return Err(LineupError::NoEligiblePlayer(names[uncovered].to_string()));
    }

    let lookup = index_players(&players);

    let (mut assignment, path, nodes_visited) = match exhaustive_search(&table, request.limits) {
        SearchOutcome::Found { picks, score, nodes } => {
            log::info!("exhaustive search found lineup scoring {} ({} nodes)", score, nodes);
            (to_assignment(&picks, &players, positions), SearchPath::Exhaustive, nodes)
        }
        SearchOutcome::NoAssignment { nodes } | SearchOutcome::BudgetExhausted { nodes } => {
            log::warn!("exhaustive search gave no lineup after {} nodes, falling back", nodes);
            let picks = backtrack(&table).ok_or(LineupError::NoValidAssignment {
                players: players.len(),
                positions: positions.len(),
            })?;
            let mut assignment = to_assignment(&picks, &players, positions);
            rebalance_outfield(&mut assignment, &lookup, positions);
            (assignment, SearchPath::Fallback, nodes)
        }
    };

    let swaps = optimize_swaps(&mut assignment, &lookup, positions);
    if swaps > 0 {
        log::info!("swap optimizer made {} swaps", swaps);
    }

    let score = assignment_score(&assignment, &lookup, positions);
    let bench = assignment.bench(&request.available);

    Ok(Lineup {
        assignment,
        bench,
        path,
        swaps,
        score,
        nodes_visited,
    })
}
