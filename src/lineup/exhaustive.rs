use super::scoring::CandidateTable;
use super::types::SearchLimits;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Best assignment: `picks[i]` is the player index at position `i`
    Found { picks: Vec<usize>, score: u64, nodes: u64 },
    /// Every branch was explored and none filled all positions
    NoAssignment { nodes: u64 },
    /// The node budget ran out before the search finished
    BudgetExhausted { nodes: u64 },
}

/// Explicit state of the depth-first walk.
///
/// `cursors[d]` is the next candidate to try at position `d`; `picks` holds the
/// players chosen for positions `0..picks.len()`.
#[derive(Debug)]
struct SearchState {
    cursors: Vec<usize>,
    picks: Vec<usize>,
    used: Vec<bool>,
    running: u64,
    best: Option<(u64, Vec<usize>)>,
    nodes: u64,
}

impl SearchState {
    fn new(player_count: usize) -> Self {
        SearchState {
            cursors: vec![0],
            picks: Vec::new(),
            used: vec![false; player_count],
            running: 0,
            best: None,
            nodes: 0,
        }
    }

    fn push(&mut self, table: &CandidateTable, player: usize) {
        let position = self.picks.len();
        self.used[player] = true;
        self.picks.push(player);
        self.running += table.score(position, player);
    }

    fn pop(&mut self, table: &CandidateTable) {
        if let Some(player) = self.picks.pop() {
            self.used[player] = false;
            self.running -= table.score(self.picks.len(), player);
        }
    }

    // strictly better only, so the earliest of equal scores stays
    fn record(&mut self) {
        let improves = self.best.as_ref().map_or(true, |(score, _)| self.running > *score);
        if improves {
            self.best = Some((self.running, self.picks.clone()));
        }
    }
}

/// Finds the assignment with the highest total candidate score.
///
/// Positions are filled in table order. At each position every eligible,
/// still-unused player is tried, highest score first; the ordering only
/// decides which of equally scored assignments is found first (the earlier one
/// wins), it never prunes a branch.
pub fn exhaustive_search(table: &CandidateTable, limits: SearchLimits) -> SearchOutcome {
    let position_count = table.position_count();
    if position_count == 0 {
        return SearchOutcome::Found { picks: Vec::new(), score: 0, nodes: 0 };
    }

    let mut state = SearchState::new(table.player_count());

    while let Some(&cursor) = state.cursors.last() {
        let depth = state.cursors.len() - 1;
        let candidates = table.candidates(depth);

        let next = candidates[cursor..]
            .iter()
            .position(|&p| !state.used[p])
            .map(|offset| cursor + offset);

        let Some(index) = next else {
            // Position exhausted, step back and release the previous pick
            state.cursors.pop();
            state.pop(table);
            continue;
        };

        state.cursors[depth] = index + 1;
        state.nodes += 1;
        if let Some(max_nodes) = limits.max_nodes {
            if state.nodes > max_nodes {
                log::debug!("exhaustive search stopped after {} nodes", max_nodes);
                return SearchOutcome::BudgetExhausted { nodes: max_nodes };
            }
        }

        state.push(table, candidates[index]);
        if state.picks.len() == position_count {
            state.record();
            state.pop(table);
        } else {
            state.cursors.push(0);
        }
    }

    log::debug!("exhaustive search visited {} nodes", state.nodes);
    match state.best {
        Some((score, picks)) => SearchOutcome::Found { picks, score, nodes: state.nodes },
        None => SearchOutcome::NoAssignment { nodes: state.nodes },
    }
}
