use super::scoring::CandidateTable;

/// Finds any one complete assignment, trying higher-scored candidates first.
///
/// Stops at the first success. Returns player indices per position, or `None`
/// when the candidates cannot cover every position.
pub fn backtrack(table: &CandidateTable) -> Option<Vec<usize>> {
    let mut picks = Vec::with_capacity(table.position_count());
    let mut used = vec![false; table.player_count()];
    if extend(table, &mut picks, &mut used) {
        Some(picks)
    } else {
        None
    }
}

fn extend(table: &CandidateTable, picks: &mut Vec<usize>, used: &mut [bool]) -> bool {
    let position = picks.len();
    if position == table.position_count() {
        return true;
    }

    for &player in table.candidates(position) {
        if used[player] {
            continue;
        }
        used[player] = true;
        picks.push(player);
        if extend(table, picks, used) {
            return true;
        }
        picks.pop();
        used[player] = false;
    }

    false
}
