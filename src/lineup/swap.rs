use std::collections::HashMap;
use super::eligibility::can_play;
use super::scoring::athletic_fit;
use super::types::{Assignment, Player, PositionTable};

/// Whether exchanging two incumbents is allowed and strictly improves the
/// athleticism x importance of the two slots.
///
/// Blocked when either player would leave a position they explicitly prefer
/// for one they don't.
pub fn is_improving_swap(
    first: &Player,
    first_position: &str,
    second: &Player,
    second_position: &str,
    positions: &PositionTable,
) -> bool {
    if !(can_play(first, second_position, positions) && can_play(second, first_position, positions)) {
        return false;
    }

    let current = athletic_fit(first, first_position, positions) + athletic_fit(second, second_position, positions);
    let swapped = athletic_fit(first, second_position, positions) + athletic_fit(second, first_position, positions);
    if swapped <= current {
        return false;
    }

    let leaves_preferred = |player: &Player, from: &str, to: &str| player.prefers(from) && !player.prefers(to);
    !(leaves_preferred(first, first_position, second_position)
        || leaves_preferred(second, second_position, first_position))
}

/// First improving pair of slot indices.
///
/// Pairs are scanned with both slots in table order, keeping only pairs whose
/// first position name sorts before the second (so `("C", "P")` is tried, never
/// `("P", "C")`).
pub fn find_improving_swap(
    assignment: &Assignment,
    players: &HashMap<&str, &Player>,
    positions: &PositionTable,
) -> Option<(usize, usize)> {
    let slots = assignment.slots();
    for (i, first_slot) in slots.iter().enumerate() {
        for (j, second_slot) in slots.iter().enumerate() {
            if first_slot.position >= second_slot.position {
                continue;
            }
            let (Some(first), Some(second)) = (
                players.get(first_slot.player.as_str()),
                players.get(second_slot.player.as_str()),
            ) else {
                continue;
            };
            if is_improving_swap(first, &first_slot.position, second, &second_slot.position, positions) {
                return Some((i, j));
            }
        }
    }
    None
}

// Restarts the scan after every swap; returns the number of swaps made
pub fn optimize_swaps(
    assignment: &mut Assignment,
    players: &HashMap<&str, &Player>,
    positions: &PositionTable,
) -> usize {
    let mut swaps = 0;
    while let Some((i, j)) = find_improving_swap(assignment, players, positions) {
        log::debug!(
            "swap {} ({}) <-> {} ({})",
            assignment.slots()[i].player,
            assignment.slots()[i].position,
            assignment.slots()[j].player,
            assignment.slots()[j].position
        );
        assignment.swap_players(i, j);
        swaps += 1;
    }
    swaps
}
