use std::collections::HashMap;
use super::eligibility::can_play;
use super::types::{Assignment, Player, PositionTable};

/// Re-seats the current outfielders so the most athletic one covers the most
/// important outfield position, and so on down. Infield slots are untouched.
///
/// The reseating is all-or-nothing: if any outfielder would land somewhere
/// they can't play, the outfield is left as it was. Returns whether anything
/// was applied.
pub fn rebalance_outfield(
    assignment: &mut Assignment,
    players: &HashMap<&str, &Player>,
    positions: &PositionTable,
) -> bool {
    let athleticism = |name: &str| players.get(name).map(|p| p.athleticism).unwrap_or(0);

    let mut outfielders: Vec<String> = assignment
        .slots()
        .iter()
        .filter(|slot| positions.is_outfield(&slot.position))
        .map(|slot| slot.player.clone())
        .collect();
    outfielders.sort_by(|a, b| athleticism(b).cmp(&athleticism(a)));

    let moves: Vec<(&str, String)> = positions
        .outfield_by_importance()
        .into_iter()
        .zip(outfielders)
        .collect();

    let blocked = moves.iter().find(|(position, player)| {
        !players
            .get(player.as_str())
            .is_some_and(|p| can_play(p, position, positions))
    });
    if let Some((position, player)) = blocked {
        log::warn!("outfield rebalance skipped: {} can't play {}", player, position);
        return false;
    }

    for (position, player) in moves {
        log::debug!("outfield rebalance: {} -> {}", player, position);
        assignment.place(position, player);
    }
    true
}
