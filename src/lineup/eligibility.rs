use super::types::{Player, PositionTable, INFIELD_TOKEN, OUTFIELD_TOKEN};

/// Whether a player may field a position.
///
/// Exclusions always win. A player with preferences may only play what they
/// list, where "IF"/"OF" stand for any infield/outfield position in the table.
/// A player with no preferences may play anything not excluded.
pub fn can_play(player: &Player, position: &str, positions: &PositionTable) -> bool {
    if player.forbidden.contains(position) {
        return false;
    }

    if player.preferences.is_empty() {
        return true;
    }

    player.preferences.iter().any(|pref| {
        pref == position
            || (pref == INFIELD_TOKEN && positions.is_infield(position))
            || (pref == OUTFIELD_TOKEN && positions.is_outfield(position))
    })
}
