use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use serde::{Serialize, Deserialize};

/// Preference token meaning "any infield position"
pub const INFIELD_TOKEN: &str = "IF";
/// Preference token meaning "any outfield position"
pub const OUTFIELD_TOKEN: &str = "OF";

/// Infield positions in search order with their importance weights
pub const INFIELD_IMPORTANCE: [(&str, u32); 6] = [
    ("P", 2),
    ("C", 1),
    ("1B", 3),
    ("2B", 4),
    ("SS", 6),
    ("3B", 5),
];

/// Outfield positions when four outfielders are in play
pub const OUTFIELD_IMPORTANCE_FOUR: [(&str, u32); 4] = [
    ("LF", 3),
    ("LCF", 4), // most action
    ("RCF", 2),
    ("RF", 1),
];

pub const OUTFIELD_IMPORTANCE_THREE: [(&str, u32); 3] = [
    ("LF", 3),
    ("LCF", 4),
    ("RF", 1),
];

pub const FULL_FIELD_HEADCOUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldGroup {
    Infield,
    Outfield,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutfieldSlots {
    Three,
    Four,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSpec {
    pub name: String,
    pub group: FieldGroup,
    pub importance: u32,
}

impl PositionSpec {
    pub fn new(name: &str, group: FieldGroup, importance: u32) -> Self {
        PositionSpec {
            name: name.to_string(),
            group,
            importance,
        }
    }
}

/// Ordered set of positions to fill for one run.
///
/// The order is the order the searches fill positions in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionTable {
    positions: Vec<PositionSpec>,
}

impl PositionTable {
    pub fn new(positions: Vec<PositionSpec>) -> Self {
        PositionTable { positions }
    }

    pub fn standard(outfield: OutfieldSlots) -> Self {
        let outfield_table: &[(&str, u32)] = match outfield {
            OutfieldSlots::Three => &OUTFIELD_IMPORTANCE_THREE,
            OutfieldSlots::Four => &OUTFIELD_IMPORTANCE_FOUR,
        };
        let positions = INFIELD_IMPORTANCE
            .iter()
            .map(|&(name, importance)| PositionSpec::new(name, FieldGroup::Infield, importance))
            .chain(
                outfield_table
                    .iter()
                    .map(|&(name, importance)| PositionSpec::new(name, FieldGroup::Outfield, importance)),
            )
            .collect();
        PositionTable { positions }
    }

    /// Ten positions when enough players showed up, nine otherwise
    pub fn for_headcount(available: usize) -> Self {
        if available >= FULL_FIELD_HEADCOUNT {
            Self::standard(OutfieldSlots::Four)
        } else {
            Self::standard(OutfieldSlots::Three)
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionSpec> {
        self.positions.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.positions.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&PositionSpec> {
        self.positions.iter().find(|p| p.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.positions.iter().position(|p| p.name == name)
    }

    pub fn group(&self, name: &str) -> Option<FieldGroup> {
        self.get(name).map(|p| p.group)
    }

    pub fn is_infield(&self, name: &str) -> bool {
        self.group(name) == Some(FieldGroup::Infield)
    }

    pub fn is_outfield(&self, name: &str) -> bool {
        self.group(name) == Some(FieldGroup::Outfield)
    }

    /// Importance weight of a position; positions outside the table weigh 1
    pub fn importance(&self, name: &str) -> u32 {
        self.get(name).map(|p| p.importance).unwrap_or(1)
    }

    /// Outfield positions, most important first (table order breaks ties)
    pub fn outfield_by_importance(&self) -> Vec<&str> {
        let mut outfield: Vec<&PositionSpec> = self
            .positions
            .iter()
            .filter(|p| p.group == FieldGroup::Outfield)
            .collect();
        outfield.sort_by(|a, b| b.importance.cmp(&a.importance));
        outfield.into_iter().map(|p| p.name.as_str()).collect()
    }
}

/// A player's stated fielding wishes as kept in the roster
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub forbidden: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub preferences: Vec<String>,
    pub forbidden: BTreeSet<String>,
    pub athleticism: u32,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Player {
            name: name.to_string(),
            preferences: Vec::new(),
            forbidden: BTreeSet::new(),
            athleticism: 0,
        }
    }

    pub fn with_preferences(mut self, preferences: &[&str]) -> Self {
        self.preferences = preferences.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn forbidding(mut self, positions: &[&str]) -> Self {
        self.forbidden = positions.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_athleticism(mut self, athleticism: u32) -> Self {
        self.athleticism = athleticism;
        self
    }

    /// True when the exact position is in the preference list.
    /// The IF/OF tokens never count here.
    pub fn prefers(&self, position: &str) -> bool {
        self.preferences.iter().any(|p| p == position)
    }
}

pub fn index_players(players: &[Player]) -> HashMap<&str, &Player> {
    players.iter().map(|p| (p.name.as_str(), p)).collect()
}

/// Node budget used unless a caller sets its own. Rosters up to ten
/// players finish well inside it; larger ones drop to the fallback search.
pub const DEFAULT_MAX_NODES: u64 = 2_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchLimits {
    /// Maximum number of partial assignments the exhaustive search may visit.
    /// `None` searches the whole tree.
    pub max_nodes: Option<u64>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        SearchLimits { max_nodes: None }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            max_nodes: Some(DEFAULT_MAX_NODES),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineupRequest {
    pub roster: BTreeMap<String, PlayerProfile>,
    pub athleticism: HashMap<String, u32>,
    pub positions: PositionTable,
    pub available: Vec<String>,
    #[serde(default)]
    pub limits: SearchLimits,
}

impl LineupRequest {
    /// Resolves the available names into players, in availability order.
    /// Duplicate names are collapsed; missing athleticism is 0.
    pub fn players(&self) -> Result<Vec<Player>, LineupError> {
        let mut seen = HashSet::new();
        let mut players = Vec::with_capacity(self.available.len());
        for name in &self.available {
            if !seen.insert(name.as_str()) {
                continue;
            }
            let profile = self
                .roster
                .get(name)
                .ok_or_else(|| LineupError::UnknownPlayer(name.clone()))?;
            players.push(Player {
                name: name.clone(),
                preferences: profile.preferences.clone(),
                forbidden: profile.forbidden.clone(),
                athleticism: self.athleticism.get(name).copied().unwrap_or(0),
            });
        }
        Ok(players)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub position: String,
    pub player: String,
}

/// Position -> player mapping, kept in position-table order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    slots: Vec<Slot>,
}

impl Assignment {
    pub fn new(slots: Vec<Slot>) -> Self {
        Assignment { slots }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let slots = pairs
            .iter()
            .map(|&(position, player)| Slot {
                position: position.to_string(),
                player: player.to_string(),
            })
            .collect();
        Assignment { slots }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn player_at(&self, position: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.position == position)
            .map(|s| s.player.as_str())
    }

    pub fn position_of(&self, player: &str) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.player == player)
            .map(|s| s.position.as_str())
    }

    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.player.as_str())
    }

    /// Available players not holding a position, in availability order
    pub fn bench(&self, available: &[String]) -> Vec<String> {
        let assigned: HashSet<&str> = self.players().collect();
        let mut seen = HashSet::new();
        available
            .iter()
            .filter(|name| !assigned.contains(name.as_str()) && seen.insert(name.as_str()))
            .cloned()
            .collect()
    }

    /// Every table position filled exactly once, nothing extra, no player twice
    pub fn is_complete_for(&self, positions: &PositionTable) -> bool {
        if self.slots.len() != positions.len() {
            return false;
        }
        let filled: HashSet<&str> = self.slots.iter().map(|s| s.position.as_str()).collect();
        let players: HashSet<&str> = self.players().collect();
        filled.len() == positions.len()
            && positions.iter().all(|p| filled.contains(p.name.as_str()))
            && players.len() == self.slots.len()
    }

    pub(crate) fn swap_players(&mut self, first: usize, second: usize) {
        let first_player = std::mem::take(&mut self.slots[first].player);
        self.slots[first].player = std::mem::replace(&mut self.slots[second].player, first_player);
    }

    pub(crate) fn place(&mut self, position: &str, player: String) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.position == position) {
            slot.player = player;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineupError {
    #[error("not enough players available: have {available}, need {required}")]
    InsufficientRoster { available: usize, required: usize },

    #[error("no available player is eligible to play {0}")]
    NoEligiblePlayer(String),

    #[error("no valid lineup found for {players} players across {positions} positions")]
    NoValidAssignment { players: usize, positions: usize },

    #[error("player '{0}' is not on the roster")]
    UnknownPlayer(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tables_have_expected_sizes() {
        assert_eq!(PositionTable::for_headcount(9).len(), 9);
        assert_eq!(PositionTable::for_headcount(10).len(), 10);
        assert_eq!(PositionTable::for_headcount(14).len(), 10);
        assert!(PositionTable::for_headcount(9).get("RCF").is_none());
    }

    #[test]
    fn outfield_order_follows_importance() {
        let table = PositionTable::standard(OutfieldSlots::Four);
        assert_eq!(table.outfield_by_importance(), vec!["LCF", "LF", "RCF", "RF"]);
        let table = PositionTable::standard(OutfieldSlots::Three);
        assert_eq!(table.outfield_by_importance(), vec!["LCF", "LF", "RF"]);
    }

    #[test]
    fn default_limits_cap_the_search() {
        assert_eq!(SearchLimits::default().max_nodes, Some(DEFAULT_MAX_NODES));
        assert_eq!(SearchLimits::unbounded().max_nodes, None);

        let req: LineupRequest = serde_json::from_value(serde_json::json!({
            "roster": {},
            "athleticism": {},
            "positions": { "positions": [] },
            "available": []
        }))
        .unwrap();
        assert_eq!(req.limits, SearchLimits::default());
    }

    #[test]
    fn unknown_position_weighs_one() {
        let table = PositionTable::standard(OutfieldSlots::Three);
        assert_eq!(table.importance("SS"), 6);
        assert_eq!(table.importance("DH"), 1);
    }

    #[test]
    fn players_resolve_with_default_athleticism() {
        let mut roster = BTreeMap::new();
        roster.insert("Ann".to_string(), PlayerProfile::default());
        roster.insert("Bo".to_string(), PlayerProfile::default());
        let mut athleticism = HashMap::new();
        athleticism.insert("Ann".to_string(), 7);
        let request = LineupRequest {
            roster,
            athleticism,
            positions: PositionTable::for_headcount(2),
            available: vec!["Bo".into(), "Ann".into(), "Bo".into()],
            limits: SearchLimits::default(),
        };

        let players = request.players().unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Bo");
        assert_eq!(players[0].athleticism, 0);
        assert_eq!(players[1].athleticism, 7);
    }

    #[test]
    fn unknown_available_name_is_rejected() {
        let request = LineupRequest {
            roster: BTreeMap::new(),
            athleticism: HashMap::new(),
            positions: PositionTable::for_headcount(9),
            available: vec!["Ghost".into()],
            limits: SearchLimits::default(),
        };
        assert_eq!(request.players(), Err(LineupError::UnknownPlayer("Ghost".into())));
    }

    #[test]
    fn bench_and_completeness() {
        let positions = PositionTable::new(vec![
            PositionSpec::new("P", FieldGroup::Infield, 2),
            PositionSpec::new("LF", FieldGroup::Outfield, 3),
        ]);
        let assignment = Assignment::from_pairs(&[("P", "Ann"), ("LF", "Bo")]);
        assert!(assignment.is_complete_for(&positions));

        let available: Vec<String> = vec!["Ann".into(), "Cy".into(), "Bo".into()];
        assert_eq!(assignment.bench(&available), vec!["Cy".to_string()]);

        let doubled = Assignment::from_pairs(&[("P", "Ann"), ("LF", "Ann")]);
        assert!(!doubled.is_complete_for(&positions));
    }

    #[test]
    fn swap_players_exchanges_incumbents() {
        let mut assignment = Assignment::from_pairs(&[("P", "Ann"), ("C", "Bo")]);
        assignment.swap_players(0, 1);
        assert_eq!(assignment.player_at("P"), Some("Bo"));
        assert_eq!(assignment.player_at("C"), Some("Ann"));
    }
}
