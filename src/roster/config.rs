use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::form::guest::{
    is_known_token, normalize_token, validate_guests, GuestError, GuestPlayer, MAX_ATHLETICISM,
    MIN_ATHLETICISM,
};
use crate::lineup::{LineupRequest, PlayerProfile, PositionTable, SearchLimits};

/// One regular on the team sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    #[serde(default)]
    pub prefs: Vec<String>,
    #[serde(default)]
    pub no: Vec<String>,
    #[serde(default)]
    pub athleticism: Option<u32>,
}

impl RosterEntry {
    fn new(name: &str, prefs: &[&str], no: &[&str], athleticism: u32) -> Self {
        RosterEntry {
            name: name.to_string(),
            prefs: prefs.iter().map(|p| p.to_string()).collect(),
            no: no.iter().map(|p| p.to_string()).collect(),
            athleticism: Some(athleticism),
        }
    }
}

/// The team sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    pub team: String,
    pub players: Vec<RosterEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid roster JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("player '{0}' appears more than once on the roster")]
    DuplicatePlayer(String),

    #[error("'{0}' is marked unavailable but is not on the roster")]
    UnknownPlayer(String),

    #[error("athleticism for '{name}' must be between 1 and 10, got {value}")]
    AthleticismOutOfRange { name: String, value: u32 },

    #[error("unknown position '{token}' for '{name}'")]
    UnknownPosition { name: String, token: String },

    #[error(transparent)]
    Guest(#[from] GuestError),
}

impl RosterConfig {
    /// The club's standing roster
    pub fn freebasers() -> Self {
        RosterConfig {
            team: "Freebasers".to_string(),
            players: vec![
                RosterEntry::new("Kevo", &["SS"], &[], 6),
                RosterEntry::new("Werth", &[], &["P", "3B"], 8),
                RosterEntry::new("JD", &["3B", "SS"], &[], 9),
                RosterEntry::new("Andrew", &["C", "RF"], &[], 2),
                RosterEntry::new("Raymor", &[], &["3B", "P"], 4),
                RosterEntry::new("Balavich", &["OF"], &[], 10),
                RosterEntry::new("Dave", &[], &[], 4),
                RosterEntry::new("KBoe", &[], &["2B", "SS", "3B"], 6),
                RosterEntry::new("Stross", &["2B", "SS", "OF"], &["P"], 7),
                RosterEntry::new("Damion", &["1B"], &["P", "3B", "SS", "2B", "OF", "C"], 6),
                RosterEntry::new("Uncle Rich", &["P"], &[], 3),
                RosterEntry::new("JG", &["P", "OF"], &[], 1),
            ],
        }
    }

    /// Loads a roster from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RosterError> {
        let text = std::fs::read_to_string(path)?;
        let mut config: RosterConfig = serde_json::from_str(&text)?;
        for entry in &mut config.players {
            entry.prefs = normalize_tokens(&entry.prefs);
            entry.no = normalize_tokens(&entry.no);
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), RosterError> {
        let mut seen = HashSet::new();
        for entry in &self.players {
            if !seen.insert(entry.name.as_str()) {
                return Err(RosterError::DuplicatePlayer(entry.name.clone()));
            }
            if let Some(value) = entry.athleticism {
                if !(MIN_ATHLETICISM..=MAX_ATHLETICISM).contains(&value) {
                    return Err(RosterError::AthleticismOutOfRange {
                        name: entry.name.clone(),
                        value,
                    });
                }
            }
            let tokens = entry.prefs.iter().chain(&entry.no).map(|t| normalize_token(t));
            if let Some(token) = tokens.filter(|t| !t.is_empty()).find(|t| !is_known_token(t)) {
                return Err(RosterError::UnknownPosition {
                    name: entry.name.clone(),
                    token,
                });
            }
        }
        Ok(())
    }

    pub fn names(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.name.as_str()).collect()
    }

    /// Builds the lineup input for tonight: regulars minus `unavailable`, plus
    /// guests (always available). Ten positions are used when at least ten
    /// players are available, nine otherwise.
    pub fn lineup_request(
        &self,
        unavailable: &[String],
        guests: &[GuestPlayer],
    ) -> Result<LineupRequest, RosterError> {
        self.validate()?;

        let regulars: HashSet<&str> = self.players.iter().map(|p| p.name.as_str()).collect();
        if let Some(unknown) = unavailable.iter().find(|n| !regulars.contains(n.as_str())) {
            return Err(RosterError::UnknownPlayer(unknown.clone()));
        }
        validate_guests(guests, &regulars)?;

        let out: HashSet<&str> = unavailable.iter().map(|n| n.as_str()).collect();
        let mut roster = BTreeMap::new();
        let mut athleticism = HashMap::new();
        let mut available = Vec::new();

        for entry in &self.players {
            roster.insert(
                entry.name.clone(),
                PlayerProfile {
                    preferences: normalize_tokens(&entry.prefs),
                    forbidden: normalize_tokens(&entry.no).into_iter().collect(),
                },
            );
            if let Some(rating) = entry.athleticism {
                athleticism.insert(entry.name.clone(), rating);
            }
            if !out.contains(entry.name.as_str()) {
                available.push(entry.name.clone());
            }
        }

        for guest in guests {
            let name = guest.name.trim().to_string();
            roster.insert(
                name.clone(),
                PlayerProfile {
                    preferences: guest.preference_list(),
                    forbidden: Default::default(),
                },
            );
            athleticism.insert(name.clone(), guest.athleticism);
            available.push(name);
        }

        log::debug!("{} of {} players available", available.len(), roster.len());

        Ok(LineupRequest {
            roster,
            athleticism,
            positions: PositionTable::for_headcount(available.len()),
            available,
            limits: SearchLimits::default(),
        })
    }
}

fn normalize_tokens(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| normalize_token(t))
        .filter(|t| !t.is_empty())
        .collect()
}
