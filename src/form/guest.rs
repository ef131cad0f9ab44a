use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::lineup::types::{
    INFIELD_IMPORTANCE, INFIELD_TOKEN, OUTFIELD_IMPORTANCE_FOUR, OUTFIELD_TOKEN,
};

/// Most guests allowed in one run
pub const MAX_GUESTS: usize = 5;
/// Athleticism given to a guest when none is entered
pub const DEFAULT_GUEST_ATHLETICISM: u32 = 5;
pub const MIN_ATHLETICISM: u32 = 1;
pub const MAX_ATHLETICISM: u32 = 10;

fn default_athleticism() -> u32 {
    DEFAULT_GUEST_ATHLETICISM
}

/// A fill-in player entered for a single game.
///
/// `preferences` is the raw comma-separated entry, e.g. `"1B, of"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestPlayer {
    pub name: String,
    #[serde(default)]
    pub preferences: String,
    #[serde(default = "default_athleticism")]
    pub athleticism: u32,
}

impl GuestPlayer {
    pub fn new(name: &str, preferences: &str, athleticism: u32) -> Self {
        GuestPlayer {
            name: name.to_string(),
            preferences: preferences.to_string(),
            athleticism,
        }
    }

    pub fn preference_list(&self) -> Vec<String> {
        parse_preferences(&self.preferences)
    }
}

/// Upper-cases a position token and drops any spaces in it
pub fn normalize_token(token: &str) -> String {
    token.to_uppercase().replace(' ', "")
}

/// Splits on commas, normalizes each token and skips empty ones
pub fn parse_preferences(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(normalize_token)
        .filter(|token| !token.is_empty())
        .collect()
}

/// A fielding position name or one of the IF/OF group tokens
pub fn is_known_token(token: &str) -> bool {
    token == INFIELD_TOKEN
        || token == OUTFIELD_TOKEN
        || INFIELD_IMPORTANCE.iter().any(|&(name, _)| name == token)
        || OUTFIELD_IMPORTANCE_FOUR.iter().any(|&(name, _)| name == token)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuestError {
    #[error("at most {max} guests can be added, got {count}")]
    TooMany { count: usize, max: usize },

    #[error("guest name is required")]
    MissingName,

    #[error("'{0}' is already on the roster or entered twice")]
    DuplicateName(String),

    #[error("athleticism for '{name}' must be between 1 and 10, got {value}")]
    AthleticismOutOfRange { name: String, value: u32 },

    #[error("unknown position '{token}' for '{name}'")]
    UnknownPosition { name: String, token: String },

    #[error("guest entry '{0}' should look like NAME[:PREFS[:ATHLETICISM]]")]
    Malformed(String),
}

/// Validates a single guest against the names already taken
pub fn validate_guest(guest: &GuestPlayer, taken: &HashSet<&str>) -> Result<(), GuestError> {
    let name = guest.name.trim();
    if name.is_empty() {
        return Err(GuestError::MissingName);
    }
    if taken.contains(name) {
        return Err(GuestError::DuplicateName(name.to_string()));
    }
    if !(MIN_ATHLETICISM..=MAX_ATHLETICISM).contains(&guest.athleticism) {
        return Err(GuestError::AthleticismOutOfRange {
            name: name.to_string(),
            value: guest.athleticism,
        });
    }
    if let Some(token) = guest.preference_list().into_iter().find(|t| !is_known_token(t)) {
        return Err(GuestError::UnknownPosition {
            name: name.to_string(),
            token,
        });
    }
    Ok(())
}

/// Validates all guests for a run against the regulars' names
pub fn validate_guests(guests: &[GuestPlayer], regulars: &HashSet<&str>) -> Result<(), GuestError> {
    if guests.len() > MAX_GUESTS {
        return Err(GuestError::TooMany {
            count: guests.len(),
            max: MAX_GUESTS,
        });
    }

    let mut taken = regulars.clone();
    for guest in guests {
        validate_guest(guest, &taken)?;
        taken.insert(guest.name.trim());
    }
    Ok(())
}

impl FromStr for GuestPlayer {
    type Err = GuestError;

    /// Parses `NAME[:PREFS[:ATHLETICISM]]`, e.g. `Sam:1B,OF:7`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let name = parts.next().unwrap_or("").trim();
        let preferences = parts.next().unwrap_or("").trim();
        let athleticism = match parts.next() {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| GuestError::Malformed(s.to_string()))?,
            None => DEFAULT_GUEST_ATHLETICISM,
        };
        if parts.next().is_some() {
            return Err(GuestError::Malformed(s.to_string()));
        }
        Ok(GuestPlayer::new(name, preferences, athleticism))
    }
}
