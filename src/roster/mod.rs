pub mod config;

pub use config::{RosterConfig, RosterEntry, RosterError};
