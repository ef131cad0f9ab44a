pub mod guest;
pub mod export;

pub use guest::{GuestPlayer, GuestError, validate_guests, parse_preferences};
pub use export::export_lineup_to_csv;
