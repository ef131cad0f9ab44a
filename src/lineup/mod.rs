pub mod types;
pub mod eligibility;
pub mod scoring;
pub mod exhaustive;
pub mod fallback;
pub mod outfield;
pub mod swap;
pub mod pipeline;

pub use types::{
    Assignment, FieldGroup, LineupError, LineupRequest, OutfieldSlots, Player, PlayerProfile,
    PositionSpec, PositionTable, SearchLimits, Slot, DEFAULT_MAX_NODES,
};
pub use eligibility::can_play;
pub use scoring::{candidate_score, CandidateTable, ATHLETICISM_MULTIPLIER, PREFERENCE_BONUS};
pub use swap::optimize_swaps;
pub use pipeline::{plan_lineup, Lineup, SearchPath};
