pub mod batting;
pub mod parser;
pub mod batting_order;

pub use batting::{BattingLine, StatRow, TeamBatting, TOTALS_NAME};
pub use parser::{game_totals, load_game_records, parse_game_records, player_games, season_totals, seasons, GameRecord, StatsError};
pub use batting_order::{batting_order, BattingOrderError, BattingRole, BattingSlot, MIN_HITTERS};
