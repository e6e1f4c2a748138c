use serde::{Deserialize, Serialize};

/// One normalized action-log row. `player_number` is an index into the
/// match's `PlayerOrder`, or -1 for system lines. `move_number` is 1-based
/// and contiguous; `turn_number` is non-decreasing and starts at 0 before
/// the first rotation marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub player_number: i64,
    pub value: i64,
    pub action_name: String,
    pub turn_number: i64,
    pub move_number: i64,
    pub game_id: i64,
}
