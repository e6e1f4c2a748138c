use serde::{Deserialize, Serialize};

/// A persisted action-log row, as read back from `game_logs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GameLogRow {
	pub game_id: i64,
	pub player_number: i64,
	pub value: i64,
	pub action_name: String,
	pub turn_number: i64,
	pub move_number: i64,
}

/// A persisted summary row; `columns` holds the sanitized stat map as JSON,
/// since the platform's stat set is ragged across games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct GameSummaryRow {
	pub game_id: i64,
	pub player_idx: i64,
	pub columns: String,
}
