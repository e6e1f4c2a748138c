use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One per-player row of the reconciled results table. `columns` maps the
/// sanitized result-row label to that player's cell; a `None` cell only
/// survives until validation. `player_idx` is the player's position in the
/// match's `PlayerOrder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub game_id: i64,
    pub player_idx: i64,
    pub columns: BTreeMap<String, Option<String>>,
}
