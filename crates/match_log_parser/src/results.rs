use std::collections::BTreeMap;

use crate::error::NormalizeError;
use crate::schema::{PlayerOrder, SummaryRecord};

/// Synthetic label the scraper assigns to the header row of player names.
pub const PLAYER_NAMES_ROW: &str = "Player Names";

/// Side-panel rows whose markup interleaves one decorative cell per player.
const INTERLEAVED_ROWS: [&str; 2] = ["winpoints", "new_rank"];

/// How a raw result row is repaired to one cell per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconcile {
    /// Cells already map one-to-one onto players.
    AsIs,
    /// Drop blank decorative cells, keeping the trimmed real ones.
    DedupeInterleaved,
}

fn strategy_for(label: &str) -> Reconcile {
    if INTERLEAVED_ROWS.contains(&label) {
        Reconcile::DedupeInterleaved
    } else {
        Reconcile::AsIs
    }
}

/// Strip apostrophes, lower-case, and replace spaces with underscores.
pub fn sanitize_column(label: &str) -> String {
    label.replace('\'', "").to_lowercase().replace(' ', "_")
}

fn reconcile_row(
    label: &str,
    cells: &[String],
    seats: usize,
) -> Result<Vec<Option<String>>, NormalizeError> {
    // Empty rows become null placeholders; validation rejects them later
    // unless something populates them.
    if cells.is_empty() {
        return Ok(vec![None; seats]);
    }

    let strategy = match strategy_for(label) {
        Reconcile::AsIs if cells.len() == seats * 2 => {
            tracing::warn!(row = label, "undeclared doubled row; assuming interleaved decoration");
            Reconcile::DedupeInterleaved
        }
        declared => declared,
    };

    let cells: Vec<Option<String>> = match strategy {
        Reconcile::AsIs => cells.iter().map(|c| Some(c.clone())).collect(),
        Reconcile::DedupeInterleaved => cells
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(|c| Some(c.to_string()))
            .collect(),
    };

    if cells.len() != seats {
        return Err(NormalizeError::incomplete_row(label, seats, cells.len()));
    }
    Ok(cells)
}

/// Reconcile the raw row-label -> cells table into one `SummaryRecord` per
/// player. Seat order follows the scraped table; `player_idx` locates each
/// seat's name in the resolved `PlayerOrder`.
pub fn parse_result_table(
    game_id: i64,
    rows: &BTreeMap<String, Vec<String>>,
    order: &PlayerOrder,
) -> Result<Vec<SummaryRecord>, NormalizeError> {
    let seats = order.len();

    let mut columns: BTreeMap<String, Vec<Option<String>>> = BTreeMap::new();
    for (label, cells) in rows {
        columns.insert(
            sanitize_column(label),
            reconcile_row(label, cells, seats)?,
        );
    }

    let names = columns
        .get(&sanitize_column(PLAYER_NAMES_ROW))
        .ok_or_else(|| NormalizeError::incomplete_row(PLAYER_NAMES_ROW, seats, 0))?
        .clone();

    let mut records = Vec::with_capacity(seats);
    for seat in 0..seats {
        let player_idx = match names[seat].as_deref().and_then(|n| order.index_of(n)) {
            Some(idx) => idx as i64,
            None => {
                tracing::warn!(game_id, seat, "seat name not in resolved order; using seat position");
                seat as i64
            }
        };
        let cols = columns
            .iter()
            .map(|(label, cells)| (label.clone(), cells[seat].clone()))
            .collect();
        records.push(SummaryRecord {
            game_id,
            player_idx,
            columns: cols,
        });
    }
    Ok(records)
}
