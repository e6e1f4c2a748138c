use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("no player names could be derived from the log of game {game_id}")]
    UnattributableMatch { game_id: i64 },

    #[error("result row '{row}' reconciled to {actual} cells, expected {expected}")]
    IncompleteResultTable {
        row: String,
        expected: usize,
        actual: usize,
    },

    #[error("validation failed: {detail}")]
    ValidationFailed { detail: String },
}

impl NormalizeError {
    pub fn unattributable(game_id: i64) -> Self {
        NormalizeError::UnattributableMatch { game_id }
    }

    pub fn incomplete_row(row: &str, expected: usize, actual: usize) -> Self {
        NormalizeError::IncompleteResultTable {
            row: row.to_string(),
            expected,
            actual,
        }
    }

    pub fn validation(detail: impl Into<String>) -> Self {
        NormalizeError::ValidationFailed {
            detail: detail.into(),
        }
    }
}
