use std::collections::BTreeMap;

use crate::anonymize;
use crate::attribution::{self, LineKind, SYSTEM_PLAYER};
use crate::error::NormalizeError;
use crate::results;
use crate::schema::{LogRecord, PlayerOrder, SummaryRecord};
use crate::turns::TurnCounter;

/// Raw results table as scraped: row label -> per-player cell strings.
pub type RawResultTable = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTables {
    pub log_records: Vec<LogRecord>,
    pub summary_records: Vec<SummaryRecord>,
}

/// Outcome of normalizing one match. Abandonment is a game state, not an
/// error: the match is simply excluded from output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Tables(MatchTables),
    Abandoned,
}

/// Normalize one match's raw log lines and results table into persistable
/// records. Purely synchronous; owns no state beyond this invocation.
pub fn normalize_match(
    game_id: i64,
    log_lines: &[String],
    result_rows: &RawResultTable,
) -> Result<MatchOutcome, NormalizeError> {
    let order = PlayerOrder::resolve(game_id, log_lines)?;

    let mut turns = TurnCounter::new();
    let mut log_records: Vec<LogRecord> = Vec::with_capacity(log_lines.len());

    for line in log_lines {
        let player_number = match attribution::classify(line, &order) {
            LineKind::Abandoned => return Ok(MatchOutcome::Abandoned),
            LineKind::System => SYSTEM_PLAYER,
            LineKind::Player(idx) => idx as i64,
            LineKind::Unattributed => {
                tracing::warn!(game_id, %line, "line matched no player name; recording sentinel");
                SYSTEM_PLAYER
            }
        };

        let effective = attribution::effective_line(line);
        let value = anonymize::extract_value(effective);
        let action_name = anonymize::anonymize(effective, &order);
        let turn_number = turns.observe(&action_name);

        log_records.push(LogRecord {
            player_number,
            value,
            action_name,
            turn_number,
            move_number: log_records.len() as i64 + 1,
            game_id,
        });
    }

    let summary_records = results::parse_result_table(game_id, result_rows, &order)?;

    let tables = MatchTables {
        log_records,
        summary_records,
    };
    validate(&tables, order.len())?;
    Ok(MatchOutcome::Tables(tables))
}

/// Gate before persistence: one summary record per player, identical column
/// sets, and no null cell left after reconciliation.
pub fn validate(tables: &MatchTables, seats: usize) -> Result<(), NormalizeError> {
    if tables.summary_records.len() != seats {
        return Err(NormalizeError::validation(format!(
            "{} summary records for {seats} players",
            tables.summary_records.len()
        )));
    }

    let Some(first) = tables.summary_records.first() else {
        return Err(NormalizeError::validation("empty summary table"));
    };
    let column_set: Vec<&String> = first.columns.keys().collect();

    for record in &tables.summary_records {
        if record.columns.keys().collect::<Vec<_>>() != column_set {
            return Err(NormalizeError::validation(format!(
                "column set differs for player_idx {}",
                record.player_idx
            )));
        }
        for (label, cell) in &record.columns {
            if cell.is_none() {
                return Err(NormalizeError::validation(format!(
                    "null '{label}' for player_idx {}",
                    record.player_idx
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    fn result_rows(rows: &[(&str, &[&str])]) -> RawResultTable {
        rows.iter()
            .map(|(label, cells)| {
                (
                    (*label).to_string(),
                    cells.iter().map(|c| (*c).to_string()).collect(),
                )
            })
            .collect()
    }

    fn two_player_rows() -> RawResultTable {
        result_rows(&[
            ("Player Names", &["Alice", "Bob"][..]),
            ("Score", &["120", "98"][..]),
            ("winpoints", &["+12", "", "-4", ""][..]),
        ])
    }

    #[test]
    fn test_abandonment_short_circuits_match() {
        let log = lines(&[
            "Alice is now first player",
            "Alice gained 4 wood",
            "Bob is now first player",
            "Bob chose to abandon the game",
        ]);
        let outcome = normalize_match(5, &log, &two_player_rows()).unwrap();
        assert_eq!(outcome, MatchOutcome::Abandoned);
    }

    #[test]
    fn test_full_match_normalization() {
        let log = lines(&[
            "The colors of Alice, Bob have been assigned",
            "Alice is now first player",
            "Alice scored 12 points, now 34 total",
            "Bob ran out of time. Alice may claim victory",
            "Bob is now first player",
            "End of the game",
        ]);
        let MatchOutcome::Tables(tables) = normalize_match(5, &log, &two_player_rows()).unwrap()
        else {
            panic!("expected tables");
        };

        let records = &tables.log_records;
        assert_eq!(records.len(), 6);

        // move_number is contiguous 1..N, turn_number non-decreasing.
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.move_number, i as i64 + 1);
            assert_eq!(record.game_id, 5);
            if i > 0 {
                assert!(record.turn_number >= records[i - 1].turn_number);
            }
        }

        assert_eq!(records[0].player_number, -1); // color preamble
        assert_eq!(records[1].player_number, 0);
        assert_eq!(records[1].turn_number, 1); // marker line opens the turn
        assert_eq!(records[2].value, 12);
        assert_eq!(records[2].action_name, "player scored ii points, now ii total");
        assert_eq!(records[3].player_number, 1); // timeout line, truncated
        assert_eq!(records[3].action_name, "player ran out of time");
        assert_eq!(records[4].turn_number, 2);
        assert_eq!(records[5].player_number, -1); // end of game

        // No digits and no verbatim names survive anonymization.
        for record in records {
            assert!(!record.action_name.chars().any(|c| c.is_ascii_digit()));
            assert!(!record.action_name.contains("Alice"));
            assert!(!record.action_name.contains("Bob"));
        }

        assert_eq!(tables.summary_records.len(), 2);
    }

    #[test]
    fn test_unattributable_match_aborts() {
        let log = lines(&["Alice gained 4 wood"]);
        assert_eq!(
            normalize_match(5, &log, &two_player_rows()),
            Err(NormalizeError::unattributable(5))
        );
    }

    #[test]
    fn test_empty_winpoints_fails_validation() {
        let log = lines(&[
            "Alice is now first player",
            "Bob is now first player",
            "End of the game",
        ]);
        let rows = result_rows(&[
            ("Player Names", &["Alice", "Bob"][..]),
            ("winpoints", &[][..]),
        ]);
        let err = normalize_match(5, &log, &rows).unwrap_err();
        assert!(matches!(err, NormalizeError::ValidationFailed { .. }));
    }

    #[test]
    fn test_unattributed_line_keeps_alignment() {
        let log = lines(&[
            "Alice is now first player",
            "A meteor streaks overhead",
            "Bob is now first player",
        ]);
        let rows = result_rows(&[
            ("Player Names", &["Alice", "Bob"][..]),
            ("Score", &["10", "20"][..]),
        ]);
        let MatchOutcome::Tables(tables) = normalize_match(5, &log, &rows).unwrap() else {
            panic!("expected tables");
        };
        assert_eq!(tables.log_records.len(), 3);
        assert_eq!(tables.log_records[1].player_number, -1);
        assert_eq!(tables.log_records[1].move_number, 2);
    }
}
