use match_log_parser::LogRecord;
use sqlx::{Error, Row, Sqlite, SqlitePool, Transaction};

use crate::core::model::{GameLogRow, GameSummaryRow};

pub async fn insert_log_record(tx: &mut Transaction<'_, Sqlite>, record: &LogRecord) -> Result<u64, Error> {
	let done = sqlx::query(
		r#"
        INSERT INTO game_logs (game_id, player_number, value, action_name, turn_number, move_number)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
	)
	.bind(record.game_id)
	.bind(record.player_number)
	.bind(record.value)
	.bind(&record.action_name)
	.bind(record.turn_number)
	.bind(record.move_number)
	.execute(&mut **tx)
	.await?;

	Ok(done.rows_affected())
}

pub async fn insert_summary_record(tx: &mut Transaction<'_, Sqlite>, game_id: i64, player_idx: i64, columns: &str) -> Result<u64, Error> {
	let done = sqlx::query(
		r#"
        INSERT INTO game_summary (game_id, player_idx, columns)
        VALUES (?, ?, ?)
        "#,
	)
	.bind(game_id)
	.bind(player_idx)
	.bind(columns)
	.execute(&mut **tx)
	.await?;

	Ok(done.rows_affected())
}

pub async fn fetch_log_records(pool: &SqlitePool, game_id: i64) -> Result<Vec<GameLogRow>, Error> {
	sqlx::query_as::<_, GameLogRow>(
		r#"
        SELECT game_id, player_number, value, action_name, turn_number, move_number
        FROM game_logs
        WHERE game_id = ?
        ORDER BY move_number
        "#,
	)
	.bind(game_id)
	.fetch_all(pool)
	.await
}

pub async fn fetch_summary_records(pool: &SqlitePool, game_id: i64) -> Result<Vec<GameSummaryRow>, Error> {
	sqlx::query_as::<_, GameSummaryRow>(
		r#"
        SELECT game_id, player_idx, columns
        FROM game_summary
        WHERE game_id = ?
        ORDER BY player_idx
        "#,
	)
	.bind(game_id)
	.fetch_all(pool)
	.await
}

pub async fn known_game_ids(pool: &SqlitePool) -> Result<Vec<i64>, Error> {
	let rows = sqlx::query("SELECT DISTINCT game_id FROM game_summary ORDER BY game_id")
		.fetch_all(pool)
		.await?;
	rows.iter().map(|row| row.try_get("game_id")).collect()
}
