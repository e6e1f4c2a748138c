use match_log_parser::{LogRecord, SummaryRecord};
use sqlx::SqlitePool;

use super::error::StoreError;
use super::model::{GameLogRow, GameSummaryRow};
use super::queries;
use super::schema;

/// Append-only store for the two per-match output tables. Each insert batch
/// runs in one transaction, so a match persists all-or-nothing.
pub struct MatchRecordsRepository {
	pub pool: SqlitePool,
}

impl MatchRecordsRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	pub async fn init_schema(&self) -> Result<(), StoreError> {
		schema::init_schema(&self.pool).await?;
		Ok(())
	}

	pub async fn insert_log_records(&self, records: &[LogRecord]) -> Result<u64, StoreError> {
		if records.is_empty() {
			return Ok(0);
		}

		let mut tx = self.pool.begin().await?;
		let mut inserted = 0;
		for record in records {
			inserted += queries::insert_log_record(&mut tx, record).await?;
		}
		tx.commit().await?;
		Ok(inserted)
	}

	pub async fn insert_summary_records(&self, records: &[SummaryRecord]) -> Result<u64, StoreError> {
		if records.is_empty() {
			return Ok(0);
		}

		let mut tx = self.pool.begin().await?;
		let mut inserted = 0;
		for record in records {
			let columns = serde_json::to_string(&record.columns)?;
			inserted += queries::insert_summary_record(&mut tx, record.game_id, record.player_idx, &columns).await?;
		}
		tx.commit().await?;
		Ok(inserted)
	}

	pub async fn log_records(&self, game_id: i64) -> Result<Vec<GameLogRow>, StoreError> {
		Ok(queries::fetch_log_records(&self.pool, game_id).await?)
	}

	pub async fn summary_records(&self, game_id: i64) -> Result<Vec<GameSummaryRow>, StoreError> {
		Ok(queries::fetch_summary_records(&self.pool, game_id).await?)
	}

	pub async fn known_game_ids(&self) -> Result<Vec<i64>, StoreError> {
		Ok(queries::known_game_ids(&self.pool).await?)
	}
}
