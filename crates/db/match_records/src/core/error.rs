use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
	#[error(transparent)]
	Db(#[from] sqlx::Error),

	#[error("failed to encode summary columns: {0}")]
	EncodeColumns(#[from] serde_json::Error),
}
