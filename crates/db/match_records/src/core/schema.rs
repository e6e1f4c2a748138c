use sqlx::{Error, SqlitePool};

pub async fn init_schema(pool: &SqlitePool) -> Result<(), Error> {
	sqlx::query(
		r#"
        CREATE TABLE IF NOT EXISTS game_logs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            game_id INTEGER NOT NULL,
            player_number INTEGER NOT NULL,
            value INTEGER NOT NULL,
            action_name TEXT NOT NULL,
            turn_number INTEGER NOT NULL,
            move_number INTEGER NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            UNIQUE(game_id, move_number)
        )
        "#,
	)
	.execute(pool)
	.await?;

	sqlx::query(
		r#"
        CREATE TABLE IF NOT EXISTS game_summary (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            game_id INTEGER NOT NULL,
            player_idx INTEGER NOT NULL,
            columns TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            UNIQUE(game_id, player_idx)
        )
        "#,
	)
	.execute(pool)
	.await?;

	sqlx::query("CREATE INDEX IF NOT EXISTS idx_game_logs_game_id ON game_logs(game_id)")
		.execute(pool)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_game_summary_game_id ON game_summary(game_id)")
		.execute(pool)
		.await?;

	Ok(())
}
