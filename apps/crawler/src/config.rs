use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser, Clone, Debug, Serialize, Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Config {
	/// Use JSON formatting for tracing
	#[arg(long, env = "LOG_JSON", default_value = "false")]
	pub log_json: bool,

	/// Log level
	#[arg(long, env = "RUST_LOG")]
	pub rust_log: Option<String>,

	/// SQLite database URL
	#[arg(long, env = "DATABASE_URL", default_value = "sqlite:data/matches.db")]
	pub database_url: String,

	/// Directory holding the scraper's payload snapshots
	#[arg(long, env = "SNAPSHOT_DIR", default_value = "data")]
	pub snapshot_dir: PathBuf,

	/// Pending game id queue file
	#[arg(long, env = "PENDING_FILE", default_value = "data/new_games.json")]
	pub pending_file: PathBuf,

	/// Process at most this many matches per run
	#[arg(long, env = "MAX_MATCHES", default_value = "1")]
	pub max_matches: usize,
}
