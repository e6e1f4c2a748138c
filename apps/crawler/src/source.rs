use anyhow::{Context, Result};
use match_log_parser::RawResultTable;
use std::fs;
use std::path::PathBuf;

/// The scraping collaborator, as seen by the pipeline. Implementations own
/// navigation, sessions and timeouts; the pipeline only consumes text.
pub trait MatchSource {
	fn fetch_log_lines(&self, game_id: i64) -> Result<Vec<String>>;
	fn fetch_result_rows(&self, game_id: i64) -> Result<RawResultTable>;
}

/// Reads the payloads the scraper snapshots to disk after each page visit:
/// `<dir>/<id>_logs.json` (array of lines) and `<dir>/<id>_results.json`
/// (object of row label to cell array).
pub struct SnapshotSource {
	dir: PathBuf,
}

impl SnapshotSource {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	fn read(&self, name: &str) -> Result<String> {
		let path = self.dir.join(name);
		fs::read_to_string(&path).with_context(|| format!("could not read snapshot {}", path.display()))
	}
}

impl MatchSource for SnapshotSource {
	fn fetch_log_lines(&self, game_id: i64) -> Result<Vec<String>> {
		let raw = self.read(&format!("{game_id}_logs.json"))?;
		serde_json::from_str(&raw).with_context(|| format!("malformed log snapshot for game {game_id}"))
	}

	fn fetch_result_rows(&self, game_id: i64) -> Result<RawResultTable> {
		let raw = self.read(&format!("{game_id}_results.json"))?;
		serde_json::from_str(&raw).with_context(|| format!("malformed results snapshot for game {game_id}"))
	}
}
