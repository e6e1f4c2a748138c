mod config;
mod notify;
mod queue;
mod source;

use anyhow::{Context, Result};
use clap::Parser;
use match_log_parser::{normalize_match, MatchOutcome, NormalizeError};
use match_records::MatchRecordsRepository;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{filter::EnvFilter, fmt::format::JsonFields, util::SubscriberInitExt, Layer};

use crate::config::Config;
use crate::notify::{LogNotifier, Notifier};
use crate::queue::PendingQueue;
use crate::source::{MatchSource, SnapshotSource};

/// Per-match result reported back to the queue owner.
#[derive(Debug, PartialEq, Eq)]
enum Disposition {
	Persisted { log_rows: u64, summary_rows: u64 },
	Abandoned,
	Failed(NormalizeError),
}

async fn run_match(game_id: i64, source: &impl MatchSource, repo: &MatchRecordsRepository, notifier: &impl Notifier) -> Result<Disposition> {
	notifier.notify(&format!("Loading game ID {game_id}"));

	let lines = source.fetch_log_lines(game_id)?;
	let rows = source.fetch_result_rows(game_id)?;

	match normalize_match(game_id, &lines, &rows) {
		Ok(MatchOutcome::Abandoned) => {
			notifier.notify(&format!("Game ID {game_id} was abandoned; skipping"));
			Ok(Disposition::Abandoned)
		}
		Ok(MatchOutcome::Tables(tables)) => {
			let log_rows = repo.insert_log_records(&tables.log_records).await?;
			let summary_rows = repo.insert_summary_records(&tables.summary_records).await?;
			notifier.notify(&format!("Loaded game ID {game_id}: {log_rows} log rows, {summary_rows} summary rows"));
			Ok(Disposition::Persisted { log_rows, summary_rows })
		}
		Err(err) => {
			notifier.notify(&format!("Game ID {game_id} failed: {err}"));
			Ok(Disposition::Failed(err))
		}
	}
}

#[tokio::main]
async fn main() -> Result<()> {
	dotenv::dotenv().ok();

	let config = Config::parse();
	let _ = init_tracing(&config);

	let pool = SqlitePoolOptions::new()
		.max_connections(5)
		.connect(&config.database_url)
		.await
		.context(format!("could not connect to {}", config.database_url))?;

	let repo = MatchRecordsRepository::new(pool);
	repo.init_schema().await?;

	let mut queue = PendingQueue::load(&config.pending_file)?;
	let known = repo.known_game_ids().await?;
	queue.retain_unknown(&known);
	queue.save()?;
	tracing::info!(pending = queue.len(), "queue loaded");

	let source = SnapshotSource::new(&config.snapshot_dir);
	let notifier = LogNotifier;

	let batch: Vec<i64> = queue.ids().take(config.max_matches).collect();
	for game_id in batch {
		match run_match(game_id, &source, &repo, &notifier).await {
			Ok(Disposition::Persisted { .. } | Disposition::Failed(_)) => {
				queue.remove(game_id);
			}
			// Abandoned ids go back to the pending set; the queue owner
			// decides whether to retire them.
			Ok(Disposition::Abandoned) => {}
			Err(err) => {
				tracing::error!(game_id, error = %err, "match left pending after fetch failure");
			}
		}
		queue.save()?;
	}

	Ok(())
}

fn init_tracing(config: &Config) -> Option<()> {
	use std::str::FromStr;
	use tracing_subscriber::layer::SubscriberExt;

	let filter = EnvFilter::from_str(config.rust_log.as_deref()?).ok()?;

	tracing_subscriber::registry()
		.with(if config.log_json {
			Box::new(
				tracing_subscriber::fmt::layer()
					.fmt_fields(JsonFields::default())
					.event_format(tracing_subscriber::fmt::format().json().flatten_event(true).with_span_list(false))
					.with_filter(filter),
			) as Box<dyn Layer<_> + Send + Sync>
		} else {
			Box::new(
				tracing_subscriber::fmt::layer()
					.event_format(tracing_subscriber::fmt::format().pretty())
					.with_filter(filter),
			)
		})
		.init();
	None
}

#[cfg(test)]
mod tests {
	use super::*;
	use match_log_parser::RawResultTable;
	use sqlx::SqlitePool;
	use std::sync::Mutex;

	struct StubSource {
		lines: Vec<String>,
		rows: RawResultTable,
	}

	impl MatchSource for StubSource {
		fn fetch_log_lines(&self, _game_id: i64) -> Result<Vec<String>> {
			Ok(self.lines.clone())
		}

		fn fetch_result_rows(&self, _game_id: i64) -> Result<RawResultTable> {
			Ok(self.rows.clone())
		}
	}

	#[derive(Default)]
	struct RecordingNotifier {
		messages: Mutex<Vec<String>>,
	}

	impl Notifier for RecordingNotifier {
		fn notify(&self, message: &str) {
			self.messages.lock().unwrap().push(message.to_string());
		}
	}

	async fn repo() -> MatchRecordsRepository {
		let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
		let repo = MatchRecordsRepository::new(pool);
		repo.init_schema().await.unwrap();
		repo
	}

	fn rows(entries: &[(&str, &[&str])]) -> RawResultTable {
		entries
			.iter()
			.map(|(label, cells)| ((*label).to_string(), cells.iter().map(|c| (*c).to_string()).collect()))
			.collect()
	}

	fn lines(raw: &[&str]) -> Vec<String> {
		raw.iter().map(|s| (*s).to_string()).collect()
	}

	#[tokio::test]
	async fn test_persisted_disposition_and_row_counts() {
		let source = StubSource {
			lines: lines(&["Alice is now first player", "Bob is now first player", "End of the game"]),
			rows: rows(&[("Player Names", &["Alice", "Bob"][..]), ("Score", &["120", "98"][..])]),
		};
		let repo = repo().await;
		let notifier = RecordingNotifier::default();

		let disposition = run_match(5, &source, &repo, &notifier).await.unwrap();
		assert_eq!(disposition, Disposition::Persisted { log_rows: 3, summary_rows: 2 });
		assert_eq!(repo.known_game_ids().await.unwrap(), vec![5]);

		let messages = notifier.messages.lock().unwrap();
		assert!(messages.last().unwrap().contains("3 log rows"));
	}

	#[tokio::test]
	async fn test_abandoned_match_persists_nothing() {
		let source = StubSource {
			lines: lines(&[
				"Alice is now first player",
				"Alice gained 4 wood",
				"Bob is now first player",
				"Bob chose to abandon the game",
			]),
			rows: rows(&[("Player Names", &["Alice", "Bob"][..])]),
		};
		let repo = repo().await;
		let notifier = RecordingNotifier::default();

		let disposition = run_match(5, &source, &repo, &notifier).await.unwrap();
		assert_eq!(disposition, Disposition::Abandoned);
		assert!(repo.known_game_ids().await.unwrap().is_empty());
		assert!(repo.log_records(5).await.unwrap().is_empty());
	}

	#[tokio::test]
	async fn test_validation_failure_is_reported_not_persisted() {
		let source = StubSource {
			lines: lines(&["Alice is now first player", "Bob is now first player"]),
			rows: rows(&[("Player Names", &["Alice", "Bob"][..]), ("winpoints", &[][..])]),
		};
		let repo = repo().await;
		let notifier = RecordingNotifier::default();

		let disposition = run_match(5, &source, &repo, &notifier).await.unwrap();
		assert!(matches!(disposition, Disposition::Failed(NormalizeError::ValidationFailed { .. })));
		assert!(repo.known_game_ids().await.unwrap().is_empty());
	}
}
