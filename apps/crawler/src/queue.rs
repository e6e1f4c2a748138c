use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Unresolved match ids, persisted as a JSON array so a run can pick up
/// where the previous one stopped. The queue is the caller's bookkeeping;
/// the normalization engine never touches it.
pub struct PendingQueue {
	path: PathBuf,
	ids: BTreeSet<i64>,
}

impl PendingQueue {
	pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
		let path = path.into();
		let ids = match fs::read_to_string(&path) {
			Ok(raw) => serde_json::from_str(&raw).with_context(|| format!("malformed pending file {}", path.display()))?,
			Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeSet::new(),
			Err(err) => return Err(err).with_context(|| format!("could not read pending file {}", path.display())),
		};
		Ok(Self { path, ids })
	}

	pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
		self.ids.iter().copied()
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	pub fn insert(&mut self, id: i64) -> bool {
		self.ids.insert(id)
	}

	pub fn remove(&mut self, id: i64) -> bool {
		self.ids.remove(&id)
	}

	/// Drop ids already present in the store, mirroring the discovery dedupe
	/// against previously persisted matches.
	pub fn retain_unknown(&mut self, known: &[i64]) {
		self.ids.retain(|id| !known.contains(id));
	}

	pub fn save(&self) -> Result<()> {
		let raw = serde_json::to_string_pretty(&self.ids)?;
		fs::write(&self.path, raw).with_context(|| format!("could not write pending file {}", self.path.display()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_missing_file_is_empty_queue() {
		let dir = tempfile::tempdir().unwrap();
		let queue = PendingQueue::load(dir.path().join("new_games.json")).unwrap();
		assert!(queue.is_empty());
	}

	#[test]
	fn test_save_and_reload() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("new_games.json");

		let mut queue = PendingQueue::load(&path).unwrap();
		queue.insert(5);
		queue.insert(9);
		queue.remove(5);
		queue.save().unwrap();

		let reloaded = PendingQueue::load(&path).unwrap();
		assert_eq!(reloaded.ids().collect::<Vec<_>>(), vec![9]);
	}

	#[test]
	fn test_retain_unknown_drops_persisted_ids() {
		let dir = tempfile::tempdir().unwrap();
		let mut queue = PendingQueue::load(dir.path().join("q.json")).unwrap();
		queue.insert(1);
		queue.insert(2);
		queue.insert(3);
		queue.retain_unknown(&[2]);
		assert_eq!(queue.ids().collect::<Vec<_>>(), vec![1, 3]);
	}
}
