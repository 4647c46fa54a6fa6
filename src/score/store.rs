//! High-score stores and the write-if-greater wrapper.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Errors from a high-score store.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Store file could not be read or written
    #[error("high score I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store file holds something other than a high-score record
    #[error("malformed high score record: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Key-value persistence for the single `high_score` integer.
pub trait HighScoreStore {
    /// Read the stored high score. A store with nothing saved yet returns 0.
    fn load(&self) -> Result<u32, ScoreError>;

    /// Overwrite the stored high score.
    fn save(&mut self, score: u32) -> Result<(), ScoreError>;
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    value: u32,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously achieved score.
    #[must_use]
    pub fn with_value(value: u32) -> Self {
        Self { value }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> Result<u32, ScoreError> {
        Ok(self.value)
    }

    fn save(&mut self, score: u32) -> Result<(), ScoreError> {
        self.value = score;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Record {
    high_score: u32,
}

/// Store backed by a JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> ScoreError {
        ScoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&self) -> Result<u32, ScoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(self.io_error(e)),
        };
        let record: Record = serde_json::from_str(&text)?;
        Ok(record.high_score)
    }

    fn save(&mut self, score: u32) -> Result<(), ScoreError> {
        let text = serde_json::to_string(&Record { high_score: score })?;
        std::fs::write(&self.path, text).map_err(|e| self.io_error(e))
    }
}

/// Write-if-greater, read-or-default-zero view over a store.
#[derive(Debug)]
pub struct HighScore<S> {
    store: S,
    best: u32,
}

impl<S: HighScoreStore> HighScore<S> {
    /// Load the current best from `store`. Unreadable stores count as 0.
    pub fn load(store: S) -> Self {
        let best = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "could not read high score, starting from 0");
            0
        });
        Self { store, best }
    }

    /// Best score seen so far.
    #[must_use]
    pub fn best(&self) -> u32 {
        self.best
    }

    /// Report a final score. Returns true if it set a new record.
    ///
    /// The in-memory best is raised even if persisting fails.
    pub fn report(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        info!(score, "new high score");
        if let Err(e) = self.store.save(score) {
            warn!(error = %e, score, "could not persist high score");
        }
        true
    }

    /// Access the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_defaults_to_zero() {
        let scores = HighScore::load(MemoryStore::new());
        assert_eq!(scores.best(), 0);
    }

    #[test]
    fn test_report_writes_if_greater() {
        let mut scores = HighScore::load(MemoryStore::with_value(5));

        assert!(!scores.report(3));
        assert_eq!(scores.store().load().unwrap(), 5);

        assert!(!scores.report(5));
        assert!(scores.report(8));
        assert_eq!(scores.best(), 8);
        assert_eq!(scores.store().load().unwrap(), 8);
    }

    #[test]
    fn test_json_missing_file_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("high_score.json"));

        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_json_persists_across_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("high_score.json");

        let mut scores = HighScore::load(JsonFileStore::new(&path));
        assert!(scores.report(4));

        let reopened = HighScore::load(JsonFileStore::new(&path));
        assert_eq!(reopened.best(), 4);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"high_score":4}"#);
    }

    #[test]
    fn test_json_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("high_score.json");
        std::fs::write(&path, "twelve").unwrap();

        assert!(matches!(JsonFileStore::new(&path).load(), Err(ScoreError::Parse(_))));
        // The wrapper falls back to zero instead of failing
        assert_eq!(HighScore::load(JsonFileStore::new(&path)).best(), 0);
    }

    #[test]
    fn test_unwritable_store_keeps_best_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be written as a file
        let mut scores = HighScore::load(JsonFileStore::new(dir.path()));

        assert!(scores.report(2));
        assert_eq!(scores.best(), 2);
    }
}
