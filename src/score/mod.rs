//! High-score persistence.
//!
//! The engine only needs "read or default to zero" and "write if greater".
//! Where the number lives is up to the store:
//!
//! - [`MemoryStore`]: in-process, for tests and throwaway sessions
//! - [`JsonFileStore`]: a small JSON file, `{"high_score": 12}`
//!
//! [`HighScore`] wraps a store with those two rules and turns store failures
//! into log lines, so a broken disk never interrupts a game.

mod store;

pub use store::{HighScore, HighScoreStore, JsonFileStore, MemoryStore, ScoreError};
