//! High-score integration tests.

use proptest::prelude::*;

use simon_engine::score::{HighScore, HighScoreStore, JsonFileStore, MemoryStore};

// =============================================================================
// Write-If-Greater Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_best_is_max_of_reports(prior in 0u32..1000, s1 in 0u32..1000, s2 in 0u32..1000) {
        let mut scores = HighScore::load(MemoryStore::with_value(prior));

        scores.report(s1);
        scores.report(s2);

        let expected = prior.max(s1).max(s2);
        prop_assert_eq!(scores.best(), expected);
        prop_assert_eq!(scores.store().load().unwrap(), expected);
    }

    #[test]
    fn prop_report_flags_only_new_records(prior in 0u32..100, score in 0u32..100) {
        let mut scores = HighScore::load(MemoryStore::with_value(prior));
        prop_assert_eq!(scores.report(score), score > prior);
    }
}

// =============================================================================
// File Store Tests
// =============================================================================

#[test]
fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scores.json");

    {
        let mut scores = HighScore::load(JsonFileStore::new(&path));
        assert_eq!(scores.best(), 0);
        scores.report(3);
        scores.report(1);
    }

    let scores = HighScore::load(JsonFileStore::new(&path));
    assert_eq!(scores.best(), 3);
    assert_eq!(scores.store().path(), path.as_path());
}

#[test]
fn test_file_store_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("scores.json"));

    store.save(10).unwrap();
    store.save(2).unwrap();

    assert_eq!(store.load().unwrap(), 2);
}
