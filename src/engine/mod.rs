//! Game engine.
//!
//! `GameEngine` runs the round state machine:
//!
//! ```text
//! Idle -> [start_game] -> Playing
//! Playing -> [playback complete] -> InputEnabled
//! InputEnabled -> [pick, Continue] -> InputEnabled (via Lockout if configured)
//! InputEnabled -> [pick, Win] -> Playing (next, longer sequence)
//! InputEnabled -> [pick, Lose] -> GameOver
//! GameOver -> [start_game] -> Playing (fresh session)
//! ```
//!
//! ## Driving the engine
//!
//! ```
//! use std::time::Duration;
//! use simon_engine::board::RecordingBoard;
//! use simon_engine::core::EngineConfig;
//! use simon_engine::engine::GameEngine;
//! use simon_engine::score::MemoryStore;
//! use simon_engine::session::{Outcome, Phase};
//!
//! let config = EngineConfig::default().with_seed(7);
//! let board = RecordingBoard::new(["r", "g", "b", "y"]);
//! let mut engine = GameEngine::new(config, board, MemoryStore::new()).unwrap();
//!
//! engine.start_game().unwrap();
//! assert_eq!(engine.phase(), Phase::Playing);
//!
//! // 1s "get ready" pause, then two 500ms playback steps
//! engine.advance_to(Duration::from_millis(2000));
//! assert_eq!(engine.phase(), Phase::InputEnabled);
//!
//! // Echo the sequence back
//! let sequence: Vec<_> = engine.session().unwrap().sequence().iter().cloned().collect();
//! assert_eq!(engine.on_user_pick(&sequence[0]), Some(Outcome::Continue));
//! assert_eq!(engine.on_user_pick(&sequence[1]), Some(Outcome::Win));
//! assert_eq!(engine.session().unwrap().current_score(), 1);
//! ```

mod game;

pub use game::GameEngine;
