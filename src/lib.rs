//! # simon-engine
//!
//! A "Simon"-style memory game engine. The engine plays a growing sequence of
//! board squares, the player repeats it, and every correct round makes the
//! next one a symbol longer.
//!
//! ## Design Principles
//!
//! 1. **Board-Agnostic**: The engine never renders. Boards are injected via
//!    the `Board` trait and only receive fire-and-forget effects.
//!
//! 2. **Never Blocks**: All delays are timers on a virtual-time `Timeline`.
//!    Hosts advance the clock from whatever event loop they run.
//!
//! 3. **Stale-Safe**: Every timer carries the session and round it was
//!    scheduled for. Restarting mid-playback cannot leak old highlights into
//!    a new game.
//!
//! 4. **Reproducible**: Sequences come from a seedable ChaCha8 RNG.
//!
//! ## Modules
//!
//! - `core`: Symbols, alphabet, RNG, configuration, errors
//! - `sequence`: Sequence generation and growth
//! - `schedule`: Virtual-time timer queue and round tokens
//! - `session`: Per-game state and pick validation
//! - `board`: Presentation/input collaborator trait
//! - `score`: High-score persistence
//! - `engine`: The round state machine

pub mod core;
pub mod sequence;
pub mod schedule;
pub mod session;
pub mod board;
pub mod score;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Alphabet, Symbol,
    GameRng, GameRngState, IndexSource,
    EngineConfig, SequencePolicy, BASE_LENGTH,
    ConfigError, EngineError,
};

pub use crate::sequence::{generate, Sequence};

pub use crate::schedule::{RoundToken, Timeline, Timer, TimerId};

pub use crate::session::{GameSession, Outcome, Phase, SessionSnapshot, UserSequence};

pub use crate::board::{Board, BoardCall, RecordingBoard};

pub use crate::score::{HighScore, HighScoreStore, JsonFileStore, MemoryStore, ScoreError};

pub use crate::engine::GameEngine;
