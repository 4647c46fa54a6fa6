//! Core engine types: symbols, RNG, configuration, errors.
//!
//! This module contains the building blocks that know nothing about rounds
//! or timers. Boards configure the alphabet; hosts configure timing via
//! `EngineConfig`.

pub mod symbol;
pub mod rng;
pub mod config;
pub mod error;

pub use symbol::{Alphabet, Symbol};
pub use rng::{GameRng, GameRngState, IndexSource};
pub use config::{
    EngineConfig, SequencePolicy, BASE_LENGTH, DEFAULT_HIGHLIGHT_MS, DEFAULT_ROUND_DELAY_MS,
    DEFAULT_STEP_MS,
};
pub use error::{ConfigError, EngineError, Result};
