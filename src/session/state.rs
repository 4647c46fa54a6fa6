//! Per-game session state and pick validation.
//!
//! ## Ownership
//!
//! The engine owns exactly one `GameSession`. Fields are written from two
//! places only:
//! - round scheduling (`begin_round`, `set_accepting`) while the AI plays
//! - pick validation (`record_pick`, `advance_after_win`) while the user plays
//!
//! Everything else reads through the getters.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Alphabet, Symbol};
use crate::schedule::RoundToken;
use crate::sequence::Sequence;

/// Picks entered during the current round.
///
/// SmallVec keeps typical round lengths off the heap.
pub type UserSequence = SmallVec<[Symbol; 8]>;

/// Result of validating one accepted pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Correct so far, sequence not complete.
    Continue,
    /// The whole sequence was reproduced.
    Win,
    /// A pick did not match.
    Lose,
}

/// Engine lifecycle phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No game has been started.
    #[default]
    Idle,
    /// The AI is announcing or playing back the sequence.
    Playing,
    /// Waiting for the next user pick.
    InputEnabled,
    /// A correct pick was accepted; input unlocks after the lockout.
    Lockout,
    /// The last pick was wrong. Terminal until the next `start_game`.
    GameOver,
}

impl Phase {
    /// Whether a game is in progress.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Phase::Playing | Phase::InputEnabled | Phase::Lockout)
    }
}

/// State of one game, from start to game over.
#[derive(Clone, Debug)]
pub struct GameSession {
    token: RoundToken,
    alphabet: Alphabet,
    current_score: u32,
    seq_length: usize,
    sequence: Sequence,
    user_sequence: UserSequence,
    accepting_input: bool,
    phase: Phase,
}

impl GameSession {
    /// Create a fresh session. No round has been generated yet.
    #[must_use]
    pub fn new(session_id: u32, alphabet: Alphabet, base_length: usize) -> Self {
        Self {
            token: RoundToken::new(session_id, 0),
            alphabet,
            current_score: 0,
            seq_length: base_length,
            sequence: Sequence::new(),
            user_sequence: UserSequence::new(),
            accepting_input: false,
            phase: Phase::Idle,
        }
    }

    #[must_use]
    pub fn token(&self) -> RoundToken {
        self.token
    }

    #[must_use]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[must_use]
    pub fn current_score(&self) -> u32 {
        self.current_score
    }

    #[must_use]
    pub fn seq_length(&self) -> usize {
        self.seq_length
    }

    #[must_use]
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    #[must_use]
    pub fn user_sequence(&self) -> &[Symbol] {
        &self.user_sequence
    }

    #[must_use]
    pub fn accepting_input(&self) -> bool {
        self.accepting_input
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Install the sequence for a new round.
    ///
    /// Clears the user's picks, closes input and moves to the next round
    /// token so timers from the previous round go stale.
    pub(crate) fn begin_round(&mut self, sequence: Sequence) {
        debug_assert_eq!(sequence.len(), self.seq_length);
        if self.phase != Phase::Idle {
            self.token = self.token.next_round();
        }
        self.sequence = sequence;
        self.user_sequence.clear();
        self.accepting_input = false;
        self.phase = Phase::Playing;
    }

    pub(crate) fn set_accepting(&mut self, accepting: bool, phase: Phase) {
        self.accepting_input = accepting;
        self.phase = phase;
    }

    /// Append an accepted pick and validate the picks so far.
    ///
    /// Scans from the newest pick back to the first; any mismatch loses.
    pub(crate) fn record_pick(&mut self, symbol: Symbol) -> Outcome {
        self.user_sequence.push(symbol);

        let mismatch = (0..self.user_sequence.len())
            .rev()
            .any(|i| self.sequence.get(i) != Some(&self.user_sequence[i]));

        if mismatch {
            Outcome::Lose
        } else if self.user_sequence.len() == self.sequence.len() {
            Outcome::Win
        } else {
            Outcome::Continue
        }
    }

    /// Apply a win: score and target length both grow by one.
    pub(crate) fn advance_after_win(&mut self) {
        self.current_score += 1;
        self.seq_length += 1;
        self.user_sequence.clear();
        self.accepting_input = false;
    }

    /// Close the session after a wrong pick. Picks are left as entered.
    pub(crate) fn end(&mut self) {
        self.accepting_input = false;
        self.phase = Phase::GameOver;
    }

    /// Capture a serializable view of the session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            token: self.token,
            current_score: self.current_score,
            seq_length: self.seq_length,
            sequence: self.sequence.clone(),
            user_sequence: self.user_sequence.to_vec(),
            accepting_input: self.accepting_input,
            phase: self.phase,
        }
    }
}

/// Point-in-time copy of a [`GameSession`], for hosts that render or log
/// state outside the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub token: RoundToken,
    pub current_score: u32,
    pub seq_length: usize,
    pub sequence: Sequence,
    pub user_sequence: Vec<Symbol>,
    pub accepting_input: bool,
    pub phase: Phase,
}
