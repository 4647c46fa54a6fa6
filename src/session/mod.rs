//! Game session state.
//!
//! A `GameSession` holds the score, the current target sequence, the user's
//! picks for this round and the input gate. It is replaced wholesale on
//! every `start_game`.

mod state;

pub use state::{GameSession, Outcome, Phase, SessionSnapshot, UserSequence};
