//! Board capability trait.
//!
//! The engine never touches a rendering environment directly. Hosts inject
//! a `Board` that enumerates the playable squares and carries out the
//! presentation effects the engine asks for.
//!
//! ## Implementation Notes
//!
//! - Every method is fire-and-forget. The engine does not wait for an
//!   effect to finish and never reads a result back.
//! - A failing effect (missing sound, closed window) must be swallowed by the
//!   board; it cannot change game state.
//! - `enable_input` / `disable_input` attach and detach the host's pick
//!   handler. The engine also gates picks itself, so a board that ignores
//!   them is still correct, just noisier.

mod recording;

pub use recording::{BoardCall, RecordingBoard};

use std::time::Duration;

use crate::core::Symbol;

/// Presentation and input collaborator for the engine.
pub trait Board {
    /// Enumerate playable board positions in display order.
    fn alphabet(&self) -> Vec<Symbol>;

    /// Start routing pointer and keyboard picks to the engine.
    fn enable_input(&mut self);

    /// Stop routing picks to the engine.
    fn disable_input(&mut self);

    /// Light up `symbol` for `duration`.
    fn present_highlight(&mut self, symbol: &Symbol, duration: Duration);

    /// One-shot feedback for a reproduced sequence.
    fn present_win(&mut self);

    /// One-shot feedback for a wrong pick.
    fn present_lose(&mut self);

    /// Announce that round `round` (1-based) is about to be played back.
    fn present_round_start(&mut self, _round: u32) {}

    /// Live score update.
    fn set_score_display(&mut self, _score: u32) {}

    /// Show the best score seen so far.
    fn set_high_score_display(&mut self, _score: u32) {}

    /// Re-enable the primary control as a "play again" affordance.
    fn set_controls_for_game_over(&mut self);

    /// Disable the primary control while a game runs.
    fn set_controls_for_game_start(&mut self);
}
