//! A board that records every call, for driving the engine without a UI.

use std::time::Duration;

use crate::core::Symbol;

use super::Board;

/// A single collaborator call observed by [`RecordingBoard`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardCall {
    EnableInput,
    DisableInput,
    Highlight(Symbol, Duration),
    Win,
    Lose,
    RoundStart(u32),
    Score(u32),
    HighScore(u32),
    ControlsGameOver,
    ControlsGameStart,
}

/// Board double that remembers what the engine asked of it.
#[derive(Clone, Debug, Default)]
pub struct RecordingBoard {
    symbols: Vec<Symbol>,
    calls: Vec<BoardCall>,
    input_enabled: bool,
}

impl RecordingBoard {
    /// Create a board with the given squares.
    pub fn new<S: Into<Symbol>>(symbols: impl IntoIterator<Item = S>) -> Self {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
            calls: Vec::new(),
            input_enabled: false,
        }
    }

    /// All calls in the order they were made.
    #[must_use]
    pub fn calls(&self) -> &[BoardCall] {
        &self.calls
    }

    /// Drain recorded calls, keeping the board's squares and input state.
    pub fn take_calls(&mut self) -> Vec<BoardCall> {
        std::mem::take(&mut self.calls)
    }

    /// Symbols highlighted so far, in order.
    #[must_use]
    pub fn highlights(&self) -> Vec<Symbol> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BoardCall::Highlight(symbol, _) => Some(symbol.clone()),
                _ => None,
            })
            .collect()
    }

    /// Whether the last input toggle left input attached.
    #[must_use]
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Count calls matching a predicate.
    pub fn count(&self, pred: impl Fn(&BoardCall) -> bool) -> usize {
        self.calls.iter().filter(|&call| pred(call)).count()
    }
}

impl Board for RecordingBoard {
    fn alphabet(&self) -> Vec<Symbol> {
        self.symbols.clone()
    }

    fn enable_input(&mut self) {
        self.input_enabled = true;
        self.calls.push(BoardCall::EnableInput);
    }

    fn disable_input(&mut self) {
        self.input_enabled = false;
        self.calls.push(BoardCall::DisableInput);
    }

    fn present_highlight(&mut self, symbol: &Symbol, duration: Duration) {
        self.calls.push(BoardCall::Highlight(symbol.clone(), duration));
    }

    fn present_win(&mut self) {
        self.calls.push(BoardCall::Win);
    }

    fn present_lose(&mut self) {
        self.calls.push(BoardCall::Lose);
    }

    fn present_round_start(&mut self, round: u32) {
        self.calls.push(BoardCall::RoundStart(round));
    }

    fn set_score_display(&mut self, score: u32) {
        self.calls.push(BoardCall::Score(score));
    }

    fn set_high_score_display(&mut self, score: u32) {
        self.calls.push(BoardCall::HighScore(score));
    }

    fn set_controls_for_game_over(&mut self) {
        self.calls.push(BoardCall::ControlsGameOver);
    }

    fn set_controls_for_game_start(&mut self) {
        self.calls.push(BoardCall::ControlsGameStart);
    }
}
