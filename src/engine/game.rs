//! The game engine: round scheduling plus pick validation.

use std::time::Duration;

use tracing::{debug, error, info, trace, warn};

use crate::board::Board;
use crate::core::{Alphabet, EngineConfig, GameRng, IndexSource, Result, SequencePolicy, Symbol};
use crate::schedule::{RoundToken, Timeline};
use crate::score::{HighScore, HighScoreStore};
use crate::sequence::{generate, Sequence};
use crate::session::{GameSession, Outcome, Phase, SessionSnapshot};

/// Timer payloads. Each is stamped with the round it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cue {
    /// Pre-round delay elapsed; start showing the sequence.
    BeginPlayback,
    /// Show the symbol at this sequence index.
    Highlight(usize),
    /// Playback finished; hand the board to the user.
    EnableInput,
    /// Post-pick lockout elapsed.
    Unlock,
}

fn step_offset(step: Duration, index: usize) -> Duration {
    step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

/// Simon game engine.
///
/// Owns the session, the timer queue, the RNG and the high score. The host
/// supplies a [`Board`] and a [`HighScoreStore`], forwards picks to
/// [`GameEngine::on_user_pick`], and drives time with
/// [`GameEngine::advance_to`].
///
/// All state changes happen inside `&mut self` methods, so timer handlers
/// and picks are serialized by construction.
pub struct GameEngine<B, S> {
    config: EngineConfig,
    board: B,
    scores: HighScore<S>,
    rng: Box<dyn IndexSource>,
    timeline: Timeline<Cue>,
    session: Option<GameSession>,
    sessions_started: u32,
    playback_in_flight: bool,
}

impl<B: Board, S: HighScoreStore> GameEngine<B, S> {
    /// Create an engine. Validates `config` and shows the stored high score.
    pub fn new(config: EngineConfig, mut board: B, store: S) -> Result<Self> {
        config.validate()?;

        let root = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        info!(seed = root.seed(), base_length = config.base_length, "engine ready");

        let scores = HighScore::load(store);
        board.set_high_score_display(scores.best());

        Ok(Self {
            config,
            board,
            scores,
            rng: Box::new(root.for_context("sequence")),
            timeline: Timeline::new(),
            session: None,
            sessions_started: 0,
            playback_in_flight: false,
        })
    }

    /// Replace the random source used for sequence sampling.
    #[must_use]
    pub fn with_index_source(mut self, source: impl IndexSource + 'static) -> Self {
        self.rng = Box::new(source);
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// The live session, if a game has been started.
    #[must_use]
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.session.as_ref().map(GameSession::snapshot)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.session.as_ref().map_or(Phase::Idle, GameSession::phase)
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.scores.best()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    /// When the next timer is due. `None` means the engine is waiting on the
    /// user (or on `start_game`).
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timeline.next_deadline()
    }

    // === Lifecycle ===

    /// Start a fresh game, replacing any session in progress.
    ///
    /// Timers left over from the previous session are dropped. Fails with
    /// `InvalidArgument` if the board has no squares, leaving the previous
    /// session untouched.
    pub fn start_game(&mut self) -> Result<()> {
        let alphabet = Alphabet::new(self.board.alphabet());
        let sequence = generate(&alphabet, self.config.base_length, None, &mut *self.rng)?;

        let restarting = self.phase().is_active();
        self.sessions_started += 1;
        let session = GameSession::new(self.sessions_started, alphabet, self.config.base_length);
        let purged = self.timeline.purge_stale(session.token());
        info!(
            session = self.sessions_started,
            squares = session.alphabet().len(),
            purged,
            restarting,
            "starting game"
        );

        self.session = Some(session);
        self.playback_in_flight = false;
        self.board.disable_input();
        self.board.set_controls_for_game_start();
        self.board.set_score_display(0);
        self.start_round(sequence);
        Ok(())
    }

    /// Install `sequence` and schedule its playback after the round delay.
    fn start_round(&mut self, sequence: Sequence) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.begin_round(sequence);
        let token = session.token();
        debug!(%token, length = session.seq_length(), "round ready");

        self.playback_in_flight = false;
        self.board.present_round_start(token.round + 1);
        self.timeline
            .schedule_after(self.config.round_delay(), token, Cue::BeginPlayback);
    }

    // === Time ===

    /// Fire every timer due at or before `now`.
    ///
    /// Timers from a superseded session or round are dropped without
    /// touching state. Returns the number of live timers handled.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        let mut handled = 0;
        while let Some(timer) = self.timeline.pop_due(now) {
            let live = self.session.as_ref().map(GameSession::token);
            if live != Some(timer.token) {
                trace!(timer = %timer.id, token = %timer.token, "dropping stale timer");
                continue;
            }
            self.handle(timer.token, timer.event);
            handled += 1;
        }
        handled
    }

    /// Advance the clock by `dt` from the current time.
    pub fn advance_by(&mut self, dt: Duration) -> usize {
        self.advance_to(self.timeline.now() + dt)
    }

    /// Keep firing timers until the engine waits on the user.
    ///
    /// Returns the virtual time it stopped at.
    pub fn run_until_idle(&mut self) -> Duration {
        while let Some(deadline) = self.timeline.next_deadline() {
            self.advance_to(deadline);
        }
        self.timeline.now()
    }

    fn handle(&mut self, token: RoundToken, cue: Cue) {
        match cue {
            Cue::BeginPlayback => self.begin_playback(token),
            Cue::Highlight(index) => {
                let symbol = self
                    .session
                    .as_ref()
                    .and_then(|s| s.sequence().get(index))
                    .cloned();
                if let Some(symbol) = symbol {
                    trace!(index, %symbol, "highlight");
                    self.board.present_highlight(&symbol, self.config.highlight());
                }
            }
            Cue::EnableInput => {
                self.playback_in_flight = false;
                if let Some(session) = self.session.as_mut() {
                    session.set_accepting(true, Phase::InputEnabled);
                    self.board.enable_input();
                    debug!(%token, "input enabled");
                }
            }
            Cue::Unlock => {
                if let Some(session) = self.session.as_mut() {
                    if session.phase() == Phase::Lockout {
                        session.set_accepting(true, Phase::InputEnabled);
                        self.board.enable_input();
                    }
                }
            }
        }
    }

    fn begin_playback(&mut self, token: RoundToken) {
        if self.playback_in_flight {
            warn!(%token, "playback already in flight, ignoring second start");
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        session.set_accepting(false, Phase::Playing);
        self.board.disable_input();
        self.playback_in_flight = true;

        let start = self.timeline.now();
        let step = self.config.step();
        let len = session.sequence().len();
        debug!(%token, length = len, "playback started");

        for index in 0..len {
            self.timeline
                .schedule_at(start + step_offset(step, index), token, Cue::Highlight(index));
        }
        self.timeline
            .schedule_at(start + step_offset(step, len), token, Cue::EnableInput);
    }

    // === Input ===

    /// Handle one pick from the user.
    ///
    /// Returns `None` if the pick was ignored: input is closed, no game is
    /// running, or `symbol` is not on the board. Ignored picks change
    /// nothing and trigger no effects.
    pub fn on_user_pick(&mut self, symbol: &Symbol) -> Option<Outcome> {
        let Some(session) = self.session.as_mut() else {
            debug!(%symbol, "pick ignored: no game");
            return None;
        };
        if !session.accepting_input() {
            debug!(%symbol, phase = ?session.phase(), "pick ignored: input closed");
            return None;
        }
        if !session.alphabet().contains(symbol) {
            debug!(%symbol, "pick ignored: not on the board");
            return None;
        }

        self.board.present_highlight(symbol, self.config.highlight());
        let outcome = session.record_pick(symbol.clone());
        let token = session.token();

        match outcome {
            Outcome::Continue => {
                if let Some(lockout) = self.config.pick_lockout() {
                    session.set_accepting(false, Phase::Lockout);
                    self.board.disable_input();
                    self.timeline.schedule_after(lockout, token, Cue::Unlock);
                }
            }
            Outcome::Win => self.win(),
            Outcome::Lose => self.lose(),
        }

        Some(outcome)
    }

    fn win(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.advance_after_win();
        let score = session.current_score();
        info!(score, next_length = session.seq_length(), "sequence reproduced");

        self.board.disable_input();
        self.board.present_win();
        self.board.set_score_display(score);

        let previous = match self.config.policy {
            SequencePolicy::Extend => Some(session.sequence()),
            SequencePolicy::Regenerate => None,
        };
        match generate(session.alphabet(), session.seq_length(), previous, &mut *self.rng) {
            Ok(next) => self.start_round(next),
            Err(e) => {
                error!(error = %e, "could not build next round");
                self.lose();
            }
        }
    }

    fn lose(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.end();
        self.playback_in_flight = false;
        let score = session.current_score();
        info!(score, session = session.token().session, "game over");

        self.board.disable_input();
        self.board.present_lose();
        if self.scores.report(score) {
            self.board.set_high_score_display(score);
        }
        self.board.set_controls_for_game_over();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardCall, RecordingBoard};
    use crate::core::BASE_LENGTH;
    use crate::score::MemoryStore;

    fn engine() -> GameEngine<RecordingBoard, MemoryStore> {
        let config = EngineConfig::default().with_seed(42);
        GameEngine::new(config, RecordingBoard::new(["r", "g", "b", "y"]), MemoryStore::new())
            .unwrap()
    }

    #[test]
    fn test_step_offset() {
        let step = Duration::from_millis(500);
        assert_eq!(step_offset(step, 0), Duration::ZERO);
        assert_eq!(step_offset(step, 3), Duration::from_millis(1500));
    }

    #[test]
    fn test_sequences_come_from_seeded_context_stream() {
        let mut engine = engine();
        engine.start_game().unwrap();

        let alphabet = Alphabet::new(["r", "g", "b", "y"].map(Symbol::new));
        let mut stream = GameRng::new(42).for_context("sequence");
        let expected = generate(&alphabet, BASE_LENGTH, None, &mut stream).unwrap();

        assert_eq!(engine.session().unwrap().sequence(), &expected);
    }

    #[test]
    fn test_second_playback_is_refused() {
        let mut engine = engine();
        engine.start_game().unwrap();
        let token = engine.session().unwrap().token();

        // A duplicate start for the same round, due alongside the real one
        engine
            .timeline
            .schedule_after(engine.config.round_delay(), token, Cue::BeginPlayback);
        engine.run_until_idle();

        // Two highlights and one enable, not four and two
        let board = engine.board();
        assert_eq!(board.highlights().len(), 2);
        assert_eq!(board.count(|c| *c == BoardCall::EnableInput), 1);
        assert_eq!(engine.phase(), Phase::InputEnabled);
    }

    #[test]
    fn test_unlock_outside_lockout_is_noop() {
        let mut engine = engine();
        engine.start_game().unwrap();
        let token = engine.session().unwrap().token();

        // Still in the pre-round delay: an unlock must not open input
        engine.handle(token, Cue::Unlock);
        assert!(!engine.session().unwrap().accepting_input());
        assert_eq!(engine.phase(), Phase::Playing);
    }

    #[test]
    fn test_timers_from_superseded_session_are_dropped() {
        let mut engine = engine();
        engine.start_game().unwrap();
        let old = engine.session().unwrap().token();
        engine.start_game().unwrap();
        engine.board_mut().take_calls();

        // Injected after the restart's purge, so only the token check stops them
        engine.timeline.schedule_after(Duration::ZERO, old, Cue::Highlight(0));
        engine.timeline.schedule_after(Duration::ZERO, old, Cue::EnableInput);

        assert_eq!(engine.advance_to(engine.now()), 0);
        assert!(engine.board().calls().is_empty());
        assert!(!engine.session().unwrap().accepting_input());
    }

    #[test]
    fn test_timers_from_earlier_round_are_dropped() {
        let mut engine = engine();
        engine.start_game().unwrap();
        engine.run_until_idle();
        let old = engine.session().unwrap().token();

        let sequence: Vec<Symbol> = engine.session().unwrap().sequence().iter().cloned().collect();
        for symbol in &sequence {
            engine.on_user_pick(symbol);
        }
        assert_eq!(engine.session().unwrap().token(), old.next_round());
        let highlights = engine.board().highlights().len();

        engine.timeline.schedule_after(Duration::ZERO, old, Cue::Highlight(0));
        engine.timeline.schedule_after(Duration::ZERO, old, Cue::EnableInput);

        assert_eq!(engine.advance_to(engine.now()), 0);
        assert_eq!(engine.board().highlights().len(), highlights);
        assert_eq!(engine.phase(), Phase::Playing);
    }
}
