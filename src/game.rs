//! Simon Says game state machine with state management and timing control.
//!
//! Provides [`SimonGame`], which owns the board, the signal source and the current
//! [`GameSession`], and advances the game every time it is serviced. Servicing never
//! blocks; [`ServiceTiming`] tells the caller when the next call is due.

use crate::board::SignalBoard;
use crate::config::{GameConfig, POLL_INTERVAL_MS};
use crate::feedback::{FeedbackAnimation, FeedbackKind};
use crate::generator::SignalSource;
use crate::session::GameSession;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{GameState, Input, SignalIndex};
use embedded_hal::delay::DelayNs;

/// Timing information returned by service operations.
///
/// Indicates when the game needs to be serviced again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// Waiting on an input edge (Start, a button press or a button release).
    ///
    /// Service again at your polling rate; a few milliseconds is plenty.
    Continuous,

    /// Timed light phase in progress. Nothing changes before this delay has elapsed.
    ///
    /// Sleep for this duration before calling service again.
    Delay(D),
}

/// Sub-steps of the game states. Each variant waits on exactly one thing.
#[derive(Debug, Clone, Copy)]
enum Phase<I> {
    Idle,
    /// Playback of `sequence[position]`: lit for one pulse, then dark for one pulse.
    Showing { position: usize, lit: bool, since: I },
    /// Waiting for the player's press for `position`.
    AwaitPress { position: usize },
    /// Confirmation light on for the pressed signal.
    Confirming { position: usize, signal: SignalIndex, since: I },
    /// Confirmation done, waiting for the same button to be let go.
    AwaitRelease { position: usize, signal: SignalIndex },
    /// Light off, gap before the press is judged.
    Settling { position: usize, signal: SignalIndex, since: I },
    Feedback { animation: FeedbackAnimation, since: I },
}

enum Step<D> {
    /// Phase changed; evaluate again right away.
    Continue,
    /// Nothing more to do until the given time.
    Wait(ServiceTiming<D>),
}

/// Runs a Simon Says game on a [`SignalBoard`].
///
/// The game is driven entirely by [`service`](Self::service). Call it from your main
/// loop; it reads inputs, drives lights and moves through the game states:
///
/// ```text
/// Idle -> Demonstrating -> AwaitingInput -> Demonstrating -> ... -> Won  -> Idle
///                                       \-> Lost -> Idle
/// ```
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `B` - Board implementation type
/// * `T` - Time source implementation type
/// * `R` - Signal source used to extend the sequence
/// * `L` - Maximum level (rounds in a full game)
pub struct SimonGame<'t, I: TimeInstant, B: SignalBoard, T: TimeSource<I>, R: SignalSource, const L: usize> {
    board: B,
    time_source: &'t T,
    source: R,
    config: GameConfig<I::Duration>,
    session: GameSession<L>,
    phase: Phase<I>,
}

impl<'t, I: TimeInstant, B: SignalBoard, T: TimeSource<I>, R: SignalSource, const L: usize>
    SimonGame<'t, I, B, T, R, L>
{
    /// Creates an idle game with the default timing and all lights off.
    pub fn new(board: B, time_source: &'t T, source: R) -> Self {
        Self::with_config(board, time_source, source, GameConfig::default())
    }

    /// Creates an idle game with custom timing and all lights off.
    pub fn with_config(mut board: B, time_source: &'t T, source: R, config: GameConfig<I::Duration>) -> Self {
        board.clear_lights();

        Self {
            board,
            time_source,
            source,
            config,
            session: GameSession::new(),
            phase: Phase::Idle,
        }
    }

    /// Services the game, reading inputs and updating lights as needed.
    ///
    /// Processes every transition that is due, then returns when the game next needs
    /// attention. Never blocks.
    ///
    /// # Returns
    /// - `ServiceTiming::Continuous` - Waiting on an input, poll again soon
    /// - `ServiceTiming::Delay(duration)` - Timed phase, service after this delay
    pub fn service(&mut self) -> ServiceTiming<I::Duration> {
        loop {
            let now = self.time_source.now();
            if let Step::Wait(timing) = self.step(now) {
                return timing;
            }
        }
    }

    /// Services the game once, then sleeps until the next service is due.
    ///
    /// Waits on inputs are polled every [`POLL_INTERVAL_MS`]. Returns the state after
    /// servicing.
    pub fn service_blocking<D: DelayNs>(&mut self, delay: &mut D) -> GameState {
        let timing = self.service();
        let state = self.state();

        match timing {
            ServiceTiming::Continuous => delay.delay_ms(POLL_INTERVAL_MS),
            ServiceTiming::Delay(duration) => {
                delay.delay_ms(u32::try_from(duration.as_millis()).unwrap_or(u32::MAX))
            }
        }

        state
    }

    /// Runs the game forever using blocking delays between services.
    pub fn run<D: DelayNs>(&mut self, delay: &mut D) -> ! {
        loop {
            self.service_blocking(delay);
        }
    }

    fn step(&mut self, now: I) -> Step<I::Duration> {
        match self.phase {
            Phase::Idle => {
                if self.board.is_active(Input::Start) {
                    self.start_session(now);
                    Step::Continue
                } else {
                    Step::Wait(ServiceTiming::Continuous)
                }
            }

            Phase::Showing { position, lit, since } => {
                if let Some(remaining) = self.remaining(since, now, self.config.round_pulse) {
                    return Step::Wait(ServiceTiming::Delay(remaining));
                }

                if lit {
                    if let Some(signal) = self.session.expected(position) {
                        self.board.set_light(signal, false);
                    }
                    self.phase = Phase::Showing { position, lit: false, since: now };
                } else if position + 1 < self.session.round_len() {
                    self.show(position + 1, now);
                } else {
                    trace!("playback done, awaiting {} presses", self.session.round_len());
                    self.phase = Phase::AwaitPress { position: 0 };
                }
                Step::Continue
            }

            Phase::AwaitPress { position } => match self.pressed_signal() {
                Some(signal) => {
                    self.board.set_light(signal, true);
                    self.phase = Phase::Confirming { position, signal, since: now };
                    Step::Continue
                }
                None => Step::Wait(ServiceTiming::Continuous),
            },

            Phase::Confirming { position, signal, since } => {
                if let Some(remaining) = self.remaining(since, now, self.config.round_pulse) {
                    return Step::Wait(ServiceTiming::Delay(remaining));
                }
                self.phase = Phase::AwaitRelease { position, signal };
                Step::Continue
            }

            Phase::AwaitRelease { position, signal } => {
                if self.board.is_active(Input::Signal(signal)) {
                    return Step::Wait(ServiceTiming::Continuous);
                }
                self.board.set_light(signal, false);
                self.phase = Phase::Settling { position, signal, since: now };
                Step::Continue
            }

            Phase::Settling { position, signal, since } => {
                if let Some(remaining) = self.remaining(since, now, self.config.round_pulse) {
                    return Step::Wait(ServiceTiming::Delay(remaining));
                }
                self.judge(position, signal, now);
                Step::Continue
            }

            Phase::Feedback { mut animation, since } => {
                let frame = animation.frame_duration(&self.config);
                if let Some(remaining) = self.remaining(since, now, frame) {
                    return Step::Wait(ServiceTiming::Delay(remaining));
                }

                if animation.advance(&mut self.board) {
                    self.phase = Phase::Feedback { animation, since: now };
                } else {
                    self.enter_idle();
                }
                Step::Continue
            }
        }
    }

    fn start_session(&mut self, now: I) {
        let seed = now.as_millis();
        info!("session start, seed {}", seed);

        self.source.seed(seed);
        self.session.reset();
        self.board.clear_lights();
        self.begin_round(now);
    }

    /// Extends the sequence by one signal and starts playing it back from the top.
    fn begin_round(&mut self, now: I) {
        let signal = self.source.next_signal();

        if self.session.extend(signal).is_err() {
            error!("sequence full at level {}", self.session.level());
            self.enter_idle();
            return;
        }

        debug!("round {} adds signal {}", self.session.level(), signal);
        self.show(0, now);
    }

    fn show(&mut self, position: usize, now: I) {
        if let Some(signal) = self.session.expected(position) {
            self.board.set_light(signal, true);
        }
        self.phase = Phase::Showing { position, lit: true, since: now };
    }

    fn judge(&mut self, position: usize, signal: SignalIndex, now: I) {
        if self.session.expected(position) != Some(signal) {
            info!("wrong signal {} at position {}, game lost", signal, position);
            self.enter_feedback(FeedbackAnimation::loss(&self.config), now);
            return;
        }

        trace!("position {} matched", position);

        if position + 1 < self.session.round_len() {
            self.phase = Phase::AwaitPress { position: position + 1 };
        } else if self.session.is_final_round() {
            info!("final round complete, game won");
            self.enter_feedback(FeedbackAnimation::win(&self.config), now);
        } else {
            self.session.advance_level();
            self.begin_round(now);
        }
    }

    fn enter_feedback(&mut self, mut animation: FeedbackAnimation, now: I) {
        if animation.begin(&mut self.board) {
            self.phase = Phase::Feedback { animation, since: now };
        } else {
            self.enter_idle();
        }
    }

    fn enter_idle(&mut self) {
        debug!("back to idle");
        self.board.clear_lights();
        self.phase = Phase::Idle;
    }

    /// First active signal button in ascending index order.
    fn pressed_signal(&mut self) -> Option<SignalIndex> {
        SignalIndex::all().find(|signal| self.board.is_active(Input::Signal(*signal)))
    }

    /// Time left until `length` has passed since `since`, or `None` if it already has.
    fn remaining(&self, since: I, now: I, length: I::Duration) -> Option<I::Duration> {
        let elapsed = now.duration_since(since);
        if elapsed.as_millis() >= length.as_millis() {
            None
        } else {
            Some(length.saturating_sub(elapsed))
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> GameState {
        match self.phase {
            Phase::Idle => GameState::Idle,
            Phase::Showing { .. } => GameState::Demonstrating,
            Phase::AwaitPress { .. }
            | Phase::Confirming { .. }
            | Phase::AwaitRelease { .. }
            | Phase::Settling { .. } => GameState::AwaitingInput,
            Phase::Feedback { animation, .. } => match animation.kind() {
                FeedbackKind::Loss => GameState::Lost,
                FeedbackKind::Win => GameState::Won,
            },
        }
    }

    /// Returns the current (or, when idle, the most recent) session.
    pub fn session(&self) -> &GameSession<L> {
        &self.session
    }

    /// Returns the timing configuration.
    pub fn config(&self) -> &GameConfig<I::Duration> {
        &self.config
    }

    /// Number of correct presses made so far in the round in play.
    pub fn input_position(&self) -> Option<usize> {
        match self.phase {
            Phase::AwaitPress { position }
            | Phase::Confirming { position, .. }
            | Phase::AwaitRelease { position, .. }
            | Phase::Settling { position, .. } => Some(position),
            _ => None,
        }
    }

    /// Returns a reference to the board.
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Returns a mutable reference to the board.
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Consumes the game, returning the board and the signal source.
    pub fn free(self) -> (B, R) {
        (self.board, self.source)
    }
}
