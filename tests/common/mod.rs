//! Shared test infrastructure for simon-says integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use simon_says::{
    GameState, Input, ServiceTiming, SignalBoard, SignalIndex, SignalMask, SignalSource,
    SimonGame, TimeDuration, TimeInstant, TimeSource, SIGNAL_COUNT,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn as_millis(&self) -> u64 {
        self.0
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

/// Blocking delay that advances the mock clock instead of sleeping
pub struct MockDelay<'a> {
    clock: &'a MockTimeSource,
    pub total_ms: u64,
}

impl<'a> MockDelay<'a> {
    pub fn new(clock: &'a MockTimeSource) -> Self {
        Self { clock, total_ms: 0 }
    }
}

impl embedded_hal::delay::DelayNs for MockDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        let millis = (ns / 1_000_000) as u64;
        self.clock.advance(millis);
        self.total_ms += millis;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.advance(ms as u64);
        self.total_ms += ms as u64;
    }
}

// ============================================================================
// Mock Board
// ============================================================================

/// Light change recorded by the mock board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightEvent {
    On(u8),
    Off(u8),
    Toggle(u8),
}

/// Mock board with settable inputs that records all light changes
pub struct MockBoard {
    start: bool,
    buttons: [bool; SIGNAL_COUNT],
    lights: [bool; SIGNAL_COUNT],
    history: heapless::Vec<LightEvent, 512>,
}

impl MockBoard {
    pub fn new() -> Self {
        Self {
            start: false,
            buttons: [false; SIGNAL_COUNT],
            lights: [false; SIGNAL_COUNT],
            history: heapless::Vec::new(),
        }
    }

    pub fn set_start(&mut self, pressed: bool) {
        self.start = pressed;
    }

    pub fn press(&mut self, signal: u8) {
        self.buttons[signal as usize] = true;
    }

    pub fn release(&mut self, signal: u8) {
        self.buttons[signal as usize] = false;
    }

    pub fn is_lit(&self, signal: u8) -> bool {
        self.lights[signal as usize]
    }

    pub fn lit_count(&self) -> usize {
        self.lights.iter().filter(|lit| **lit).count()
    }

    pub fn history(&self) -> &[LightEvent] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Signals switched on, in order
    pub fn switched_on(&self) -> Vec<u8> {
        self.history
            .iter()
            .filter_map(|event| match event {
                LightEvent::On(signal) => Some(*signal),
                _ => None,
            })
            .collect()
    }

    pub fn toggle_count(&self) -> usize {
        self.history
            .iter()
            .filter(|event| matches!(event, LightEvent::Toggle(_)))
            .count()
    }
}

impl SignalBoard for MockBoard {
    fn is_active(&mut self, input: Input) -> bool {
        match input {
            Input::Start => self.start,
            Input::Signal(signal) => self.buttons[signal.as_usize()],
        }
    }

    fn set_light(&mut self, signal: SignalIndex, on: bool) {
        // Only record actual changes so clear_lights() on dark lights stays silent
        if self.lights[signal.as_usize()] != on {
            let event = if on {
                LightEvent::On(signal.get())
            } else {
                LightEvent::Off(signal.get())
            };
            let _ = self.history.push(event);
        }
        self.lights[signal.as_usize()] = on;
    }

    fn toggle_lights(&mut self, mask: SignalMask) {
        let _ = self.history.push(LightEvent::Toggle(mask.bits()));
        for signal in mask.iter() {
            self.lights[signal.as_usize()] = !self.lights[signal.as_usize()];
        }
    }
}

// ============================================================================
// Scripted Signal Source
// ============================================================================

/// Signal source replaying a fixed script and recording every seed it receives
pub struct ScriptedSource {
    script: Vec<u8>,
    cursor: usize,
    pub seeds: Vec<u64>,
}

impl ScriptedSource {
    pub fn new(script: &[u8]) -> Self {
        Self {
            script: script.to_vec(),
            cursor: 0,
            seeds: Vec::new(),
        }
    }
}

impl SignalSource for ScriptedSource {
    fn seed(&mut self, seed: u64) {
        self.seeds.push(seed);
        self.cursor = 0;
    }

    fn next_signal(&mut self) -> SignalIndex {
        let value = self.script[self.cursor % self.script.len()];
        self.cursor += 1;
        SignalIndex::new(value).unwrap()
    }
}

// ============================================================================
// Game Helpers
// ============================================================================

pub const PULSE: u64 = 500;

pub type TestGame<'a, R, const L: usize> =
    SimonGame<'a, TestInstant, MockBoard, MockTimeSource, R, L>;

pub fn signal(value: u8) -> SignalIndex {
    SignalIndex::new(value).unwrap()
}

pub fn signals(values: &[u8]) -> Vec<SignalIndex> {
    values.iter().map(|value| signal(*value)).collect()
}

/// Presses and releases Start, leaving the game in Demonstrating
pub fn press_start<R: SignalSource, const L: usize>(game: &mut TestGame<'_, R, L>) {
    game.board_mut().set_start(true);
    game.service();
    game.board_mut().set_start(false);
    assert_eq!(game.state(), GameState::Demonstrating);
}

/// Follows every requested delay until the game waits on an input
pub fn run_until_input<R: SignalSource, const L: usize>(
    game: &mut TestGame<'_, R, L>,
    clock: &MockTimeSource,
) {
    loop {
        match game.service() {
            ServiceTiming::Delay(delay) => clock.advance(delay.0),
            ServiceTiming::Continuous => return,
        }
    }
}

/// Full press of one button: press, hold through the confirmation, release, settle
pub fn tap<R: SignalSource, const L: usize>(
    game: &mut TestGame<'_, R, L>,
    clock: &MockTimeSource,
    value: u8,
) {
    game.board_mut().press(value);
    assert_eq!(game.service(), ServiceTiming::Delay(TestDuration(PULSE)));
    assert!(game.board().is_lit(value));

    clock.advance(PULSE);
    assert_eq!(game.service(), ServiceTiming::Continuous);

    game.board_mut().release(value);
    assert_eq!(game.service(), ServiceTiming::Delay(TestDuration(PULSE)));
    assert!(!game.board().is_lit(value));

    clock.advance(PULSE);
    game.service();
}

/// Watches the demonstration and then taps every value in `inputs`
pub fn play_round<R: SignalSource, const L: usize>(
    game: &mut TestGame<'_, R, L>,
    clock: &MockTimeSource,
    inputs: &[u8],
) {
    run_until_input(game, clock);
    assert_eq!(game.state(), GameState::AwaitingInput);
    for value in inputs {
        tap(game, clock, *value);
    }
}
