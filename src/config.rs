//! Compile-time game constants and runtime timing configuration.

use crate::time::TimeDuration;

/// Number of rounds in a full game. The final round replays this many signals.
pub const MAX_LEVEL: usize = 5;

/// Number of light/button pairs.
pub const SIGNAL_COUNT: usize = 4;

/// Demonstration pulse length, also used for the gap between pulses and for the
/// confirmation light when the player presses a button.
pub const ROUND_PULSE_MS: u64 = 500;

/// Hold time after each toggle of the loss blink.
pub const LOSS_BLINK_MS: u64 = 200;

/// On-time of each light in the win running light.
pub const WIN_PULSE_MS: u64 = 100;

/// Number of whole-board toggles in the loss blink. Even, so the lights end dark.
pub const LOSS_BLINK_TOGGLES: u8 = 4;

/// Number of laps of the win running light.
pub const WIN_LAPS: u8 = 4;

/// Sleep between polls when the blocking runner waits on an input edge.
pub const POLL_INTERVAL_MS: u32 = 1;

const _: () = assert!(SIGNAL_COUNT > 0 && SIGNAL_COUNT <= 8, "signals must fit a u8 mask");

/// Timing and feedback configuration for a game.
///
/// `Default` yields the reference timings. Individual values can be overridden:
///
/// ```
/// use simon_says::{GameConfig, MillisDuration};
///
/// let config = GameConfig::<MillisDuration>::default()
///     .with_round_pulse(MillisDuration(300))
///     .with_win_laps(2);
/// assert_eq!(config.round_pulse, MillisDuration(300));
/// assert_eq!(config.loss_toggles, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig<D: TimeDuration> {
    /// On-time and off-gap of each demonstration pulse and player confirmation.
    pub round_pulse: D,
    /// Hold time after each loss toggle.
    pub loss_blink: D,
    /// On-time of each win running-light step.
    pub win_pulse: D,
    /// Number of loss toggles.
    pub loss_toggles: u8,
    /// Number of win running-light laps.
    pub win_laps: u8,
}

impl<D: TimeDuration> GameConfig<D> {
    /// Sets the round pulse length.
    pub fn with_round_pulse(mut self, round_pulse: D) -> Self {
        self.round_pulse = round_pulse;
        self
    }

    /// Sets the loss blink hold time.
    pub fn with_loss_blink(mut self, loss_blink: D) -> Self {
        self.loss_blink = loss_blink;
        self
    }

    /// Sets the win running-light step time.
    pub fn with_win_pulse(mut self, win_pulse: D) -> Self {
        self.win_pulse = win_pulse;
        self
    }

    /// Sets the number of loss toggles.
    pub fn with_loss_toggles(mut self, loss_toggles: u8) -> Self {
        self.loss_toggles = loss_toggles;
        self
    }

    /// Sets the number of win laps.
    pub fn with_win_laps(mut self, win_laps: u8) -> Self {
        self.win_laps = win_laps;
        self
    }
}

impl<D: TimeDuration> Default for GameConfig<D> {
    fn default() -> Self {
        Self {
            round_pulse: D::from_millis(ROUND_PULSE_MS),
            loss_blink: D::from_millis(LOSS_BLINK_MS),
            win_pulse: D::from_millis(WIN_PULSE_MS),
            loss_toggles: LOSS_BLINK_TOGGLES,
            win_laps: WIN_LAPS,
        }
    }
}
