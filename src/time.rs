//! Time abstraction traits for platform-agnostic timing.
//!
//! The game only needs a monotonic millisecond clock: [`TimeSource`] hands out
//! [`TimeInstant`]s, and phase deadlines are measured with
//! [`TimeInstant::duration_since`] so wrapping tick counters behave.
//!
//! [`MillisInstant`], [`MillisDuration`] and [`TickSource`] cover the common case of a
//! HAL that exposes a 32-bit millisecond tick (SysTick counter, `HAL_GetTick`, ...).

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Milliseconds since the clock's epoch, normally device power-on.
    ///
    /// Used as the entropy seed when a session starts.
    fn as_millis(&self) -> u64;
}

/// Millisecond duration for 32-bit tick clocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MillisDuration(pub u32);

impl TimeDuration for MillisDuration {
    const ZERO: Self = MillisDuration(0);

    fn as_millis(&self) -> u64 {
        self.0 as u64
    }

    fn from_millis(millis: u64) -> Self {
        MillisDuration(u32::try_from(millis).unwrap_or(u32::MAX))
    }

    fn saturating_sub(self, other: Self) -> Self {
        MillisDuration(self.0.saturating_sub(other.0))
    }
}

/// Point in time read from a wrapping 32-bit millisecond counter.
///
/// The counter wraps after ~49.7 days; durations across the wrap are still correct
/// as long as they are shorter than that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MillisInstant(pub u32);

impl TimeInstant for MillisInstant {
    type Duration = MillisDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        MillisDuration(self.0.wrapping_sub(earlier.0))
    }

    fn as_millis(&self) -> u64 {
        self.0 as u64
    }
}

/// Time source backed by a tick function returning milliseconds since boot.
///
/// ```
/// use simon_says::{TickSource, TimeSource};
///
/// fn hal_get_tick() -> u32 { 1234 }
///
/// let clock = TickSource::new(hal_get_tick);
/// assert_eq!(clock.now().0, 1234);
/// ```
pub struct TickSource<F: Fn() -> u32> {
    tick: F,
}

impl<F: Fn() -> u32> TickSource<F> {
    /// Wraps a tick function.
    pub const fn new(tick: F) -> Self {
        Self { tick }
    }
}

impl<F: Fn() -> u32> TimeSource<MillisInstant> for TickSource<F> {
    fn now(&self) -> MillisInstant {
        MillisInstant((self.tick)())
    }
}
