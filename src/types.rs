//! Core types shared by the board, the generator and the game.

use crate::config::SIGNAL_COUNT;

/// Identifies one of the [`SIGNAL_COUNT`] light/button pairs.
///
/// Always in `0..SIGNAL_COUNT`; the only public constructor is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalIndex(u8);

impl SignalIndex {
    /// Creates a signal index, rejecting values outside `0..SIGNAL_COUNT`.
    pub const fn new(value: u8) -> Result<Self, SignalError> {
        if (value as usize) < SIGNAL_COUNT {
            Ok(SignalIndex(value))
        } else {
            Err(SignalError::OutOfRange { value })
        }
    }

    /// Caller guarantees `value < SIGNAL_COUNT`.
    pub(crate) const fn from_raw(value: u8) -> Self {
        SignalIndex(value)
    }

    /// Returns the raw index.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the index as a `usize`, for array lookups.
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Iterates all signals in ascending order.
    ///
    /// This is also the priority order used when scanning for a pressed button.
    pub fn all() -> impl Iterator<Item = SignalIndex> {
        (0..SIGNAL_COUNT as u8).map(SignalIndex)
    }
}

impl TryFrom<u8> for SignalIndex {
    type Error = SignalError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SignalIndex::new(value)
    }
}

impl From<SignalIndex> for usize {
    fn from(signal: SignalIndex) -> Self {
        signal.as_usize()
    }
}

/// A set of signal lights, one bit per [`SignalIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalMask(u8);

impl SignalMask {
    /// No lights.
    pub const EMPTY: SignalMask = SignalMask(0);

    /// Every light.
    pub const ALL: SignalMask = SignalMask(((1u16 << SIGNAL_COUNT) - 1) as u8);

    /// Returns a mask with `signal` added.
    #[must_use]
    pub const fn with(self, signal: SignalIndex) -> Self {
        SignalMask(self.0 | (1 << signal.0))
    }

    /// Returns true if `signal` is in the mask.
    pub const fn contains(self, signal: SignalIndex) -> bool {
        self.0 & (1 << signal.0) != 0
    }

    /// Returns the raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Iterates the signals in the mask in ascending order.
    pub fn iter(self) -> impl Iterator<Item = SignalIndex> {
        SignalIndex::all().filter(move |signal| self.contains(*signal))
    }
}

impl From<SignalIndex> for SignalMask {
    fn from(signal: SignalIndex) -> Self {
        SignalMask::EMPTY.with(signal)
    }
}

/// A logical input on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    /// The Start button. Only read while the game is idle.
    Start,
    /// One of the signal buttons.
    Signal(SignalIndex),
}

/// The observable state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameState {
    /// Waiting for the Start input. All lights are off.
    Idle,
    /// Playing back the sequence for the current round.
    Demonstrating,
    /// Waiting for the player to reproduce the sequence.
    AwaitingInput,
    /// Player pressed a wrong signal. Loss animation running.
    Lost,
    /// Player completed the final round. Win animation running.
    Won,
}

/// Signal construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SignalError {
    /// Value is not below [`SIGNAL_COUNT`].
    OutOfRange {
        /// The rejected value.
        value: u8,
    },
}

impl core::fmt::Display for SignalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SignalError::OutOfRange { value } => {
                write!(
                    f,
                    "signal index {} out of range (expected 0..{})",
                    value, SIGNAL_COUNT
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SignalError {}
