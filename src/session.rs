use crate::types::SignalIndex;
use heapless::Vec;

/// The sequence and progress of one game attempt.
///
/// `L` is the maximum level: the number of rounds in a full game and the capacity of
/// the sequence buffer. While a round is in play, `sequence().len() == level() + 1`.
#[derive(Debug, Clone)]
pub struct GameSession<const L: usize> {
    sequence: Vec<SignalIndex, L>,
    level: usize,
}

impl<const L: usize> GameSession<L> {
    /// Creates an empty session.
    pub const fn new() -> Self {
        const { assert!(L > 0, "a game needs at least one level") };

        Self {
            sequence: Vec::new(),
            level: 0,
        }
    }

    /// Clears the sequence and resets the level to zero.
    pub fn reset(&mut self) {
        self.sequence.clear();
        self.level = 0;
    }

    /// Appends a signal to the sequence.
    ///
    /// # Errors
    /// * `CapacityExceeded` - the sequence already holds `L` signals
    pub fn extend(&mut self, signal: SignalIndex) -> Result<(), SessionError> {
        self.sequence
            .push(signal)
            .map_err(|_| SessionError::CapacityExceeded)
    }

    /// Moves on to the next round. Has no effect on the final round.
    pub fn advance_level(&mut self) {
        if !self.is_final_round() {
            self.level += 1;
        }
    }

    /// Returns the signals generated so far.
    pub fn sequence(&self) -> &[SignalIndex] {
        &self.sequence
    }

    /// Returns the zero-based index of the round in play.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Number of signals the player must reproduce this round.
    pub fn round_len(&self) -> usize {
        self.level + 1
    }

    /// Returns the signal expected at `position`, if it has been generated.
    pub fn expected(&self, position: usize) -> Option<SignalIndex> {
        self.sequence.get(position).copied()
    }

    /// Returns true if the round in play is the last one.
    pub fn is_final_round(&self) -> bool {
        self.level == L - 1
    }

    /// Maximum level of the game.
    pub const fn max_level(&self) -> usize {
        L
    }
}

impl<const L: usize> Default for GameSession<L> {
    fn default() -> Self {
        Self::new()
    }
}

/// Session errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionError {
    /// The sequence buffer is full.
    CapacityExceeded,
}

impl core::fmt::Display for SessionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SessionError::CapacityExceeded => {
                write!(f, "sequence capacity exceeded")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SessionError {}
