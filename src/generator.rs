//! Pseudo-random signal generation.

use crate::config::SIGNAL_COUNT;
use crate::types::SignalIndex;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Source of the signals appended to the sequence each round.
///
/// The game seeds the source once per session, then draws one signal per round.
/// Implementations must be deterministic for a given seed.
pub trait SignalSource {
    /// Re-initializes the source from `seed`.
    fn seed(&mut self, seed: u64);

    /// Returns the next signal, uniformly distributed over all signals.
    fn next_signal(&mut self) -> SignalIndex;
}

impl<S: SignalSource + ?Sized> SignalSource for &mut S {
    fn seed(&mut self, seed: u64) {
        (**self).seed(seed)
    }

    fn next_signal(&mut self) -> SignalIndex {
        (**self).next_signal()
    }
}

/// [`SignalSource`] backed by `rand`'s [`SmallRng`].
///
/// Seeded from device uptime at the moment Start is pressed, which varies with the
/// player's reaction time. Fine for a game; not suitable for anything security related.
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    rng: SmallRng,
}

impl SequenceGenerator {
    /// Creates a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl SignalSource for SequenceGenerator {
    fn seed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    fn next_signal(&mut self) -> SignalIndex {
        SignalIndex::from_raw(self.rng.gen_range(0..SIGNAL_COUNT as u8))
    }
}
