//! Hardware abstraction for the game's buttons and lights.
//!
//! Implement [`SignalBoard`] for your hardware, or wrap plain `embedded-hal` pins in
//! [`PinBoard`].

use crate::config::SIGNAL_COUNT;
use crate::types::{Input, SignalIndex, SignalMask};
use embedded_hal::digital::{InputPin, StatefulOutputPin};

/// Trait for abstracting the game board.
///
/// Methods deal in logical states: `true` means pressed / lit, whatever the
/// electrical polarity. Handle any hardware errors internally - these methods
/// cannot fail.
pub trait SignalBoard {
    /// Returns true if the given input is currently pressed.
    fn is_active(&mut self, input: Input) -> bool;

    /// Turns a signal light on or off.
    fn set_light(&mut self, signal: SignalIndex, on: bool);

    /// Flips every light in `mask`.
    fn toggle_lights(&mut self, mask: SignalMask);

    /// Turns every light off.
    fn clear_lights(&mut self) {
        for signal in SignalIndex::all() {
            self.set_light(signal, false);
        }
    }
}

impl<B: SignalBoard + ?Sized> SignalBoard for &mut B {
    fn is_active(&mut self, input: Input) -> bool {
        (**self).is_active(input)
    }

    fn set_light(&mut self, signal: SignalIndex, on: bool) {
        (**self).set_light(signal, on)
    }

    fn toggle_lights(&mut self, mask: SignalMask) {
        (**self).toggle_lights(mask)
    }

    fn clear_lights(&mut self) {
        (**self).clear_lights()
    }
}

/// [`SignalBoard`] built from `embedded-hal` digital pins.
///
/// Buttons share one polarity, selected with `active_low` (`true` for buttons to
/// ground with pull-ups). Lights are driven active-high. A failed pin read counts as
/// "not pressed"; failed writes are ignored.
pub struct PinBoard<S, B, O>
where
    S: InputPin,
    B: InputPin,
    O: StatefulOutputPin,
{
    start: S,
    buttons: [B; SIGNAL_COUNT],
    lights: [O; SIGNAL_COUNT],
    active_low: bool,
}

impl<S, B, O> PinBoard<S, B, O>
where
    S: InputPin,
    B: InputPin,
    O: StatefulOutputPin,
{
    /// Creates a board and drives every light low.
    ///
    /// # Arguments
    /// * `start` - Start button
    /// * `buttons` - Signal buttons, indexed by [`SignalIndex`]
    /// * `lights` - Signal lights, indexed by [`SignalIndex`]
    /// * `active_low` - true if a pressed button reads low
    pub fn new(start: S, buttons: [B; SIGNAL_COUNT], mut lights: [O; SIGNAL_COUNT], active_low: bool) -> Self {
        for light in lights.iter_mut() {
            let _ = light.set_low();
        }

        Self {
            start,
            buttons,
            lights,
            active_low,
        }
    }

    /// Releases the pins.
    pub fn free(self) -> (S, [B; SIGNAL_COUNT], [O; SIGNAL_COUNT]) {
        (self.start, self.buttons, self.lights)
    }

    fn read<P: InputPin>(pin: &mut P, active_low: bool) -> bool {
        let level = if active_low { pin.is_low() } else { pin.is_high() };
        level.unwrap_or(false)
    }
}

impl<S, B, O> SignalBoard for PinBoard<S, B, O>
where
    S: InputPin,
    B: InputPin,
    O: StatefulOutputPin,
{
    fn is_active(&mut self, input: Input) -> bool {
        match input {
            Input::Start => Self::read(&mut self.start, self.active_low),
            Input::Signal(signal) => Self::read(&mut self.buttons[signal.as_usize()], self.active_low),
        }
    }

    fn set_light(&mut self, signal: SignalIndex, on: bool) {
        let light = &mut self.lights[signal.as_usize()];
        let _ = if on { light.set_high() } else { light.set_low() };
    }

    fn toggle_lights(&mut self, mask: SignalMask) {
        for signal in mask.iter() {
            let _ = self.lights[signal.as_usize()].toggle();
        }
    }
}
