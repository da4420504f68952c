//! Win and loss light animations.
//!
//! Animations are split into frames of equal length. The game calls
//! [`FeedbackAnimation::begin`] once, then [`FeedbackAnimation::advance`] every time a
//! frame's duration has elapsed, until `advance` reports the animation is over.

use crate::board::SignalBoard;
use crate::config::{GameConfig, SIGNAL_COUNT};
use crate::time::TimeDuration;
use crate::types::{SignalIndex, SignalMask};

/// Which outcome is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedbackKind {
    /// Whole-board blink: every frame toggles all lights.
    Loss,
    /// Running light: every frame lights one signal, in ascending order, lap after lap.
    Win,
}

/// Progress through a feedback animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackAnimation {
    kind: FeedbackKind,
    frame: u16,
    frame_count: u16,
}

impl FeedbackAnimation {
    /// Creates the loss blink described by `config`.
    pub fn loss<D: TimeDuration>(config: &GameConfig<D>) -> Self {
        Self {
            kind: FeedbackKind::Loss,
            frame: 0,
            frame_count: config.loss_toggles as u16,
        }
    }

    /// Creates the win running light described by `config`.
    pub fn win<D: TimeDuration>(config: &GameConfig<D>) -> Self {
        Self {
            kind: FeedbackKind::Win,
            frame: 0,
            frame_count: config.win_laps as u16 * SIGNAL_COUNT as u16,
        }
    }

    /// Returns which outcome this animation shows.
    pub fn kind(&self) -> FeedbackKind {
        self.kind
    }

    /// Returns how long each frame lasts.
    pub fn frame_duration<D: TimeDuration>(&self, config: &GameConfig<D>) -> D {
        match self.kind {
            FeedbackKind::Loss => config.loss_blink,
            FeedbackKind::Win => config.win_pulse,
        }
    }

    /// Starts the first frame.
    ///
    /// Returns false if the animation has no frames.
    pub fn begin<B: SignalBoard>(&mut self, board: &mut B) -> bool {
        self.frame = 0;
        if self.frame_count == 0 {
            return false;
        }
        self.start_frame(board);
        true
    }

    /// Ends the current frame and starts the next one.
    ///
    /// Returns false once the last frame has ended.
    pub fn advance<B: SignalBoard>(&mut self, board: &mut B) -> bool {
        if self.frame >= self.frame_count {
            return false;
        }

        self.end_frame(board);
        self.frame += 1;

        if self.frame < self.frame_count {
            self.start_frame(board);
            true
        } else {
            false
        }
    }

    fn start_frame<B: SignalBoard>(&self, board: &mut B) {
        match self.kind {
            FeedbackKind::Loss => board.toggle_lights(SignalMask::ALL),
            FeedbackKind::Win => board.set_light(self.chase_light(), true),
        }
    }

    fn end_frame<B: SignalBoard>(&self, board: &mut B) {
        match self.kind {
            FeedbackKind::Loss => {}
            FeedbackKind::Win => board.set_light(self.chase_light(), false),
        }
    }

    fn chase_light(&self) -> SignalIndex {
        SignalIndex::from_raw((self.frame as usize % SIGNAL_COUNT) as u8)
    }
}
