#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`SimonGame`**: The game state machine. Owns the board, the signal source and the session
//! - **`GameState`**: Observable state (`Idle`, `Demonstrating`, `AwaitingInput`, `Lost`, `Won`)
//! - **`ServiceTiming`**: When the game next needs servicing (`Continuous` polling or a `Delay`)
//! - **`GameSession`**: The generated sequence and the level in play
//! - **`SignalIndex`**: A validated light/button index
//! - **`SignalBoard`**: Trait to implement for your buttons and lights (or use `PinBoard`)
//! - **`SignalSource`**: Trait for sequence generation, implemented by `SequenceGenerator`
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`GameConfig`**: Pulse timings and feedback animation lengths
//!
//! `SimonGame::service` never blocks. Boards without a scheduler can use
//! `SimonGame::run`, which sleeps between services with an `embedded_hal` delay.

#[macro_use]
mod fmt;

pub mod board;
pub mod config;
pub mod feedback;
pub mod game;
pub mod generator;
pub mod session;
pub mod time;
pub mod types;

pub use board::{PinBoard, SignalBoard};
pub use config::{GameConfig, MAX_LEVEL, SIGNAL_COUNT};
pub use feedback::{FeedbackAnimation, FeedbackKind};
pub use game::{ServiceTiming, SimonGame};
pub use generator::{SequenceGenerator, SignalSource};
pub use session::{GameSession, SessionError};
pub use time::{MillisDuration, MillisInstant, TickSource, TimeDuration, TimeInstant, TimeSource};
pub use types::{GameState, Input, SignalError, SignalIndex, SignalMask};
