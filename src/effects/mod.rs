//! The imperative shell around the pure core.
//!
//! # Key Concepts
//!
//! - **Environment**: clock, timers, display and history sink as traits
//! - **Timers**: generation-stamped tokens so a cancelled or superseded
//!   timer can never act
//! - **Machine**: [`ReactionGame`] owns all mutable game state
//! - **Simulation**: [`SimulatedEnv`] drives the machine in virtual time

mod env;
mod machine;
mod sim;
mod timer;

pub use env::{AttemptSink, Clock, GameEnv, InputModeSource, Renderer, Scheduler};
pub use machine::{
    ReactionGame, ACTION_TEXT, MAX_DELAY_MS, MIN_DELAY_MS, RESULT_HOLD_MS, TOO_EARLY_TEXT,
    TRANSITION_LOG_LIMIT, WAIT_TEXT,
};
pub use sim::{ScheduledTimer, SimulatedEnv};
pub use timer::{TimerKind, TimerQueue, TimerToken};
