//! Collaborators the game consumes.
//!
//! Each concern is its own trait so shells and tests can supply exactly the
//! pieces they own; [`GameEnv`] is implemented for anything providing all of
//! them.

use crate::core::{Attempt, Frame, InputMode};
use crate::effects::timer::TimerToken;

/// Monotonic clock in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// One-shot timer primitive.
///
/// When a scheduled timer expires the shell hands its token back to
/// [`ReactionGame::on_timer`](crate::effects::ReactionGame::on_timer).
/// A cancelled token must not be delivered, though the game tolerates it.
pub trait Scheduler {
    fn schedule_once(&mut self, token: TimerToken, delay_ms: u64);
    fn cancel(&mut self, token: TimerToken);
}

/// Display sink.
pub trait Renderer {
    fn render(&mut self, frame: &Frame);
}

/// History sink for completed attempts.
pub trait AttemptSink {
    fn record_attempt(&mut self, attempt: &Attempt);
}

/// Current input mode preference.
pub trait InputModeSource {
    fn input_mode(&self) -> InputMode;
}

/// Everything the game needs from its surroundings.
pub trait GameEnv: Clock + Scheduler + Renderer + AttemptSink + InputModeSource {}

impl<T> GameEnv for T where T: Clock + Scheduler + Renderer + AttemptSink + InputModeSource {}
