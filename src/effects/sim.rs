//! Deterministic environment driven by virtual time.

use crate::core::{Attempt, Frame, InputMode};
use crate::effects::env::{AttemptSink, Clock, InputModeSource, Renderer, Scheduler};
use crate::effects::timer::{TimerQueue, TimerToken};

/// A timer request as the environment received it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ScheduledTimer {
    pub token: TimerToken,
    pub delay_ms: u64,
    pub due_ms: u64,
}

/// In-memory environment with a virtual clock.
///
/// Records every frame, attempt and timer request so tests and headless
/// shells can inspect what the game did. Time only moves when told to.
#[derive(Clone, Debug, Default)]
pub struct SimulatedEnv {
    now_ms: u64,
    timers: TimerQueue,
    input_mode: InputMode,
    frames: Vec<Frame>,
    recorded: Vec<Attempt>,
    scheduled: Vec<ScheduledTimer>,
    cancelled: Vec<TimerToken>,
}

impl SimulatedEnv {
    pub fn new(input_mode: InputMode) -> Self {
        Self {
            input_mode,
            ..Self::default()
        }
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
    }

    /// Move the clock to `now_ms` without firing anything. Never goes back.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Pop the next timer due at or before `until_ms`, moving the clock to
    /// its deadline.
    pub fn fire_next_due(&mut self, until_ms: u64) -> Option<TimerToken> {
        let (due, token) = self.timers.pop_next_due(until_ms)?;
        self.set_now(due);
        Some(token)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn recorded(&self) -> &[Attempt] {
        &self.recorded
    }

    /// Every timer request in order, including ones later cancelled.
    pub fn scheduled(&self) -> &[ScheduledTimer] {
        &self.scheduled
    }

    pub fn cancelled(&self) -> &[TimerToken] {
        &self.cancelled
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_pending(&self, token: TimerToken) -> bool {
        self.timers.contains(token)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }
}

impl Clock for SimulatedEnv {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

impl Scheduler for SimulatedEnv {
    fn schedule_once(&mut self, token: TimerToken, delay_ms: u64) {
        let due_ms = self.now_ms + delay_ms;
        self.timers.schedule(token, due_ms);
        self.scheduled.push(ScheduledTimer {
            token,
            delay_ms,
            due_ms,
        });
    }

    fn cancel(&mut self, token: TimerToken) {
        if self.timers.cancel(token) {
            self.cancelled.push(token);
        }
    }
}

impl Renderer for SimulatedEnv {
    fn render(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }
}

impl AttemptSink for SimulatedEnv {
    fn record_attempt(&mut self, attempt: &Attempt) {
        self.recorded.push(*attempt);
    }
}

impl InputModeSource for SimulatedEnv {
    fn input_mode(&self) -> InputMode {
        self.input_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::timer::TimerKind;

    #[test]
    fn schedule_records_delay_and_deadline() {
        let mut env = SimulatedEnv::new(InputMode::Pointer);
        env.set_now(100);
        let token = TimerToken {
            kind: TimerKind::Delay,
            generation: 1,
        };
        env.schedule_once(token, 2500);

        assert_eq!(
            env.scheduled(),
            &[ScheduledTimer {
                token,
                delay_ms: 2500,
                due_ms: 2600
            }]
        );
        assert!(env.is_pending(token));
        assert_eq!(env.next_deadline(), Some(2600));
    }

    #[test]
    fn fire_next_due_moves_clock_to_deadline() {
        let mut env = SimulatedEnv::new(InputMode::Pointer);
        let token = TimerToken {
            kind: TimerKind::DisplayReset,
            generation: 4,
        };
        env.schedule_once(token, 1500);

        assert_eq!(env.fire_next_due(1000), None);
        assert_eq!(env.fire_next_due(2000), Some(token));
        assert_eq!(env.now_ms(), 1500);
        assert_eq!(env.pending_timers(), 0);
    }

    #[test]
    fn cancel_only_logs_pending_timers() {
        let mut env = SimulatedEnv::new(InputMode::Pointer);
        let token = TimerToken {
            kind: TimerKind::Delay,
            generation: 1,
        };
        env.cancel(token);
        assert!(env.cancelled().is_empty());

        env.schedule_once(token, 10);
        env.cancel(token);
        assert_eq!(env.cancelled(), &[token]);
        assert_eq!(env.fire_next_due(u64::MAX), None);
    }

    #[test]
    fn clock_never_goes_back() {
        let mut env = SimulatedEnv::new(InputMode::Keyboard);
        env.set_now(500);
        env.set_now(200);
        assert_eq!(env.now_ms(), 500);
        assert_eq!(env.input_mode(), InputMode::Keyboard);
    }
}
