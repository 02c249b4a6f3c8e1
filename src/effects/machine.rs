//! The reaction game state machine.

use crate::core::{
    draw_hue_jitter, draw_wait_hue, target_color, target_hue, wait_color, Attempt,
    AttemptHistory, Color, Frame, GameEvent, GameState, InputMode, StateTransition,
    TransitionLog,
};
use crate::effects::env::{Clock, GameEnv};
use crate::effects::sim::SimulatedEnv;
use crate::effects::timer::{TimerKind, TimerToken};
use chrono::Utc;
use rand::Rng;
use tracing::{debug, info};

/// Shortest wait before the cue, inclusive.
pub const MIN_DELAY_MS: u64 = 2000;
/// Longest wait before the cue, exclusive.
pub const MAX_DELAY_MS: u64 = 5000;
/// How long a result message stays before the idle prompt returns.
pub const RESULT_HOLD_MS: u64 = 1500;
/// Transitions kept in the game's log; older records are dropped.
pub const TRANSITION_LOG_LIMIT: usize = 1024;

/// Shown on the wait color until the cue appears.
pub const WAIT_TEXT: &str = "Wait...";
/// Shown on the target color; reacting now records an attempt.
pub const ACTION_TEXT: &str = "Action!";
/// Result message for a trigger during the wait phase.
pub const TOO_EARLY_TEXT: &str = "Too early. Retry.";

/// Reaction game: one owned machine, driven by [`trigger`](Self::trigger),
/// [`on_timer`](Self::on_timer) and [`on_mode_changed`](Self::on_mode_changed).
///
/// The environment supplies the clock, timers, display and history sink; the
/// random source supplies wait hues, target jitter and wait durations.
///
/// # Example
///
/// ```rust
/// use reflex::core::{GameState, InputMode};
/// use reflex::effects::{ReactionGame, SimulatedEnv, MAX_DELAY_MS, MIN_DELAY_MS};
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let env = SimulatedEnv::new(InputMode::Keyboard);
/// let mut game = ReactionGame::new(env, SmallRng::seed_from_u64(1));
///
/// game.trigger();
/// assert_eq!(game.current_state(), GameState::Waiting);
///
/// let delay_ms = game.env().scheduled()[0].delay_ms;
/// assert!((MIN_DELAY_MS..MAX_DELAY_MS).contains(&delay_ms));
///
/// game.advance(delay_ms);
/// assert_eq!(game.current_state(), GameState::Ready);
///
/// game.advance(180);
/// game.trigger();
/// assert_eq!(game.attempts().latest().map(|a| a.elapsed_ms), Some(180));
/// ```
pub struct ReactionGame<E: GameEnv, R: Rng> {
    env: E,
    rng: R,
    state: GameState,
    input_mode: InputMode,
    wait_hue: u16,
    ready_at_ms: Option<u64>,
    generation: u64,
    pending_delay: Option<TimerToken>,
    pending_reset: Option<TimerToken>,
    attempts: AttemptHistory,
    log: TransitionLog,
    last_frame: Frame,
}

impl<E: GameEnv, R: Rng> ReactionGame<E, R> {
    /// Create a game in `Idle` and render the idle prompt.
    pub fn new(env: E, rng: R) -> Self {
        let input_mode = env.input_mode();
        let mut game = Self {
            env,
            rng,
            state: GameState::Idle,
            input_mode,
            wait_hue: 0,
            ready_at_ms: None,
            generation: 0,
            pending_delay: None,
            pending_reset: None,
            attempts: AttemptHistory::new(),
            log: TransitionLog::bounded(TRANSITION_LOG_LIMIT),
            last_frame: Frame::neutral(input_mode.idle_prompt()),
        };
        game.show_prompt();
        game
    }

    pub fn current_state(&self) -> GameState {
        self.state
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    /// Hue picked on the most recent entry into `Waiting`.
    pub fn wait_hue(&self) -> u16 {
        self.wait_hue
    }

    pub fn attempts(&self) -> &AttemptHistory {
        &self.attempts
    }

    pub fn transitions(&self) -> &TransitionLog {
        &self.log
    }

    /// The frame most recently sent to the renderer.
    pub fn last_frame(&self) -> &Frame {
        &self.last_frame
    }

    /// Outstanding wait-delay timer, if any.
    pub fn pending_delay(&self) -> Option<TimerToken> {
        self.pending_delay
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    /// Mutable access for shells that pump their own timer queue.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// The single user action.
    pub fn trigger(&mut self) {
        match self.state {
            GameState::Idle | GameState::Result => self.start_round(),
            GameState::Waiting => self.react_early(),
            GameState::Ready => self.react(),
        }
    }

    /// Deliver an expired timer.
    ///
    /// Tokens that are not the current outstanding token of their kind are
    /// dropped without touching state or display.
    pub fn on_timer(&mut self, token: TimerToken) {
        match token.kind {
            TimerKind::Delay => {
                if self.pending_delay != Some(token) || self.state != GameState::Waiting {
                    debug!(generation = token.generation, "stale delay timer dropped");
                    return;
                }
                self.pending_delay = None;
                self.show_cue();
            }
            TimerKind::DisplayReset => {
                if self.pending_reset != Some(token) {
                    debug!(generation = token.generation, "stale display reset dropped");
                    return;
                }
                self.pending_reset = None;
                if self.state.shows_prompt() {
                    self.show_prompt();
                }
            }
        }
    }

    /// Re-read the input mode and force the game back to `Idle`.
    pub fn on_mode_changed(&mut self) {
        self.input_mode = self.env.input_mode();
        self.cancel_delay();
        self.cancel_reset();
        self.ready_at_ms = None;
        if self.state != GameState::Idle {
            self.enter(GameState::Idle, GameEvent::ModeChanged);
        }
        debug!(mode = self.input_mode.label(), "input mode changed");
        self.show_prompt();
    }

    fn start_round(&mut self) {
        self.cancel_reset();
        self.wait_hue = draw_wait_hue(&mut self.rng);
        self.enter(GameState::Waiting, GameEvent::Trigger);
        self.show(Frame::new(
            WAIT_TEXT,
            Color::Hsl(wait_color(self.wait_hue)),
            Color::White,
        ));

        let delay_ms = self.rng.gen_range(MIN_DELAY_MS..MAX_DELAY_MS);
        let token = self.next_token(TimerKind::Delay);
        self.env.schedule_once(token, delay_ms);
        self.pending_delay = Some(token);
        debug!(delay_ms, hue = self.wait_hue, "wait scheduled");
    }

    fn show_cue(&mut self) {
        let hue = target_hue(self.wait_hue, draw_hue_jitter(&mut self.rng));
        self.enter(GameState::Ready, GameEvent::DelayExpired);
        self.show(Frame::new(
            ACTION_TEXT,
            Color::Hsl(target_color(hue)),
            Color::White,
        ));
        self.ready_at_ms = Some(self.env.now_ms());
    }

    fn react_early(&mut self) {
        self.cancel_delay();
        self.enter(GameState::Result, GameEvent::Trigger);
        self.show(Frame::neutral(TOO_EARLY_TEXT));
        self.schedule_reset();
    }

    fn react(&mut self) {
        let now = self.env.now_ms();
        let elapsed_ms = self
            .ready_at_ms
            .take()
            .map_or(0, |ready| now.saturating_sub(ready));
        let attempt: Attempt = self.attempts.record(elapsed_ms);
        info!(attempt = attempt.number, elapsed_ms, "attempt recorded");
        self.env.record_attempt(&attempt);

        self.enter(GameState::Result, GameEvent::Trigger);
        self.show(Frame::neutral(attempt.to_string()));
        self.schedule_reset();
    }

    fn schedule_reset(&mut self) {
        self.cancel_reset();
        let token = self.next_token(TimerKind::DisplayReset);
        self.env.schedule_once(token, RESULT_HOLD_MS);
        self.pending_reset = Some(token);
    }

    fn cancel_delay(&mut self) {
        if let Some(token) = self.pending_delay.take() {
            self.env.cancel(token);
        }
    }

    fn cancel_reset(&mut self) {
        if let Some(token) = self.pending_reset.take() {
            self.env.cancel(token);
        }
    }

    fn next_token(&mut self, kind: TimerKind) -> TimerToken {
        self.generation += 1;
        TimerToken {
            kind,
            generation: self.generation,
        }
    }

    fn enter(&mut self, to: GameState, event: GameEvent) {
        let from = self.state;
        debug_assert_eq!(from.next(event), Some(to));
        self.log.record(StateTransition {
            from,
            to,
            event,
            at_ms: self.env.now_ms(),
            timestamp: Utc::now(),
        });
        debug!(from = %from, to = %to, ?event, "state_transition");
        self.state = to;
    }

    fn show_prompt(&mut self) {
        self.show(Frame::neutral(self.input_mode.idle_prompt()));
    }

    fn show(&mut self, frame: Frame) {
        self.env.render(&frame);
        self.last_frame = frame;
    }
}

impl<R: Rng> ReactionGame<SimulatedEnv, R> {
    /// Move virtual time forward by `ms`, firing due timers in deadline order.
    pub fn advance(&mut self, ms: u64) {
        let until = self.env.now_ms() + ms;
        while let Some(token) = self.env.fire_next_due(until) {
            self.on_timer(token);
        }
        self.env.set_now(until);
    }
}
