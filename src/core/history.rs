//! State transition log.
//!
//! Every state change the game makes is recorded with the event that caused
//! it, the monotonic game time, and the wall-clock time.

use super::state::{GameEvent, GameState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use reflex::core::{GameEvent, GameState, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: GameState::Idle,
///     to: GameState::Waiting,
///     event: GameEvent::Trigger,
///     at_ms: 0,
///     timestamp: Utc::now(),
/// };
/// assert!(transition.is_permitted());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: GameState,
    /// The state being transitioned to
    pub to: GameState,
    /// What caused the transition
    pub event: GameEvent,
    /// Game clock reading, in milliseconds
    pub at_ms: u64,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

impl StateTransition {
    /// Whether the pure transition table allows this record.
    pub fn is_permitted(&self) -> bool {
        self.from.next(self.event) == Some(self.to)
    }
}

/// Ordered log of state transitions.
///
/// Unbounded by default. A log built with [`TransitionLog::bounded`] keeps
/// only the most recent `limit` records, so a long-running session holds a
/// sliding window; the retained records still chain.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionLog {
    transitions: Vec<StateTransition>,
    #[serde(default)]
    limit: Option<usize>,
}

impl TransitionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log that drops its oldest records beyond `limit`. A zero limit is
    /// treated as one.
    pub fn bounded(limit: usize) -> Self {
        Self {
            transitions: Vec::new(),
            limit: Some(limit.max(1)),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn record(&mut self, transition: StateTransition) {
        self.transitions.push(transition);
        if let Some(limit) = self.limit {
            let excess = self.transitions.len().saturating_sub(limit);
            if excess > 0 {
                self.transitions.drain(..excess);
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the initial state, then the `to` state of each transition.
    pub fn get_path(&self) -> Vec<GameState> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Whether every record is permitted and continues from the previous one.
    pub fn is_consistent(&self) -> bool {
        self.transitions.iter().all(StateTransition::is_permitted)
            && self
                .transitions
                .windows(2)
                .all(|pair| pair[0].to == pair[1].from)
    }

    /// Game time from the first to the last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        Some(Duration::from_millis(last.at_ms.saturating_sub(first.at_ms)))
    }

    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(from: GameState, to: GameState, event: GameEvent, at_ms: u64) -> StateTransition {
        StateTransition {
            from,
            to,
            event,
            at_ms,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_log_is_empty() {
        let log = TransitionLog::new();
        assert!(log.is_empty());
        assert!(log.get_path().is_empty());
        assert!(log.duration().is_none());
        assert!(log.is_consistent());
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut log = TransitionLog::new();
        log.record(transition(GameState::Idle, GameState::Waiting, GameEvent::Trigger, 0));
        log.record(transition(
            GameState::Waiting,
            GameState::Ready,
            GameEvent::DelayExpired,
            2500,
        ));
        log.record(transition(GameState::Ready, GameState::Result, GameEvent::Trigger, 2750));

        assert_eq!(
            log.get_path(),
            vec![
                GameState::Idle,
                GameState::Waiting,
                GameState::Ready,
                GameState::Result
            ]
        );
        assert_eq!(log.duration(), Some(Duration::from_millis(2750)));
        assert!(log.is_consistent());
    }

    #[test]
    fn skipped_state_is_inconsistent() {
        let mut log = TransitionLog::new();
        log.record(transition(GameState::Idle, GameState::Ready, GameEvent::Trigger, 0));
        assert!(!log.is_consistent());
    }

    #[test]
    fn broken_chain_is_inconsistent() {
        let mut log = TransitionLog::new();
        log.record(transition(GameState::Idle, GameState::Waiting, GameEvent::Trigger, 0));
        log.record(transition(GameState::Ready, GameState::Result, GameEvent::Trigger, 10));
        assert!(!log.is_consistent());
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let mut log = TransitionLog::new();
        log.record(transition(GameState::Idle, GameState::Waiting, GameEvent::Trigger, 40));
        assert_eq!(log.duration(), Some(Duration::ZERO));
    }

    #[test]
    fn bounded_log_drops_oldest_records() {
        let mut log = TransitionLog::bounded(2);
        log.record(transition(GameState::Idle, GameState::Waiting, GameEvent::Trigger, 0));
        log.record(transition(
            GameState::Waiting,
            GameState::Ready,
            GameEvent::DelayExpired,
            2500,
        ));
        log.record(transition(GameState::Ready, GameState::Result, GameEvent::Trigger, 2750));

        assert_eq!(log.len(), 2);
        assert_eq!(log.limit(), Some(2));
        assert_eq!(
            log.get_path(),
            vec![GameState::Waiting, GameState::Ready, GameState::Result]
        );
        assert_eq!(log.duration(), Some(Duration::from_millis(250)));
        assert!(log.is_consistent());
    }

    #[test]
    fn zero_limit_keeps_latest_record() {
        let mut log = TransitionLog::bounded(0);
        log.record(transition(GameState::Idle, GameState::Waiting, GameEvent::Trigger, 0));
        log.record(transition(GameState::Waiting, GameState::Result, GameEvent::Trigger, 5));
        assert_eq!(log.len(), 1);
        assert_eq!(log.transitions()[0].to, GameState::Result);
    }

    #[test]
    fn log_serializes_correctly() {
        let mut log = TransitionLog::new();
        log.record(transition(GameState::Idle, GameState::Waiting, GameEvent::Trigger, 0));

        let json = serde_json::to_string(&log).unwrap();
        let deserialized: TransitionLog = serde_json::from_str(&json).unwrap();
        assert_eq!(log.len(), deserialized.len());
        assert_eq!(log.get_path(), deserialized.get_path());
    }

    #[test]
    fn log_without_limit_field_deserializes_unbounded() {
        let log: TransitionLog = serde_json::from_str(r#"{"transitions":[]}"#).unwrap();
        assert_eq!(log.limit(), None);
    }
}
