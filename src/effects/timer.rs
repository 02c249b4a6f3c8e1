//! One-shot timer tokens and a deadline-ordered queue.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// What a timer is for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TimerKind {
    /// End of the randomized wait phase.
    Delay,
    /// Return from a result message to the idle prompt.
    DisplayReset,
}

/// Identity of one scheduled timer.
///
/// The generation is unique per machine, so a token that is no longer the
/// machine's outstanding token of its kind is recognisably stale.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
}

/// Pending one-shot timers ordered by absolute deadline.
///
/// Timers with the same deadline fire in scheduling order. Scheduling a token
/// that is already queued moves it to the new deadline.
///
/// # Example
///
/// ```rust
/// use reflex::effects::{TimerKind, TimerQueue, TimerToken};
///
/// let mut queue = TimerQueue::new();
/// let delay = TimerToken { kind: TimerKind::Delay, generation: 1 };
/// let reset = TimerToken { kind: TimerKind::DisplayReset, generation: 2 };
///
/// queue.schedule(delay, 3000);
/// queue.schedule(reset, 1500);
/// assert_eq!(queue.next_deadline(), Some(1500));
///
/// assert!(queue.cancel(reset));
/// assert_eq!(queue.pop_due(5000), vec![delay]);
/// assert!(queue.is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    entries: BTreeMap<(u64, u64), TimerToken>,
    keys: HashMap<TimerToken, (u64, u64)>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `token` to fire at `due_ms`.
    pub fn schedule(&mut self, token: TimerToken, due_ms: u64) {
        self.cancel(token);
        let key = (due_ms, self.seq);
        self.seq += 1;
        self.entries.insert(key, token);
        self.keys.insert(token, key);
    }

    /// Remove `token`. Returns false if it was not queued.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        match self.keys.remove(&token) {
            Some(key) => self.entries.remove(&key).is_some(),
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.keys().next().map(|(due, _)| *due)
    }

    /// Pop the earliest timer if it is due at or before `now_ms`.
    pub fn pop_next_due(&mut self, now_ms: u64) -> Option<(u64, TimerToken)> {
        let (&key, _) = self.entries.iter().next()?;
        if key.0 > now_ms {
            return None;
        }
        let token = self.entries.remove(&key)?;
        self.keys.remove(&token);
        Some((key.0, token))
    }

    /// Pop every timer due at or before `now_ms`, in firing order.
    pub fn pop_due(&mut self, now_ms: u64) -> Vec<TimerToken> {
        std::iter::from_fn(|| self.pop_next_due(now_ms))
            .map(|(_, token)| token)
            .collect()
    }

    pub fn contains(&self, token: TimerToken) -> bool {
        self.keys.contains_key(&token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
