//! Completed reaction attempts.
//!
//! An attempt exists only for a trigger that landed in the ready phase.
//! The history is append-only; display order is most recent first.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One successful reaction-time measurement.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Attempt {
    /// 1-based position in the session.
    pub number: usize,
    /// Milliseconds from the cue to the trigger.
    pub elapsed_ms: u64,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ms", self.elapsed_ms)
    }
}

/// Ordered, append-only list of attempts.
///
/// # Example
///
/// ```rust
/// use reflex::core::AttemptHistory;
///
/// let mut history = AttemptHistory::new();
/// history.record(310);
/// history.record(250);
///
/// let shown: Vec<String> = history.most_recent_first().map(|a| a.to_string()).collect();
/// assert_eq!(shown, vec!["250 ms", "310 ms"]);
/// assert_eq!(history.best().map(|a| a.elapsed_ms), Some(250));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptHistory {
    attempts: Vec<Attempt>,
}

impl AttemptHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attempt and return it with its assigned number.
    pub fn record(&mut self, elapsed_ms: u64) -> Attempt {
        let attempt = Attempt {
            number: self.attempts.len() + 1,
            elapsed_ms,
        };
        self.attempts.push(attempt);
        attempt
    }

    /// Attempts in the order they were recorded.
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    /// Attempts in display order.
    pub fn most_recent_first(&self) -> impl Iterator<Item = &Attempt> + '_ {
        self.attempts.iter().rev()
    }

    pub fn latest(&self) -> Option<&Attempt> {
        self.attempts.last()
    }

    /// Fastest attempt; the earliest one wins ties.
    pub fn best(&self) -> Option<&Attempt> {
        self.attempts
            .iter()
            .reduce(|best, a| if a.elapsed_ms < best.elapsed_ms { a } else { best })
    }

    /// Mean reaction time in milliseconds.
    pub fn average_ms(&self) -> Option<f64> {
        if self.attempts.is_empty() {
            return None;
        }
        let total: u64 = self.attempts.iter().map(|a| a.elapsed_ms).sum();
        Some(total as f64 / self.attempts.len() as f64)
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }
}
