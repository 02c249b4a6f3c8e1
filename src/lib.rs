//! Reflex: a reaction-time game core
//!
//! The user waits for a visual cue and reacts as fast as possible; the
//! elapsed time is recorded. Reflex follows a "pure core, imperative shell"
//! layout: states, colors and history are plain values and functions, while
//! the clock, timers, display and history sink are collaborators the shell
//! provides.
//!
//! # Core Concepts
//!
//! - **State**: `Idle -> Waiting -> Ready -> Result -> Waiting -> ...`
//! - **Timers**: generation-stamped tokens; stale timers never act
//! - **Colors**: a random wait hue and a roughly opposite target hue
//! - **History**: append-only attempts, shown most recent first
//!
//! # Example
//!
//! ```rust
//! use reflex::core::{GameState, InputMode};
//! use reflex::effects::{ReactionGame, SimulatedEnv};
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let mut game = ReactionGame::new(
//!     SimulatedEnv::new(InputMode::Pointer),
//!     SmallRng::seed_from_u64(3),
//! );
//! assert_eq!(game.last_frame().text, "Click here to start");
//!
//! game.trigger();
//! game.trigger();
//! assert_eq!(game.current_state(), GameState::Result);
//! assert_eq!(game.last_frame().text, "Too early. Retry.");
//! assert!(game.attempts().is_empty());
//! ```

pub mod core;
pub mod effects;
pub mod prefs;

// Re-export commonly used types
pub use crate::core::{Attempt, AttemptHistory, Frame, GameState, InputMode, Theme};
pub use crate::effects::{GameEnv, ReactionGame, SimulatedEnv, TimerKind, TimerToken};
pub use crate::prefs::{PreferenceError, PreferenceStore, Preferences};
