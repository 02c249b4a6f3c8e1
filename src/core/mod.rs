//! Core game types and logic.
//!
//! This module contains the pure part of the reaction game:
//! - States, events and the transition table
//! - Color derivation for the wait and target phases
//! - Attempt history and the state transition log
//!
//! Nothing here touches a clock, a timer or a display.

mod attempts;
mod color;
mod history;
mod state;

pub use attempts::{Attempt, AttemptHistory};
pub use color::{
    draw_hue_jitter, draw_wait_hue, hue_shift, target_color, target_hue, wait_color, Color,
    Frame, Hsl, Rgb, Theme, HUE_JITTER, TARGET_LIGHTNESS, TARGET_SATURATION, WAIT_LIGHTNESS,
    WAIT_SATURATION,
};
pub use history::{StateTransition, TransitionLog};
pub use state::{GameEvent, GameState, InputKind, InputMode};
