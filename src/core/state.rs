//! Game states, the events that move between them, and the input mode.
//!
//! Everything here is pure: the transition table is a plain function of
//! `(state, event)` and can be checked without any collaborators.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of the reaction game.
///
/// Exactly one variant holds at any instant. `Idle` and `Result` both accept
/// a trigger to start a new round; `Result` additionally means the display is
/// showing the outcome of the previous round.
///
/// # Example
///
/// ```rust
/// use reflex::core::{GameEvent, GameState};
///
/// assert_eq!(GameState::Idle.next(GameEvent::Trigger), Some(GameState::Waiting));
/// assert_eq!(GameState::Waiting.next(GameEvent::Trigger), Some(GameState::Result));
/// assert_eq!(GameState::Ready.next(GameEvent::DelayExpired), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Idle,
    Waiting,
    Ready,
    Result,
}

/// Inputs to the transition table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum GameEvent {
    /// User action (click or key press) already filtered by input mode.
    Trigger,
    /// The randomized wait delay elapsed.
    DelayExpired,
    /// The input mode preference changed.
    ModeChanged,
}

impl GameState {
    /// Get the state's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Waiting => "Waiting",
            Self::Ready => "Ready",
            Self::Result => "Result",
        }
    }

    /// Whether a trigger in this state starts a new round.
    pub fn awaits_trigger(&self) -> bool {
        matches!(self, Self::Idle | Self::Result)
    }

    /// Whether the display in this state shows the idle prompt once settled.
    pub fn shows_prompt(&self) -> bool {
        self.awaits_trigger()
    }

    /// Pure transition table.
    ///
    /// Returns `None` when the event has no effect in this state, which the
    /// machine treats as a no-op.
    pub fn next(self, event: GameEvent) -> Option<GameState> {
        match (self, event) {
            (Self::Idle | Self::Result, GameEvent::Trigger) => Some(Self::Waiting),
            (Self::Waiting, GameEvent::DelayExpired) => Some(Self::Ready),
            (Self::Waiting, GameEvent::Trigger) => Some(Self::Result),
            (Self::Ready, GameEvent::Trigger) => Some(Self::Result),
            (_, GameEvent::ModeChanged) => Some(Self::Idle),
            _ => None,
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kind of raw user input a shell observed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputKind {
    /// Pointer press; `primary` is false for secondary/middle buttons.
    PointerDown { primary: bool },
    Enter,
    Space,
    /// Any other key.
    OtherKey,
}

/// Which kind of input is allowed to trigger the game.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    #[serde(rename = "mouse")]
    Pointer,
    Keyboard,
}

impl InputMode {
    /// Prompt shown while the game waits for a round to start.
    pub fn idle_prompt(&self) -> &'static str {
        match self {
            Self::Pointer => "Click here to start",
            Self::Keyboard => "Press Enter/Space to start",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pointer => "Mouse Mode",
            Self::Keyboard => "Keyboard Mode",
        }
    }

    /// Stored preference value.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Pointer => "mouse",
            Self::Keyboard => "keyboard",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "mouse" => Some(Self::Pointer),
            "keyboard" => Some(Self::Keyboard),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Pointer => Self::Keyboard,
            Self::Keyboard => Self::Pointer,
        }
    }

    /// Whether `input` may invoke a trigger under this mode.
    ///
    /// Pointer mode only accepts the primary button; keyboard mode only
    /// accepts Enter and Space.
    pub fn accepts(&self, input: InputKind) -> bool {
        match self {
            Self::Pointer => matches!(input, InputKind::PointerDown { primary: true }),
            Self::Keyboard => matches!(input, InputKind::Enter | InputKind::Space),
        }
    }
}
