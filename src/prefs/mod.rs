//! Persisted user preferences: theme and input mode.
//!
//! Storage is an opaque key-value store owned by the shell. Values use the
//! keys `theme` (`light` / `dark`) and `inputMode` (`mouse` / `keyboard`).
//!
//! Two ways to read them:
//! - [`Preferences::parse`] is strict and reports every invalid entry at once
//!   through a `Validation`.
//! - [`Preferences::load`] is lenient: invalid entries are logged and fall
//!   back to the default, one field at a time.

use crate::core::{InputMode, Theme};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::warn;

pub mod error;

pub use error::PreferenceError;

pub const THEME_KEY: &str = "theme";
pub const INPUT_MODE_KEY: &str = "inputMode";

/// String key-value storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store with a JSON snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> Result<String, PreferenceError> {
        serde_json::to_string(self).map_err(|e| PreferenceError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, PreferenceError> {
        serde_json::from_str(json).map_err(|e| PreferenceError::DeserializationFailed(e.to_string()))
    }

    /// Read a snapshot written by [`save_file`](Self::save_file).
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, PreferenceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| PreferenceError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<(), PreferenceError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(|e| PreferenceError::Io(format!("{}: {e}", path.display())))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// The user's presentation choices.
///
/// # Example
///
/// ```rust
/// use reflex::core::{InputMode, Theme};
/// use reflex::prefs::{MemoryStore, PreferenceStore, Preferences};
///
/// let mut store = MemoryStore::new();
/// store.set("theme", "dark");
/// store.set("inputMode", "keyboard");
///
/// let prefs = Preferences::parse(&store);
/// assert!(prefs.is_success());
///
/// let prefs = Preferences::load(&store);
/// assert_eq!(prefs.theme, Theme::Dark);
/// assert_eq!(prefs.input_mode, InputMode::Keyboard);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub input_mode: InputMode,
}

impl Preferences {
    /// Strict read. Missing entries take their default; every invalid entry
    /// is reported.
    pub fn parse<S: PreferenceStore + ?Sized>(
        store: &S,
    ) -> Validation<Preferences, NonEmptyVec<PreferenceError>> {
        let theme = read_theme(store);
        let input_mode = read_input_mode(store);

        let checks = vec![check(&theme), check(&input_mode)];
        let prefs = Preferences {
            theme: theme.unwrap_or_default(),
            input_mode: input_mode.unwrap_or_default(),
        };

        Validation::all_vec(checks).map(move |_| prefs)
    }

    /// Lenient read. Invalid entries are logged and replaced by defaults.
    pub fn load<S: PreferenceStore + ?Sized>(store: &S) -> Self {
        let theme = read_theme(store).unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default theme");
            Theme::default()
        });
        let input_mode = read_input_mode(store).unwrap_or_else(|e| {
            warn!(error = %e, "falling back to default input mode");
            InputMode::default()
        });
        Self { theme, input_mode }
    }

    pub fn save<S: PreferenceStore + ?Sized>(&self, store: &mut S) {
        store.set(THEME_KEY, self.theme.key());
        store.set(INPUT_MODE_KEY, self.input_mode.key());
    }
}

fn read_theme<S: PreferenceStore + ?Sized>(store: &S) -> Result<Theme, PreferenceError> {
    match store.get(THEME_KEY) {
        None => Ok(Theme::default()),
        Some(value) => Theme::from_key(&value).ok_or(PreferenceError::InvalidValue {
            key: THEME_KEY,
            value,
            expected: "'light' or 'dark'",
        }),
    }
}

fn read_input_mode<S: PreferenceStore + ?Sized>(store: &S) -> Result<InputMode, PreferenceError> {
    match store.get(INPUT_MODE_KEY) {
        None => Ok(InputMode::default()),
        Some(value) => InputMode::from_key(&value).ok_or(PreferenceError::InvalidValue {
            key: INPUT_MODE_KEY,
            value,
            expected: "'mouse' or 'keyboard'",
        }),
    }
}

fn check<T>(read: &Result<T, PreferenceError>) -> Validation<(), NonEmptyVec<PreferenceError>> {
    match read {
        Ok(_) => Validation::success(()),
        Err(e) => Validation::fail(e.clone()),
    }
}
