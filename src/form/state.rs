//! Per-field interaction state.
//!
//! Every field starts [`FieldState::Pristine`]. A change moves it to
//! [`FieldState::Dirty`]; a failed validation moves it to
//! [`FieldState::Invalid`] until the next change or a passing validation.

use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// FieldState
// ---------------------------------------------------------------------------

/// Where a field is in its edit/validate cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldState {
    /// No value set, no error recorded.
    #[default]
    Pristine,
    /// Changed since the last validation, or last validation passed.
    Dirty,
    /// The last validation of the current value failed.
    Invalid,
}

impl FieldState {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldState::Pristine => "pristine",
            FieldState::Dirty => "dirty",
            FieldState::Invalid => "invalid",
        }
    }
}

impl fmt::Display for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StateTracker
// ---------------------------------------------------------------------------

/// Tracks the state of every field that has left `Pristine`.
#[derive(Debug, Default, Clone)]
pub struct StateTracker {
    states: HashMap<String, FieldState>,
}

impl StateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `path`. Untracked paths are pristine.
    pub fn get(&self, path: &str) -> FieldState {
        self.states.get(path).copied().unwrap_or_default()
    }

    /// Record a value change. Any state becomes `Dirty`.
    pub fn on_change(&mut self, path: &str) {
        self.states.insert(path.to_owned(), FieldState::Dirty);
    }

    /// Record a validation outcome.
    ///
    /// Failure always yields `Invalid`. Success clears `Invalid` back to
    /// `Dirty` and leaves `Pristine`/`Dirty` alone.
    pub fn on_validated(&mut self, path: &str, valid: bool) {
        if !valid {
            self.states.insert(path.to_owned(), FieldState::Invalid);
        } else if let Some(state @ FieldState::Invalid) = self.states.get_mut(path) {
            *state = FieldState::Dirty;
        }
    }

    /// Forget everything; all fields read as pristine again.
    pub fn reset(&mut self) {
        self.states.clear();
    }

    /// Paths currently in the given state.
    pub fn paths_in(&self, state: FieldState) -> Vec<&str> {
        let mut paths: Vec<&str> = self
            .states
            .iter()
            .filter(|(_, s)| **s == state)
            .map(|(p, _)| p.as_str())
            .collect();
        paths.sort_unstable();
        paths
    }
}

// ===========================================================================
// Tests
// ===========================================================================
