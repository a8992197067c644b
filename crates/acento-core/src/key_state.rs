use crate::types::{KeyId, MODIFIERS, SHIFT};
use std::collections::HashSet;
use tracing::trace;

/// Tab moves focus away from the page before its key-up arrives, so it is
/// never tracked.
const UNTRACKED: &str = "Tab";

/// Maps a raw `KeyboardEvent.code` to the identifier kept in the pressed set.
///
/// Returns `None` for keys that are not tracked.
pub fn normalize_code(code: &str) -> Option<KeyId> {
    if code == UNTRACKED {
        return None;
    }
    for modifier in MODIFIERS {
        if code.starts_with(modifier) {
            return Some(KeyId::from_static(modifier));
        }
    }
    Some(KeyId::from(code.to_owned()))
}

/// Set of physical keys currently held down.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    pressed: HashSet<KeyId>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key-down. Returns `true` if the key was not already held
    /// (auto-repeat downs return `false`).
    pub fn on_key_down(&mut self, code: &str) -> bool {
        match normalize_code(code) {
            Some(key) => {
                let fresh = self.pressed.insert(key);
                trace!(code, fresh, held = self.pressed.len(), "key down");
                fresh
            }
            None => false,
        }
    }

    /// Records a key-up. Modifiers are released by symbolic name, so
    /// releasing either side releases the modifier.
    pub fn on_key_up(&mut self, code: &str) {
        if let Some(key) = normalize_code(code) {
            self.pressed.remove(&key);
            trace!(code, held = self.pressed.len(), "key up");
        }
    }

    pub fn clear(&mut self) {
        if !self.pressed.is_empty() {
            trace!(dropped = self.pressed.len(), "pressed keys cleared");
        }
        self.pressed.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pressed.contains(key)
    }

    pub fn shift_held(&self) -> bool {
        self.contains(SHIFT)
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pressed.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyId> {
        self.pressed.iter()
    }

    /// Held keys in a stable order, for display and diagnostics.
    pub fn sorted(&self) -> Vec<KeyId> {
        let mut keys: Vec<KeyId> = self.pressed.iter().cloned().collect();
        keys.sort();
        keys
    }
}
