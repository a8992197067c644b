use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::fmt;

pub const SHIFT: &str = "Shift";
pub const CONTROL: &str = "Control";
pub const ALT: &str = "Alt";
pub const META: &str = "Meta";

/// Modifier names in the order they are tested against a raw code.
pub const MODIFIERS: [&str; 4] = [SHIFT, CONTROL, ALT, META];

/// Normalized physical key identifier.
///
/// Built from the DOM `KeyboardEvent.code` value, with left/right modifier
/// variants collapsed (`ShiftLeft` and `ShiftRight` are both `Shift`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyId(Cow<'static, str>);

impl KeyId {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for KeyId {
    fn from(code: String) -> Self {
        Self(Cow::Owned(code))
    }
}

impl From<&'static str> for KeyId {
    fn from(code: &'static str) -> Self {
        Self::from_static(code)
    }
}

// Lets a `HashSet<KeyId>` be queried with plain `&str` rule keys.
impl Borrow<str> for KeyId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key transition direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEdge {
    Down,
    Up,
}

/// A physical key event as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Raw `KeyboardEvent.code` (e.g. `KeyA`, `ControlLeft`, `Quote`).
    pub code: String,
    pub edge: KeyEdge,
    /// Set by the host for auto-repeated key-downs.
    pub repeat: bool,
}

impl KeyEvent {
    pub fn down(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            edge: KeyEdge::Down,
            repeat: false,
        }
    }

    pub fn up(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            edge: KeyEdge::Up,
            repeat: false,
        }
    }

    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }
}

/// Action to be taken by the host for the current event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Leave the event to the browser's default handling.
    Pass,
    /// Prevent the default action and insert the character.
    Insert(char),
}

impl KeyAction {
    pub fn prevents_default(self) -> bool {
        matches!(self, KeyAction::Insert(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_owned_and_static_ids_are_equal() {
        let owned = KeyId::from("Quote".to_string());
        assert_eq!(owned, KeyId::from_static("Quote"));

        let mut set = HashSet::new();
        set.insert(owned);
        assert!(set.contains("Quote"));
    }
}
