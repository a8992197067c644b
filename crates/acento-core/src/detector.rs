use crate::chord::ChordTable;
use crate::key_state::KeyState;
use crate::profile::Profile;
use crate::types::{KeyAction, KeyEdge, KeyEvent};
use tracing::{debug, info};

/// Tracks held keys and turns recognized chords into insert actions.
///
/// One detector models one physical keyboard as seen by one page. The host
/// owns it and feeds it every key and focus event in arrival order.
pub struct Detector {
    state: KeyState,
    table: ChordTable,
    profile: Profile,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(Profile::default())
    }
}

impl Detector {
    pub fn new(profile: Profile) -> Self {
        Self::with_table(profile, ChordTable::default())
    }

    pub fn with_table(profile: Profile, table: ChordTable) -> Self {
        debug_assert!(table.validate().is_ok(), "{:?}", table.validate());
        Self {
            state: KeyState::new(),
            table,
            profile,
        }
    }

    /// Updates the pressed set for `event` and evaluates the chord table on
    /// the result. Runs on both edges, so releasing a key while a chord is
    /// still held fires that chord again.
    pub fn process_key(&mut self, event: &KeyEvent) -> KeyAction {
        match event.edge {
            KeyEdge::Down => {
                self.state.on_key_down(&event.code);
            }
            KeyEdge::Up => self.state.on_key_up(&event.code),
        }

        if !self.profile.enabled {
            return KeyAction::Pass;
        }

        if self.profile.suppress_repeat && event.edge == KeyEdge::Down && event.repeat {
            return KeyAction::Pass;
        }

        match self.table.match_keys(&self.state) {
            Some(ch) => {
                debug!(code = %event.code, edge = ?event.edge, %ch, "chord matched");
                KeyAction::Insert(ch)
            }
            None => KeyAction::Pass,
        }
    }

    /// Window blur/focus or visibility change.
    pub fn on_focus_change(&mut self) {
        if self.profile.reset_on_focus_change {
            self.state.clear();
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.profile.enabled != enabled {
            self.profile.enabled = enabled;
            if !enabled {
                self.state.clear();
            }
            info!("Detector {}", if enabled { "enabled" } else { "disabled" });
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.profile.enabled
    }

    /// Replaces every option, including `enabled`.
    pub fn set_profile(&mut self, profile: Profile) {
        let enabled = profile.enabled;
        self.profile = Profile {
            enabled: self.profile.enabled,
            ..profile
        };
        self.set_enabled(enabled);
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn pressed(&self) -> &KeyState {
        &self.state
    }
}
