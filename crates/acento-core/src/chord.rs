use crate::error::TableError;
use crate::key_state::KeyState;
use crate::types::{ALT, CONTROL, SHIFT};

/// Character produced by a chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Picks `upper` when Shift is held at match time.
    Cased { lower: char, upper: char },
    /// Same character regardless of Shift.
    Fixed(char),
}

impl Output {
    pub const fn select(self, shift: bool) -> char {
        match self {
            Output::Cased { lower, upper } => {
                if shift {
                    upper
                } else {
                    lower
                }
            }
            Output::Fixed(c) => c,
        }
    }
}

/// One branch of a chord group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    /// Extra key required on top of the gate. `None` fires on the gate alone.
    pub key: Option<&'static str>,
    pub output: Output,
}

/// Keys that must all be held before any of the branches are considered.
///
/// The first group whose gate is held claims the event. If none of its
/// branches match, evaluation stops there and later groups are not tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordGroup {
    pub gate: &'static [&'static str],
    pub branches: &'static [Branch],
}

/// Ordered chord groups, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordTable {
    pub groups: &'static [ChordGroup],
}

/// A flattened view of one chord: every key it needs plus its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    pub priority: usize,
    pub keys: Vec<&'static str>,
    pub output: Output,
}

const fn cased(key: &'static str, lower: char, upper: char) -> Branch {
    Branch {
        key: Some(key),
        output: Output::Cased { lower, upper },
    }
}

const QUOTE: &str = "Quote";

/// Spanish accents and punctuation.
pub const SPANISH_CHORDS: ChordTable = ChordTable {
    groups: &[
        ChordGroup {
            gate: &[CONTROL, QUOTE],
            branches: &[
                cased("KeyA", 'á', 'Á'),
                cased("KeyE", 'é', 'É'),
                cased("KeyI", 'í', 'Í'),
                cased("KeyO", 'ó', 'Ó'),
                cased("KeyU", 'ú', 'Ú'),
            ],
        },
        ChordGroup {
            gate: &[ALT, SHIFT, "Digit1"],
            branches: &[Branch {
                key: None,
                output: Output::Fixed('¡'),
            }],
        },
        ChordGroup {
            gate: &[ALT, SHIFT, "Slash"],
            branches: &[Branch {
                key: None,
                output: Output::Fixed('¿'),
            }],
        },
        ChordGroup {
            gate: &[CONTROL, ALT, "KeyN"],
            branches: &[Branch {
                key: None,
                output: Output::Cased {
                    lower: 'ñ',
                    upper: 'Ñ',
                },
            }],
        },
        ChordGroup {
            gate: &[CONTROL, ALT, "KeyU"],
            branches: &[Branch {
                key: None,
                output: Output::Cased {
                    lower: 'ü',
                    upper: 'Ü',
                },
            }],
        },
    ],
};

/// True when every key in `keys` is held. An empty list never matches.
pub fn holds_all(pressed: &KeyState, keys: &[&str]) -> bool {
    !keys.is_empty() && keys.iter().all(|key| pressed.contains(key))
}

impl Default for ChordTable {
    fn default() -> Self {
        SPANISH_CHORDS
    }
}

impl ChordTable {
    /// Returns the character for the chord currently held, if any.
    pub fn match_keys(&self, pressed: &KeyState) -> Option<char> {
        let group = self
            .groups
            .iter()
            .find(|group| holds_all(pressed, group.gate))?;

        group
            .branches
            .iter()
            .find(|branch| branch.key.map_or(true, |key| pressed.contains(key)))
            .map(|branch| branch.output.select(pressed.shift_held()))
    }

    /// Every chord in priority order (priority 1 is the first group).
    pub fn chords(&self) -> impl Iterator<Item = Chord> + '_ {
        self.groups.iter().enumerate().flat_map(|(idx, group)| {
            group.branches.iter().map(move |branch| {
                let mut keys = group.gate.to_vec();
                keys.extend(branch.key);
                Chord {
                    priority: idx + 1,
                    keys,
                    output: branch.output,
                }
            })
        })
    }

    pub fn validate(&self) -> Result<(), TableError> {
        for (group_idx, group) in self.groups.iter().enumerate() {
            if group.gate.is_empty() {
                return Err(TableError::EmptyGate { group: group_idx });
            }
            if group.branches.is_empty() {
                return Err(TableError::NoBranches { group: group_idx });
            }

            for (branch_idx, branch) in group.branches.iter().enumerate() {
                // A key-less branch shadows every branch after it.
                let shadowed = group.branches[..branch_idx]
                    .iter()
                    .any(|earlier| earlier.key.is_none() || earlier.key == branch.key);
                if shadowed {
                    return Err(TableError::UnreachableBranch {
                        group: group_idx,
                        branch: branch_idx,
                    });
                }

                if let Output::Cased { lower, upper } = branch.output {
                    if !lower.to_uppercase().eq(std::iter::once(upper)) {
                        return Err(TableError::CaseMismatch {
                            group: group_idx,
                            lower,
                            upper,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(codes: &[&str]) -> KeyState {
        let mut state = KeyState::new();
        for code in codes {
            state.on_key_down(code);
        }
        state
    }

    #[test]
    fn test_spanish_table_is_valid() {
        assert_eq!(SPANISH_CHORDS.validate(), Ok(()));
    }

    #[test]
    fn test_every_chord_fires_with_and_without_shift() {
        for chord in SPANISH_CHORDS.chords() {
            let state = press(&chord.keys);
            assert_eq!(
                SPANISH_CHORDS.match_keys(&state),
                Some(chord.output.select(state.shift_held())),
                "chord {:?}",
                chord.keys
            );

            let mut codes = chord.keys.clone();
            codes.push("ShiftLeft");
            let state = press(&codes);
            assert_eq!(
                SPANISH_CHORDS.match_keys(&state),
                Some(chord.output.select(true)),
                "shifted chord {:?}",
                chord.keys
            );
        }
    }

    #[test]
    fn test_vowels() {
        let cases = [
            ("KeyA", 'á', 'Á'),
            ("KeyE", 'é', 'É'),
            ("KeyI", 'í', 'Í'),
            ("KeyO", 'ó', 'Ó'),
            ("KeyU", 'ú', 'Ú'),
        ];
        for (key, lower, upper) in cases {
            let state = press(&["ControlLeft", "Quote", key]);
            assert_eq!(SPANISH_CHORDS.match_keys(&state), Some(lower));
            let state = press(&["ControlRight", "ShiftLeft", "Quote", key]);
            assert_eq!(SPANISH_CHORDS.match_keys(&state), Some(upper));
        }
    }

    #[test]
    fn test_inverted_punctuation_ignores_shift_case() {
        let state = press(&["AltLeft", "ShiftLeft", "Digit1"]);
        assert_eq!(SPANISH_CHORDS.match_keys(&state), Some('¡'));

        let state = press(&["AltRight", "ShiftRight", "Slash"]);
        assert_eq!(SPANISH_CHORDS.match_keys(&state), Some('¿'));
    }

    #[test]
    fn test_inverted_punctuation_needs_shift() {
        let state = press(&["AltLeft", "Digit1"]);
        assert_eq!(SPANISH_CHORDS.match_keys(&state), None);
    }

    #[test]
    fn test_enye_and_dieresis() {
        assert_eq!(
            SPANISH_CHORDS.match_keys(&press(&["ControlLeft", "AltLeft", "KeyN"])),
            Some('ñ')
        );
        assert_eq!(
            SPANISH_CHORDS.match_keys(&press(&["ControlLeft", "AltLeft", "ShiftLeft", "KeyN"])),
            Some('Ñ')
        );
        assert_eq!(
            SPANISH_CHORDS.match_keys(&press(&["ControlLeft", "AltLeft", "KeyU"])),
            Some('ü')
        );
        assert_eq!(
            SPANISH_CHORDS.match_keys(&press(&["ControlLeft", "AltLeft", "ShiftLeft", "KeyU"])),
            Some('Ü')
        );
    }

    #[test]
    fn test_unknown_chord_does_not_match() {
        assert_eq!(SPANISH_CHORDS.match_keys(&press(&["ControlLeft", "KeyA"])), None);
        assert_eq!(SPANISH_CHORDS.match_keys(&press(&[])), None);
    }

    #[test]
    fn test_gate_claims_event_even_without_branch() {
        // Control+Quote is held, so the accent group wins the ladder and the
        // ñ chord below it is never reached.
        let state = press(&["ControlLeft", "Quote", "AltLeft", "KeyN"]);
        assert_eq!(SPANISH_CHORDS.match_keys(&state), None);
    }

    #[test]
    fn test_first_vowel_branch_wins() {
        let state = press(&["ControlLeft", "Quote", "KeyU", "KeyA"]);
        assert_eq!(SPANISH_CHORDS.match_keys(&state), Some('á'));
    }

    #[test]
    fn test_accent_group_beats_dieresis() {
        // Both Control+Quote+KeyU and Control+Alt+KeyU are held.
        let state = press(&["ControlLeft", "Quote", "AltLeft", "KeyU"]);
        assert_eq!(SPANISH_CHORDS.match_keys(&state), Some('ú'));
    }

    #[test]
    fn test_empty_gate_never_matches() {
        assert!(!holds_all(&press(&["KeyA"]), &[]));

        const BROKEN: ChordTable = ChordTable {
            groups: &[ChordGroup {
                gate: &[],
                branches: &[Branch {
                    key: None,
                    output: Output::Fixed('x'),
                }],
            }],
        };
        assert_eq!(BROKEN.match_keys(&press(&["KeyA"])), None);
        assert_eq!(BROKEN.validate(), Err(TableError::EmptyGate { group: 0 }));
    }

    #[test]
    fn test_validate_rejects_bad_case_pair() {
        const BAD: ChordTable = ChordTable {
            groups: &[ChordGroup {
                gate: &[CONTROL],
                branches: &[cased("KeyA", 'á', 'É')],
            }],
        };
        assert_eq!(
            BAD.validate(),
            Err(TableError::CaseMismatch {
                group: 0,
                lower: 'á',
                upper: 'É'
            })
        );
    }

    #[test]
    fn test_validate_rejects_shadowed_branch() {
        const SHADOWED: ChordTable = ChordTable {
            groups: &[ChordGroup {
                gate: &[CONTROL],
                branches: &[
                    Branch {
                        key: None,
                        output: Output::Fixed('x'),
                    },
                    cased("KeyA", 'á', 'Á'),
                ],
            }],
        };
        assert_eq!(
            SHADOWED.validate(),
            Err(TableError::UnreachableBranch {
                group: 0,
                branch: 1
            })
        );
    }

    #[test]
    fn test_chords_lists_priorities() {
        let chords: Vec<Chord> = SPANISH_CHORDS.chords().collect();
        assert_eq!(chords.len(), 9);
        assert_eq!(chords[0].priority, 1);
        assert_eq!(chords[0].keys, vec!["Control", "Quote", "KeyA"]);
        assert_eq!(chords[8].priority, 5);
        assert_eq!(chords[8].keys, vec!["Control", "Alt", "KeyU"]);
    }
}
