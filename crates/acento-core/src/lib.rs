pub mod chord;
pub mod detector;
pub mod error;
pub mod insert;
pub mod key_state;
pub mod profile;
pub mod types;

pub use chord::{ChordTable, Output, SPANISH_CHORDS};
pub use detector::Detector;
pub use error::{InsertError, TableError};
pub use insert::{insert_char, ContentEditableTarget, EditTarget, Inserted, TextValueTarget};
pub use key_state::{normalize_code, KeyState};
pub use profile::Profile;
pub use types::{KeyAction, KeyEdge, KeyEvent, KeyId};
