//! Replays a key sequence through the detector and prints what gets typed.
//!
//! cargo run --example replay -- +ControlLeft +Quote +ShiftLeft +KeyA -KeyA
//!
//! `+Code` is a key-down, `-Code` a key-up, `!` a window blur.

use acento_core::{
    insert_char, Detector, EditTarget, InsertError, KeyAction, KeyEvent, TextValueTarget,
};

#[derive(Default)]
struct Buffer {
    text: String,
    caret: u32,
}

impl TextValueTarget for Buffer {
    fn value(&self) -> String {
        self.text.clone()
    }
    fn selection(&self) -> Option<(u32, u32)> {
        Some((self.caret, self.caret))
    }
    fn set_value(&mut self, value: &str) -> Result<(), InsertError> {
        self.text = value.to_string();
        Ok(())
    }
    fn set_selection(&mut self, start: u32, _end: u32) -> Result<(), InsertError> {
        self.caret = start;
        Ok(())
    }
    fn focus(&mut self) -> Result<(), InsertError> {
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut detector = Detector::default();
    let mut buffer = Buffer::default();

    for arg in std::env::args().skip(1) {
        let event = if arg == "!" {
            detector.on_focus_change();
            continue;
        } else if let Some(code) = arg.strip_prefix('+') {
            KeyEvent::down(code)
        } else if let Some(code) = arg.strip_prefix('-') {
            KeyEvent::up(code)
        } else {
            anyhow::bail!("expected +Code, -Code or !, got {arg:?}");
        };

        if let KeyAction::Insert(ch) = detector.process_key(&event) {
            insert_char(EditTarget::TextValue(&mut buffer), ch)?;
        }
    }

    println!("{}", buffer.text);
    Ok(())
}
