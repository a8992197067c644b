use crate::error::InsertError;
use tracing::debug;

/// An element holding a plain string value (`<input>`, `<textarea>`).
///
/// Offsets are in UTF-16 code units, which is what the DOM selection API
/// reports.
pub trait TextValueTarget {
    fn value(&self) -> String;
    /// `None` when the element type has no caret (e.g. `<input type=email>`).
    fn selection(&self) -> Option<(u32, u32)>;
    fn set_value(&mut self, value: &str) -> Result<(), InsertError>;
    fn set_selection(&mut self, start: u32, end: u32) -> Result<(), InsertError>;
    fn focus(&mut self) -> Result<(), InsertError>;
}

/// A rich-text region edited through the document selection.
pub trait ContentEditableTarget {
    fn has_selection_range(&self) -> bool;
    /// Inserts `text` as a new text node at the first selection range and
    /// collapses the selection to just after it.
    fn insert_text_at_selection(&mut self, text: &str) -> Result<(), InsertError>;
    fn focus(&mut self) -> Result<(), InsertError>;
}

/// The focused element, resolved by the host for a single insertion.
pub enum EditTarget<'a> {
    TextValue(&'a mut dyn TextValueTarget),
    ContentEditable(&'a mut dyn ContentEditableTarget),
    /// Focus is on something that cannot take text (a button, the body).
    Inert,
}

/// Where the character went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inserted {
    TextValue { caret: u32 },
    ContentEditable,
}

/// Inserts `ch` at the caret of `target`, replacing any selection, and
/// leaves the caret right after it.
pub fn insert_char(target: EditTarget<'_>, ch: char) -> Result<Inserted, InsertError> {
    match target {
        EditTarget::TextValue(field) => {
            let (start, end) = field.selection().ok_or(InsertError::NoSelection)?;
            let (value, caret) = splice_utf16(&field.value(), start, end, ch);
            field.set_value(&value)?;
            field.set_selection(caret, caret)?;
            // Assigning the value can drop focus in some hosts.
            field.focus()?;
            debug!(%ch, caret, "inserted into text field");
            Ok(Inserted::TextValue { caret })
        }
        EditTarget::ContentEditable(region) => {
            if !region.has_selection_range() {
                return Err(InsertError::NoSelection);
            }
            let mut buf = [0u8; 4];
            region.insert_text_at_selection(ch.encode_utf8(&mut buf))?;
            region.focus()?;
            debug!(%ch, "inserted into content-editable");
            Ok(Inserted::ContentEditable)
        }
        EditTarget::Inert => Err(InsertError::NoTarget),
    }
}

/// Replaces the UTF-16 range `[start, end)` of `value` with `ch`.
///
/// Offsets past the end are clamped, a reversed range is reordered, and an
/// offset falling inside a surrogate pair is moved back to the start of that
/// character. Returns the new value and the caret offset after `ch`.
pub fn splice_utf16(value: &str, start: u32, end: u32, ch: char) -> (String, u32) {
    let (start, end) = if start <= end { (start, end) } else { (end, start) };
    let head = byte_index(value, start);
    let tail = byte_index(value, end);

    let mut out = String::with_capacity(value.len() + ch.len_utf8());
    out.push_str(&value[..head]);
    out.push(ch);
    out.push_str(&value[tail..]);

    let caret = value[..head].encode_utf16().count() as u32 + ch.len_utf16() as u32;
    (out, caret)
}

fn byte_index(value: &str, utf16_offset: u32) -> usize {
    let mut units = 0u32;
    for (idx, c) in value.char_indices() {
        if units >= utf16_offset {
            return idx;
        }
        units += c.len_utf16() as u32;
        if units > utf16_offset {
            return idx;
        }
    }
    value.len()
}
