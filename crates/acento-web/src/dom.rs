use acento_core::{
    insert_char, ContentEditableTarget, EditTarget, InsertError, Inserted, TextValueTarget,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Window};

fn host_err(err: JsValue) -> InsertError {
    InsertError::Host(format!("{err:?}"))
}

/// `<input>` and `<textarea>` share the value/selection API but not a type.
macro_rules! text_value_target {
    ($name:ident, $element:ty) => {
        pub struct $name($element);

        impl TextValueTarget for $name {
            fn value(&self) -> String {
                self.0.value()
            }

            fn selection(&self) -> Option<(u32, u32)> {
                let start = self.0.selection_start().ok().flatten()?;
                let end = self.0.selection_end().ok().flatten()?;
                Some((start, end))
            }

            fn set_value(&mut self, value: &str) -> Result<(), InsertError> {
                self.0.set_value(value);
                Ok(())
            }

            fn set_selection(&mut self, start: u32, end: u32) -> Result<(), InsertError> {
                self.0.set_selection_range(start, end).map_err(host_err)
            }

            fn focus(&mut self) -> Result<(), InsertError> {
                self.0.focus().map_err(host_err)
            }
        }
    };
}

text_value_target!(InputField, HtmlInputElement);
text_value_target!(TextAreaField, HtmlTextAreaElement);

/// A `contenteditable` element edited through the window selection.
pub struct EditableRegion {
    element: HtmlElement,
    window: Window,
    document: Document,
}

impl ContentEditableTarget for EditableRegion {
    fn has_selection_range(&self) -> bool {
        matches!(self.window.get_selection(), Ok(Some(sel)) if sel.range_count() > 0)
    }

    fn insert_text_at_selection(&mut self, text: &str) -> Result<(), InsertError> {
        let selection = self
            .window
            .get_selection()
            .map_err(host_err)?
            .ok_or(InsertError::NoSelection)?;
        let range = selection.get_range_at(0).map_err(host_err)?;
        let node = self.document.create_text_node(text);

        range.insert_node(&node).map_err(host_err)?;
        range.set_start_after(&node).map_err(host_err)?;
        range.set_end_after(&node).map_err(host_err)?;
        selection.remove_all_ranges().map_err(host_err)?;
        selection.add_range(&range).map_err(host_err)
    }

    fn focus(&mut self) -> Result<(), InsertError> {
        self.element.focus().map_err(host_err)
    }
}

/// The focused element, classified into one of the kinds the inserter knows.
pub enum DomTarget {
    Input(InputField),
    TextArea(TextAreaField),
    Editable(EditableRegion),
    Inert,
}

impl DomTarget {
    /// Looks up `document.activeElement`. Called fresh for every insertion.
    pub fn active(window: &Window, document: &Document) -> Self {
        let Some(active) = document.active_element() else {
            return DomTarget::Inert;
        };

        if let Some(input) = active.dyn_ref::<HtmlInputElement>() {
            return DomTarget::Input(InputField(input.clone()));
        }
        if let Some(area) = active.dyn_ref::<HtmlTextAreaElement>() {
            return DomTarget::TextArea(TextAreaField(area.clone()));
        }
        match active.dyn_into::<HtmlElement>() {
            Ok(element) if element.is_content_editable() => DomTarget::Editable(EditableRegion {
                element,
                window: window.clone(),
                document: document.clone(),
            }),
            _ => DomTarget::Inert,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DomTarget::Input(_) => "input",
            DomTarget::TextArea(_) => "textarea",
            DomTarget::Editable(_) => "contenteditable",
            DomTarget::Inert => "inert",
        }
    }

    pub fn as_edit_target(&mut self) -> EditTarget<'_> {
        match self {
            DomTarget::Input(field) => EditTarget::TextValue(field),
            DomTarget::TextArea(field) => EditTarget::TextValue(field),
            DomTarget::Editable(region) => EditTarget::ContentEditable(region),
            DomTarget::Inert => EditTarget::Inert,
        }
    }

    pub fn insert(&mut self, ch: char) -> Result<Inserted, InsertError> {
        insert_char(self.as_edit_target(), ch)
    }
}
