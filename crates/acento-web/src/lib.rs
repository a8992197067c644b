//! Browser host for the Spanish chord detector.
//!
//! Load the wasm module into a page (or paste the generated bindings into a
//! developer console) and call `install()`. Keep the returned handle: dropping
//! or freeing it removes the listeners again.

pub mod console;
pub mod dom;

use acento_core::{Detector, KeyAction, KeyEdge, KeyEvent, Profile};
use dom::DomTarget;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, KeyboardEvent, Window};

/// Window property marking a page that already has listeners registered.
/// Lives on `window` so a second copy of the module sees it too.
pub const GUARD_PROPERTY: &str = "__acentoInstalled";

type SharedDetector = Rc<RefCell<Detector>>;

fn js_err(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{err:#}"))
}

fn is_guarded(window: &Window) -> bool {
    js_sys::Reflect::get(window, &JsValue::from_str(GUARD_PROPERTY))
        .map(|v| v.is_truthy())
        .unwrap_or(false)
}

fn set_guard(window: &Window, installed: bool) -> Result<(), JsValue> {
    js_sys::Reflect::set(
        window,
        &JsValue::from_str(GUARD_PROPERTY),
        &JsValue::from_bool(installed),
    )?;
    Ok(())
}

fn parse_options(options: &JsValue) -> Result<Profile, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(Profile::default());
    }
    let json: String = js_sys::JSON::stringify(options)?.into();
    Profile::from_json(&json).map_err(js_err)
}

fn key_closure(
    edge: KeyEdge,
    detector: SharedDetector,
    window: Window,
    document: Document,
) -> Closure<dyn FnMut(KeyboardEvent)> {
    Closure::wrap(Box::new(move |event: KeyboardEvent| {
        let key_event = KeyEvent {
            code: event.code(),
            edge,
            repeat: event.repeat(),
        };
        // Release the borrow before touching the DOM; focus() can dispatch
        // events synchronously.
        let action = match detector.try_borrow_mut() {
            Ok(mut detector) => detector.process_key(&key_event),
            Err(_) => return,
        };

        if let KeyAction::Insert(ch) = action {
            // Consumed even when nothing ends up inserted.
            event.prevent_default();
            let mut target = DomTarget::active(&window, &document);
            match target.insert(ch) {
                Ok(inserted) => debug!(%ch, ?inserted, "character inserted"),
                Err(err) => debug!(%ch, target = target.kind(), %err, "insertion skipped"),
            }
        }
    }) as Box<dyn FnMut(KeyboardEvent)>)
}

fn focus_closure(detector: SharedDetector) -> Closure<dyn FnMut(Event)> {
    Closure::wrap(Box::new(move |event: Event| {
        if let Ok(mut detector) = detector.try_borrow_mut() {
            debug!(kind = %event.type_(), "focus changed, resetting held keys");
            detector.on_focus_change();
        }
    }) as Box<dyn FnMut(Event)>)
}

fn listen<T>(target: &EventTarget, kind: &str, closure: &Closure<T>) -> Result<(), JsValue>
where
    T: ?Sized,
{
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
}

fn unlisten<T>(target: &EventTarget, kind: &str, closure: &Closure<T>)
where
    T: ?Sized,
{
    let _ = target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
}

/// Registered listeners plus the detector they share.
#[wasm_bindgen]
pub struct Installation {
    window: Window,
    document: Document,
    detector: SharedDetector,
    on_key_down: Closure<dyn FnMut(KeyboardEvent)>,
    on_key_up: Closure<dyn FnMut(KeyboardEvent)>,
    on_focus_change: Closure<dyn FnMut(Event)>,
    active: bool,
}

/// Registers the chord listeners on the current page.
///
/// `options` is an optional object with `enabled`, `resetOnFocusChange`,
/// `suppressRepeat` and `logLevel` fields. Fails without registering anything
/// if the page already has an installation.
#[wasm_bindgen]
pub fn install(options: JsValue) -> Result<Installation, JsValue> {
    let profile = parse_options(&options)?;
    console::init(profile.level().map_err(js_err)?);

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    if is_guarded(&window) {
        warn!("Chord listeners already installed on this page, skipping");
        return Err(JsValue::from_str("acento is already installed on this page"));
    }

    let detector: SharedDetector = Rc::new(RefCell::new(Detector::new(profile)));
    let installation = Installation {
        on_key_down: key_closure(
            KeyEdge::Down,
            detector.clone(),
            window.clone(),
            document.clone(),
        ),
        on_key_up: key_closure(KeyEdge::Up, detector.clone(), window.clone(), document.clone()),
        on_focus_change: focus_closure(detector.clone()),
        detector,
        window,
        document,
        active: false,
    };
    installation.attach()
}

impl Installation {
    fn attach(mut self) -> Result<Self, JsValue> {
        let doc: &EventTarget = &self.document;
        let win: &EventTarget = &self.window;

        // Mark active first so a failure part way through detaches whatever
        // was registered when `self` is dropped.
        self.active = true;
        listen(doc, "keydown", &self.on_key_down)?;
        listen(doc, "keyup", &self.on_key_up)?;
        listen(doc, "visibilitychange", &self.on_focus_change)?;
        listen(win, "blur", &self.on_focus_change)?;
        listen(win, "focus", &self.on_focus_change)?;
        set_guard(&self.window, true)?;

        info!("Spanish chord listeners installed");
        Ok(self)
    }

    fn detach(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;

        let doc: &EventTarget = &self.document;
        let win: &EventTarget = &self.window;
        unlisten(doc, "keydown", &self.on_key_down);
        unlisten(doc, "keyup", &self.on_key_up);
        unlisten(doc, "visibilitychange", &self.on_focus_change);
        unlisten(win, "blur", &self.on_focus_change);
        unlisten(win, "focus", &self.on_focus_change);
        let _ = set_guard(&self.window, false);

        info!("Spanish chord listeners removed");
    }
}

#[wasm_bindgen]
impl Installation {
    /// Removes every listener and clears the page guard. Safe to call twice.
    pub fn uninstall(&mut self) {
        self.detach();
    }

    #[wasm_bindgen(js_name = isInstalled)]
    pub fn is_installed(&self) -> bool {
        self.active
    }

    #[wasm_bindgen(js_name = setEnabled)]
    pub fn set_enabled(&self, enabled: bool) {
        self.detector.borrow_mut().set_enabled(enabled);
    }

    #[wasm_bindgen(js_name = isEnabled)]
    pub fn is_enabled(&self) -> bool {
        self.detector.borrow().is_enabled()
    }

    /// Currently held keys, sorted, for poking at from the console.
    #[wasm_bindgen(js_name = pressedKeys)]
    pub fn pressed_keys(&self) -> Vec<String> {
        self.detector
            .borrow()
            .pressed()
            .sorted()
            .iter()
            .map(|key| key.to_string())
            .collect()
    }
}

impl Drop for Installation {
    fn drop(&mut self) {
        self.detach();
    }
}
