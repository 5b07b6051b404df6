//! WebAssembly entry point and DOM bindings.
//!
//! [`PrecisUi`] owns an [`InteractionManager`] driven by a [`WebHost`] that
//! maps pointer ownership onto the browser's pointer lock and document
//! event listeners. Output events are queued while the manager is borrowed
//! and delivered to JavaScript callbacks afterwards.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use precis_core::{
    Activation, DragTuning, InteractionManager, KeyInput, Modifiers, MouseButton, OutputEvent,
    PointerHost, Registry, WidgetKind, WidgetSettings,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement, KeyboardEvent, MouseEvent, Window};

type Manager = RefCell<InteractionManager<WebHost>>;

/// Run `f` on the manager if it is still alive and not already borrowed.
fn with_manager(manager: &Weak<Manager>, f: impl FnOnce(&mut InteractionManager<WebHost>)) {
    let Some(manager) = manager.upgrade() else {
        return;
    };
    match manager.try_borrow_mut() {
        Ok(mut manager) => f(&mut manager),
        Err(_) => log::warn!("Dropped DOM event: interaction manager is busy"),
    };
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Output events waiting for delivery, and the JavaScript subscribers.
#[derive(Clone, Default)]
struct Outbox {
    pending: Rc<RefCell<Vec<OutputEvent>>>,
    refresh_pending: Rc<Cell<bool>>,
    on_output: Rc<RefCell<Vec<js_sys::Function>>>,
    on_refresh: Rc<RefCell<Vec<js_sys::Function>>>,
}

impl Outbox {
    /// Deliver queued events. Must not run while the manager is borrowed.
    fn flush(&self) {
        let events = self.pending.take();
        let callbacks = self.on_output.borrow().clone();
        for event in &events {
            let value = match serde_wasm_bindgen::to_value(event) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!("Could not convert output for {}: {}", event.id, e);
                    continue;
                }
            };
            for callback in &callbacks {
                if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                    log::warn!("Output callback failed: {:?}", e);
                }
            }
        }

        if self.refresh_pending.replace(false) {
            for callback in self.on_refresh.borrow().clone() {
                if let Err(e) = callback.call0(&JsValue::NULL) {
                    log::warn!("Refresh callback failed: {:?}", e);
                }
            }
        }
    }
}

/// Pointer host backed by the DOM.
pub struct WebHost {
    document: Document,
    // Store closures to prevent them from being dropped
    on_move: Closure<dyn FnMut(MouseEvent)>,
    on_up: Closure<dyn FnMut(MouseEvent)>,
    on_key: Closure<dyn FnMut(KeyboardEvent)>,
}

impl WebHost {
    fn new(document: Document, manager: Weak<Manager>, outbox: Outbox) -> Self {
        let move_manager = manager.clone();
        let move_outbox = outbox.clone();
        let on_move = Closure::wrap(Box::new(move |e: MouseEvent| {
            with_manager(&move_manager, |m| m.on_document_move(f64::from(e.movement_y())));
            move_outbox.flush();
        }) as Box<dyn FnMut(MouseEvent)>);

        let up_manager = manager.clone();
        let up_outbox = outbox.clone();
        let on_up = Closure::wrap(Box::new(move |_e: MouseEvent| {
            with_manager(&up_manager, |m| m.on_document_up());
            up_outbox.flush();
        }) as Box<dyn FnMut(MouseEvent)>);

        let on_key = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            let key = KeyInput {
                key: e.key(),
                pressed: e.type_() == "keydown",
                modifiers: Modifiers {
                    shift: e.shift_key(),
                    ctrl: e.ctrl_key(),
                    alt: e.alt_key(),
                    meta: e.meta_key(),
                },
            };
            with_manager(&manager, |m| m.on_modifier_key(&key));
        }) as Box<dyn FnMut(KeyboardEvent)>);

        Self {
            document,
            on_move,
            on_up,
            on_key,
        }
    }
}

impl PointerHost for WebHost {
    type Element = HtmlElement;

    fn request_pointer_lock(&mut self, element: &HtmlElement) {
        element.request_pointer_lock();
    }

    fn exit_pointer_lock(&mut self) {
        self.document.exit_pointer_lock();
    }

    fn bind_document_listeners(&mut self, element: &HtmlElement) {
        let document_bindings = [("mousemove", &self.on_move), ("mouseup", &self.on_up)];
        for (event, closure) in document_bindings {
            if let Err(e) = self
                .document
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            {
                log::warn!("Failed to bind document {}: {:?}", event, e);
            }
        }
        for event in ["keydown", "keyup"] {
            if let Err(e) =
                element.add_event_listener_with_callback(event, self.on_key.as_ref().unchecked_ref())
            {
                log::warn!("Failed to bind element {}: {:?}", event, e);
            }
        }
    }

    fn unbind_document_listeners(&mut self, element: &HtmlElement) {
        let document_bindings = [("mousemove", &self.on_move), ("mouseup", &self.on_up)];
        for (event, closure) in document_bindings {
            if let Err(e) = self
                .document
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            {
                log::warn!("Failed to unbind document {}: {:?}", event, e);
            }
        }
        for event in ["keydown", "keyup"] {
            if let Err(e) =
                element.remove_event_listener_with_callback(event, self.on_key.as_ref().unchecked_ref())
            {
                log::warn!("Failed to unbind element {}: {:?}", event, e);
            }
        }
    }

    fn focus(&mut self, element: &HtmlElement) {
        if let Err(e) = element.focus() {
            log::warn!("Failed to focus element: {:?}", e);
        }
    }

    fn blur(&mut self, element: &HtmlElement) {
        if let Err(e) = element.blur() {
            log::warn!("Failed to blur element: {:?}", e);
        }
    }
}

/// Element the handler was attached to.
fn event_element(event: &Event) -> Option<HtmlElement> {
    event.current_target()?.dyn_into::<HtmlElement>().ok()
}

/// Browser handle to a set of Precis controls.
#[wasm_bindgen]
pub struct PrecisUi {
    manager: Rc<Manager>,
    outbox: Outbox,
    window: Window,
    document: Document,
    // Window-level listeners live as long as the UI
    on_blur: Closure<dyn FnMut(Event)>,
    on_lock_change: Closure<dyn FnMut(Event)>,
}

#[wasm_bindgen]
impl PrecisUi {
    /// Create a UI. `tuning` is an optional `DragTuning` object.
    #[wasm_bindgen(constructor)]
    pub fn new(tuning: JsValue) -> Result<PrecisUi, JsValue> {
        let tuning: DragTuning = if tuning.is_undefined() || tuning.is_null() {
            DragTuning::default()
        } else {
            serde_wasm_bindgen::from_value(tuning).map_err(to_js_error)?
        };
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("No document"))?;

        let outbox = Outbox::default();
        let manager = Rc::new_cyclic(|weak: &Weak<Manager>| {
            let host = WebHost::new(document.clone(), weak.clone(), outbox.clone());
            let mut manager = InteractionManager::new(Registry::new(), host, tuning);
            let pending = outbox.pending.clone();
            manager.on_output(move |event| pending.borrow_mut().push(event.clone()));
            let refresh = outbox.refresh_pending.clone();
            manager.on_refresh(move || refresh.set(true));
            RefCell::new(manager)
        });

        let blur_manager = Rc::downgrade(&manager);
        let blur_outbox = outbox.clone();
        let on_blur = Closure::wrap(Box::new(move |_e: Event| {
            with_manager(&blur_manager, |m| m.on_focus_lost());
            blur_outbox.flush();
        }) as Box<dyn FnMut(Event)>);
        window.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref())?;

        let lock_manager = Rc::downgrade(&manager);
        let lock_outbox = outbox.clone();
        let lock_document = document.clone();
        let on_lock_change = Closure::wrap(Box::new(move |_e: Event| {
            if lock_document.pointer_lock_element().is_none() {
                with_manager(&lock_manager, |m| m.on_focus_lost());
                lock_outbox.flush();
            }
        }) as Box<dyn FnMut(Event)>);
        document.add_event_listener_with_callback(
            "pointerlockchange",
            on_lock_change.as_ref().unchecked_ref(),
        )?;

        log::info!("Precis UI ready");
        Ok(Self {
            manager,
            outbox,
            window,
            document,
            on_blur,
            on_lock_change,
        })
    }

    /// Create a widget of `kind` (`"dial"`, `"fader"` or `"toggle"`).
    /// Returns its id.
    #[wasm_bindgen(js_name = addWidget)]
    pub fn add_widget(&self, kind: &str, settings: JsValue) -> Result<String, JsValue> {
        let kind: WidgetKind = kind.parse().map_err(to_js_error)?;
        let settings: WidgetSettings = if settings.is_undefined() || settings.is_null() {
            WidgetSettings::default()
        } else {
            serde_wasm_bindgen::from_value(settings).map_err(to_js_error)?
        };
        let id = self
            .manager
            .borrow_mut()
            .add_widget(kind, settings)
            .map_err(to_js_error)?;
        Ok(id)
    }

    #[wasm_bindgen(js_name = removeWidget)]
    pub fn remove_widget(&self, id: &str) -> bool {
        self.manager.borrow_mut().remove_widget(id)
    }

    /// Subscribe to `{id, value}` output events.
    #[wasm_bindgen(js_name = onOutput)]
    pub fn on_output(&self, callback: js_sys::Function) {
        self.outbox.on_output.borrow_mut().push(callback);
    }

    /// Subscribe to refresh notifications after bulk layout changes.
    #[wasm_bindgen(js_name = onRefresh)]
    pub fn on_refresh(&self, callback: js_sys::Function) {
        self.outbox.on_refresh.borrow_mut().push(callback);
    }

    #[wasm_bindgen(js_name = pointerEnter)]
    pub fn pointer_enter(&self, id: &str, event: &MouseEvent) {
        let element = event_element(event);
        self.manager.borrow_mut().on_pointer_enter(id, element);
        self.outbox.flush();
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&self, id: &str) {
        self.manager.borrow_mut().on_pointer_leave(id);
        self.outbox.flush();
    }

    /// Handle `mousedown` or `contextmenu` on a widget element. A
    /// `contextmenu` event starts a precision drag.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, id: &str, event: &MouseEvent) {
        let activation = if event.type_() == "contextmenu" {
            event.prevent_default();
            Activation::ContextMenu
        } else {
            MouseButton::from_dom(event.button())
                .map(Activation::from_button)
                .unwrap_or_default()
        };
        let element = event_element(event);
        self.manager
            .borrow_mut()
            .on_pointer_down(id, element, activation);
        self.outbox.flush();
    }

    #[wasm_bindgen(js_name = scaleAll)]
    pub fn scale_all(&self, scale: f64) {
        self.manager.borrow_mut().scale_all(scale);
        self.outbox.flush();
    }

    #[wasm_bindgen(js_name = mappedValue)]
    pub fn mapped_value(&self, id: &str) -> Option<f64> {
        self.manager
            .borrow()
            .registry()
            .lookup(id)
            .map(|widget| widget.mapped_value())
    }

    #[wasm_bindgen(js_name = roundedReadout)]
    pub fn rounded_readout(&self, id: &str) -> Option<String> {
        self.manager
            .borrow()
            .registry()
            .lookup(id)
            .map(|widget| widget.rounded_readout())
    }

    /// Dial pointer angle in degrees.
    #[wasm_bindgen(js_name = radialTrack)]
    pub fn radial_track(&self, id: &str) -> Option<f64> {
        self.manager
            .borrow()
            .registry()
            .lookup(id)
            .and_then(|widget| widget.radial_track())
    }

    /// Dial pointer points as `[{x, y}, ...]`.
    #[wasm_bindgen(js_name = spinPointer)]
    pub fn spin_pointer(&self, id: &str) -> Result<JsValue, JsValue> {
        let mut manager = self.manager.borrow_mut();
        let points = manager
            .registry_mut()
            .lookup_mut(id)
            .and_then(|widget| widget.spin_pointer().map(<[_]>::to_vec))
            .unwrap_or_default();
        serde_wasm_bindgen::to_value(&points).map_err(to_js_error)
    }

    /// Dial tick mark lines as `[{p0, p1}, ...]`.
    #[wasm_bindgen(js_name = tickMarks)]
    pub fn tick_marks(&self, id: &str) -> Result<JsValue, JsValue> {
        let lines = self
            .manager
            .borrow()
            .registry()
            .lookup(id)
            .map(|widget| widget.tick_marks())
            .unwrap_or_default();
        serde_wasm_bindgen::to_value(&lines).map_err(to_js_error)
    }
}

impl Drop for PrecisUi {
    fn drop(&mut self) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("blur", self.on_blur.as_ref().unchecked_ref())
        {
            log::warn!("Failed to unbind window blur: {:?}", e);
        }
        if let Err(e) = self.document.remove_event_listener_with_callback(
            "pointerlockchange",
            self.on_lock_change.as_ref().unchecked_ref(),
        ) {
            log::warn!("Failed to unbind pointerlockchange: {:?}", e);
        }
        // The WebHost closures die with the manager, so unbind them first.
        match self.manager.try_borrow_mut() {
            Ok(mut manager) => manager.release_pointer(),
            Err(_) => log::warn!("Interaction manager busy while dropping the UI"),
        }
    }
}

/// Initialize logging for the WASM module.
#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&JsValue::from_str("Logger already initialized"));
    }
    log::info!("Starting Precis (WASM)");
}
