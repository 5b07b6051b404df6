//! Interaction state machine.
//!
//! Drives the drag lifecycle `Idle → Focused → Changing → Idle` for every
//! registered widget, routes document-level events to the single pointer
//! owner and dispatches output after each value change.

use crate::dispatch::{OutputDispatcher, OutputEvent, SubscriptionId};
use crate::input::{Activation, KeyInput};
use crate::listener::{ListenerManager, PointerHost, PointerOwner};
use crate::registry::Registry;
use crate::tuning::DragTuning;
use crate::widget::{PressBehavior, SettingsResult, StateFlags, WidgetKind, WidgetSettings};

/// Owns the registry, pointer ownership and output dispatch for one UI.
#[derive(Debug)]
pub struct InteractionManager<H: PointerHost> {
    registry: Registry,
    listeners: ListenerManager<H>,
    dispatcher: OutputDispatcher,
    tuning: DragTuning,
    /// Element that last received pointer focus.
    selected: Option<H::Element>,
}

impl<H: PointerHost> InteractionManager<H> {
    pub fn new(registry: Registry, host: H, tuning: DragTuning) -> Self {
        Self {
            registry,
            listeners: ListenerManager::new(host),
            dispatcher: OutputDispatcher::new(),
            tuning,
            selected: None,
        }
    }

    /// Release any pointer owner and hand the registry back.
    pub fn shutdown(mut self) -> Registry {
        self.release_pointer();
        self.registry
    }

    /// Unconditionally end any drag in progress without dispatching.
    ///
    /// Unlike [`Self::on_focus_lost`] this ignores `release_on_focus_loss`,
    /// so hosts can call it before tearing down their listeners.
    pub fn release_pointer(&mut self) {
        if let Some(owner) = self.listeners.release() {
            self.reset_flags(&owner.widget_id);
            self.selected = None;
        }
    }

    /// Build and register a widget. Returns its id.
    pub fn add_widget(&mut self, kind: WidgetKind, settings: WidgetSettings) -> SettingsResult<String> {
        self.registry.create(kind, settings)
    }

    /// Unregister a widget, releasing the pointer first if it owns it.
    pub fn remove_widget(&mut self, id: &str) -> bool {
        if self.listeners.owner_id() == Some(id) {
            self.release_pointer();
        }
        self.registry.remove(id).is_some()
    }

    /// Pointer entered a widget's element.
    pub fn on_pointer_enter(&mut self, id: &str, element: Option<H::Element>) {
        let (Some(widget), Some(element)) = (self.registry.lookup_mut(id), element) else {
            log::trace!("pointer enter ignored for {}", id);
            return;
        };
        if widget.core().is_changing() {
            return;
        }
        // Keys are bound on the owner's element; focus stays there mid-drag.
        if self.listeners.owner_id().is_some_and(|owner| owner != id) {
            log::trace!("pointer enter on {} ignored during drag", id);
            return;
        }
        widget.flags_mut().focussed = true;
        self.listeners.host_mut().focus(&element);
        self.selected = Some(element);
    }

    /// Pointer left a widget's element. Ignored mid-drag.
    pub fn on_pointer_leave(&mut self, id: &str) {
        let Some(widget) = self.registry.lookup_mut(id) else {
            log::trace!("pointer leave ignored for {}", id);
            return;
        };
        if widget.core().is_changing() {
            return;
        }
        widget.flags_mut().focussed = false;
    }

    /// Pointer pressed on a widget's element.
    ///
    /// Drag widgets enter `Changing` and take pointer ownership. Toggles flip
    /// and dispatch at once without taking ownership.
    pub fn on_pointer_down(&mut self, id: &str, element: Option<H::Element>, activation: Activation) {
        let (Some(widget), Some(element)) = (self.registry.lookup_mut(id), element) else {
            log::trace!("pointer down ignored for {}", id);
            return;
        };

        match widget.press_behavior() {
            PressBehavior::Immediate => {
                widget.set_flags(StateFlags::dragging(activation.is_precise()));
                widget.press_toggle();
                self.dispatcher.dispatch_output(widget);
                // Nothing follows the press, so the drag ends here.
                widget.set_flags(StateFlags {
                    focussed: true,
                    ..StateFlags::default()
                });
                self.selected = Some(element);
            }
            PressBehavior::Drag => {
                widget.set_flags(StateFlags::dragging(activation.is_precise()));
                self.selected = Some(element.clone());
                let replaced = self
                    .listeners
                    .acquire(Some(element), self.registry.lookup(id));
                if let Some(previous) = replaced.filter(|owner| owner.widget_id != id) {
                    self.reset_flags(&previous.widget_id);
                }
            }
        }
    }

    /// Document-level vertical movement, routed to the pointer owner.
    pub fn on_document_move(&mut self, dy: f64) {
        let Some(owner) = self.listeners.owner_id() else {
            log::trace!("move ignored: no pointer owner");
            return;
        };
        let Some(widget) = self.registry.lookup_mut(owner) else {
            return;
        };
        if widget.core_mut().apply_drag(dy, &self.tuning) {
            self.dispatcher.dispatch_output(widget);
        }
    }

    /// Document-level pointer-up, ending the owner's drag.
    pub fn on_document_up(&mut self) {
        let Some(owner) = self.listeners.owner().cloned() else {
            log::trace!("pointer up ignored: no pointer owner");
            return;
        };
        self.finish_drag(owner);
    }

    /// Key press or release while a widget owns the pointer.
    ///
    /// Reserved for a keyboard precision modifier; has no effect yet.
    pub fn on_modifier_key(&mut self, key: &KeyInput) {
        if let Some(owner) = self.listeners.owner_id() {
            log::trace!("modifier key {:?} on {} (pressed: {})", key.key, owner, key.pressed);
        }
    }

    /// Window blur or pointer lock lost while a drag may be in progress.
    ///
    /// Ends the drag like a pointer-up when `release_on_focus_loss` is set.
    pub fn on_focus_lost(&mut self) {
        if !self.tuning.release_on_focus_loss {
            return;
        }
        if let Some(owner) = self.listeners.owner().cloned() {
            log::debug!("Focus lost during drag of {}", owner.widget_id);
            self.finish_drag(owner);
        }
    }

    fn finish_drag(&mut self, owner: PointerOwner<H::Element>) {
        if let Some(widget) = self.registry.lookup_mut(&owner.widget_id) {
            let flags = widget.flags_mut();
            flags.changing = false;
            flags.precis = false;
        }
        self.listeners.host_mut().blur(&owner.element);
        self.selected = None;
        self.listeners.release();
        if let Some(widget) = self.registry.lookup(&owner.widget_id) {
            self.dispatcher.dispatch_output(widget);
        }
    }

    fn reset_flags(&mut self, id: &str) {
        if let Some(widget) = self.registry.lookup_mut(id) {
            widget.set_flags(StateFlags::default());
        }
    }

    /// Set the rendering scale of every widget and notify refresh listeners.
    pub fn scale_all(&mut self, scale: f64) {
        self.registry.scale_all(scale);
        self.dispatcher.emit_refresh();
    }

    pub fn on_output(&mut self, callback: impl FnMut(&OutputEvent) + 'static) -> SubscriptionId {
        self.dispatcher.on_output(callback)
    }

    pub fn on_refresh(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        self.dispatcher.on_refresh(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn tuning(&self) -> &DragTuning {
        &self.tuning
    }

    pub fn set_tuning(&mut self, tuning: DragTuning) {
        self.tuning = tuning;
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.listeners.owner_id()
    }

    pub fn selected(&self) -> Option<&H::Element> {
        self.selected.as_ref()
    }

    pub fn host(&self) -> &H {
        self.listeners.host()
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.listeners.host_mut()
    }
}
