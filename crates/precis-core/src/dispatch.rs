//! Output dispatch.
//!
//! The only channel through which computed values leave the core. Hosts
//! subscribe with [`OutputDispatcher::on_output`]; the core emits one
//! [`OutputEvent`] per value change.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::widget::Widget;

/// A widget's id and its current mapped value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEvent {
    pub id: String,
    pub value: f64,
}

impl OutputEvent {
    pub fn new(id: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }

    /// Snapshot of `widget`'s mapped value.
    pub fn from_widget(widget: &Widget) -> Self {
        Self::new(widget.id(), widget.mapped_value())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type OutputCallback = Box<dyn FnMut(&OutputEvent)>;
type RefreshCallback = Box<dyn FnMut()>;

/// Plain observer list for output and refresh notifications.
#[derive(Default)]
pub struct OutputDispatcher {
    next_id: u64,
    outputs: Vec<(SubscriptionId, OutputCallback)>,
    refreshes: Vec<(SubscriptionId, RefreshCallback)>,
}

impl fmt::Debug for OutputDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputDispatcher")
            .field("outputs", &self.outputs.len())
            .field("refreshes", &self.refreshes.len())
            .finish()
    }
}

impl OutputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_subscription(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Subscribe to output events.
    pub fn on_output(&mut self, callback: impl FnMut(&OutputEvent) + 'static) -> SubscriptionId {
        let id = self.next_subscription();
        self.outputs.push((id, Box::new(callback)));
        id
    }

    /// Subscribe to refresh notifications sent after bulk layout changes.
    pub fn on_refresh(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        let id = self.next_subscription();
        self.refreshes.push((id, Box::new(callback)));
        id
    }

    /// Drop a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.outputs.len() + self.refreshes.len();
        self.outputs.retain(|(sub, _)| *sub != id);
        self.refreshes.retain(|(sub, _)| *sub != id);
        before != self.outputs.len() + self.refreshes.len()
    }

    /// Deliver `event` to every output subscriber, in subscription order.
    pub fn emit(&mut self, event: &OutputEvent) {
        log::trace!("output {} = {}", event.id, event.value);
        for (_, callback) in &mut self.outputs {
            callback(event);
        }
    }

    /// Emit the current mapped value of `widget`.
    pub fn dispatch_output(&mut self, widget: &Widget) {
        self.emit(&OutputEvent::from_widget(widget));
    }

    pub fn emit_refresh(&mut self) {
        for (_, callback) in &mut self.refreshes {
            callback();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.outputs.len()
    }
}
