//! Exclusive pointer ownership.
//!
//! While a widget is being dragged it owns the pointer: the host locks the
//! pointer to the widget's element and binds document-level move/up/key
//! handlers that forward only to the recorded owner. [`ListenerManager`]
//! keeps `acquire` and `release` paired so at most one owner, and one set
//! of document bindings, exists at any time.

use std::fmt::Debug;

use crate::widget::Widget;

/// Platform side of pointer ownership.
///
/// The browser shell implements this with pointer lock and document event
/// listeners; [`HeadlessHost`] records the calls instead.
pub trait PointerHost {
    /// Handle to a rendered widget element.
    type Element: Clone + Debug;

    /// Lock the pointer to `element` so raw movement deltas keep arriving.
    fn request_pointer_lock(&mut self, element: &Self::Element);

    fn exit_pointer_lock(&mut self);

    /// Bind document-level move/up handlers and the element's key handlers.
    fn bind_document_listeners(&mut self, element: &Self::Element);

    fn unbind_document_listeners(&mut self, element: &Self::Element);

    fn focus(&mut self, element: &Self::Element);

    fn blur(&mut self, element: &Self::Element);
}

/// The widget currently holding the pointer, and its element.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerOwner<E> {
    pub widget_id: String,
    pub element: E,
}

/// Single-slot owner of pointer lock and document bindings.
#[derive(Debug)]
pub struct ListenerManager<H: PointerHost> {
    host: H,
    owner: Option<PointerOwner<H::Element>>,
}

impl<H: PointerHost> ListenerManager<H> {
    pub fn new(host: H) -> Self {
        Self { host, owner: None }
    }

    /// Record `(element, widget)` as the owner, lock the pointer and bind
    /// document listeners.
    ///
    /// No-op when either argument is absent. An owner that is already
    /// recorded is released first and returned so the caller can reset it.
    pub fn acquire(
        &mut self,
        element: Option<H::Element>,
        widget: Option<&Widget>,
    ) -> Option<PointerOwner<H::Element>> {
        let (Some(element), Some(widget)) = (element, widget) else {
            log::trace!("acquire ignored: missing element or widget");
            return None;
        };

        let replaced = self.release();
        if let Some(previous) = &replaced {
            log::warn!(
                "{} acquired the pointer while {} still held it",
                widget.id(),
                previous.widget_id
            );
        }

        self.host.request_pointer_lock(&element);
        self.host.bind_document_listeners(&element);
        log::debug!("Pointer acquired by {}", widget.id());
        self.owner = Some(PointerOwner {
            widget_id: widget.id().to_string(),
            element,
        });
        replaced
    }

    /// Unlock the pointer, unbind document listeners and clear the owner.
    ///
    /// Returns the owner that was released; `None` (and no host calls) when
    /// nothing was held.
    pub fn release(&mut self) -> Option<PointerOwner<H::Element>> {
        let owner = self.owner.take()?;
        self.host.exit_pointer_lock();
        self.host.unbind_document_listeners(&owner.element);
        log::debug!("Pointer released by {}", owner.widget_id);
        Some(owner)
    }

    pub fn owner(&self) -> Option<&PointerOwner<H::Element>> {
        self.owner.as_ref()
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner.as_ref().map(|owner| owner.widget_id.as_str())
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

/// A call made on a [`HeadlessHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    RequestPointerLock(String),
    ExitPointerLock,
    Bind(String),
    Unbind(String),
    Focus(String),
    Blur(String),
}

/// In-memory host for tests and native replay. Elements are plain strings.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    pub calls: Vec<HostCall>,
    locked: Option<String>,
    bound: Vec<String>,
    focused: Option<String>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locked(&self) -> Option<&str> {
        self.locked.as_deref()
    }

    /// Elements with document listeners bound, in binding order.
    pub fn bound(&self) -> &[String] {
        &self.bound
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }
}

impl PointerHost for HeadlessHost {
    type Element = String;

    fn request_pointer_lock(&mut self, element: &String) {
        self.calls.push(HostCall::RequestPointerLock(element.clone()));
        self.locked = Some(element.clone());
    }

    fn exit_pointer_lock(&mut self) {
        self.calls.push(HostCall::ExitPointerLock);
        self.locked = None;
    }

    fn bind_document_listeners(&mut self, element: &String) {
        self.calls.push(HostCall::Bind(element.clone()));
        self.bound.push(element.clone());
    }

    fn unbind_document_listeners(&mut self, element: &String) {
        self.calls.push(HostCall::Unbind(element.clone()));
        self.bound.retain(|bound| bound != element);
    }

    fn focus(&mut self, element: &String) {
        self.calls.push(HostCall::Focus(element.clone()));
        self.focused = Some(element.clone());
    }

    fn blur(&mut self, element: &String) {
        self.calls.push(HostCall::Blur(element.clone()));
        if self.focused.as_deref() == Some(element.as_str()) {
            self.focused = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{WidgetKind, WidgetSettings};

    fn widget(id: &str) -> Widget {
        let kind = if id.starts_with("dial") {
            WidgetKind::Radial
        } else {
            WidgetKind::Fader
        };
        Widget::from_settings(kind, WidgetSettings::new().with_id(id)).unwrap()
    }

    #[test]
    fn test_acquire_and_release_are_paired() {
        let mut manager = ListenerManager::new(HeadlessHost::new());
        let fader = widget("fader.0");

        manager.acquire(Some("el-fader".to_string()), Some(&fader));
        assert_eq!(manager.owner_id(), Some("fader.0"));
        assert_eq!(manager.host().locked(), Some("el-fader"));
        assert_eq!(manager.host().bound(), ["el-fader".to_string()]);

        let released = manager.release().unwrap();
        assert_eq!(released.widget_id, "fader.0");
        assert!(manager.owner().is_none());
        assert!(manager.host().locked().is_none());
        assert!(manager.host().bound().is_empty());
    }

    #[test]
    fn test_acquire_with_missing_args_is_noop() {
        let mut manager = ListenerManager::new(HeadlessHost::new());
        let fader = widget("fader.0");

        assert!(manager.acquire(None, Some(&fader)).is_none());
        assert!(manager.acquire(Some("el".to_string()), None).is_none());
        assert!(manager.owner().is_none());
        assert!(manager.host().calls.is_empty());
    }

    #[test]
    fn test_release_without_owner_is_noop() {
        let mut manager = ListenerManager::new(HeadlessHost::new());
        assert!(manager.release().is_none());
        assert!(manager.release().is_none());
        assert!(manager.host().calls.is_empty());
    }

    #[test]
    fn test_second_acquire_replaces_owner() {
        let mut manager = ListenerManager::new(HeadlessHost::new());
        let a = widget("dial.0");
        let b = widget("fader.0");

        manager.acquire(Some("el-a".to_string()), Some(&a));
        let replaced = manager.acquire(Some("el-b".to_string()), Some(&b));

        assert_eq!(replaced.unwrap().widget_id, "dial.0");
        assert_eq!(manager.owner_id(), Some("fader.0"));
        // Only the new owner's listeners remain bound.
        assert_eq!(manager.host().bound(), ["el-b".to_string()]);
        assert_eq!(
            manager.host().calls,
            vec![
                HostCall::RequestPointerLock("el-a".to_string()),
                HostCall::Bind("el-a".to_string()),
                HostCall::ExitPointerLock,
                HostCall::Unbind("el-a".to_string()),
                HostCall::RequestPointerLock("el-b".to_string()),
                HostCall::Bind("el-b".to_string()),
            ]
        );
    }

    #[test]
    fn test_headless_focus_and_blur() {
        let mut host = HeadlessHost::new();
        host.focus(&"el".to_string());
        assert_eq!(host.focused(), Some("el"));
        host.blur(&"other".to_string());
        assert_eq!(host.focused(), Some("el"));
        host.blur(&"el".to_string());
        assert!(host.focused().is_none());
    }
}
