//! Widget registry: id → widget.

use std::collections::HashMap;

use crate::widget::{SettingsResult, Widget, WidgetKind, WidgetSettings};

/// Explicitly owned store of every mounted widget.
///
/// Ids are unique; registering an id that is already present overwrites the
/// previous widget.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    widgets: HashMap<String, Widget>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `widget` under its id.
    ///
    /// Records the registry size after insertion as the widget's
    /// registry index. Returns the widget that was replaced, if any.
    pub fn register(&mut self, widget: Widget) -> Option<Widget> {
        let id = widget.id().to_string();
        let previous = self.widgets.insert(id.clone(), widget);
        let index = self.widgets.len();
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.set_registry_index(index);
        }
        if previous.is_some() {
            log::debug!("Registry overwrote {}", id);
        } else {
            log::debug!("Registered {} at index {}", id, index);
        }
        previous
    }

    /// Build a widget from settings and register it.
    ///
    /// When `settings.id` is absent the next free `"<kind>.<n>"` id is used.
    /// Returns the id the widget was registered under.
    pub fn create(&mut self, kind: WidgetKind, mut settings: WidgetSettings) -> SettingsResult<String> {
        if settings.id.is_none() {
            settings.id = Some(self.next_id(kind));
        }
        let widget = Widget::from_settings(kind, settings)?;
        let id = widget.id().to_string();
        self.register(widget);
        Ok(id)
    }

    /// First `"<kind>.<n>"` id not yet in use.
    pub fn next_id(&self, kind: WidgetKind) -> String {
        (0..)
            .map(|n| format!("{}.{}", kind.tag(), n))
            .find(|id| !self.widgets.contains_key(id))
            .unwrap_or_else(|| format!("{}.{}", kind.tag(), self.widgets.len()))
    }

    pub fn lookup(&self, id: &str) -> Option<&Widget> {
        self.widgets.get(id)
    }

    pub fn lookup_mut(&mut self, id: &str) -> Option<&mut Widget> {
        self.widgets.get_mut(id)
    }

    /// Remove a widget. Removal is the host's call; the core never does it.
    pub fn remove(&mut self, id: &str) -> Option<Widget> {
        self.widgets.remove(id)
    }

    /// Apply `f` to every registered widget.
    pub fn for_each_widget(&mut self, mut f: impl FnMut(&mut Widget)) {
        for widget in self.widgets.values_mut() {
            f(widget);
        }
    }

    /// Set the rendering scale of every widget.
    pub fn scale_all(&mut self, scale: f64) {
        self.for_each_widget(|widget| widget.core_mut().scale = scale);
    }

    /// Read-only view of the full mapping.
    pub fn all(&self) -> &HashMap<String, Widget> {
        &self.widgets
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.widgets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
