//! Headless gesture replay.
//!
//! A replay file describes a widget layout and a script of pointer gestures.
//! Running it drives the interaction core against a [`HeadlessHost`] and
//! collects every output event.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use precis_core::{
    Activation, DragTuning, HeadlessHost, InteractionManager, KeyInput, Modifiers, OutputEvent,
    Registry, SettingsError, WidgetKind, WidgetSettings,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Replay loading and execution errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid widget settings: {0}")]
    Settings(#[from] SettingsError),
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// One widget to create before the gestures run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetEntry {
    pub kind: WidgetKind,
    #[serde(default)]
    pub settings: WidgetSettings,
}

/// A scripted input event. Widget-targeted gestures use the widget id as
/// the element handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Gesture {
    Enter {
        id: String,
    },
    Leave {
        id: String,
    },
    Down {
        id: String,
        #[serde(default)]
        precise: bool,
    },
    Move {
        dy: f64,
    },
    Up,
    Key {
        key: String,
        pressed: bool,
    },
    FocusLost,
}

/// A complete replay script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Replay {
    pub tuning: DragTuning,
    pub widgets: Vec<WidgetEntry>,
    pub gestures: Vec<Gesture>,
}

impl Replay {
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Read and parse a replay file.
pub fn load_replay(path: impl AsRef<Path>) -> ReplayResult<Replay> {
    let json = std::fs::read_to_string(path)?;
    Replay::from_json(&json)
}

/// Run `replay` against a headless host and return the emitted outputs in
/// order.
pub fn run_replay(replay: &Replay) -> ReplayResult<Vec<OutputEvent>> {
    let mut manager = InteractionManager::new(Registry::new(), HeadlessHost::new(), replay.tuning);
    for entry in &replay.widgets {
        manager.add_widget(entry.kind, entry.settings.clone())?;
    }

    let outputs = Rc::new(RefCell::new(Vec::new()));
    let sink = outputs.clone();
    manager.on_output(move |event| sink.borrow_mut().push(event.clone()));

    for gesture in &replay.gestures {
        apply(&mut manager, gesture);
    }

    let registry = manager.shutdown();
    log::info!(
        "Replayed {} gestures over {} widgets",
        replay.gestures.len(),
        registry.len()
    );
    Ok(outputs.take())
}

fn apply(manager: &mut InteractionManager<HeadlessHost>, gesture: &Gesture) {
    match gesture {
        Gesture::Enter { id } => manager.on_pointer_enter(id, Some(id.clone())),
        Gesture::Leave { id } => manager.on_pointer_leave(id),
        Gesture::Down { id, precise } => {
            let activation = if *precise {
                Activation::ContextMenu
            } else {
                Activation::Primary
            };
            manager.on_pointer_down(id, Some(id.clone()), activation);
        }
        Gesture::Move { dy } => manager.on_document_move(*dy),
        Gesture::Up => manager.on_document_up(),
        Gesture::Key { key, pressed } => manager.on_modifier_key(&KeyInput {
            key: key.clone(),
            pressed: *pressed,
            modifiers: Modifiers::default(),
        }),
        Gesture::FocusLost => manager.on_focus_lost(),
    }
}
