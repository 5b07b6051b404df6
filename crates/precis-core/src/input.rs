//! Pointer and keyboard input as seen by the interaction state machine.

use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// DOM `MouseEvent.button` index.
    pub fn from_dom(button: i16) -> Option<Self> {
        match button {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Middle),
            2 => Some(MouseButton::Right),
            _ => None,
        }
    }
}

/// How a pointer-down was triggered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    /// Ordinary press; starts a normal-mode drag.
    #[default]
    Primary,
    /// Context-menu style press (secondary button); starts a precision drag.
    ContextMenu,
}

impl Activation {
    pub fn from_button(button: MouseButton) -> Self {
        match button {
            MouseButton::Right => Activation::ContextMenu,
            MouseButton::Left | MouseButton::Middle => Activation::Primary,
        }
    }

    /// Whether the drag this starts is in precision mode.
    pub fn is_precise(&self) -> bool {
        matches!(self, Activation::ContextMenu)
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// A key press or release delivered to the owning widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: String,
    pub pressed: bool,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn pressed(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            pressed: true,
            modifiers: Modifiers::default(),
        }
    }

    pub fn released(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            pressed: false,
            modifiers: Modifiers::default(),
        }
    }
}
