//! Interaction state flags.

use serde::{Deserialize, Serialize};

/// Raw flags mutated by the interaction state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateFlags {
    /// Fine-adjustment sub-mode, only set when a drag starts.
    pub precis: bool,
    /// Pointer is over the widget, or the widget is being dragged.
    pub focussed: bool,
    /// Widget owns the pointer and is being dragged.
    pub changing: bool,
}

impl StateFlags {
    /// Flags for a freshly started drag.
    pub fn dragging(precise: bool) -> Self {
        Self {
            precis: precise,
            focussed: true,
            changing: true,
        }
    }

    pub fn phase(&self) -> InteractionPhase {
        if self.changing {
            InteractionPhase::Changing {
                precise: self.precis,
            }
        } else if self.focussed {
            InteractionPhase::Focused
        } else {
            InteractionPhase::Idle
        }
    }
}

/// Drag lifecycle as a single value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionPhase {
    /// No pointer interaction.
    #[default]
    Idle,
    /// Pointer is over the widget.
    Focused,
    /// Widget is being dragged.
    Changing { precise: bool },
}

impl InteractionPhase {
    pub fn is_changing(&self) -> bool {
        matches!(self, Self::Changing { .. })
    }

    pub fn is_precise(&self) -> bool {
        matches!(self, Self::Changing { precise: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(StateFlags::default().phase(), InteractionPhase::Idle);
    }

    #[test]
    fn test_phase_from_flags() {
        let focused = StateFlags {
            focussed: true,
            ..Default::default()
        };
        assert_eq!(focused.phase(), InteractionPhase::Focused);

        let drag = StateFlags::dragging(false);
        assert_eq!(drag.phase(), InteractionPhase::Changing { precise: false });
        assert!(drag.phase().is_changing());
        assert!(!drag.phase().is_precise());

        assert!(StateFlags::dragging(true).phase().is_precise());
    }
}
