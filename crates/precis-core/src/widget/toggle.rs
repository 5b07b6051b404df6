//! Two-state toggle button.

use super::base::WidgetCore;
use super::{PressBehavior, ValueMapping};
use crate::math::as_logic_value;

/// Toggle-specific state: the on/off bit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToggleState {
    state: bool,
}

impl ToggleState {
    pub fn new(state: bool) -> Self {
        Self { state }
    }

    pub fn state(&self) -> bool {
        self.state
    }

    /// Flip the bit, returning the new state as `0` or `1`.
    pub fn change_state(&mut self) -> u8 {
        let next = as_logic_value(f64::from(u8::from(self.state)), true);
        self.state = next == 1;
        next
    }
}

impl ValueMapping for ToggleState {
    /// `taper.max + taper.min` when on, `taper.min` when off, rounded.
    fn mapped_value(&self, core: &WidgetCore) -> f64 {
        let bit = f64::from(u8::from(self.state));
        (bit * core.taper.max + core.taper.min).round()
    }

    fn press_behavior(&self) -> PressBehavior {
        PressBehavior::Immediate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{Taper, Widget, WidgetKind, WidgetSettings};

    #[test]
    fn test_change_state_alternates() {
        let mut toggle = ToggleState::default();
        assert!(!toggle.state());
        assert_eq!(toggle.change_state(), 1);
        assert!(toggle.state());
        assert_eq!(toggle.change_state(), 0);
        assert!(!toggle.state());
    }

    #[test]
    fn test_toggle_mapped_value() {
        let mut widget = Widget::from_settings(
            WidgetKind::Toggle,
            WidgetSettings::new().with_taper(Taper::new(0.0, 127.0, 0.01)),
        )
        .unwrap();
        assert!((widget.mapped_value() - 0.0).abs() < f64::EPSILON);

        widget.press_toggle();
        assert_eq!(widget.toggle_state(), Some(true));
        assert!((widget.mapped_value() - 127.0).abs() < f64::EPSILON);
        assert!((widget.core().current_value() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_initial_state_from_current_value() {
        let widget = Widget::from_settings(
            WidgetKind::Toggle,
            WidgetSettings::new().with_current_value(1.0),
        )
        .unwrap();
        assert_eq!(widget.toggle_state(), Some(true));
    }
}
