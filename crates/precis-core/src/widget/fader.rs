//! Vertical fader.

use super::ValueMapping;

/// Faders use the shared linear mapping and carry no extra state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaderState;

impl ValueMapping for FaderState {}

#[cfg(test)]
mod tests {
    use crate::widget::{Taper, Widget, WidgetKind, WidgetSettings};

    #[test]
    fn test_fader_defaults() {
        let fader = Widget::from_settings(WidgetKind::Fader, WidgetSettings::new()).unwrap();
        assert_eq!(fader.id(), "fader.0");
        assert!((fader.core().height() - 300.0).abs() < f64::EPSILON);
        assert!((fader.core().rx - 2.75).abs() < f64::EPSILON);
        assert!(fader.radial_track().is_none());
    }

    #[test]
    fn test_fader_mapped_value() {
        let fader = Widget::from_settings(
            WidgetKind::Fader,
            WidgetSettings::new()
                .with_taper(Taper::new(20.0, 20000.0, 0.01))
                .with_current_value(300.0),
        )
        .unwrap();
        assert!((fader.mapped_value() - 20000.0).abs() < 1e-9);
        assert_eq!(fader.rounded_readout(), "20000.0");
    }
}
