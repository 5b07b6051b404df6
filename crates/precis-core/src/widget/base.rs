//! Record shared by every widget kind.

use kurbo::Rect;
use serde::{Deserialize, Serialize};

use super::settings::{SettingsError, SettingsResult};
use super::state::{InteractionPhase, StateFlags};
use crate::math::{clamp, remap, round_to};
use crate::tuning::DragTuning;

/// Position and size of a widget in layout units.
///
/// `height` is the divisor for normalization and is always positive once a
/// widget has been constructed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidgetRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WidgetRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn to_kurbo(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

/// Output range and fine-adjustment step of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Taper {
    pub min: f64,
    pub max: f64,
    /// Multiplier applied to precision-mode movement.
    pub fine_step: f64,
}

impl Taper {
    pub fn new(min: f64, max: f64, fine_step: f64) -> Self {
        Self { min, max, fine_step }
    }

    pub(crate) fn validate(&self) -> SettingsResult<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.max < self.min {
            return Err(SettingsError::InvertedTaper {
                min: self.min,
                max: self.max,
            });
        }
        if !(self.fine_step.is_finite() && self.fine_step > 0.0) {
            return Err(SettingsError::InvalidFineStep(self.fine_step));
        }
        Ok(())
    }
}

pub(crate) fn validate_height(height: f64) -> SettingsResult<()> {
    if height.is_finite() && height > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::InvalidHeight(height))
    }
}

/// Geometry, taper, raw value and flags of one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetCore {
    pub(crate) id: String,
    pub(crate) rect: WidgetRect,
    /// Layout coefficient added to the width whenever it is set.
    pub rx: f64,
    pub taper: Taper,
    /// Raw accumulated drag value, kept in `[0, height]`.
    pub(crate) current_value: f64,
    /// Rendering scale, not used in value math.
    pub scale: f64,
    pub(crate) flags: StateFlags,
    pub background: String,
    pub label: String,
    pub layer: i32,
    pub(crate) registry_index: usize,
}

impl WidgetCore {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rect(&self) -> WidgetRect {
        self.rect
    }

    pub fn x(&self) -> f64 {
        self.rect.x
    }

    pub fn set_x(&mut self, x: f64) {
        self.rect.x = x;
    }

    pub fn y(&self) -> f64 {
        self.rect.y
    }

    pub fn set_y(&mut self, y: f64) {
        self.rect.y = y;
    }

    pub fn width(&self) -> f64 {
        self.rect.width
    }

    /// Stores `width + rx`.
    pub fn set_width(&mut self, width: f64) {
        self.rect.width = width + self.rx;
    }

    pub fn height(&self) -> f64 {
        self.rect.height
    }

    /// Change the height, keeping the raw value inside the new range.
    pub fn set_height(&mut self, height: f64) -> SettingsResult<()> {
        validate_height(height)?;
        self.rect.height = height;
        self.current_value = clamp(self.current_value, (0.0, height));
        Ok(())
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    /// Store a raw value, clamped to `[0, height]`.
    pub fn set_current_value(&mut self, value: f64) {
        self.current_value = clamp(value, (0.0, self.rect.height));
    }

    pub fn flags(&self) -> StateFlags {
        self.flags
    }

    pub fn phase(&self) -> InteractionPhase {
        self.flags.phase()
    }

    pub fn is_changing(&self) -> bool {
        self.flags.changing
    }

    pub fn is_focussed(&self) -> bool {
        self.flags.focussed
    }

    pub fn is_precise(&self) -> bool {
        self.flags.precis
    }

    /// Registry size observed when this widget was last registered.
    pub fn registry_index(&self) -> usize {
        self.registry_index
    }

    /// `current_value / height`, in `[0, 1]`.
    pub fn norm_value(&self) -> f64 {
        self.current_value / self.rect.height
    }

    /// Norm value remapped onto the taper's `[min, max]`.
    pub fn linear_mapped_value(&self) -> f64 {
        remap(self.norm_value(), 0.0, 1.0, self.taper.min, self.taper.max)
    }

    /// Integrate one vertical mouse movement into the raw value.
    ///
    /// Returns `false` without touching state when the widget is not being
    /// dragged or `dy` is zero or not finite.
    pub fn apply_drag(&mut self, dy: f64, tuning: &DragTuning) -> bool {
        if !self.flags.changing || !self.flags.focussed || dy == 0.0 || !dy.is_finite() {
            return false;
        }

        let delta = if self.flags.precis {
            tuning.precise_delta(dy, self.taper.fine_step)
        } else {
            tuning.coarse_delta(dy, self.norm_value())
        };
        self.set_current_value(self.current_value + delta);
        true
    }
}

/// Format a mapped value for display.
///
/// Precision mode rounds to `1e-4` and shows three decimals, otherwise the
/// value is rounded to `1e-2` and shown with one.
pub fn format_readout(value: f64, precise: bool) -> String {
    if precise {
        format!("{:.3}", round_to(value, 1.0e-4))
    } else {
        format!("{:.1}", round_to(value, 1.0e-2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core(height: f64, current_value: f64) -> WidgetCore {
        WidgetCore {
            id: "fader.0".to_string(),
            rect: WidgetRect::new(0.0, 0.0, 25.0, height),
            rx: 2.75,
            taper: Taper::new(0.0, 1.0, 0.001),
            current_value,
            scale: 1.0,
            flags: StateFlags::default(),
            background: String::new(),
            label: String::new(),
            layer: 0,
            registry_index: 0,
        }
    }

    #[test]
    fn test_norm_value_round_trip() {
        for value in [0.0, 1.0, 37.5, 150.0, 299.9, 300.0] {
            let c = core(300.0, value);
            assert!((c.norm_value() * c.height() - value).abs() < 1e-9);
        }
    }

    #[test]
    fn test_mapped_value_in_taper_range() {
        let mut c = core(300.0, 0.0);
        c.taper = Taper::new(-12.0, 48.0, 0.01);
        for step in 0..=30 {
            c.set_current_value(step as f64 * 10.0);
            let v = c.linear_mapped_value();
            assert!((-12.0..=48.0).contains(&v), "{v} out of range");
        }
        c.set_current_value(150.0);
        assert!((c.linear_mapped_value() - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_width_adds_rx() {
        let mut c = core(300.0, 0.0);
        c.set_width(25.0);
        assert!((c.width() - 27.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_height_reclamps() {
        let mut c = core(300.0, 250.0);
        c.set_height(100.0).unwrap();
        assert!((c.current_value() - 100.0).abs() < f64::EPSILON);
        assert_eq!(c.set_height(0.0), Err(SettingsError::InvalidHeight(0.0)));
        assert!(c.set_height(-5.0).is_err());
        assert!((c.height() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_drag_requires_changing_and_focus() {
        let tuning = DragTuning::default();
        let mut c = core(300.0, 150.0);
        assert!(!c.apply_drag(-10.0, &tuning));

        c.flags.changing = true;
        assert!(!c.apply_drag(-10.0, &tuning));

        c.flags.focussed = true;
        assert!(c.apply_drag(-10.0, &tuning));
        assert!(c.current_value() > 150.0);
    }

    #[test]
    fn test_zero_delta_is_ignored() {
        let tuning = DragTuning::default();
        let mut c = core(300.0, 150.0);
        c.flags = StateFlags::dragging(false);
        assert!(!c.apply_drag(0.0, &tuning));
        assert!((c.current_value() - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_finite_delta_is_ignored() {
        let tuning = DragTuning::default();
        let mut c = core(300.0, 200.0);
        for precise in [false, true] {
            c.flags = StateFlags::dragging(precise);
            assert!(!c.apply_drag(f64::NAN, &tuning));
            assert!(!c.apply_drag(f64::INFINITY, &tuning));
            assert!(!c.apply_drag(f64::NEG_INFINITY, &tuning));
            assert!((c.current_value() - 200.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_precision_fine_step() {
        let tuning = DragTuning::default();
        let mut c = core(300.0, 150.0);
        c.flags = StateFlags::dragging(true);
        assert!(c.apply_drag(4.0, &tuning));
        assert!((c.current_value() - 149.992).abs() < 1e-9);
    }

    #[test]
    fn test_normal_mode_gain_by_position() {
        let tuning = DragTuning::default();

        let mut bottom = core(300.0, 0.0);
        bottom.flags = StateFlags::dragging(false);
        bottom.apply_drag(-10.0, &tuning);
        assert!((bottom.current_value() - 10.0).abs() < 1e-9);

        let mut top = core(300.0, 300.0);
        top.flags = StateFlags::dragging(false);
        top.apply_drag(10.0, &tuning);
        assert!((top.current_value() - 297.5).abs() < 1e-9);

        // Pushing past the top is clamped.
        top.set_current_value(300.0);
        top.apply_drag(-10.0, &tuning);
        assert!((top.current_value() - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clamp_invariant_over_random_walk() {
        let tuning = DragTuning::default();
        let mut c = core(300.0, 150.0);
        c.flags = StateFlags::dragging(false);
        let deltas = [-400.0, 3.0, 250.0, 900.0, -1.0, -77.0, 12.5, -2000.0, 0.5];
        for (i, dy) in deltas.iter().enumerate() {
            c.flags.precis = i % 2 == 0;
            c.apply_drag(*dy, &tuning);
            assert!((0.0..=300.0).contains(&c.current_value()));
        }
    }

    #[test]
    fn test_format_readout() {
        assert_eq!(format_readout(0.123456, false), "0.1");
        assert_eq!(format_readout(0.12344, true), "0.123");
        assert_eq!(format_readout(12.0, false), "12.0");
        assert_eq!(format_readout(-0.5, true), "-0.500");
    }

    #[test]
    fn test_kurbo_rect() {
        let rect = WidgetRect::new(10.0, 20.0, 25.0, 300.0).to_kurbo();
        assert!((rect.x1 - 35.0).abs() < f64::EPSILON);
        assert!((rect.y1 - 320.0).abs() < f64::EPSILON);
    }
}
