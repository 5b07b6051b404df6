//! Radial dial.

use kurbo::{Line, Point};

use super::ValueMapping;
use super::base::WidgetCore;
use crate::defaults;
use crate::math::{radial_points, radial_tick_mark_at};

/// Dial-specific state: indicator flags and radial geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialState {
    /// Draw the pointer indicator.
    pub pointer: bool,
    /// Draw the tick mark ring.
    pub tick_marks: bool,
    /// Degrees covered by the full value range.
    pub sweep: f64,
    /// Angle of the pointer at norm value 0.
    pub offset: f64,
    pointer_points: Vec<Point>,
}

impl Default for RadialState {
    fn default() -> Self {
        Self::new(true, true, 270.0, 230.0)
    }
}

impl RadialState {
    pub fn new(pointer: bool, tick_marks: bool, sweep: f64, offset: f64) -> Self {
        Self {
            pointer,
            tick_marks,
            sweep,
            offset,
            pointer_points: Vec::new(),
        }
    }

    /// Pointer angle in degrees for the current value.
    pub fn radial_track(&self, core: &WidgetCore) -> f64 {
        core.norm_value() * self.sweep + self.offset
    }

    /// Recompute the pointer indicator points for the current value.
    pub fn spin_pointer(&mut self, core: &WidgetCore) -> &[Point] {
        self.pointer_points = radial_points(
            self.radial_track(core),
            defaults::POINTER_CENTER,
            defaults::POINTER_CENTER,
            defaults::POINTER_R_MIN,
            defaults::POINTER_R_MAX,
            defaults::POINTER_POINTS,
        );
        &self.pointer_points
    }

    /// Tick mark ring, empty when tick marks are disabled.
    pub fn tick_marks(&self) -> Vec<Line> {
        if !self.tick_marks {
            return Vec::new();
        }
        (0..defaults::DIAL_TICKMARKS_COUNT)
            .filter_map(|i| {
                radial_tick_mark_at(
                    i,
                    defaults::DIAL_TICKMARKS_COUNT,
                    defaults::DIAL_TICKMARKS_RADIAL_OFFSET,
                )
            })
            .collect()
    }
}

impl ValueMapping for RadialState {}
