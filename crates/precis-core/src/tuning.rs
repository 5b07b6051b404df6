//! Drag response tuning.

use serde::{Deserialize, Serialize};

use crate::math::remap;

/// Ergonomic constants for turning mouse movement into value changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DragTuning {
    /// Normal-mode gain when the widget sits at the bottom of its range.
    pub gain_at_min: f64,
    /// Normal-mode gain when the widget sits at the top of its range.
    pub gain_at_max: f64,
    /// Coefficient of the quadratic precision-mode response.
    pub precision_coefficient: f64,
    /// End the drag when the window loses focus or pointer lock is lost.
    pub release_on_focus_loss: bool,
}

impl Default for DragTuning {
    fn default() -> Self {
        Self {
            gain_at_min: 1.0,
            gain_at_max: 0.25,
            precision_coefficient: 0.5,
            release_on_focus_loss: true,
        }
    }
}

impl DragTuning {
    /// Normal-mode multiplier for a widget at `norm_value`.
    ///
    /// Falls linearly from `gain_at_min` to `gain_at_max` so fast movement
    /// near the top of the range does not overshoot.
    pub fn gain(&self, norm_value: f64) -> f64 {
        remap(norm_value, 0.0, 1.0, self.gain_at_min, self.gain_at_max)
    }

    /// Raw value change for a vertical movement in normal mode.
    pub fn coarse_delta(&self, dy: f64, norm_value: f64) -> f64 {
        -dy * self.gain(norm_value)
    }

    /// Raw value change for a vertical movement in precision mode.
    ///
    /// Quadratic in `dy`, sign preserving, scaled by the taper's fine step.
    pub fn precise_delta(&self, dy: f64, fine_step: f64) -> f64 {
        dy.signum() * -self.precision_coefficient * dy * dy * fine_step
    }
}
