//! Fallback geometry and taper values used when settings omit a field.

use crate::widget::{Taper, WidgetRect};

pub const X: f64 = 150.0;
pub const Y: f64 = 150.0;

pub const FADER_WIDTH: f64 = 25.0;
pub const FADER_HEIGHT: f64 = 300.0;
pub const FADER_SCALE_FACTOR: f64 = 1.0;
/// Layout coefficient added to a fader's width when it is set.
pub const FADER_RX: f64 = 2.75;

/// Side of the square dial container.
pub const SQUARE: f64 = 108.0;
pub const DIAL_SCALE_FACTOR: f64 = 1.0;

pub const BUTTON_WIDTH: f64 = 72.0;
pub const BUTTON_HEIGHT: f64 = 45.0;
pub const BUTTON_SCALE_FACTOR: f64 = 1.0;

pub const DIAL_BACKGROUND: &str = "darkgrey";
pub const FADER_BACKGROUND: &str = "darkgrey";
pub const BUTTON_BACKGROUND: &str = "transparent";

// Radial overlay geometry, in the dial's 100x100 drawing space.
pub const RADIAL_OVERLAY_RX: f64 = 50.0;
pub const DIAL_TICKMARKS_COUNT: usize = 11;
pub const DIAL_TICKMARKS_RADIAL_OFFSET: f64 = 135.0;
pub const DIAL_TICKMARKS_R_MIN: f64 = -5.0;
pub const DIAL_TICKMARKS_R_MAX: f64 = 1.0;
pub const DIAL_TICKMARK_POINTS: usize = 8;

// Pointer indicator drawn by `Radial::spin_pointer`.
pub const POINTER_CENTER: f64 = 50.0;
pub const POINTER_R_MIN: f64 = 10.0;
pub const POINTER_R_MAX: f64 = 55.0;
pub const POINTER_POINTS: usize = 20;

pub const TAPER: Taper = Taper {
    min: 0.0,
    max: 1.0,
    fine_step: 1.0e-3,
};

pub const RECT: WidgetRect = WidgetRect {
    x: X,
    y: Y,
    width: SQUARE,
    height: SQUARE,
};
