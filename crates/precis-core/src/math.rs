//! Geometry and value-mapping helpers.
//!
//! Every function here is total for finite inputs. Degenerate ranges
//! (`start1 == stop1`, `n_points < 2`) are not guarded and propagate as
//! `NaN`/`inf`, so callers that can hit them must check first.

use kurbo::{Line, Point};

use crate::defaults;

/// Bound `value` to `[range.0, range.1]`.
pub fn clamp(value: f64, range: (f64, f64)) -> f64 {
    value.max(range.0).min(range.1)
}

/// Linear map of `n` from `[start1, stop1]` onto `[start2, stop2]`. Not clamped.
pub fn remap(n: f64, start1: f64, stop1: f64, start2: f64, stop2: f64) -> f64 {
    ((n - start1) / (stop1 - start1)) * (stop2 - start2) + start2
}

pub fn lerp(start: f64, stop: f64, amt: f64) -> f64 {
    amt * (stop - start) + start
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * (std::f64::consts::PI / 180.0)
}

/// Round `x` to the nearest multiple of `precision`.
pub fn round_to(x: f64, precision: f64) -> f64 {
    (x / precision).round() * precision
}

/// `1` for any positive input, `0` otherwise. `invert` flips the result.
pub fn as_logic_value(n: f64, invert: bool) -> u8 {
    let on = n > 0.0;
    if on != invert { 1 } else { 0 }
}

/// Evenly distributed points along a radial line.
///
/// `angle_degrees` is measured clockwise with 0° pointing up. Returns
/// `n_points` points from radius `r_min` to `r_max` around `(cx, cy)`.
/// `n_points` must be at least 2.
pub fn radial_points(
    angle_degrees: f64,
    cx: f64,
    cy: f64,
    r_min: f64,
    r_max: f64,
    n_points: usize,
) -> Vec<Point> {
    let angle = deg_to_rad(angle_degrees - 90.0);
    let (sin_v, cos_v) = angle.sin_cos();
    let span = (n_points as f64) - 1.0;

    (0..n_points)
        .map(|i| {
            let r = r_min + (r_max - r_min) * (i as f64) / span;
            Point::new(cx + r * cos_v, cy + r * sin_v)
        })
        .collect()
}

/// Tick mark `i` of `steps`, spread over a 270° arc starting at `-offset_degrees`.
///
/// Returns `None` when fewer than two steps are requested, since the
/// angular spacing is undefined.
pub fn radial_tick_mark_at(i: usize, steps: usize, offset_degrees: f64) -> Option<Line> {
    if steps < 2 {
        return None;
    }

    let rx = defaults::RADIAL_OVERLAY_RX;
    let r_min = rx + defaults::DIAL_TICKMARKS_R_MIN;
    let r_max = rx + defaults::DIAL_TICKMARKS_R_MAX;
    let rotator = 270.0 / (steps - 1) as f64;

    let points = radial_points(
        (i as f64) * rotator - offset_degrees,
        rx,
        rx,
        r_min,
        r_max,
        defaults::DIAL_TICKMARK_POINTS,
    );
    let outer = *points.last()?;
    let inner = *points.get(3)?;
    Some(Line::new(outer, inner))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(-3.0, (0.0, 10.0)), 0.0);
        assert_eq!(clamp(12.0, (0.0, 10.0)), 10.0);
        assert_eq!(clamp(4.5, (0.0, 10.0)), 4.5);
    }

    #[test]
    fn test_remap_is_unclamped() {
        assert!((remap(0.5, 0.0, 1.0, 10.0, 20.0) - 15.0).abs() < EPS);
        assert!((remap(2.0, 0.0, 1.0, 0.0, 10.0) - 20.0).abs() < EPS);
        // Reversed output range
        assert!((remap(1.0, 0.0, 1.0, 1.0, 0.25) - 0.25).abs() < EPS);
        assert!((remap(0.0, 0.0, 1.0, 1.0, 0.25) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_remap_degenerate_input_range() {
        assert!(remap(0.5, 1.0, 1.0, 0.0, 1.0).is_infinite());
        assert!(remap(1.0, 1.0, 1.0, 0.0, 1.0).is_nan());
    }

    #[test]
    fn test_lerp() {
        assert!((lerp(10.0, 20.0, 0.25) - 12.5).abs() < EPS);
        assert!((lerp(10.0, 20.0, 0.0) - 10.0).abs() < EPS);
    }

    #[test]
    fn test_deg_to_rad() {
        assert!((deg_to_rad(180.0) - std::f64::consts::PI).abs() < EPS);
        assert!((deg_to_rad(90.0) - std::f64::consts::FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_round_to() {
        assert!((round_to(0.123456, 1.0e-2) - 0.12).abs() < EPS);
        assert!((round_to(0.123456, 1.0e-4) - 0.1235).abs() < EPS);
        assert!((round_to(7.4, 5.0) - 5.0).abs() < EPS);
    }

    #[test]
    fn test_as_logic_value() {
        assert_eq!(as_logic_value(3.0, false), 1);
        assert_eq!(as_logic_value(0.0, false), 0);
        assert_eq!(as_logic_value(-1.0, false), 0);
        assert_eq!(as_logic_value(0.0, true), 1);
        assert_eq!(as_logic_value(1.0, true), 0);
    }

    #[test]
    fn test_radial_points_zero_degrees_points_up() {
        let points = radial_points(0.0, 50.0, 50.0, 10.0, 30.0, 3);
        assert_eq!(points.len(), 3);
        assert!((points[0].x - 50.0).abs() < EPS);
        assert!((points[0].y - 40.0).abs() < EPS);
        assert!((points[1].y - 30.0).abs() < EPS);
        assert!((points[2].y - 20.0).abs() < EPS);
    }

    #[test]
    fn test_radial_points_clockwise() {
        // 90 degrees clockwise from up points right.
        let points = radial_points(90.0, 0.0, 0.0, 0.0, 10.0, 2);
        assert!((points[1].x - 10.0).abs() < EPS);
        assert!(points[1].y.abs() < EPS);
    }

    #[test]
    fn test_radial_points_single_point_is_degenerate() {
        let points = radial_points(0.0, 0.0, 0.0, 1.0, 2.0, 1);
        assert_eq!(points.len(), 1);
        assert!(points[0].y.is_nan());
    }

    #[test]
    fn test_radial_tick_mark_spacing() {
        let first = radial_tick_mark_at(0, 11, 135.0).unwrap();
        let last = radial_tick_mark_at(10, 11, 135.0).unwrap();
        // First tick sits at -135 degrees, the last at +135: mirror images about x = rx.
        let rx = defaults::RADIAL_OVERLAY_RX;
        assert!(((first.p0.x - rx) + (last.p0.x - rx)).abs() < 1e-6);
        assert!((first.p0.y - last.p0.y).abs() < 1e-6);
    }

    #[test]
    fn test_radial_tick_mark_needs_two_steps() {
        assert!(radial_tick_mark_at(0, 1, 135.0).is_none());
        assert!(radial_tick_mark_at(0, 0, 135.0).is_none());
    }
}
