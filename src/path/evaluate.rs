//! Spline-level evaluation at normalized `t`.
//!
//! Each query resolves `t` to a curve through the distance tables and
//! delegates to the curve algorithms. Empty splines yield zero; an open spline
//! with a single knot sits still at that knot.

use super::parameterize::spline_to_curve_t;
use crate::curve::{self, Curve};
use crate::math::{Float3, Frame};
use crate::spline::Spline;

/// Below this the world up is treated as parallel to the knot tangent.
const VERTICAL_THRESHOLD: f32 = 1e-3;

fn locate(spline: &Spline, t: f32) -> Option<(usize, Curve, f32)> {
    let curve_t = spline_to_curve_t(spline, t, true);
    let curve = spline.curve(curve_t.index)?;
    Some((curve_t.index, curve, curve_t.t))
}

pub fn evaluate_position(spline: &Spline, t: f32) -> Float3 {
    if let Some(knot) = spline.lone_knot() {
        return knot.position;
    }
    locate(spline, t).map_or(Float3::ZERO, |(_, c, ct)| curve::evaluate_position(&c, ct))
}

pub fn evaluate_tangent(spline: &Spline, t: f32) -> Float3 {
    locate(spline, t).map_or(Float3::ZERO, |(_, c, ct)| curve::evaluate_tangent(&c, ct))
}

pub fn evaluate_acceleration(spline: &Spline, t: f32) -> Float3 {
    locate(spline, t).map_or(Float3::ZERO, |(_, c, ct)| curve::evaluate_acceleration(&c, ct))
}

pub fn evaluate_curvature(spline: &Spline, t: f32) -> f32 {
    locate(spline, t).map_or(0.0, |(_, c, ct)| curve::evaluate_curvature(&c, ct))
}

/// Twist in degrees.
pub fn evaluate_twist(spline: &Spline, t: f32) -> f32 {
    if let Some(knot) = spline.lone_knot() {
        return knot.twist;
    }
    locate(spline, t).map_or(0.0, |(_, c, ct)| curve::evaluate_twist(&c, ct))
}

/// Rotation-minimizing up vector between the ups of the curve's two knots.
pub fn evaluate_up_vector(spline: &Spline, t: f32) -> Float3 {
    if spline.lone_knot().is_some() {
        return knot_up(spline, 0);
    }
    let Some((index, segment, curve_t)) = locate(spline, t) else {
        return Float3::ZERO;
    };
    let end_index = (index + 1) % spline.len();
    let start_up = knot_up(spline, index);
    let end_up = knot_up(spline, end_index);
    curve::evaluate_up_vector(&segment, curve_t, start_up, end_up)
}

/// Up vector at a knot: world up made perpendicular to the knot tangent, then
/// rolled by the knot twist.
pub fn knot_up(spline: &Spline, index: usize) -> Float3 {
    let Some(knot) = spline.knot(index) else {
        return Float3::ZERO;
    };
    let tangent = knot_tangent(spline, index);
    if tangent.magnitude_squared() == 0.0 {
        return Float3::UP;
    }

    let mut up = Float3::UP - tangent * tangent.dot(Float3::UP);
    if up.magnitude() < VERTICAL_THRESHOLD {
        let forward = if tangent.y > 0.0 {
            Float3::BACK
        } else {
            Float3::FORWARD
        };
        up = forward - tangent * tangent.dot(forward);
    }
    Frame::from_direction_up(tangent, up)
        .with_roll(knot.twist.to_radians())
        .normal
}

/// Unit tangent at a knot: start of the curve leaving it, or the end of the
/// last curve for the final knot of an open spline.
fn knot_tangent(spline: &Spline, index: usize) -> Float3 {
    let count = spline.curve_count();
    if count == 0 {
        return Float3::ZERO;
    }
    let tangent = if index < count {
        spline.curve(index).map(|c| c.tangent(0.0))
    } else {
        spline.curve(count - 1).map(|c| c.tangent(1.0))
    };
    tangent.map_or(Float3::ZERO, Float3::normalize)
}
