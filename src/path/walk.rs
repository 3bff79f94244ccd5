use super::evaluate::evaluate_position;
use crate::math::Float3;
use crate::spline::Spline;

/// Tolerance on the straight-line distance reached by the walk.
pub const LINEAR_DISTANCE_EPSILON: f32 = 0.001;
const MAX_ITERATIONS: usize = 64;

/// Point whose straight-line distance from the point at `from_t` is `distance`.
///
/// Positive distances walk toward `t = 1`, negative toward `t = 0`. Returns the
/// point and its normalized `t`; walks past either end stop at that end.
pub fn get_point_at_linear_distance(spline: &Spline, from_t: f32, distance: f32) -> (Float3, f32) {
    let from_t = from_t.clamp(0.0, 1.0);
    let start = evaluate_position(spline, from_t);
    let length = spline.length();
    if spline.len() < 2 || length <= 0.0 || distance == 0.0 {
        return (start, from_t);
    }

    // Arclength bounds linear distance, so running out of arclength means the
    // target lies beyond the end.
    let arc_at_start = from_t * length;
    if arc_at_start + distance >= length {
        return (evaluate_position(spline, 1.0), 1.0);
    }
    if arc_at_start + distance <= 0.0 {
        return (evaluate_position(spline, 0.0), 0.0);
    }

    let target = distance.abs();
    let direction = distance.signum();
    let mut t = from_t + distance / length;
    let mut position = evaluate_position(spline, t);
    for _ in 0..MAX_ITERATIONS {
        let residual = target - position.distance(start);
        if residual.abs() < LINEAR_DISTANCE_EPSILON {
            break;
        }
        let next = (t + direction * residual / length).clamp(0.0, 1.0);
        if next == t {
            break;
        }
        t = next;
        position = evaluate_position(spline, t);
    }
    (position, t)
}
