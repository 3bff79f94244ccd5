//! Spline-level algorithms: parameterization, index units, evaluation,
//! nearest-point search, linear-distance walks and resampling.

mod evaluate;
mod nearest;
mod parameterize;
mod resample;
mod unit;
mod walk;

pub use evaluate::{
    evaluate_acceleration, evaluate_curvature, evaluate_position, evaluate_tangent,
    evaluate_twist, evaluate_up_vector, knot_up,
};
pub use nearest::{get_nearest_point, get_nearest_point_to_ray, NearestPoint};
pub use parameterize::{curve_to_spline_t, spline_to_curve_t, CurveT};
pub use resample::{resample, SplinePoint, MAX_SAMPLES};
pub use unit::{convert_index_unit, knot_unit_to_curve_t, to_curve_t, PathIndexUnit};
pub use walk::{get_point_at_linear_distance, LINEAR_DISTANCE_EPSILON};
