//! Curve segments and the stateless algorithms that query them.
//!
//! A [`Curve`] spans the two middle knots of a four-knot window. Interpolator
//! `A` is fitted through knots 0..=2 and `B` through knots 1..=3; the segment
//! blends them with `cos²θ`/`sin²θ` weights, `θ = πt/2`, which makes the joint
//! between neighboring segments C² by construction.

mod evaluate;
mod length;
mod nearest;
mod up_vector;

pub use evaluate::{
    evaluate_acceleration, evaluate_curvature, evaluate_position, evaluate_tangent,
    evaluate_twist,
};
pub use length::{
    build_lut, calculate_length, calculate_lut, curve_distance_to_interpolation,
    get_distance_to_interpolation, get_interpolation_to_distance, lut_length, DistanceLut,
    DistanceToInterpolation, LENGTH_RESOLUTION, LUT_RESOLUTION,
};
pub use nearest::{get_nearest_point, get_nearest_point_to_ray, CurveHit, RAY_RESOLUTION};
pub use up_vector::{evaluate_up_vector, evaluate_up_vectors, UP_VECTOR_SAMPLES};

use std::f32::consts::FRAC_PI_2;

use crate::interpolate::{Interpolator, TwistInterpolator};
use crate::knot::Knot;
use crate::math::Float3;
use crate::params::{InterpolationKind, SplineParams, TwistKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    a: Interpolator,
    b: Interpolator,
    twist_a: TwistInterpolator,
    twist_b: TwistInterpolator,
}

impl Curve {
    pub fn new(params: &SplineParams, knots: &[Knot; 4]) -> Self {
        let [k0, k1, k2, k3] = knots;
        let kind = params.interpolation;
        Self {
            a: Interpolator::fit(kind, k0.position, k1.position, k2.position),
            b: Interpolator::fit(kind, k1.position, k2.position, k3.position),
            twist_a: TwistInterpolator::fit(params.twist, k0.twist, k1.twist, k2.twist),
            twist_b: TwistInterpolator::fit(params.twist, k1.twist, k2.twist, k3.twist),
        }
    }

    /// Untwisted curve straight from four positions.
    pub fn from_points(
        kind: InterpolationKind,
        p0: Float3,
        p1: Float3,
        p2: Float3,
        p3: Float3,
    ) -> Self {
        let params = SplineParams::new(kind, TwistKind::Constant);
        Self::new(&params, &[p0.into(), p1.into(), p2.into(), p3.into()])
    }

    pub fn interpolators(&self) -> (&Interpolator, &Interpolator) {
        (&self.a, &self.b)
    }

    fn local_a(&self, t: f32) -> f32 {
        let ta = self.a.t();
        ta + (1.0 - ta) * t
    }

    fn local_b(&self, t: f32) -> f32 {
        self.b.t() * t
    }

    /// `(sin θ, cos θ)` with `θ = πt/2`.
    fn weights(t: f32) -> (f32, f32) {
        (FRAC_PI_2 * t).sin_cos()
    }

    /// Position at raw local `t` (not clamped).
    pub fn position(&self, t: f32) -> Float3 {
        let (s, c) = Self::weights(t);
        let a = self.a.evaluate(self.local_a(t));
        let b = self.b.evaluate(self.local_b(t));
        a * (c * c) + b * (s * s)
    }

    /// First derivative with respect to local `t`.
    pub fn tangent(&self, t: f32) -> Float3 {
        let (s, c) = Self::weights(t);
        let (la, lb) = (self.local_a(t), self.local_b(t));
        let scale_a = 1.0 - self.a.t();
        let scale_b = self.b.t();

        let a = self.a.evaluate(la);
        let b = self.b.evaluate(lb);
        let da = self.a.evaluate_first_derivative(la) * scale_a;
        let db = self.b.evaluate_first_derivative(lb) * scale_b;

        (b - a) * (2.0 * FRAC_PI_2 * s * c) + da * (c * c) + db * (s * s)
    }

    /// Second derivative with respect to local `t`.
    pub fn acceleration(&self, t: f32) -> Float3 {
        let (s, c) = Self::weights(t);
        let (la, lb) = (self.local_a(t), self.local_b(t));
        let scale_a = 1.0 - self.a.t();
        let scale_b = self.b.t();

        let a = self.a.evaluate(la);
        let b = self.b.evaluate(lb);
        let da = self.a.evaluate_first_derivative(la) * scale_a;
        let db = self.b.evaluate_first_derivative(lb) * scale_b;
        let dda = self.a.evaluate_second_derivative(la) * (scale_a * scale_a);
        let ddb = self.b.evaluate_second_derivative(lb) * (scale_b * scale_b);

        (b - a) * (2.0 * FRAC_PI_2 * FRAC_PI_2 * (c * c - s * s))
            + (db - da) * (4.0 * FRAC_PI_2 * s * c)
            + dda * (c * c)
            + ddb * (s * s)
    }

    /// Twist in degrees at raw local `t`. Twist interpolators carry their own
    /// middle parameter, independent of the position interpolators.
    pub fn twist(&self, t: f32) -> f32 {
        let (s, c) = Self::weights(t);
        let ta = self.twist_a.t();
        let a = self.twist_a.evaluate(ta + (1.0 - ta) * t);
        let b = self.twist_b.evaluate(self.twist_b.t() * t);
        a * (c * c) + b * (s * s)
    }

    /// Chord plus control-polygon average over pseudo control points taken
    /// from the end tangents of the blended segment.
    ///
    /// The control points are `P(0) + P'(0)/3` and `P(1) - P'(1)/3`, the cubic
    /// Hermite equivalents of the segment ends. This intentionally departs from
    /// sampling the two interpolators at their parameter extremes.
    pub fn approximate_length(&self) -> f32 {
        let p0 = self.position(0.0);
        let p3 = self.position(1.0);
        let p1 = p0 + self.tangent(0.0) / 3.0;
        let p2 = p3 - self.tangent(1.0) / 3.0;
        let chord = p3.distance(p0);
        let polygon = p0.distance(p1) + p2.distance(p1) + p3.distance(p2);
        (chord + polygon) * 0.5
    }
}
