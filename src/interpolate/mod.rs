//! Three-point interpolators that make up each half of a curve segment.
//!
//! An [`Interpolator`] is fitted through three consecutive knots and exposes a
//! local parameter `t()` at which it passes through the middle knot. The variant
//! is chosen once, at fit time:
//!
//! - coincident neighbors (`a == b` or `b == c`) give [`Linear`]
//! - collinear points with `b` between `a` and `c` give [`Linear`]
//! - otherwise the requested [`InterpolationKind`], with collinear points that
//!   double back falling back from circular to quadratic Bezier

mod bezier;
mod circular;
mod linear;
mod twist;

pub use bezier::{max_curvature_parameter, QuadraticBezier};
pub use circular::Circular;
pub use linear::Linear;
pub use twist::TwistInterpolator;

use crate::math::Float3;
use crate::params::InterpolationKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interpolator {
    QuadraticBezier(QuadraticBezier),
    Circular(Circular),
    Linear(Linear),
}

impl Interpolator {
    pub fn fit(kind: InterpolationKind, a: Float3, b: Float3, c: Float3) -> Self {
        if a == b || b == c {
            log::trace!("coincident knots, fitting linear interpolator");
            return Self::Linear(Linear::fit(a, b, c));
        }

        let ab = b - a;
        let bc = c - b;
        let collinear = ab.cross(bc).magnitude()
            <= circular::COLLINEAR_THRESHOLD * ab.magnitude() * bc.magnitude();
        if collinear && ab.dot(bc) > 0.0 {
            log::trace!("collinear knots, fitting linear interpolator");
            return Self::Linear(Linear::fit(a, b, c));
        }

        match kind {
            InterpolationKind::QuadraticBezier => {
                Self::QuadraticBezier(QuadraticBezier::fit(a, b, c))
            }
            InterpolationKind::Circular => match Circular::fit(a, b, c) {
                Some(arc) => Self::Circular(arc),
                None => {
                    log::trace!("knots double back, circular fit replaced by quadratic Bezier");
                    Self::QuadraticBezier(QuadraticBezier::fit(a, b, c))
                }
            },
        }
    }

    /// Local parameter at which the middle point is interpolated.
    pub fn t(&self) -> f32 {
        match self {
            Self::QuadraticBezier(i) => i.t(),
            Self::Circular(i) => i.t(),
            Self::Linear(i) => i.t(),
        }
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, Self::Linear(_))
    }

    pub fn evaluate(&self, t: f32) -> Float3 {
        match self {
            Self::QuadraticBezier(i) => i.evaluate(t),
            Self::Circular(i) => i.evaluate(t),
            Self::Linear(i) => i.evaluate(t),
        }
    }

    pub fn evaluate_first_derivative(&self, t: f32) -> Float3 {
        match self {
            Self::QuadraticBezier(i) => i.evaluate_first_derivative(t),
            Self::Circular(i) => i.evaluate_first_derivative(t),
            Self::Linear(i) => i.evaluate_first_derivative(t),
        }
    }

    pub fn evaluate_second_derivative(&self, t: f32) -> Float3 {
        match self {
            Self::QuadraticBezier(i) => i.evaluate_second_derivative(t),
            Self::Circular(i) => i.evaluate_second_derivative(t),
            Self::Linear(i) => i.evaluate_second_derivative(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [InterpolationKind; 2] =
        [InterpolationKind::QuadraticBezier, InterpolationKind::Circular];

    #[test]
    fn coincident_points_are_exact_lerp() {
        let a = Float3::new(1.0, -2.0, 0.5);
        let c = Float3::new(7.0, 3.0, -1.0);
        for kind in KINDS {
            for interp in [Interpolator::fit(kind, a, a, c), Interpolator::fit(kind, a, c, c)] {
                assert!(interp.is_linear());
                for i in 0..=10 {
                    let t = i as f32 / 10.0;
                    assert_eq!(interp.evaluate(t), a.lerp(c, t));
                }
                assert_eq!(interp.evaluate_first_derivative(0.3), c - a);
                assert_eq!(interp.evaluate_second_derivative(0.3), Float3::ZERO);
            }
        }
    }

    #[test]
    fn straight_run_is_linear_for_both_kinds() {
        let a = Float3::ZERO;
        let b = Float3::new(1.0, 1.0, 0.0);
        let c = Float3::new(3.0, 3.0, 0.0);
        for kind in KINDS {
            assert!(Interpolator::fit(kind, a, b, c).is_linear());
        }
    }

    #[test]
    fn doubling_back_uses_bezier() {
        let a = Float3::ZERO;
        let b = Float3::new(2.0, 0.0, 0.0);
        let c = Float3::new(1.0, 0.0, 0.0);
        let interp = Interpolator::fit(InterpolationKind::Circular, a, b, c);
        assert!(matches!(interp, Interpolator::QuadraticBezier(_)));
        assert!(interp.evaluate(interp.t()).distance(b) < 1e-4);
    }

    #[test]
    fn requested_kind_is_used_for_curved_input() {
        let a = Float3::new(1.0, 0.0, 0.0);
        let b = Float3::new(0.0, 1.0, 0.0);
        let c = Float3::new(-1.0, 0.0, 0.0);
        assert!(matches!(
            Interpolator::fit(InterpolationKind::Circular, a, b, c),
            Interpolator::Circular(_)
        ));
        assert!(matches!(
            Interpolator::fit(InterpolationKind::QuadraticBezier, a, b, c),
            Interpolator::QuadraticBezier(_)
        ));
    }
}
