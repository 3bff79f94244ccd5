use crate::math::{Float3, Matrix3};

/// Chords shorter than this make the maximum-curvature parameter meaningless.
const MIN_CHORD: f32 = 1e-3;
/// Threshold on `1 - |cos|` between the two chords.
const COLLINEAR_THRESHOLD: f32 = 1e-3;
const ROOT_TOLERANCE: f32 = 1e-6;

/// Quadratic Bezier through `a`, `b`, `c` with `b` at the point of maximum curvature.
///
/// Stored in power-basis form: the columns of `coefficients` weight `[1, t, t²]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticBezier {
    coefficients: Matrix3,
    t: f32,
}

impl QuadraticBezier {
    pub fn fit(a: Float3, b: Float3, c: Float3) -> Self {
        let t = max_curvature_parameter(a, b, c);
        let s = 1.0 - t;
        let control = (b - a * (s * s) - c * (t * t)) / (2.0 * t * s);
        Self::from_control_points(a, control, c, t)
    }

    pub fn from_control_points(p0: Float3, p1: Float3, p2: Float3, t: f32) -> Self {
        Self {
            coefficients: Matrix3::from_columns(p0, (p1 - p0) * 2.0, p0 - p1 * 2.0 + p2),
            t,
        }
    }

    /// Local parameter at which the middle point is interpolated.
    pub fn t(&self) -> f32 {
        self.t
    }

    pub fn control_point(&self) -> Float3 {
        self.coefficients.c0 + self.coefficients.c1 * 0.5
    }

    pub fn evaluate(&self, t: f32) -> Float3 {
        self.coefficients.multiply_vector(Float3::new(1.0, t, t * t))
    }

    pub fn evaluate_first_derivative(&self, t: f32) -> Float3 {
        self.coefficients.multiply_vector(Float3::new(0.0, 1.0, 2.0 * t))
    }

    pub fn evaluate_second_derivative(&self, _t: f32) -> Float3 {
        self.coefficients.multiply_vector(Float3::new(0.0, 0.0, 2.0))
    }
}

/// Parameter at which a quadratic Bezier through `a`, `b`, `c` reaches `b`
/// with `b` at its curvature maximum.
///
/// With `A = a - b` and `C = c - b` the condition `B'(t)·B'' = 0` reduces to
/// `t³|C|² - (1-t)³|A|² + t(1-t)(2t-1)(A·C) = 0`, which is negative at 0 and
/// positive at 1.
pub fn max_curvature_parameter(a: Float3, b: Float3, c: Float3) -> f32 {
    let to_a = a - b;
    let to_c = c - b;
    let len_a = to_a.magnitude();
    let len_c = to_c.magnitude();
    if len_a < MIN_CHORD || len_c < MIN_CHORD {
        log::trace!("short chord ({len_a}, {len_c}), middle parameter fixed at 0.5");
        return 0.5;
    }

    let dot = to_a.dot(to_c);
    if 1.0 - (dot / (len_a * len_c)).abs() < COLLINEAR_THRESHOLD {
        log::trace!("near-collinear points, middle parameter fixed at 0.5");
        return 0.5;
    }

    bisect_cubic(
        to_a.magnitude_squared(),
        to_c.magnitude_squared(),
        dot,
        0.0,
        1.0,
    )
}

fn cubic(aa: f32, cc: f32, ac: f32, t: f32) -> f32 {
    let s = 1.0 - t;
    t * t * t * cc - s * s * s * aa + t * s * (t - s) * ac
}

/// Recursive interval halving on the sign of the cubic. Depth is bounded by the
/// tolerance: about twenty levels on `[0, 1]`.
fn bisect_cubic(aa: f32, cc: f32, ac: f32, lo: f32, hi: f32) -> f32 {
    let mid = 0.5 * (lo + hi);
    if hi - lo < ROOT_TOLERANCE {
        return mid;
    }
    if cubic(aa, cc, ac, mid) > 0.0 {
        bisect_cubic(aa, cc, ac, lo, mid)
    } else {
        bisect_cubic(aa, cc, ac, mid, hi)
    }
}
