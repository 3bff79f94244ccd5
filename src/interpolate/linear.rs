use crate::math::{Float3, EPSILON};

/// Straight segment from `a` to `c`, used for coincident and collinear fits.
///
/// `t` is the chord-length position of the middle point, so `b` is still
/// interpolated when it lies between the endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Linear {
    start: Float3,
    end: Float3,
    t: f32,
}

impl Linear {
    pub fn fit(a: Float3, b: Float3, c: Float3) -> Self {
        let first = a.distance(b);
        let total = first + b.distance(c);
        let t = if total < EPSILON { 0.5 } else { first / total };
        Self {
            start: a,
            end: c,
            t,
        }
    }

    pub fn t(&self) -> f32 {
        self.t
    }

    pub fn evaluate(&self, t: f32) -> Float3 {
        self.start.lerp(self.end, t)
    }

    pub fn evaluate_first_derivative(&self, _t: f32) -> Float3 {
        self.end - self.start
    }

    pub fn evaluate_second_derivative(&self, _t: f32) -> Float3 {
        Float3::ZERO
    }
}
