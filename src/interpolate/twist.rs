use crate::math::lerp;
use crate::params::TwistKind;

/// Twist angle (degrees) interpolator over three consecutive knots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TwistInterpolator {
    /// Holds the middle value across the whole span.
    Constant { value: f32 },
    /// Piecewise linear `a -> b -> c`, with `b` at the midpoint.
    Linear { a: f32, b: f32, c: f32 },
}

impl TwistInterpolator {
    pub fn fit(kind: TwistKind, a: f32, b: f32, c: f32) -> Self {
        match kind {
            TwistKind::Constant => Self::Constant { value: b },
            TwistKind::Linear => Self::Linear { a, b, c },
        }
    }

    /// Local parameter of the middle value.
    pub fn t(&self) -> f32 {
        0.5
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        match *self {
            Self::Constant { value } => value,
            Self::Linear { a, b, c } => {
                if t < 0.5 {
                    lerp(a, b, t * 2.0)
                } else {
                    lerp(b, c, (t - 0.5) * 2.0)
                }
            }
        }
    }
}
