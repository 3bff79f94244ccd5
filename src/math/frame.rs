use super::consts::EPSILON;
use super::linalg::{Float3, Quaternion};

/// Orthonormal coordinate frame carried along a curve.
///
/// Represents a right-handed coordinate system with three orthogonal unit vectors:
/// - `direction`: forward direction along the curve (tangent)
/// - `normal`: up vector perpendicular to the curve
/// - `lateral`: `direction x normal`
///
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub direction: Float3,
    pub normal: Float3,
    pub lateral: Float3,
}

impl Frame {
    pub const fn new(direction: Float3, normal: Float3, lateral: Float3) -> Self {
        Self {
            direction,
            normal,
            lateral,
        }
    }

    /// Builds a frame from a tangent and a seed up vector.
    ///
    /// `up` only needs to be non-parallel to `direction`; it is projected onto the
    /// plane perpendicular to the tangent. A degenerate seed falls back to world
    /// right, then world forward. A zero direction is taken as world forward.
    pub fn from_direction_up(direction: Float3, up: Float3) -> Self {
        let dir = if direction.magnitude_squared() < EPSILON {
            Float3::FORWARD
        } else {
            direction.normalize()
        };
        let mut lateral = dir.cross(up).normalize();
        if lateral.magnitude() < EPSILON {
            lateral = Float3::RIGHT - dir * dir.dot(Float3::RIGHT);
            if lateral.magnitude() < 1e-3 {
                lateral = Float3::FORWARD - dir * dir.dot(Float3::FORWARD);
            }
            lateral = lateral.normalize();
        }
        let normal = lateral.cross(dir).normalize();
        Self::new(dir, normal, lateral)
    }

    /// Rolls the frame about its own direction by `angle` radians.
    pub fn with_roll(self, angle: f32) -> Self {
        let q = Quaternion::from_axis_angle(self.direction, angle);
        let normal = q.mul_vec(self.normal).normalize();
        let lateral = self.direction.cross(normal).normalize();
        Self::new(self.direction, normal, lateral)
    }

    pub const DEFAULT: Self = Self::new(Float3::FORWARD, Float3::UP, Float3::new(-1.0, 0.0, 0.0));
}

impl Default for Frame {
    fn default() -> Self {
        Self::DEFAULT
    }
}
