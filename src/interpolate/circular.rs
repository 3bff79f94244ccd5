use std::f32::consts::TAU;

use crate::math::{Float3, Matrix3};

/// Threshold on the sine of the turning angle at the middle point.
pub(super) const COLLINEAR_THRESHOLD: f32 = 1e-3;

/// Circular arc through `a`, `b`, `c`.
///
/// The arc lives in a canonical plane: local `x` points from the center to `a`,
/// local `z` is the plane normal oriented so the arc runs `a -> b -> c` with
/// increasing angle. `rotation` maps that frame to world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circular {
    center: Float3,
    radius: f32,
    angle_range: f32,
    rotation: Matrix3,
    t: f32,
}

impl Circular {
    /// Fits the arc, or `None` when the points are collinear.
    pub fn fit(a: Float3, b: Float3, c: Float3) -> Option<Self> {
        let ab = b - a;
        let bc = c - b;
        let plane_normal = ab.cross(bc);
        if plane_normal.magnitude() <= COLLINEAR_THRESHOLD * ab.magnitude() * bc.magnitude() {
            return None;
        }

        // Barycentric circumcenter: each weight is the squared opposite side
        // times the dot product of the two sides meeting at that vertex.
        let u = (c - b).magnitude_squared() * (b - a).dot(c - a);
        let v = (a - c).magnitude_squared() * (a - b).dot(c - b);
        let w = (b - a).magnitude_squared() * (a - c).dot(b - c);
        let center = (a * u + b * v + c * w) / (u + v + w);

        let radius = (a - center).magnitude();
        let dir_a = (a - center) / radius;
        let dir_b = (b - center) / radius;
        let dir_c = (c - center) / radius;

        let axis = plane_normal.normalize();
        let y = axis.cross(dir_a);
        let angle_of = |dir: Float3| {
            let angle = dir.dot(y).atan2(dir.dot(dir_a));
            if angle < 0.0 {
                angle + TAU
            } else {
                angle
            }
        };

        let angle_range = angle_of(dir_c);
        let t = angle_of(dir_b) / angle_range;

        Some(Self {
            center,
            radius,
            angle_range,
            rotation: Matrix3::from_columns(dir_a, y, axis),
            t,
        })
    }

    pub fn t(&self) -> f32 {
        self.t
    }

    pub fn center(&self) -> Float3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Signed angular span from `a` to `c` in radians, in `(0, 2π)`.
    pub fn angle_range(&self) -> f32 {
        self.angle_range
    }

    pub fn evaluate(&self, t: f32) -> Float3 {
        let (sin, cos) = (self.angle_range * t).sin_cos();
        self.center
            + self
                .rotation
                .multiply_vector(Float3::new(cos, sin, 0.0) * self.radius)
    }

    pub fn evaluate_first_derivative(&self, t: f32) -> Float3 {
        let (sin, cos) = (self.angle_range * t).sin_cos();
        self.rotation
            .multiply_vector(Float3::new(-sin, cos, 0.0) * (self.radius * self.angle_range))
    }

    pub fn evaluate_second_derivative(&self, t: f32) -> Float3 {
        let (sin, cos) = (self.angle_range * t).sin_cos();
        let scale = self.radius * self.angle_range * self.angle_range;
        self.rotation
            .multiply_vector(Float3::new(-cos, -sin, 0.0) * scale)
    }
}
