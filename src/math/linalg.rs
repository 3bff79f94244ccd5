use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use super::consts::EPSILON;

/// 3D vector with f32 components.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Float3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Float3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);

    pub fn magnitude(self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    pub fn magnitude_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).magnitude()
    }

    pub fn normalize(self) -> Self {
        let mag = self.magnitude();
        if mag < EPSILON {
            return Self::ZERO;
        }
        self * (1.0 / mag)
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    /// Unsigned angle in radians between two vectors.
    pub fn angle_between(self, other: Self) -> f32 {
        let denom = (self.magnitude_squared() * other.magnitude_squared()).sqrt();
        if denom < EPSILON {
            return 0.0;
        }
        (self.dot(other) / denom).clamp(-1.0, 1.0).acos()
    }

    /// Spherical interpolation between two unit vectors.
    ///
    /// Falls back to a normalized lerp when the vectors are nearly parallel.
    pub fn slerp(self, other: Self, t: f32) -> Self {
        let cos_theta = self.dot(other).clamp(-1.0, 1.0);
        let theta = cos_theta.acos();
        let sin_theta = theta.sin();
        if sin_theta.abs() < 1e-5 {
            return self.lerp(other, t).normalize();
        }
        let wa = ((1.0 - t) * theta).sin() / sin_theta;
        let wb = (t * theta).sin() / sin_theta;
        self * wa + other * wb
    }
}

impl Add for Float3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Float3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Float3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl SubAssign for Float3 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul<f32> for Float3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Mul<Float3> for f32 {
    type Output = Float3;
    fn mul(self, v: Float3) -> Float3 {
        v * self
    }
}

impl Div<f32> for Float3 {
    type Output = Self;
    fn div(self, scalar: f32) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl Neg for Float3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Default for Float3 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Unit quaternion for 3D rotations.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub fn from_axis_angle(axis: Float3, angle: f32) -> Self {
        let half_angle = angle * 0.5;
        let s = half_angle.sin();
        let c = half_angle.cos();
        let normalized = axis.normalize();

        Self::new(normalized.x * s, normalized.y * s, normalized.z * s, c)
    }

    pub fn mul_vec(self, v: Float3) -> Float3 {
        let qv = Float3::new(self.x, self.y, self.z);
        let uv = qv.cross(v);
        let uuv = qv.cross(uv);
        v + (uv * (2.0 * self.w)) + (uuv * 2.0)
    }

    pub fn to_matrix3(self) -> Matrix3 {
        Matrix3::from_columns(
            self.mul_vec(Float3::RIGHT),
            self.mul_vec(Float3::UP),
            self.mul_vec(Float3::FORWARD),
        )
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// 3x3 matrix stored as three column vectors.
///
/// Doubles as a coefficient matrix: `multiply_vector([1, t, t²])` evaluates
/// a quadratic whose coefficients are the columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    pub c0: Float3,
    pub c1: Float3,
    pub c2: Float3,
}

impl Matrix3 {
    pub const IDENTITY: Self = Self {
        c0: Float3::RIGHT,
        c1: Float3::UP,
        c2: Float3::FORWARD,
    };

    pub fn from_columns(c0: Float3, c1: Float3, c2: Float3) -> Self {
        Self { c0, c1, c2 }
    }

    pub fn multiply_vector(&self, v: Float3) -> Float3 {
        self.c0 * v.x + self.c1 * v.y + self.c2 * v.z
    }
}

/// Column-major affine transform.
///
/// Only the upper 3x4 block takes part in point transforms; the projective
/// row is carried for hosts that hand over full engine matrices.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4 {
    pub cols: [[f32; 4]; 4],
}

impl Matrix4 {
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self { cols }
    }

    pub fn from_translation(t: Float3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = [t.x, t.y, t.z, 1.0];
        m
    }

    pub fn from_scale(s: Float3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[0][0] = s.x;
        m.cols[1][1] = s.y;
        m.cols[2][2] = s.z;
        m
    }

    pub fn from_rotation_translation(rotation: Quaternion, translation: Float3) -> Self {
        let r = rotation.to_matrix3();
        Self::from_cols([
            [r.c0.x, r.c0.y, r.c0.z, 0.0],
            [r.c1.x, r.c1.y, r.c1.z, 0.0],
            [r.c2.x, r.c2.y, r.c2.z, 0.0],
            [translation.x, translation.y, translation.z, 1.0],
        ])
    }

    fn column(&self, i: usize) -> Float3 {
        Float3::new(self.cols[i][0], self.cols[i][1], self.cols[i][2])
    }

    pub fn transform_point(&self, p: Float3) -> Float3 {
        self.transform_vector(p) + self.column(3)
    }

    pub fn transform_vector(&self, v: Float3) -> Float3 {
        self.column(0) * v.x + self.column(1) * v.y + self.column(2) * v.z
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Half-line starting at `origin`. `direction` need not be normalized.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    pub origin: Float3,
    pub direction: Float3,
}

impl Ray {
    pub const fn new(origin: Float3, direction: Float3) -> Self {
        Self { origin, direction }
    }

    pub fn point_at(&self, v: f32) -> Float3 {
        self.origin + self.direction * v
    }

    pub fn distance_to_point(&self, p: Float3) -> f32 {
        let len_sq = self.direction.magnitude_squared();
        if len_sq < EPSILON {
            return self.origin.distance(p);
        }
        let v = ((p - self.origin).dot(self.direction) / len_sq).max(0.0);
        self.point_at(v).distance(p)
    }
}

/// Closest point to `p` on segment `a..b`, returned with its segment parameter.
pub fn closest_point_on_segment(a: Float3, b: Float3, p: Float3) -> (f32, Float3) {
    let ab = b - a;
    let len_sq = ab.magnitude_squared();
    if len_sq < EPSILON {
        return (0.0, a);
    }
    let u = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (u, a + ab * u)
}

/// Closest points between a ray and segment `a..b`.
///
/// Returns `(u, on_segment, on_ray)` where `u` is the segment parameter.
pub fn closest_points_ray_segment(ray: &Ray, a: Float3, b: Float3) -> (f32, Float3, Float3) {
    let d1 = b - a;
    let d2 = ray.direction;
    let r = a - ray.origin;
    let seg_sq = d1.magnitude_squared();
    let ray_sq = d2.magnitude_squared();
    let f = d2.dot(r);

    if seg_sq < EPSILON && ray_sq < EPSILON {
        return (0.0, a, ray.origin);
    }
    if seg_sq < EPSILON {
        let v = (f / ray_sq).max(0.0);
        return (0.0, a, ray.point_at(v));
    }

    let c = d1.dot(r);
    if ray_sq < EPSILON {
        let u = (-c / seg_sq).clamp(0.0, 1.0);
        return (u, a + d1 * u, ray.origin);
    }

    let b_dot = d1.dot(d2);
    let denom = seg_sq * ray_sq - b_dot * b_dot;
    let mut u = if denom.abs() > EPSILON {
        ((b_dot * f - c * ray_sq) / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mut v = (b_dot * u + f) / ray_sq;
    if v < 0.0 {
        v = 0.0;
        u = (-c / seg_sq).clamp(0.0, 1.0);
    }
    (u, a + d1 * u, ray.point_at(v))
}
