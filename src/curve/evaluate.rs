use super::Curve;
use crate::math::Float3;

pub fn evaluate_position(curve: &Curve, t: f32) -> Float3 {
    curve.position(t.clamp(0.0, 1.0))
}

pub fn evaluate_tangent(curve: &Curve, t: f32) -> Float3 {
    curve.tangent(t.clamp(0.0, 1.0))
}

pub fn evaluate_acceleration(curve: &Curve, t: f32) -> Float3 {
    curve.acceleration(t.clamp(0.0, 1.0))
}

/// Twist in degrees.
pub fn evaluate_twist(curve: &Curve, t: f32) -> f32 {
    curve.twist(t.clamp(0.0, 1.0))
}

/// Curvature `|v × a| / |v|³`. A zero tangent yields NaN.
pub fn evaluate_curvature(curve: &Curve, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let v = curve.tangent(t);
    let a = curve.acceleration(t);
    let vv = v.magnitude_squared();
    let dot = v.dot(a);
    let numerator = (vv * a.magnitude_squared() - dot * dot).max(0.0).sqrt();
    numerator / (vv * vv.sqrt())
}
