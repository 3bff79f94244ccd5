//! Rotation-minimizing up vectors between two prescribed end ups.
//!
//! Frames are propagated with the double reflection method (Wang et al. 2008)
//! over [`UP_VECTOR_SAMPLES`] evenly spaced samples, then the residual roll at
//! the far end is eased in linearly so both ends match exactly.

use super::Curve;
use crate::math::{lerp, Float3, Frame, Quaternion, EPSILON};

pub const UP_VECTOR_SAMPLES: usize = 16;

type Samples = [Float3; UP_VECTOR_SAMPLES];

/// Up vector at local `t`, slerped between the bracketing corrected samples.
pub fn evaluate_up_vector(curve: &Curve, t: f32, start_up: Float3, end_up: Float3) -> Float3 {
    let normals = corrected_normals(curve, start_up, end_up);
    sample(&normals, t)
}

/// Fills `out` with up vectors at evenly spaced parameters from 0 to 1,
/// sharing one propagation pass.
pub fn evaluate_up_vectors(curve: &Curve, start_up: Float3, end_up: Float3, out: &mut [Float3]) {
    if out.is_empty() {
        return;
    }
    let normals = corrected_normals(curve, start_up, end_up);
    let step = if out.len() > 1 {
        1.0 / (out.len() - 1) as f32
    } else {
        0.0
    };
    for (i, up) in out.iter_mut().enumerate() {
        *up = sample(&normals, i as f32 * step);
    }
}

fn sample(normals: &Samples, t: f32) -> Float3 {
    let last = UP_VECTOR_SAMPLES - 1;
    let scaled = t.clamp(0.0, 1.0) * last as f32;
    let i = (scaled.floor() as usize).min(last - 1);
    normals[i].slerp(normals[i + 1], scaled - i as f32)
}

fn corrected_normals(curve: &Curve, start_up: Float3, end_up: Float3) -> Samples {
    let last = UP_VECTOR_SAMPLES - 1;
    let step = 1.0 / last as f32;

    let mut positions = [Float3::ZERO; UP_VECTOR_SAMPLES];
    let mut tangents = [Float3::ZERO; UP_VECTOR_SAMPLES];
    for i in 0..UP_VECTOR_SAMPLES {
        let t = i as f32 * step;
        positions[i] = curve.position(t);
        tangents[i] = curve.tangent(t).normalize();
    }

    let start = Frame::from_direction_up(tangents[0], start_up);
    let mut normals = [Float3::ZERO; UP_VECTOR_SAMPLES];
    normals[0] = start.normal;
    let mut lateral = start.lateral;

    for i in 0..last {
        lateral = reflect_lateral(
            lateral,
            positions[i],
            positions[i + 1],
            tangents[i],
            tangents[i + 1],
        );
        let tangent = tangents[i + 1];
        lateral = (lateral - tangent * tangent.dot(lateral)).normalize();
        normals[i + 1] = lateral.cross(tangent).normalize();
    }

    let end_tangent = tangents[last];
    let target = Frame::from_direction_up(end_tangent, end_up).normal;
    let angle = normals[last].angle_between(target);
    if angle < EPSILON {
        return normals;
    }

    let positive = Quaternion::from_axis_angle(end_tangent, angle).mul_vec(normals[last]);
    let negative = Quaternion::from_axis_angle(end_tangent, -angle).mul_vec(normals[last]);
    let signed = if positive.dot(target) >= negative.dot(target) {
        angle
    } else {
        -angle
    };

    for (i, normal) in normals.iter_mut().enumerate() {
        let roll = lerp(0.0, signed, i as f32 * step);
        *normal = Quaternion::from_axis_angle(tangents[i], roll)
            .mul_vec(*normal)
            .normalize();
    }
    normals
}

fn reflect_lateral(
    lateral: Float3,
    x0: Float3,
    x1: Float3,
    t0: Float3,
    t1: Float3,
) -> Float3 {
    let v1 = x1 - x0;
    let c1 = v1.dot(v1);
    if c1 < EPSILON {
        return lateral;
    }
    let lateral_l = lateral - v1 * ((2.0 / c1) * v1.dot(lateral));
    let tangent_l = t0 - v1 * ((2.0 / c1) * v1.dot(t0));

    let v2 = t1 - tangent_l;
    let c2 = v2.dot(v2);
    if c2 < EPSILON {
        return lateral_l;
    }
    lateral_l - v2 * ((2.0 / c2) * v2.dot(lateral_l))
}
