use super::Curve;
use crate::math::{closest_point_on_segment, closest_points_ray_segment, Float3, Ray};

/// Default chord count for curve-level nearest-point queries.
pub const RAY_RESOLUTION: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveHit {
    pub position: Float3,
    /// Local curve parameter in `[0, 1]`.
    pub t: f32,
    pub distance: f32,
}

/// Closest point on the curve to a ray, found by sampling `resolution` chords
/// and mapping the winning chord's segment parameter back to curve `t`.
pub fn get_nearest_point_to_ray(curve: &Curve, ray: &Ray, resolution: usize) -> CurveHit {
    let t = nearest_chord(curve, resolution, |a, b| {
        let (u, on_segment, on_ray) = closest_points_ray_segment(ray, a, b);
        (u, on_segment.distance(on_ray))
    });
    let position = curve.position(t);
    CurveHit {
        position,
        t,
        distance: ray.distance_to_point(position),
    }
}

/// Closest point on the curve to `point`, same chord sampling as the ray query.
pub fn get_nearest_point(curve: &Curve, point: Float3, resolution: usize) -> CurveHit {
    let t = nearest_chord(curve, resolution, |a, b| {
        let (u, on_segment) = closest_point_on_segment(a, b, point);
        (u, on_segment.distance(point))
    });
    let position = curve.position(t);
    CurveHit {
        position,
        t,
        distance: position.distance(point),
    }
}

fn nearest_chord<F>(curve: &Curve, resolution: usize, mut measure: F) -> f32
where
    F: FnMut(Float3, Float3) -> (f32, f32),
{
    let resolution = resolution.max(1);
    let step = 1.0 / resolution as f32;
    let mut best_t = 0.0;
    let mut best_distance = f32::INFINITY;
    let mut start = curve.position(0.0);
    for i in 0..resolution {
        let t0 = i as f32 * step;
        let end = curve.position(t0 + step);
        let (u, distance) = measure(start, end);
        if distance < best_distance {
            best_distance = distance;
            best_t = t0 + u * step;
        }
        start = end;
    }
    best_t.clamp(0.0, 1.0)
}
