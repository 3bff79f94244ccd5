//! Global nearest-point search over a whole spline.
//!
//! Coarse to fine: each iteration splits the current window of normalized `t`
//! into sub-windows, scores each sub-window's chord against the target and
//! keeps the best one. The sub-window count scales with the square root of the
//! window's arclength so long and short splines converge alike.

use super::evaluate::evaluate_position;
use crate::math::{closest_point_on_segment, closest_points_ray_segment, Float3, Ray};
use crate::params::PickParams;
use crate::spline::Spline;

const MIN_SUBDIVISIONS: usize = 6;
const MAX_SUBDIVISIONS: usize = 1024;

/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestPoint {
    pub position: Float3,
    /// Normalized spline parameter.
    pub t: f32,
    pub distance: f32,
}

impl Default for NearestPoint {
    fn default() -> Self {
        Self {
            position: Float3::ZERO,
            t: 0.0,
            distance: f32::INFINITY,
        }
    }
}

pub fn get_nearest_point(spline: &Spline, point: Float3, pick: PickParams) -> NearestPoint {
    search(
        spline,
        pick,
        |a, b| {
            let (u, on_segment) = closest_point_on_segment(a, b, point);
            (u, on_segment.distance(point))
        },
        |p| p.distance(point),
    )
}

pub fn get_nearest_point_to_ray(spline: &Spline, ray: &Ray, pick: PickParams) -> NearestPoint {
    search(
        spline,
        pick,
        |a, b| {
            let (u, on_segment, on_ray) = closest_points_ray_segment(ray, a, b);
            (u, on_segment.distance(on_ray))
        },
        |p| ray.distance_to_point(p),
    )
}

fn search<C, D>(spline: &Spline, pick: PickParams, chord: C, distance: D) -> NearestPoint
where
    C: Fn(Float3, Float3) -> (f32, f32),
    D: Fn(Float3) -> f32,
{
    if spline.is_empty() {
        return NearestPoint::default();
    }
    if let Some(knot) = spline.lone_knot() {
        return NearestPoint {
            position: knot.position,
            t: 0.0,
            distance: distance(knot.position),
        };
    }

    let pick = pick.clamped();
    let total = spline.length();
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    let mut best_t = 0.0;

    for _ in 0..pick.iterations {
        let window = (hi - lo) * total;
        let subdivisions = ((window.max(0.0).sqrt() * pick.resolution as f32) as usize)
            .clamp(MIN_SUBDIVISIONS, MAX_SUBDIVISIONS);
        let step = (hi - lo) / subdivisions as f32;

        let mut best_distance = f32::INFINITY;
        let mut best_start = lo;
        let mut start = evaluate_position(spline, lo);
        for i in 0..subdivisions {
            let t0 = lo + i as f32 * step;
            let end = evaluate_position(spline, t0 + step);
            let (u, d) = chord(start, end);
            if d < best_distance {
                best_distance = d;
                best_start = t0;
                best_t = t0 + u * step;
            }
            start = end;
        }
        lo = best_start;
        hi = (best_start + step).min(1.0);
    }

    let t = best_t.clamp(0.0, 1.0);
    let position = evaluate_position(spline, t);
    NearestPoint {
        position,
        t,
        distance: distance(position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knot::Knot;
    use approx::assert_relative_eq;

    fn wave() -> Spline {
        Spline::from_knots(
            [
                Float3::new(0.0, 0.0, 0.0),
                Float3::new(4.0, 2.0, 0.0),
                Float3::new(8.0, 0.0, 0.0),
                Float3::new(12.0, -2.0, 0.0),
                Float3::new(16.0, 0.0, 0.0),
            ]
            .map(Knot::from),
            false,
        )
    }

    #[test]
    fn empty_spline_is_infinitely_far() {
        let hit = get_nearest_point(&Spline::new(), Float3::ONE, PickParams::default());
        assert_eq!(hit.distance, f32::INFINITY);
    }

    #[test]
    fn lone_knot_is_the_nearest_point() {
        let spline = Spline::from_knots([Knot::at(Float3::new(3.0, 4.0, 5.0))], false);
        let hit = get_nearest_point(&spline, Float3::new(3.0, 4.0, 5.0), PickParams::default());
        assert_eq!(hit.position, Float3::new(3.0, 4.0, 5.0));
        assert_eq!(hit.distance, 0.0);

        let ray = Ray::new(Float3::new(3.0, 0.0, 5.0), Float3::UP);
        let hit = get_nearest_point_to_ray(&spline, &ray, PickParams::default());
        assert_relative_eq!(hit.distance, 0.0, epsilon = 1e-5);
        assert_relative_eq!(
            get_nearest_point(&spline, Float3::ZERO, PickParams::default()).distance,
            Float3::new(3.0, 4.0, 5.0).magnitude(),
            epsilon = 1e-5
        );
    }

    #[test]
    fn finest_pick_settings_stay_exact() {
        let spline = wave();
        let pick = PickParams::new(64, 10);
        for &t0 in &[0.05, 0.5, 0.77] {
            let target = evaluate_position(&spline, t0);
            let hit = get_nearest_point(&spline, target, pick);
            assert!(hit.distance < 1e-3, "t0={t0}: {}", hit.distance);
            assert_relative_eq!(hit.t, t0, epsilon = 2e-3);
        }
    }

    #[test]
    fn out_of_range_pick_settings_are_clamped() {
        let spline = wave();
        let target = evaluate_position(&spline, 0.4);
        assert_eq!(
            get_nearest_point(&spline, target, PickParams::new(1000, 1000)),
            get_nearest_point(&spline, target, PickParams::new(64, 10))
        );
        let coarse = get_nearest_point(&spline, target, PickParams::new(0, 0));
        assert_eq!(coarse, get_nearest_point(&spline, target, PickParams::new(2, 1)));
        assert!(coarse.distance.is_finite());
    }

    #[test]
    fn point_on_spline_is_recovered() {
        let spline = wave();
        for &t0 in &[0.1, 0.35, 0.62, 0.9] {
            let target = evaluate_position(&spline, t0);
            let hit = get_nearest_point(&spline, target, PickParams::default());
            assert!(hit.distance < 1e-2, "t0={t0}: {}", hit.distance);
            assert_relative_eq!(hit.t, t0, epsilon = 1e-2);
        }
    }

    #[test]
    fn offset_point_projects_onto_spline() {
        let spline = wave();
        let on_curve = evaluate_position(&spline, 0.5);
        let target = on_curve + Float3::new(0.0, 0.0, 3.0);
        let hit = get_nearest_point(&spline, target, PickParams::default());
        assert_relative_eq!(hit.distance, 3.0, epsilon = 1e-2);
        assert_relative_eq!(hit.t, 0.5, epsilon = 1e-2);
    }

    #[test]
    fn ray_through_spline_point_hits_it() {
        let spline = wave();
        let target = evaluate_position(&spline, 0.3);
        let ray = Ray::new(target + Float3::new(0.0, 0.0, 10.0), Float3::new(0.0, 0.0, -1.0));
        let hit = get_nearest_point_to_ray(&spline, &ray, PickParams::new(8, 3));
        assert!(hit.distance < 1e-2);
        assert_relative_eq!(hit.t, 0.3, epsilon = 1e-2);
    }
}
