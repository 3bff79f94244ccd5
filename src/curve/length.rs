//! Arclength sampling and distance/parameter lookup tables.

use super::Curve;
use crate::math::lerp;

/// Default sample count for [`calculate_length`].
pub const LENGTH_RESOLUTION: usize = 30;
/// Entry count of a [`DistanceLut`].
pub const LUT_RESOLUTION: usize = 30;

/// One lookup table sample: cumulative distance at local parameter `t`.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceToInterpolation {
    pub distance: f32,
    pub t: f32,
}

pub type DistanceLut = [DistanceToInterpolation; LUT_RESOLUTION];

/// Sum of chord lengths over `resolution` evenly spaced samples.
pub fn calculate_length(curve: &Curve, resolution: usize) -> f32 {
    let resolution = resolution.max(2);
    let step = 1.0 / (resolution - 1) as f32;
    let mut length = 0.0;
    let mut prev = curve.position(0.0);
    for i in 1..resolution {
        let point = curve.position(i as f32 * step);
        length += point.distance(prev);
        prev = point;
    }
    length
}

/// Fills `lut` with cumulative distances at evenly spaced parameters.
/// Slot 0 is always `(0, 0)`; the last slot holds the curve length at `t = 1`.
pub fn calculate_lut(curve: &Curve, lut: &mut [DistanceToInterpolation]) {
    let Some(first) = lut.first_mut() else {
        return;
    };
    *first = DistanceToInterpolation::default();
    if lut.len() < 2 {
        return;
    }

    let step = 1.0 / (lut.len() - 1) as f32;
    let mut distance = 0.0;
    let mut prev = curve.position(0.0);
    for (i, entry) in lut.iter_mut().enumerate().skip(1) {
        let t = i as f32 * step;
        let point = curve.position(t);
        distance += point.distance(prev);
        prev = point;
        *entry = DistanceToInterpolation { distance, t };
    }
}

pub fn build_lut(curve: &Curve) -> DistanceLut {
    let mut lut = [DistanceToInterpolation::default(); LUT_RESOLUTION];
    calculate_lut(curve, &mut lut);
    lut
}

/// Total distance recorded in the table.
pub fn lut_length(lut: &[DistanceToInterpolation]) -> f32 {
    lut.last().map_or(0.0, |entry| entry.distance)
}

/// Local parameter at arclength `distance`, saturating to `[0, 1]`.
pub fn get_distance_to_interpolation(lut: &[DistanceToInterpolation], distance: f32) -> f32 {
    let total = lut_length(lut);
    if distance <= 0.0 || lut.len() < 2 {
        return 0.0;
    }
    if distance >= total {
        return 1.0;
    }

    let mut prev = lut[0];
    for &entry in &lut[1..] {
        if distance < entry.distance {
            let span = entry.distance - prev.distance;
            if span <= 0.0 {
                return entry.t;
            }
            return lerp(prev.t, entry.t, (distance - prev.distance) / span);
        }
        prev = entry;
    }
    1.0
}

/// Arclength covered at local parameter `t`, the inverse of
/// [`get_distance_to_interpolation`].
pub fn get_interpolation_to_distance(lut: &[DistanceToInterpolation], t: f32) -> f32 {
    if t <= 0.0 || lut.len() < 2 {
        return 0.0;
    }
    if t >= 1.0 {
        return lut_length(lut);
    }

    let mut prev = lut[0];
    for &entry in &lut[1..] {
        if t < entry.t {
            let span = entry.t - prev.t;
            return lerp(prev.distance, entry.distance, (t - prev.t) / span);
        }
        prev = entry;
    }
    lut_length(lut)
}

/// Distance lookup without a caller-owned table; the table lives on the stack.
pub fn curve_distance_to_interpolation(curve: &Curve, distance: f32) -> f32 {
    get_distance_to_interpolation(&build_lut(curve), distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Float3;
    use crate::params::InterpolationKind;
    use approx::assert_relative_eq;

    fn straight_curve() -> Curve {
        Curve::from_points(
            InterpolationKind::Circular,
            Float3::new(-4.0, 0.0, 0.0),
            Float3::ZERO,
            Float3::new(4.0, 0.0, 0.0),
            Float3::new(8.0, 0.0, 0.0),
        )
    }

    fn bent_curve() -> Curve {
        Curve::from_points(
            InterpolationKind::QuadraticBezier,
            Float3::new(-1.0, -1.0, 0.0),
            Float3::new(0.0, 0.0, 0.0),
            Float3::new(2.0, 1.0, 0.0),
            Float3::new(2.5, 3.0, 1.0),
        )
    }

    #[test]
    fn straight_length_is_exact() {
        let curve = straight_curve();
        assert_relative_eq!(calculate_length(&curve, LENGTH_RESOLUTION), 4.0, epsilon = 1e-4);
        assert_relative_eq!(lut_length(&build_lut(&curve)), 4.0, epsilon = 1e-4);
    }

    #[test]
    fn lut_starts_at_origin_and_matches_length() {
        let curve = bent_curve();
        let lut = build_lut(&curve);
        assert_eq!(lut[0], DistanceToInterpolation::default());
        assert_eq!(lut[LUT_RESOLUTION - 1].t, 1.0);
        assert_relative_eq!(
            lut_length(&lut),
            calculate_length(&curve, LUT_RESOLUTION),
            epsilon = 1e-4
        );
        assert!(lut.windows(2).all(|w| w[1].distance >= w[0].distance));
    }

    #[test]
    fn lookup_saturates_and_is_monotonic() {
        let lut = build_lut(&bent_curve());
        let total = lut_length(&lut);
        assert_eq!(get_distance_to_interpolation(&lut, -1.0), 0.0);
        assert_eq!(get_distance_to_interpolation(&lut, 0.0), 0.0);
        assert_eq!(get_distance_to_interpolation(&lut, total), 1.0);
        assert_eq!(get_distance_to_interpolation(&lut, total + 5.0), 1.0);

        let mut prev = 0.0;
        for i in 0..=100 {
            let t = get_distance_to_interpolation(&lut, total * i as f32 / 100.0);
            assert!(t >= prev);
            prev = t;
        }
    }

    #[test]
    fn straight_lookup_is_linear() {
        let curve = straight_curve();
        assert_relative_eq!(curve_distance_to_interpolation(&curve, 1.0), 0.25, epsilon = 1e-3);
        assert_relative_eq!(curve_distance_to_interpolation(&curve, 3.0), 0.75, epsilon = 1e-3);
    }

    #[test]
    fn inverse_lookup_recovers_distance() {
        let lut = build_lut(&bent_curve());
        let total = lut_length(&lut);
        for &fraction in &[0.1, 0.37, 0.5, 0.9] {
            let d = total * fraction;
            let t = get_distance_to_interpolation(&lut, d);
            assert_relative_eq!(get_interpolation_to_distance(&lut, t), d, epsilon = 1e-3);
        }
        assert_eq!(get_interpolation_to_distance(&lut, 1.0), total);
    }

    #[test]
    fn degenerate_tables() {
        let mut empty: [DistanceToInterpolation; 0] = [];
        calculate_lut(&straight_curve(), &mut empty);
        assert_eq!(lut_length(&empty), 0.0);
        assert_eq!(get_distance_to_interpolation(&empty, 1.0), 0.0);
    }
}
