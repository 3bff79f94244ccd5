use super::evaluate::{evaluate_position, evaluate_tangent, evaluate_up_vector};
use crate::math::{Float3, Frame};
use crate::spline::Spline;

/// Upper bound on the points a single resample produces.
pub const MAX_SAMPLES: usize = 16_384;

/// A resampled point along the spline with uniform arc-length spacing.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SplinePoint {
    pub arc: f32,
    pub position: Float3,
    pub direction: Float3,
    pub normal: Float3,
    pub lateral: Float3,
}

impl SplinePoint {
    pub const fn new(
        arc: f32,
        position: Float3,
        direction: Float3,
        normal: Float3,
        lateral: Float3,
    ) -> Self {
        Self {
            arc,
            position,
            direction,
            normal,
            lateral,
        }
    }

    pub const DEFAULT: Self = Self::new(
        0.0,
        Float3::ZERO,
        Frame::DEFAULT.direction,
        Frame::DEFAULT.normal,
        Frame::DEFAULT.lateral,
    );
}

impl Default for SplinePoint {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn sample_at(spline: &Spline, arc: f32, length: f32) -> SplinePoint {
    let t = if length > 0.0 { arc / length } else { 0.0 };
    let frame =
        Frame::from_direction_up(evaluate_tangent(spline, t), evaluate_up_vector(spline, t));
    SplinePoint::new(
        arc,
        evaluate_position(spline, t),
        frame.direction,
        frame.normal,
        frame.lateral,
    )
}

/// Resamples a spline into points spaced `spacing` apart along its arclength.
///
/// Both ends are always included, so the actual spacing is the closest value
/// that divides the length evenly. Returns empty for an empty spline and a
/// single point for a zero-length or single-knot one. A non-positive or NaN
/// `spacing` yields just the two ends, and spacings too fine for
/// [`MAX_SAMPLES`] are widened to fit it.
pub fn resample(spline: &Spline, spacing: f32) -> Vec<SplinePoint> {
    if spline.is_empty() {
        return Vec::new();
    }

    let length = spline.length();
    if length <= 0.0 {
        return vec![sample_at(spline, 0.0, length)];
    }

    let spacing = if spacing > 0.0 { spacing } else { length };
    let segments = (length / spacing).ceil().min((MAX_SAMPLES - 1) as f32);
    let num_samples = (segments as usize + 1).clamp(2, MAX_SAMPLES);

    (0..num_samples)
        .map(|i| {
            let arc = length * i as f32 / (num_samples - 1) as f32;
            sample_at(spline, arc, length)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knot::Knot;
    use approx::assert_relative_eq;

    const TOLERANCE: f32 = 1e-3;

    fn line(length: f32) -> Spline {
        Spline::from_knots([Float3::ZERO, Float3::new(length, 0.0, 0.0)].map(Knot::from), false)
    }

    #[test]
    fn resample_empty_returns_empty() {
        assert!(resample(&Spline::new(), 1.0).is_empty());
    }

    #[test]
    fn resample_single_knot_returns_single() {
        let spline = Spline::from_knots([Knot::at(Float3::new(0.0, 5.0, 0.0))], false);
        let result = resample(&spline, 1.0);
        assert_eq!(result.len(), 1);
        assert_relative_eq!(result[0].arc, 0.0, epsilon = TOLERANCE);
        assert_eq!(result[0].position, Float3::new(0.0, 5.0, 0.0));
        assert_relative_eq!(result[0].normal.magnitude(), 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn resample_line_interpolates_correctly() {
        let result = resample(&line(10.0), 5.0);
        assert_eq!(result.len(), 3);
        for (point, x) in result.iter().zip([0.0, 5.0, 10.0]) {
            assert_relative_eq!(point.arc, x, epsilon = TOLERANCE);
            assert_relative_eq!(point.position.x, x, epsilon = TOLERANCE);
            assert_relative_eq!(point.direction.x, 1.0, epsilon = TOLERANCE);
            assert_relative_eq!(point.normal.y, 1.0, epsilon = TOLERANCE);
        }
    }

    #[test]
    fn resample_uniform_spacing() {
        let result = resample(&line(100.0), 10.0);
        assert_eq!(result.len(), 11);
        for pair in result.windows(2) {
            assert_relative_eq!(pair[1].arc - pair[0].arc, 10.0, epsilon = TOLERANCE);
            assert_relative_eq!(pair[0].position.distance(pair[1].position), 10.0, epsilon = 1e-2);
        }
    }

    #[test]
    fn degenerate_spacing_is_bounded() {
        let spline = line(10.0);
        let fine = resample(&spline, 1e-38);
        assert_eq!(fine.len(), MAX_SAMPLES);
        assert_relative_eq!(fine[MAX_SAMPLES - 1].arc, 10.0, epsilon = TOLERANCE);
        assert_relative_eq!(fine[MAX_SAMPLES - 1].position.x, 10.0, epsilon = TOLERANCE);

        assert_eq!(resample(&spline, f32::NAN).len(), 2);
        assert_eq!(resample(&spline, f32::INFINITY).len(), 2);
        assert_eq!(resample(&spline, -1.0).len(), 2);
    }

    #[test]
    fn frames_are_orthonormal_on_curves() {
        let spline = Spline::from_knots(
            [
                Float3::ZERO,
                Float3::new(5.0, 1.0, 0.0),
                Float3::new(8.0, 3.0, 5.0),
                Float3::new(6.0, 4.0, 10.0),
            ]
            .map(Knot::from),
            false,
        );
        for point in resample(&spline, 0.5) {
            assert_relative_eq!(point.direction.magnitude(), 1.0, epsilon = TOLERANCE);
            assert_relative_eq!(point.direction.dot(point.normal), 0.0, epsilon = TOLERANCE);
            assert_relative_eq!(point.direction.dot(point.lateral), 0.0, epsilon = TOLERANCE);
        }
    }
}
