use super::parameterize::{curve_to_spline_t, spline_to_curve_t, CurveT};
use crate::spline::Spline;

/// Coordinate system used to address a location along a spline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathIndexUnit {
    /// `[0, 1]` over the whole spline by arclength.
    #[default]
    Normalized,
    /// Arclength from the first knot.
    Distance,
    /// Integer part is the curve index, fractional part the local curve `t`.
    Knot,
}

impl PathIndexUnit {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Normalized),
            1 => Some(Self::Distance),
            2 => Some(Self::Knot),
            _ => None,
        }
    }
}

pub fn convert_index_unit(spline: &Spline, t: f32, from: PathIndexUnit, to: PathIndexUnit) -> f32 {
    let normalized = to_normalized(spline, t, from);
    match to {
        PathIndexUnit::Normalized => normalized,
        PathIndexUnit::Distance => normalized * spline.length(),
        PathIndexUnit::Knot => {
            let curve_t = spline_to_curve_t(spline, normalized, true);
            curve_t.index as f32 + curve_t.t
        }
    }
}

/// Curve location for `t` expressed in `unit`.
pub fn to_curve_t(spline: &Spline, t: f32, unit: PathIndexUnit) -> CurveT {
    match unit {
        PathIndexUnit::Knot => knot_unit_to_curve_t(spline, t),
        _ => spline_to_curve_t(spline, to_normalized(spline, t, unit), true),
    }
}

/// Splits a knot-unit value into curve index and local `t` without touching
/// distance tables.
pub fn knot_unit_to_curve_t(spline: &Spline, t: f32) -> CurveT {
    let count = spline.curve_count();
    if count == 0 {
        return CurveT::default();
    }
    let span = count as f32;
    let value = if spline.closed() {
        t.rem_euclid(span)
    } else {
        t.clamp(0.0, span)
    };
    let index = (value.floor() as usize).min(count - 1);
    CurveT::new(index, (value - index as f32).clamp(0.0, 1.0))
}

fn to_normalized(spline: &Spline, t: f32, unit: PathIndexUnit) -> f32 {
    match unit {
        PathIndexUnit::Normalized => wrap_normalized(spline, t),
        PathIndexUnit::Distance => {
            let length = spline.length();
            if length > 0.0 {
                wrap_normalized(spline, t / length)
            } else {
                0.0
            }
        }
        PathIndexUnit::Knot => curve_to_spline_t(spline, knot_unit_to_curve_t(spline, t)),
    }
}

fn wrap_normalized(spline: &Spline, t: f32) -> f32 {
    if spline.closed() && !(0.0..=1.0).contains(&t) {
        t - t.floor()
    } else {
        t.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knot::Knot;
    use crate::math::Float3;
    use approx::assert_relative_eq;

    fn square(closed: bool) -> Spline {
        Spline::from_knots(
            [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]
                .into_iter()
                .map(|(x, z)| Knot::at(Float3::new(x, 0.0, z))),
            closed,
        )
    }

    #[test]
    fn knot_unit_splits_index_and_fraction() {
        let spline = square(false);
        assert_eq!(knot_unit_to_curve_t(&spline, 1.25), CurveT::new(1, 0.25));
        assert_eq!(knot_unit_to_curve_t(&spline, 3.0), CurveT::new(2, 1.0));
        assert_eq!(knot_unit_to_curve_t(&spline, -2.0), CurveT::new(0, 0.0));

        let closed = square(true);
        assert_eq!(knot_unit_to_curve_t(&closed, 5.5), CurveT::new(1, 0.5));
    }

    #[test]
    fn normalized_wraps_only_when_closed() {
        let open = square(false);
        assert_eq!(
            convert_index_unit(&open, 1.25, PathIndexUnit::Normalized, PathIndexUnit::Normalized),
            1.0
        );
        assert_relative_eq!(
            convert_index_unit(&open, 1.25, PathIndexUnit::Normalized, PathIndexUnit::Distance),
            open.length(),
            epsilon = 1e-4
        );

        let closed = square(true);
        assert_relative_eq!(
            convert_index_unit(&closed, 1.25, PathIndexUnit::Normalized, PathIndexUnit::Distance),
            0.25 * closed.length(),
            epsilon = 1e-3
        );
    }

    #[test]
    fn units_round_trip_through_normalized() {
        let spline = square(false);
        let distance = 0.4 * spline.length();
        let knot =
            convert_index_unit(&spline, distance, PathIndexUnit::Distance, PathIndexUnit::Knot);
        let back = convert_index_unit(&spline, knot, PathIndexUnit::Knot, PathIndexUnit::Distance);
        assert_relative_eq!(back, distance, epsilon = 1e-2);
    }

    #[test]
    fn unit_codes() {
        assert_eq!(PathIndexUnit::from_u32(1), Some(PathIndexUnit::Distance));
        assert_eq!(PathIndexUnit::from_u32(9), None);
    }
}
