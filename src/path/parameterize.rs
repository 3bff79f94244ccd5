use crate::curve::{get_distance_to_interpolation, get_interpolation_to_distance};
use crate::spline::Spline;

/// A location on a spline as curve index plus local curve parameter.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct CurveT {
    pub index: usize,
    pub t: f32,
}

impl CurveT {
    pub const fn new(index: usize, t: f32) -> Self {
        Self { index, t }
    }
}

/// Maps normalized spline `t` to a curve and local parameter.
///
/// The arclength target is located in the cached running curve lengths; within
/// the curve the local parameter comes from its distance table, or from a
/// uniform split when `use_lut` is false.
pub fn spline_to_curve_t(spline: &Spline, t: f32, use_lut: bool) -> CurveT {
    let count = spline.curve_count();
    if count == 0 {
        return CurveT::default();
    }

    let total = spline.length();
    let t = t.clamp(0.0, 1.0);
    if total <= 0.0 {
        log::trace!("zero-length spline, using uniform curve parameters");
        let scaled = t * count as f32;
        let index = (scaled.floor() as usize).min(count - 1);
        return CurveT::new(index, scaled - index as f32);
    }

    let Some((index, local)) = spline.locate_distance(t * total) else {
        return CurveT::default();
    };
    let curve_t = if use_lut {
        spline
            .curve_lut(index)
            .map_or(0.0, |lut| get_distance_to_interpolation(lut, local))
    } else {
        let length = spline.curve_length(index);
        if length > 0.0 {
            (local / length).clamp(0.0, 1.0)
        } else {
            0.0
        }
    };
    CurveT::new(index, curve_t)
}

/// Inverse of [`spline_to_curve_t`] with distance tables.
pub fn curve_to_spline_t(spline: &Spline, curve_t: CurveT) -> f32 {
    let count = spline.curve_count();
    let total = spline.length();
    if count == 0 || total <= 0.0 {
        return 0.0;
    }

    let index = curve_t.index.min(count - 1);
    let partial = spline
        .curve_lut(index)
        .map_or(0.0, |lut| get_interpolation_to_distance(lut, curve_t.t));
    ((spline.curve_start(index) + partial) / total).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knot::Knot;
    use crate::math::Float3;
    use approx::assert_relative_eq;

    fn uneven_line() -> Spline {
        Spline::from_knots(
            [0.0, 1.0, 4.0]
                .into_iter()
                .map(|x| Knot::at(Float3::new(x, 0.0, 0.0))),
            false,
        )
    }

    #[test]
    fn normalized_t_maps_by_arclength() {
        let spline = uneven_line();
        let first = spline_to_curve_t(&spline, 0.125, true);
        assert_eq!(first.index, 0);
        assert_relative_eq!(first.t, 0.5, epsilon = 1e-3);

        let second = spline_to_curve_t(&spline, 0.625, true);
        assert_eq!(second.index, 1);
        assert_relative_eq!(second.t, 0.5, epsilon = 1e-2);

        let end = spline_to_curve_t(&spline, 1.0, true);
        assert_eq!(end.index, 1);
        assert_relative_eq!(end.t, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn curve_t_maps_back_to_normalized() {
        let spline = uneven_line();
        assert_relative_eq!(curve_to_spline_t(&spline, CurveT::new(0, 1.0)), 0.25, epsilon = 1e-4);
        assert_relative_eq!(curve_to_spline_t(&spline, CurveT::new(1, 0.0)), 0.25, epsilon = 1e-4);
        assert_relative_eq!(curve_to_spline_t(&spline, CurveT::new(1, 1.0)), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn boundary_distance_belongs_to_next_curve() {
        let spline = uneven_line();
        let first_end = spline.curve_ends()[0];
        assert_eq!(spline.locate_distance(first_end), Some((1, 0.0)));
        let (index, local) = spline.locate_distance(first_end - 0.5).unwrap();
        assert_eq!(index, 0);
        assert_relative_eq!(local, first_end - 0.5, epsilon = 1e-6);

        let uniform = spline_to_curve_t(&spline, 0.625, false);
        assert_eq!(uniform.index, 1);
        assert_relative_eq!(uniform.t, 0.5, epsilon = 1e-3);
    }

    #[test]
    fn empty_spline_maps_to_origin() {
        let spline = Spline::new();
        assert_eq!(spline_to_curve_t(&spline, 0.5, true), CurveT::default());
        assert_eq!(curve_to_spline_t(&spline, CurveT::new(3, 0.5)), 0.0);
    }
}
