use crate::math::{Float3, Matrix4};

/// A spline control point: position plus twist about the local tangent.
///
/// Knots carry no tangent handles; tangents are derived from the neighboring
/// knots when curves are built.
/// C-compatible layout for FFI.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Knot {
    pub position: Float3,
    /// Rotation about the tangent, in degrees.
    pub twist: f32,
}

impl Knot {
    pub const fn new(position: Float3, twist: f32) -> Self {
        Self { position, twist }
    }

    pub const fn at(position: Float3) -> Self {
        Self::new(position, 0.0)
    }

    pub fn transformed(&self, matrix: &Matrix4) -> Self {
        Self::new(matrix.transform_point(self.position), self.twist)
    }
}

impl From<Float3> for Knot {
    fn from(position: Float3) -> Self {
        Self::at(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knots_compare_by_fields() {
        let a = Knot::new(Float3::new(1.0, 2.0, 3.0), 15.0);
        assert_eq!(a, Knot::new(Float3::new(1.0, 2.0, 3.0), 15.0));
        assert_ne!(a, Knot::new(Float3::new(1.0, 2.0, 3.0), 0.0));
        assert_eq!(Knot::default(), Knot::at(Float3::ZERO));
    }

    #[test]
    fn transform_moves_position_keeps_twist() {
        let knot = Knot::new(Float3::ONE, 30.0);
        let moved = knot.transformed(&Matrix4::from_translation(Float3::new(0.0, 5.0, 0.0)));
        assert_eq!(moved.position, Float3::new(1.0, 6.0, 1.0));
        assert_eq!(moved.twist, 30.0);
    }
}
