use std::cell::OnceCell;

use crate::curve::{build_lut, Curve, DistanceLut};

/// Lazily built distance table for one curve. An empty cell is a cold entry.
#[derive(Debug, Clone, Default)]
pub struct CurveCache {
    lut: OnceCell<DistanceLut>,
}

impl CurveCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_warm(&self) -> bool {
        self.lut.get().is_some()
    }

    pub fn lut_or_build(&self, curve: impl FnOnce() -> Curve) -> &DistanceLut {
        self.lut.get_or_init(|| build_lut(&curve()))
    }

    pub fn invalidate(&mut self) {
        self.lut.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::lut_length;
    use crate::math::Float3;
    use crate::params::InterpolationKind;
    use approx::assert_relative_eq;

    #[test]
    fn builds_once_until_invalidated() {
        let curve = Curve::from_points(
            InterpolationKind::Circular,
            Float3::new(-1.0, 0.0, 0.0),
            Float3::ZERO,
            Float3::new(1.0, 0.0, 0.0),
            Float3::new(2.0, 0.0, 0.0),
        );
        let mut cache = CurveCache::new();
        assert!(!cache.is_warm());

        let mut builds = 0;
        for _ in 0..3 {
            let lut = cache.lut_or_build(|| {
                builds += 1;
                curve
            });
            assert_relative_eq!(lut_length(lut), 1.0, epsilon = 1e-4);
        }
        assert_eq!(builds, 1);
        assert!(cache.is_warm());

        cache.invalidate();
        assert!(!cache.is_warm());
    }
}
