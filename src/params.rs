//! Construction and query parameters.

/// Per-segment position interpolator selected when a curve is built.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationKind {
    /// Quadratic Bezier through three knots, middle knot at maximum curvature.
    QuadraticBezier,
    /// Circular arc through three knots.
    #[default]
    Circular,
}

impl InterpolationKind {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::QuadraticBezier),
            1 => Some(Self::Circular),
            _ => None,
        }
    }
}

/// Per-segment twist interpolator selected when a curve is built.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TwistKind {
    #[default]
    Constant,
    Linear,
}

impl TwistKind {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Constant),
            1 => Some(Self::Linear),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SplineParams {
    pub interpolation: InterpolationKind,
    pub twist: TwistKind,
}

impl SplineParams {
    pub fn new(interpolation: InterpolationKind, twist: TwistKind) -> Self {
        Self {
            interpolation,
            twist,
        }
    }
}

/// Coarse-to-fine nearest-point search settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PickParams {
    /// Chords per square-root unit of window arclength.
    pub resolution: u32,
    pub iterations: u32,
}

impl PickParams {
    pub const MIN_RESOLUTION: u32 = 2;
    pub const MAX_RESOLUTION: u32 = 64;
    pub const MIN_ITERATIONS: u32 = 1;
    pub const MAX_ITERATIONS: u32 = 10;

    pub fn new(resolution: u32, iterations: u32) -> Self {
        Self {
            resolution,
            iterations,
        }
    }

    /// Copy with both fields clamped into their supported ranges.
    pub fn clamped(self) -> Self {
        Self {
            resolution: self
                .resolution
                .clamp(Self::MIN_RESOLUTION, Self::MAX_RESOLUTION),
            iterations: self
                .iterations
                .clamp(Self::MIN_ITERATIONS, Self::MAX_ITERATIONS),
        }
    }
}

impl Default for PickParams {
    fn default() -> Self {
        Self {
            resolution: 4,
            iterations: 2,
        }
    }
}
