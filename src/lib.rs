//! KexSpline - C²-continuous interpolating splines for track and path authoring.
//!
//! Every knot is passed through exactly. Each curve segment blends two
//! three-point interpolators with trigonometric weights, which gives
//! curvature continuity across knots without tangent handles.
//!
//! # Architecture
//!
//! Layered modules with strict inward-only dependencies:
//!
//! - **math**: Vector/matrix primitives (Float3, Quaternion, Matrix3, Matrix4, Ray, Frame)
//! - **params**: Interpolator selection and picking settings
//! - **interpolate**: Three-point interpolators (quadratic Bezier, circular, linear, twist)
//! - **curve**: Curve segments and their stateless algorithms
//! - **spline**: Knot container with cached distance tables
//! - **path**: Spline-level parameterization, evaluation, picking and resampling
//! - **ffi**: C FFI bindings
//!
//! # Usage
//!
//! ```ignore
//! use kexspline::{path, Float3, Knot, Spline};
//!
//! let knots = [Float3::ZERO, Float3::new(10.0, 0.0, 0.0)].map(Knot::from);
//! let spline = Spline::from_knots(knots, false);
//! let midpoint = path::evaluate_position(&spline, 0.5);
//! ```
//!
//! For C/C#/Unity, link the cdylib and use `kex_spline_*` FFI functions.

pub mod curve;
pub mod interpolate;
pub mod knot;
pub mod math;
pub mod params;
pub mod path;
pub mod spline;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-export commonly used types at crate root
pub use curve::Curve;
pub use knot::Knot;
pub use math::{Float3, Frame, Matrix4, Quaternion, Ray};
pub use params::{InterpolationKind, PickParams, SplineParams, TwistKind};
pub use path::{CurveT, NearestPoint, PathIndexUnit, SplinePoint};
pub use spline::{Spline, SplineError, SplineModification};
