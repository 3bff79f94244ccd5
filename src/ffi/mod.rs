//! C FFI for kexspline.
//!
//! Splines live behind an opaque handle owned by the host.
//!
//! Functions:
//! - `kex_spline_create` / `kex_spline_free` - handle lifetime
//! - `kex_spline_knot_count` / `kex_spline_length` - queries
//! - `kex_spline_set_knot` / `kex_spline_insert_knot` / `kex_spline_remove_knot` /
//!   `kex_spline_add_extremity` - edits
//! - `kex_spline_evaluate` - position, tangent, up, twist and curvature at normalized `t`
//! - `kex_spline_resample` - uniform arclength samples into a caller buffer
//! - `kex_spline_nearest_to_ray` / `kex_spline_nearest_to_point` - picking
//! - `kex_spline_convert_unit` - path index unit conversion
//!
//! # Error Codes
//! - `0`: Success
//! - `-1`: Null pointer
//! - `-2`: Index out of range
//! - `-3`: Buffer overflow (resize and retry)
//! - `-4`: Extremity edit on a closed spline
//! - `-5`: Invalid enum value

use crate::knot::Knot;
use crate::math::{Float3, Ray};
use crate::params::{InterpolationKind, PickParams, SplineParams, TwistKind};
use crate::path::{self, NearestPoint, PathIndexUnit, SplinePoint};
use crate::spline::{Spline, SplineError};

const OK: i32 = 0;
const NULL_POINTER: i32 = -1;
const INDEX_OUT_OF_RANGE: i32 = -2;
const BUFFER_OVERFLOW: i32 = -3;
const CLOSED_EXTREMITY: i32 = -4;
const INVALID_ENUM: i32 = -5;

/// Opaque handle to a spline.
pub type KexSplineHandle = *mut std::ffi::c_void;

/// Everything a host usually needs at one point on the spline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct KexSample {
    pub position: Float3,
    pub tangent: Float3,
    pub up: Float3,
    /// Degrees.
    pub twist: f32,
    pub curvature: f32,
}

fn error_code(err: &SplineError) -> i32 {
    match err {
        SplineError::IndexOutOfRange { .. } => INDEX_OUT_OF_RANGE,
        SplineError::ClosedExtremity(_) => CLOSED_EXTREMITY,
    }
}

fn status(result: Result<crate::spline::SplineModification, SplineError>) -> i32 {
    match result {
        Ok(_) => OK,
        Err(err) => error_code(&err),
    }
}

unsafe fn spline_ref<'a>(handle: KexSplineHandle) -> Option<&'a Spline> {
    (handle as *const Spline).as_ref()
}

unsafe fn spline_mut<'a>(handle: KexSplineHandle) -> Option<&'a mut Spline> {
    (handle as *mut Spline).as_mut()
}

unsafe fn to_vec<T: Copy>(ptr: *const T, len: usize) -> Vec<T> {
    if len == 0 || ptr.is_null() {
        Vec::new()
    } else {
        std::slice::from_raw_parts(ptr, len).to_vec()
    }
}

/// Create a spline from `knot_count` knots.
///
/// `interpolation`: 0 quadratic Bezier, 1 circular. `twist`: 0 constant, 1 linear.
///
/// # Returns
/// - Valid handle on success (non-null)
/// - Null on invalid enum values or a null `knots` with a non-zero count
///
/// # Safety
/// - `knots` must point to at least `knot_count` knots, or be null when the count is zero
#[no_mangle]
pub unsafe extern "C" fn kex_spline_create(
    knots: *const Knot,
    knot_count: usize,
    closed: u8,
    interpolation: u32,
    twist: u32,
) -> KexSplineHandle {
    if knots.is_null() && knot_count > 0 {
        return std::ptr::null_mut();
    }
    let (Some(interpolation), Some(twist)) = (
        InterpolationKind::from_u32(interpolation),
        TwistKind::from_u32(twist),
    ) else {
        return std::ptr::null_mut();
    };

    let mut spline = Spline::from_knots(to_vec(knots, knot_count), closed != 0);
    spline.set_params(SplineParams::new(interpolation, twist));
    Box::into_raw(Box::new(spline)) as KexSplineHandle
}

/// Free a spline handle.
///
/// # Safety
/// - `handle` must be a valid handle returned by `kex_spline_create`, or null
#[no_mangle]
pub unsafe extern "C" fn kex_spline_free(handle: KexSplineHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle as *mut Spline));
    }
}

/// Number of knots, or `-1` on a null handle.
///
/// # Safety
/// - `handle` must be a valid handle from `kex_spline_create`, or null
#[no_mangle]
pub unsafe extern "C" fn kex_spline_knot_count(handle: KexSplineHandle) -> i64 {
    match spline_ref(handle) {
        Some(spline) => spline.len() as i64,
        None => NULL_POINTER as i64,
    }
}

/// Total arclength.
///
/// # Safety
/// - `handle` must be a valid handle from `kex_spline_create`
/// - `length` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn kex_spline_length(handle: KexSplineHandle, length: *mut f32) -> i32 {
    let Some(spline) = spline_ref(handle) else {
        return NULL_POINTER;
    };
    if length.is_null() {
        return NULL_POINTER;
    }
    *length = spline.length();
    OK
}

/// # Safety
/// - `handle` must be a valid handle from `kex_spline_create`
#[no_mangle]
pub unsafe extern "C" fn kex_spline_set_knot(
    handle: KexSplineHandle,
    index: usize,
    knot: Knot,
) -> i32 {
    match spline_mut(handle) {
        Some(spline) => status(spline.set_knot(index, knot)),
        None => NULL_POINTER,
    }
}

/// Insert a knot before `index`; `index == count` appends.
///
/// # Safety
/// - `handle` must be a valid handle from `kex_spline_create`
#[no_mangle]
pub unsafe extern "C" fn kex_spline_insert_knot(
    handle: KexSplineHandle,
    index: usize,
    knot: Knot,
) -> i32 {
    match spline_mut(handle) {
        Some(spline) => status(spline.insert(index, knot)),
        None => NULL_POINTER,
    }
}

/// # Safety
/// - `handle` must be a valid handle from `kex_spline_create`
#[no_mangle]
pub unsafe extern "C" fn kex_spline_remove_knot(handle: KexSplineHandle, index: usize) -> i32 {
    match spline_mut(handle) {
        Some(spline) => status(spline.remove_at(index)),
        None => NULL_POINTER,
    }
}

/// Add a knot before the first (`at_start != 0`) or after the last knot.
/// Fails with `-4` on closed splines.
///
/// # Safety
/// - `handle` must be a valid handle from `kex_spline_create`
#[no_mangle]
pub unsafe extern "C" fn kex_spline_add_extremity(
    handle: KexSplineHandle,
    knot: Knot,
    at_start: u8,
) -> i32 {
    let Some(spline) = spline_mut(handle) else {
        return NULL_POINTER;
    };
    if at_start != 0 {
        status(spline.prepend_extremity(knot))
    } else {
        status(spline.append_extremity(knot))
    }
}

/// Sample the spline at normalized `t`.
///
/// # Safety
/// - `handle` must be a valid handle from `kex_spline_create`
/// - `sample` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn kex_spline_evaluate(
    handle: KexSplineHandle,
    t: f32,
    sample: *mut KexSample,
) -> i32 {
    let Some(spline) = spline_ref(handle) else {
        return NULL_POINTER;
    };
    if sample.is_null() {
        return NULL_POINTER;
    }
    *sample = KexSample {
        position: path::evaluate_position(spline, t),
        tangent: path::evaluate_tangent(spline, t),
        up: path::evaluate_up_vector(spline, t),
        twist: path::evaluate_twist(spline, t),
        curvature: path::evaluate_curvature(spline, t),
    };
    OK
}

/// Resample at `spacing` into `points`.
///
/// # Returns
/// - `0` on success
/// - `-1` on null pointer
/// - `-3` if buffer too small (`written` contains required count)
///
/// # Safety
/// - `handle` must be a valid handle from `kex_spline_create`
/// - `points` must point to a buffer of at least `capacity` points
/// - `written` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn kex_spline_resample(
    handle: KexSplineHandle,
    spacing: f32,
    points: *mut SplinePoint,
    capacity: usize,
    written: *mut usize,
) -> i32 {
    let Some(spline) = spline_ref(handle) else {
        return NULL_POINTER;
    };
    if points.is_null() || written.is_null() {
        return NULL_POINTER;
    }

    let samples = path::resample(spline, spacing);
    *written = samples.len();
    if samples.len() > capacity {
        return BUFFER_OVERFLOW;
    }
    std::ptr::copy_nonoverlapping(samples.as_ptr(), points, samples.len());
    OK
}

/// Nearest point on the spline to a ray.
///
/// # Safety
/// - `handle` must be a valid handle from `kex_spline_create`
/// - `result` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn kex_spline_nearest_to_ray(
    handle: KexSplineHandle,
    ray: Ray,
    resolution: u32,
    iterations: u32,
    result: *mut NearestPoint,
) -> i32 {
    let Some(spline) = spline_ref(handle) else {
        return NULL_POINTER;
    };
    if result.is_null() {
        return NULL_POINTER;
    }
    *result = path::get_nearest_point_to_ray(spline, &ray, PickParams::new(resolution, iterations));
    OK
}

/// Nearest point on the spline to `point`.
///
/// # Safety
/// - `handle` must be a valid handle from `kex_spline_create`
/// - `result` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn kex_spline_nearest_to_point(
    handle: KexSplineHandle,
    point: Float3,
    resolution: u32,
    iterations: u32,
    result: *mut NearestPoint,
) -> i32 {
    let Some(spline) = spline_ref(handle) else {
        return NULL_POINTER;
    };
    if result.is_null() {
        return NULL_POINTER;
    }
    *result = path::get_nearest_point(spline, point, PickParams::new(resolution, iterations));
    OK
}

/// Convert `t` between path index units (0 normalized, 1 distance, 2 knot).
///
/// # Safety
/// - `handle` must be a valid handle from `kex_spline_create`
/// - `converted` must be a valid pointer
#[no_mangle]
pub unsafe extern "C" fn kex_spline_convert_unit(
    handle: KexSplineHandle,
    t: f32,
    from: u32,
    to: u32,
    converted: *mut f32,
) -> i32 {
    let Some(spline) = spline_ref(handle) else {
        return NULL_POINTER;
    };
    if converted.is_null() {
        return NULL_POINTER;
    }
    let (Some(from), Some(to)) = (PathIndexUnit::from_u32(from), PathIndexUnit::from_u32(to)) else {
        return INVALID_ENUM;
    };
    *converted = path::convert_index_unit(spline, t, from, to);
    OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    unsafe fn line() -> KexSplineHandle {
        let knots = [Knot::at(Float3::ZERO), Knot::at(Float3::new(10.0, 0.0, 0.0))];
        kex_spline_create(knots.as_ptr(), knots.len(), 0, 1, 0)
    }

    #[test]
    fn create_query_free() {
        unsafe {
            let handle = line();
            assert!(!handle.is_null());
            assert_eq!(kex_spline_knot_count(handle), 2);

            let mut length = 0.0;
            assert_eq!(kex_spline_length(handle, &mut length), OK);
            assert_relative_eq!(length, 10.0, epsilon = 1e-4);

            let mut sample = KexSample::default();
            assert_eq!(kex_spline_evaluate(handle, 0.5, &mut sample), OK);
            assert_relative_eq!(sample.position.x, 5.0, epsilon = 1e-3);
            assert_relative_eq!(sample.up.y, 1.0, epsilon = 1e-3);

            kex_spline_free(handle);
        }
    }

    #[test]
    fn null_and_invalid_arguments() {
        unsafe {
            assert!(kex_spline_create(std::ptr::null(), 3, 0, 0, 0).is_null());
            assert!(kex_spline_create(std::ptr::null(), 0, 0, 9, 0).is_null());
            assert_eq!(kex_spline_knot_count(std::ptr::null_mut()), -1);
            assert_eq!(kex_spline_remove_knot(std::ptr::null_mut(), 0), NULL_POINTER);

            let handle = line();
            assert_eq!(kex_spline_evaluate(handle, 0.5, std::ptr::null_mut()), NULL_POINTER);
            assert_eq!(kex_spline_remove_knot(handle, 7), INDEX_OUT_OF_RANGE);
            let mut out = 0.0;
            assert_eq!(kex_spline_convert_unit(handle, 0.5, 0, 8, &mut out), INVALID_ENUM);
            kex_spline_free(handle);
        }
    }

    #[test]
    fn closed_spline_rejects_extremity() {
        unsafe {
            let knots = [
                Knot::at(Float3::new(1.0, 0.0, 0.0)),
                Knot::at(Float3::new(0.0, 1.0, 0.0)),
                Knot::at(Float3::new(-1.0, 0.0, 0.0)),
            ];
            let handle = kex_spline_create(knots.as_ptr(), knots.len(), 1, 1, 0);
            assert_eq!(
                kex_spline_add_extremity(handle, Knot::default(), 0),
                CLOSED_EXTREMITY
            );
            assert_eq!(kex_spline_insert_knot(handle, 3, Knot::default()), OK);
            assert_eq!(kex_spline_knot_count(handle), 4);
            kex_spline_free(handle);
        }
    }

    #[test]
    fn resample_reports_required_capacity() {
        unsafe {
            let handle = line();
            let mut points = [SplinePoint::DEFAULT; 4];
            let mut written = 0;
            assert_eq!(
                kex_spline_resample(handle, 1.0, points.as_mut_ptr(), points.len(), &mut written),
                BUFFER_OVERFLOW
            );
            assert_eq!(written, 11);

            assert_eq!(
                kex_spline_resample(handle, 5.0, points.as_mut_ptr(), points.len(), &mut written),
                OK
            );
            assert_eq!(written, 3);
            assert_relative_eq!(points[2].position.x, 10.0, epsilon = 1e-3);
            kex_spline_free(handle);
        }
    }

    #[test]
    fn picking_returns_hits() {
        unsafe {
            let handle = line();
            let mut hit = NearestPoint::default();
            let ray = Ray::new(Float3::new(3.0, 5.0, 0.0), Float3::DOWN);
            assert_eq!(kex_spline_nearest_to_ray(handle, ray, 4, 2, &mut hit), OK);
            assert_relative_eq!(hit.t, 0.3, epsilon = 1e-2);
            assert!(hit.distance < 1e-2);

            assert_eq!(
                kex_spline_nearest_to_point(handle, Float3::new(7.0, 0.0, 2.0), 4, 2, &mut hit),
                OK
            );
            assert_relative_eq!(hit.distance, 2.0, epsilon = 1e-2);
            kex_spline_free(handle);
        }
    }
}
