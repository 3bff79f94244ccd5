//! Zero-dependency math primitives shared by every layer.

pub mod consts;
mod frame;
mod linalg;

pub use consts::{lerp, EPSILON};
pub use frame::Frame;
pub use linalg::{
    closest_point_on_segment, closest_points_ray_segment, Float3, Matrix3, Matrix4, Quaternion,
    Ray,
};
