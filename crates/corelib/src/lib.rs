//! Core types: math re-exports, placement transforms, bounds.
//!
//! Flat matrices coming from container formats are column-major unless the
//! caller says otherwise (see [`MatrixLayout`]).

pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4, vec2, vec3};

pub mod bounds;
pub mod error;
pub mod transform;

pub use bounds::Aabb;
pub use error::{CoreError, CoreResult};
pub use transform::{MatrixLayout, Transform, matrix_from_slice, matrix_to_array};
