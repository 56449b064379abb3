//! Rotation and blending primitives shared by the CG exercises.
//!
//! `Quaternion` carries orientation, `Interpolate` blends simulation snapshots
//! and `Transform` bundles both into a model matrix.

pub mod interpolate;
pub mod quaternion;
pub mod transform;

pub use interpolate::Interpolate;
pub use quaternion::{dot, slerp, Quaternion};
pub use transform::Transform;

pub use glam;
