use glam::{Mat4, Vec3};

use crate::interpolate::Interpolate;
use crate::quaternion::Quaternion;

/// Rigid placement of a scene object plus a non-uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quaternion,
    pub scale: Vec3,
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quaternion::IDENTITY,
        scale: Vec3::ONE,
    };

    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    #[inline]
    pub fn with_rotation(self, rotation: Quaternion) -> Self {
        Self { rotation, ..self }
    }

    #[inline]
    pub fn with_scale(self, scale: Vec3) -> Self {
        Self { scale, ..self }
    }

    /// Model matrix `T * R * S`. `rotation` must be unit length.
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_translation(self.position) * self.rotation.to_mat4() * Mat4::from_scale(self.scale)
    }
}

impl Interpolate for Transform {
    fn interpolate(&self, other: &Self, alpha: f32) -> Self {
        Self {
            position: self.position.interpolate(&other.position, alpha),
            rotation: self.rotation.interpolate(&other.rotation, alpha),
            scale: self.scale.interpolate(&other.scale, alpha),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use std::f32::consts::FRAC_PI_2;

    fn glam_quat(q: Quaternion) -> Quat {
        Quat::from_xyzw(q.img.x, q.img.y, q.img.z, q.real)
    }

    #[test]
    fn matrix_is_translate_rotate_scale() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0))
            .with_rotation(Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2))
            .with_scale(Vec3::splat(2.0));

        let p = t.to_mat4().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(1.0, 4.0, 3.0), 1.0e-5), "{p}");

        let expected = Mat4::from_scale_rotation_translation(t.scale, glam_quat(t.rotation), t.position);
        assert!(t.to_mat4().abs_diff_eq(expected, 1.0e-5));
    }

    #[test]
    fn blend_mixes_position_and_orientation() {
        let a = Transform::IDENTITY;
        let b = Transform::from_position(Vec3::new(4.0, 0.0, 0.0))
            .with_rotation(Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2));

        let mid = a.interpolate(&b, 0.5);
        assert!(mid.position.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1.0e-6));
        assert!((mid.rotation.norm() - 1.0).abs() < 1.0e-5);

        let v = mid.rotation * Vec3::X;
        let h = std::f32::consts::FRAC_1_SQRT_2;
        assert!(v.abs_diff_eq(Vec3::new(h, 0.0, -h), 1.0e-5), "{v}");
    }
}
