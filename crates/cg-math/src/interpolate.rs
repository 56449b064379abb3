use glam::{Vec2, Vec3, Vec4};

use crate::quaternion::Quaternion;

/// Blend between two snapshots of the same value.
///
/// `alpha == 0` yields `self`, `alpha == 1` yields `other`.
pub trait Interpolate: Sized {
    fn interpolate(&self, other: &Self, alpha: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(&self, other: &Self, alpha: f32) -> Self {
        self + (other - self) * alpha
    }
}

impl Interpolate for f64 {
    #[inline]
    fn interpolate(&self, other: &Self, alpha: f32) -> Self {
        self + (other - self) * alpha as f64
    }
}

impl Interpolate for Vec2 {
    #[inline]
    fn interpolate(&self, other: &Self, alpha: f32) -> Self {
        self.lerp(*other, alpha)
    }
}

impl Interpolate for Vec3 {
    #[inline]
    fn interpolate(&self, other: &Self, alpha: f32) -> Self {
        self.lerp(*other, alpha)
    }
}

impl Interpolate for Vec4 {
    #[inline]
    fn interpolate(&self, other: &Self, alpha: f32) -> Self {
        self.lerp(*other, alpha)
    }
}

impl Interpolate for Quaternion {
    #[inline]
    fn interpolate(&self, other: &Self, alpha: f32) -> Self {
        self.slerp(*other, alpha)
    }
}

impl<T: Interpolate, const N: usize> Interpolate for [T; N] {
    fn interpolate(&self, other: &Self, alpha: f32) -> Self {
        std::array::from_fn(|i| self[i].interpolate(&other[i], alpha))
    }
}

/// Pairwise blend. Entries past the shorter snapshot are dropped.
impl<T: Interpolate> Interpolate for Vec<T> {
    fn interpolate(&self, other: &Self, alpha: f32) -> Self {
        self.iter()
            .zip(other.iter())
            .map(|(a, b)| a.interpolate(b, alpha))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn scalars_blend_linearly() {
        assert_abs_diff_eq!(2.0f32.interpolate(&4.0, 0.25), 2.5);
        assert_abs_diff_eq!((-1.0f64).interpolate(&1.0, 0.5), 0.0);
    }

    #[test]
    fn vectors_blend_linearly() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(10.0, -2.0, 4.0);
        assert_eq!(a.interpolate(&b, 0.5), Vec3::new(5.0, -1.0, 2.0));
        assert_eq!(a.interpolate(&b, 0.0), a);
        assert_eq!(a.interpolate(&b, 1.0), b);
    }

    #[test]
    fn quaternions_use_slerp() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(Vec3::Y, 1.0);
        let mid = a.interpolate(&b, 0.5);
        assert_abs_diff_eq!(mid, Quaternion::from_axis_angle(Vec3::Y, 0.5), epsilon = 1.0e-5);
    }

    #[test]
    fn collections_blend_pairwise() {
        let a = vec![0.0f32, 10.0, 7.0];
        let b = vec![1.0f32, 20.0];
        assert_eq!(a.interpolate(&b, 0.5), vec![0.5, 15.0]);

        let arr = [1.0f32, 3.0].interpolate(&[3.0, 5.0], 0.5);
        assert_eq!(arr, [2.0, 4.0]);
    }
}
