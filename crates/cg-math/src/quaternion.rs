use std::fmt;
use std::ops::{Add, Mul, Neg};

use approx::{AbsDiffEq, RelativeEq};
use glam::{Mat3, Mat4, Vec3};

/// Below this norm a quaternion is treated as zero.
pub const NORM_EPSILON: f32 = 1.0e-6;

/// Above this cosine `slerp` blends linearly and renormalizes.
pub const SLERP_LINEAR_THRESHOLD: f32 = 0.9995;

/// Quaternion `q = w + xi + yj + zk`, stored as a real part and an imaginary vector.
///
/// Value type: every operation returns a new quaternion.
/// Rotation-related operations (`rotate`, `to_mat3`, `to_mat4`) expect unit length;
/// normalizing first is the caller's job.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub real: f32,
    pub img: Vec3,
}

impl Default for Quaternion {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        real: 1.0,
        img: Vec3::ZERO,
    };

    #[inline]
    pub const fn new(real: f32, img: Vec3) -> Self {
        Self { real, img }
    }

    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Rotation of `angle` radians around `axis`.
    ///
    /// `axis` must be unit length. It is not renormalized here.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self {
            real: c,
            img: axis * s,
        }
    }

    /// Components as `[w, x, y, z]`.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.real, self.img.x, self.img.y, self.img.z]
    }

    #[inline]
    pub fn norm_squared(self) -> f32 {
        self.real * self.real + self.img.length_squared()
    }

    #[inline]
    pub fn norm(self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Unit-length copy of `self`.
    ///
    /// A (numerically) zero quaternion has no direction; it normalizes to `IDENTITY`.
    pub fn normalize(self) -> Self {
        let n = self.norm();
        if !(n > NORM_EPSILON) {
            return Self::IDENTITY;
        }
        self.scale(1.0 / n)
    }

    #[inline]
    pub fn conjugate(self) -> Self {
        Self {
            real: self.real,
            img: -self.img,
        }
    }

    /// `conjugate() / norm()^2`. Equal to `conjugate()` for unit quaternions.
    ///
    /// The zero quaternion has no inverse; `IDENTITY` is returned for it.
    pub fn inverse(self) -> Self {
        let n2 = self.norm_squared();
        if !(n2 > NORM_EPSILON * NORM_EPSILON) {
            return Self::IDENTITY;
        }
        self.conjugate().scale(1.0 / n2)
    }

    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.real * other.real + self.img.dot(other.img)
    }

    /// Hamilton product `self * rhs`. Applies `rhs` first, then `self`.
    #[inline]
    pub fn multiply(self, rhs: Self) -> Self {
        Self {
            real: self.real * rhs.real - self.img.dot(rhs.img),
            img: self.real * rhs.img + rhs.real * self.img + self.img.cross(rhs.img),
        }
    }

    /// Componentwise sum. Not a rotation composition.
    #[inline]
    pub fn add(self, rhs: Self) -> Self {
        Self {
            real: self.real + rhs.real,
            img: self.img + rhs.img,
        }
    }

    /// Componentwise scale. Not a rotation by itself.
    #[inline]
    pub fn scale(self, s: f32) -> Self {
        Self {
            real: self.real * s,
            img: self.img * s,
        }
    }

    /// Rotates `v` as `q * (0, v) * q^-1`.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let p = Self::new(0.0, v);
        self.multiply(p).multiply(self.inverse()).img
    }

    /// Rotation matrix of a unit quaternion (column-major, glam convention).
    pub fn to_mat3(self) -> Mat3 {
        let w = self.real;
        let Vec3 { x, y, z } = self.img;

        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        #[rustfmt::skip]
        let m = Mat3::from_cols(
            Vec3::new(1.0 - 2.0 * (yy + zz), 2.0 * (xy + wz),       2.0 * (xz - wy)),
            Vec3::new(2.0 * (xy - wz),       1.0 - 2.0 * (xx + zz), 2.0 * (yz + wx)),
            Vec3::new(2.0 * (xz + wy),       2.0 * (yz - wx),       1.0 - 2.0 * (xx + yy)),
        );
        m
    }

    #[inline]
    pub fn to_mat4(self) -> Mat4 {
        Mat4::from_mat3(self.to_mat3())
    }

    /// Spherical interpolation along the shorter arc; see [`slerp`].
    pub fn slerp(self, other: Self, t: f32) -> Self {
        let mut end = other;
        let mut cos_theta = self.dot(other);

        // q and -q are the same rotation; flip to stay on the short arc.
        if cos_theta < 0.0 {
            end = -end;
            cos_theta = -cos_theta;
        }

        if cos_theta > SLERP_LINEAR_THRESHOLD {
            return self.scale(1.0 - t).add(end.scale(t)).normalize();
        }

        let theta = cos_theta.min(1.0).acos();
        let inv_sin = 1.0 / theta.sin();
        let a = ((1.0 - t) * theta).sin() * inv_sin;
        let b = (t * theta).sin() * inv_sin;
        self.scale(a).add(end.scale(b))
    }
}

#[inline]
pub fn dot(a: &Quaternion, b: &Quaternion) -> f32 {
    a.dot(*b)
}

/// Spherical linear interpolation from `a` (t = 0) to `b` (t = 1).
///
/// Takes the shorter great-circle arc and stays unit length for unit inputs.
/// `t` is not clamped.
#[inline]
pub fn slerp(a: &Quaternion, b: &Quaternion, t: f32) -> Quaternion {
    a.slerp(*b, t)
}

impl Mul for Quaternion {
    type Output = Quaternion;

    #[inline]
    fn mul(self, rhs: Quaternion) -> Quaternion {
        self.multiply(rhs)
    }
}

impl Mul<f32> for Quaternion {
    type Output = Quaternion;

    #[inline]
    fn mul(self, rhs: f32) -> Quaternion {
        self.scale(rhs)
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.rotate(rhs)
    }
}

impl Add for Quaternion {
    type Output = Quaternion;

    #[inline]
    fn add(self, rhs: Quaternion) -> Quaternion {
        Quaternion::add(self, rhs)
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;

    #[inline]
    fn neg(self) -> Quaternion {
        self.scale(-1.0)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} + {}i + {}j + {}k",
            self.real, self.img.x, self.img.y, self.img.z
        )
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
