//! Fixed-point quaternions.
//!
//! Orientation is represented as a unit quaternion. The stock float
//! quaternion libraries cannot be reused here, so the handful of
//! operations the simulation needs are implemented directly on [`Fx`].

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

use super::{fx, sqrt, FVec3, Fx};

/// Fixed-point quaternion, `w + xi + yj + zk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FQuat {
    pub w: Fx,
    pub x: Fx,
    pub y: Fx,
    pub z: Fx,
}

impl FQuat {
    pub const IDENTITY: FQuat = FQuat {
        w: Fx::ONE,
        x: Fx::ZERO,
        y: Fx::ZERO,
        z: Fx::ZERO,
    };

    pub const fn new(w: Fx, x: Fx, y: Fx, z: Fx) -> Self {
        Self { w, x, y, z }
    }

    /// Pure quaternion `(0, v)`.
    pub const fn pure(v: FVec3) -> Self {
        Self {
            w: Fx::ZERO,
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }

    /// The vector part.
    pub fn vector(self) -> FVec3 {
        FVec3::new(self.x, self.y, self.z)
    }

    pub fn dot(self, other: FQuat) -> Fx {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(self) -> Fx {
        sqrt(self.dot(self))
    }

    /// Unit quaternion in the same direction; the identity for a
    /// degenerate zero quaternion.
    pub fn normalize(self) -> FQuat {
        let len = self.length();
        if len == Fx::ZERO {
            return FQuat::IDENTITY;
        }
        let inv = Fx::ONE / len;
        FQuat::new(self.w * inv, self.x * inv, self.y * inv, self.z * inv)
    }

    pub fn conjugate(self) -> FQuat {
        FQuat::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Multiplicative inverse: conjugate over squared norm.
    pub fn inverse(self) -> FQuat {
        let d = self.dot(self);
        FQuat::new(self.w / d, -self.x / d, -self.y / d, -self.z / d)
    }

    /// Rotation axis, extracted from the vector part. Falls back to the
    /// Z axis when `1 - w²` is not positive (identity or drifted
    /// orientation).
    pub fn axis(self) -> FVec3 {
        let tmp = Fx::ONE - self.w * self.w;
        if tmp <= Fx::ZERO {
            return FVec3::UNIT_Z;
        }
        let scale = Fx::ONE / sqrt(tmp);
        FVec3::new(self.x * scale, self.y * scale, self.z * scale)
    }

    /// Rotate a vector by this quaternion: the sandwich product
    /// `q·v·q⁻¹` in the expanded two-cross-product form
    /// `v + 2·(q_vec × (q_vec × v + w·v))`.
    pub fn rotate(self, v: FVec3) -> FVec3 {
        let qv = self.vector();
        let uv = qv.cross(v);
        let uuv = qv.cross(uv);
        v + (uv * self.w + uuv) * fx(2)
    }

    /// Rotate a vector by the inverse of this quaternion.
    pub fn rotate_inverse(self, v: FVec3) -> FVec3 {
        self.inverse().rotate(v)
    }

    /// Uniform scale of all four components.
    pub fn scale(self, s: Fx) -> FQuat {
        FQuat::new(self.w * s, self.x * s, self.y * s, self.z * s)
    }
}

impl Default for FQuat {
    fn default() -> Self {
        FQuat::IDENTITY
    }
}

impl Add for FQuat {
    type Output = FQuat;

    fn add(self, rhs: FQuat) -> FQuat {
        FQuat::new(
            self.w + rhs.w,
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
        )
    }
}

/// Hamilton product.
impl Mul for FQuat {
    type Output = FQuat;

    fn mul(self, rhs: FQuat) -> FQuat {
        FQuat::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y + self.y * rhs.w + self.z * rhs.x - self.x * rhs.z,
            self.w * rhs.z + self.z * rhs.w + self.x * rhs.y - self.y * rhs.x,
        )
    }
}
