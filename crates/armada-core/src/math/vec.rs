//! Fixed-point vectors.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use super::{sqrt, Fx};

/// 2D fixed-point vector (horizontal plane coordinates).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FVec2 {
    pub x: Fx,
    pub y: Fx,
}

impl FVec2 {
    pub const fn new(x: Fx, y: Fx) -> Self {
        Self { x, y }
    }
}

/// 3D fixed-point vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FVec3 {
    pub x: Fx,
    pub y: Fx,
    pub z: Fx,
}

impl FVec3 {
    pub const ZERO: FVec3 = FVec3 {
        x: Fx::ZERO,
        y: Fx::ZERO,
        z: Fx::ZERO,
    };

    pub const UNIT_X: FVec3 = FVec3 {
        x: Fx::ONE,
        y: Fx::ZERO,
        z: Fx::ZERO,
    };

    pub const UNIT_Y: FVec3 = FVec3 {
        x: Fx::ZERO,
        y: Fx::ONE,
        z: Fx::ZERO,
    };

    pub const UNIT_Z: FVec3 = FVec3 {
        x: Fx::ZERO,
        y: Fx::ZERO,
        z: Fx::ONE,
    };

    pub const fn new(x: Fx, y: Fx, z: Fx) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: FVec3) -> Fx {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Standard determinant-form cross product.
    pub fn cross(self, other: FVec3) -> FVec3 {
        FVec3 {
            x: self.y * other.z - other.y * self.z,
            y: self.z * other.x - other.z * self.x,
            z: self.x * other.y - other.x * self.y,
        }
    }

    pub fn length(self) -> Fx {
        sqrt(self.dot(self))
    }

    /// Length of the horizontal (x, y) components.
    pub fn planar_length(self) -> Fx {
        sqrt(self.x * self.x + self.y * self.y)
    }

    /// Unit vector in the same direction, or `fallback` for the zero
    /// vector.
    pub fn normalize_or(self, fallback: FVec3) -> FVec3 {
        let len = self.length();
        if len == Fx::ZERO {
            return fallback;
        }
        self / len
    }
}

impl Add for FVec3 {
    type Output = FVec3;

    fn add(self, rhs: FVec3) -> FVec3 {
        FVec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for FVec3 {
    type Output = FVec3;

    fn sub(self, rhs: FVec3) -> FVec3 {
        FVec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for FVec3 {
    type Output = FVec3;

    fn neg(self) -> FVec3 {
        FVec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<Fx> for FVec3 {
    type Output = FVec3;

    fn mul(self, rhs: Fx) -> FVec3 {
        FVec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<Fx> for FVec3 {
    type Output = FVec3;

    fn div(self, rhs: Fx) -> FVec3 {
        FVec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl AddAssign for FVec3 {
    fn add_assign(&mut self, rhs: FVec3) {
        *self = *self + rhs;
    }
}

impl SubAssign for FVec3 {
    fn sub_assign(&mut self, rhs: FVec3) {
        *self = *self - rhs;
    }
}
