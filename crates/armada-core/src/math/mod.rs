//! Deterministic fixed-point mathematics.
//!
//! All authoritative simulation state is computed in fixed-point so that
//! every client in a lockstep session produces bit-identical results,
//! regardless of platform or compiler. Floating point exists only on the
//! one-way conversions out to the presentation layer; nothing converts
//! back.

use fixed::types::I16F16;

pub use quat::FQuat;
pub use vec::{FVec2, FVec3};

mod quat;
mod vec;

/// Fixed-point scalar used throughout the simulation.
///
/// I16F16 format: 32-bit signed guts with 16 fractional bits, giving a
/// range of ±32768 at a resolution of 1/65536. Addition and subtraction
/// are exact; multiplication and division go through a 64-bit
/// intermediate before truncating back, so no precision is lost to the
/// intermediate itself.
pub type Fx = I16F16;

/// 1/2.
pub const HALF: Fx = Fx::from_bits(1 << 15);

/// Convergence tolerance for [`sqrt`]: 1/1024.
pub const SQRT_TOLERANCE: Fx = Fx::from_bits(1 << 6);

/// Shorthand for an integer-valued fixed-point number.
#[inline]
pub fn fx(n: i32) -> Fx {
    Fx::from_num(n)
}

/// Exact rational constant `n/d`.
#[inline]
pub fn ratio(n: i32, d: i32) -> Fx {
    Fx::from_num(n) / Fx::from_num(d)
}

/// Fixed-point square root via Newton's method.
///
/// Undefined for negative input. Iterates from `s/2` until two
/// successive iterates are within [`SQRT_TOLERANCE`] of each other. If
/// an iterate collapses to zero the tolerance itself is returned rather
/// than dividing by zero.
pub fn sqrt(s: Fx) -> Fx {
    debug_assert!(s >= Fx::ZERO, "sqrt of negative value {s}");

    if s == Fx::ZERO {
        return Fx::ZERO;
    }

    let mut x = s * HALF;

    loop {
        if x == Fx::ZERO {
            return SQRT_TOLERANCE;
        }

        let next = (x + s / x) * HALF;
        let e = if next > x { next - x } else { x - next };
        x = next;

        if e <= SQRT_TOLERANCE {
            return x;
        }
    }
}

/// Presentation-side conversion. Never feed the result back into
/// simulation state.
#[inline]
pub fn to_f32(v: Fx) -> f32 {
    v.to_num::<f32>()
}

/// Presentation-side conversion of a vector.
#[inline]
pub fn to_vec3(v: FVec3) -> glam::Vec3 {
    glam::Vec3::new(to_f32(v.x), to_f32(v.y), to_f32(v.z))
}

/// Presentation-side conversion of an orientation.
#[inline]
pub fn to_quat(q: FQuat) -> glam::Quat {
    glam::Quat::from_xyzw(to_f32(q.x), to_f32(q.y), to_f32(q.z), to_f32(q.w))
}

/// Truncation of a vector to integer grid coordinates.
#[inline]
pub fn to_ivec3(v: FVec3) -> glam::IVec3 {
    glam::IVec3::new(
        v.x.to_num::<i32>(),
        v.y.to_num::<i32>(),
        v.z.to_num::<i32>(),
    )
}
