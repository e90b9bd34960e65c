use glam::{Vec2, Vec3};
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Position/velocity vector the physics code is generic over.
///
/// Implemented for `Vec2` (flat demo) and `Vec3` (the 3D variant). Anything
/// visual only looks at the `x`/`y` plane, see [`Vector::planar`].
pub trait Vector:
    Copy
    + Debug
    + Default
    + PartialEq
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<f32, Output = Self>
    + Div<f32, Output = Self>
    + AddAssign
    + SubAssign
{
    const ZERO: Self;

    fn dot(self, rhs: Self) -> f32;

    /// Projection onto the `x`/`y` plane
    fn planar(self) -> Vec2;

    fn is_finite(self) -> bool;

    fn length_squared(self) -> f32 {
        Vector::dot(self, self)
    }

    fn length(self) -> f32 {
        Vector::length_squared(self).sqrt()
    }
}

impl Vector for Vec2 {
    const ZERO: Self = Vec2::ZERO;

    fn dot(self, rhs: Self) -> f32 {
        Vec2::dot(self, rhs)
    }

    fn planar(self) -> Vec2 {
        self
    }

    fn is_finite(self) -> bool {
        Vec2::is_finite(self)
    }
}

impl Vector for Vec3 {
    const ZERO: Self = Vec3::ZERO;

    fn dot(self, rhs: Self) -> f32 {
        Vec3::dot(self, rhs)
    }

    fn planar(self) -> Vec2 {
        self.truncate()
    }

    fn is_finite(self) -> bool {
        Vec3::is_finite(self)
    }
}
