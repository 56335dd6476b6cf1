use super::{vec2, Vector2};
use crate::core::traits::Real;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 2D affine transform.
///
/// Maps a point `(x, y)` to
/// `(m00 * x + m01 * y + m02, m10 * x + m11 * y + m12)`.
///
/// # Examples
///
/// ```
/// # use bezier_area::core::math::*;
/// let t = Transform::translate(2.0, 3.0).then(&Transform::scale(2.0, 2.0));
/// assert!(t.apply(vec2(1.0, 1.0)).fuzzy_eq(vec2(6.0, 8.0)));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Transform<T = f64> {
    pub m00: T,
    pub m10: T,
    pub m01: T,
    pub m11: T,
    pub m02: T,
    pub m12: T,
}

impl<T> Transform<T>
where
    T: Real,
{
    pub fn new(m00: T, m10: T, m01: T, m11: T, m02: T, m12: T) -> Self {
        Self {
            m00,
            m10,
            m01,
            m11,
            m02,
            m12,
        }
    }

    pub fn identity() -> Self {
        Self::scale(T::one(), T::one())
    }

    pub fn translate(tx: T, ty: T) -> Self {
        Self::new(T::one(), T::zero(), T::zero(), T::one(), tx, ty)
    }

    pub fn scale(sx: T, sy: T) -> Self {
        Self::new(sx, T::zero(), T::zero(), sy, T::zero(), T::zero())
    }

    /// Counter clockwise rotation (for a y up coordinate system) by `angle` radians about the
    /// origin.
    pub fn rotate(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(c, s, -s, c, T::zero(), T::zero())
    }

    /// Shear with `x' = x + shx * y` and `y' = y + shy * x`.
    pub fn shear(shx: T, shy: T) -> Self {
        Self::new(T::one(), shy, shx, T::one(), T::zero(), T::zero())
    }

    /// Transform that applies `self` first and then `next`.
    pub fn then(&self, next: &Transform<T>) -> Self {
        Self::new(
            next.m00 * self.m00 + next.m01 * self.m10,
            next.m10 * self.m00 + next.m11 * self.m10,
            next.m00 * self.m01 + next.m01 * self.m11,
            next.m10 * self.m01 + next.m11 * self.m11,
            next.m00 * self.m02 + next.m01 * self.m12 + next.m02,
            next.m10 * self.m02 + next.m11 * self.m12 + next.m12,
        )
    }

    #[inline]
    pub fn apply(&self, p: Vector2<T>) -> Vector2<T> {
        vec2(
            self.m00 * p.x + self.m01 * p.y + self.m02,
            self.m10 * p.x + self.m11 * p.y + self.m12,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// `true` if every matrix entry is finite.
    pub fn is_finite(&self) -> bool {
        [self.m00, self.m10, self.m01, self.m11, self.m02, self.m12]
            .iter()
            .all(|v| v.is_finite())
    }

    /// `true` if the transform has no meaningful shear or rotation component (within `eps`), so
    /// horizontal lines stay horizontal and y-monotonic curves stay y-monotonic.
    pub fn is_axis_aligned_eps(&self, eps: T) -> bool {
        self.m01.abs() < eps && self.m10.abs() < eps
    }
}

impl<T> Default for Transform<T>
where
    T: Real,
{
    fn default() -> Self {
        Self::identity()
    }
}
