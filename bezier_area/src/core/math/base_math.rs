use crate::core::traits::Real;
use static_aabb2d_index::AABB;

/// Returns the (min, max) values from `v1` and `v2`.
///
/// # Examples
///
/// ```
/// # use bezier_area::core::math::*;
/// let (min_val, max_val) = min_max(8, 4);
/// assert_eq!(min_val, 4);
/// assert_eq!(max_val, 8);
/// ```
#[inline]
pub fn min_max<T>(v1: T, v2: T) -> (T, T)
where
    T: PartialOrd,
{
    if v1 < v2 {
        (v1, v2)
    } else {
        (v2, v1)
    }
}

/// Real roots of `a * t^2 + b * t + c = 0`.
///
/// Returns the roots buffer and how many entries of it are valid. A linear equation (`a == 0`)
/// yields at most one root and a constant equation yields none. Roots are computed with the
/// numerically stable form that avoids subtracting nearly equal values.
///
/// # Examples
///
/// ```
/// # use bezier_area::core::math::*;
/// # use bezier_area::core::traits::*;
/// // (t - 1)(t - 3) = t^2 - 4t + 3
/// let (roots, count) = solve_quadratic(1.0, -4.0, 3.0);
/// assert_eq!(count, 2);
/// let (lo, hi) = min_max(roots[0], roots[1]);
/// assert!(lo.fuzzy_eq(1.0));
/// assert!(hi.fuzzy_eq(3.0));
///
/// let (roots, count) = solve_quadratic(0.0, 2.0, -1.0);
/// assert_eq!(count, 1);
/// assert!(roots[0].fuzzy_eq(0.5));
///
/// assert_eq!(solve_quadratic(1.0, 0.0, 1.0).1, 0);
/// ```
pub fn solve_quadratic<T>(a: T, b: T, c: T) -> ([T; 2], usize)
where
    T: Real,
{
    let mut roots = [T::zero(); 2];
    if a == T::zero() {
        if b == T::zero() {
            return (roots, 0);
        }
        roots[0] = -c / b;
        return (roots, 1);
    }

    let disc = b * b - T::four() * a * c;
    if disc < T::zero() {
        return (roots, 0);
    }

    let mut d = disc.sqrt();
    if b < T::zero() {
        d = -d;
    }

    let q = (b + d) / -T::two();
    roots[0] = q / a;
    if q != T::zero() {
        roots[1] = c / q;
        return (roots, 2);
    }

    (roots, 1)
}

/// Zero size bounding box at `(x, y)`.
#[inline]
pub fn aabb_from_point<T>(x: T, y: T) -> AABB<T>
where
    T: Real,
{
    AABB::new(x, y, x, y)
}

/// Grow `bounds` so it includes `(x, y)`.
#[inline]
pub fn aabb_add_point<T>(bounds: &mut AABB<T>, x: T, y: T)
where
    T: Real,
{
    if x < bounds.min_x {
        bounds.min_x = x;
    }
    if x > bounds.max_x {
        bounds.max_x = x;
    }
    if y < bounds.min_y {
        bounds.min_y = y;
    }
    if y > bounds.max_y {
        bounds.max_y = y;
    }
}

/// Grow `bounds` so it includes all of `other`.
#[inline]
pub fn aabb_union<T>(bounds: &mut AABB<T>, other: &AABB<T>)
where
    T: Real,
{
    aabb_add_point(bounds, other.min_x, other.min_y);
    aabb_add_point(bounds, other.max_x, other.max_y);
}

/// `true` if `a` and `b` share a region of positive area.
///
/// Degenerate (zero width or height) boxes never overlap with positive area.
#[inline]
pub fn aabb_overlaps_area<T>(a: &AABB<T>, b: &AABB<T>) -> bool
where
    T: Real,
{
    a.min_x < a.max_x
        && a.min_y < a.max_y
        && b.min_x < b.max_x
        && b.min_y < b.max_y
        && a.min_x < b.max_x
        && b.min_x < a.max_x
        && a.min_y < b.max_y
        && b.min_y < a.max_y
}

/// `true` if `a` and `b` share any point, edges and corners included.
#[inline]
pub fn aabb_touches<T>(a: &AABB<T>, b: &AABB<T>) -> bool
where
    T: Real,
{
    a.min_x <= b.max_x && b.min_x <= a.max_x && a.min_y <= b.max_y && b.min_y <= a.max_y
}

/// `true` if `(x, y)` lies in the half open box `[min_x, max_x) x [min_y, max_y)`.
#[inline]
pub fn aabb_contains_point_half_open<T>(bounds: &AABB<T>, x: T, y: T) -> bool
where
    T: Real,
{
    x >= bounds.min_x && y >= bounds.min_y && x < bounds.max_x && y < bounds.max_y
}
