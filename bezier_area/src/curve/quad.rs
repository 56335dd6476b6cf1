use super::Direction;
use crate::core::{
    math::{aabb_add_point, vec2, Vector2},
    traits::Real,
};
use static_aabb2d_index::AABB;

/// Quadratic bezier, monotonic in y, stored top (`y0`) to bottom (`y1`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Quad<T = f64> {
    x0: T,
    y0: T,
    cx0: T,
    cy0: T,
    x1: T,
    y1: T,
    xmin: T,
    xmax: T,
    xcoeff: [T; 3],
    ycoeff: [T; 3],
    direction: Direction,
}

/// De Casteljau split of the quadratic `[p0, c, p1]` at `t`.
pub(crate) fn split_quad<T>(pts: [Vector2<T>; 3], t: T) -> ([Vector2<T>; 3], [Vector2<T>; 3])
where
    T: Real,
{
    let [p0, c, p1] = pts;
    let c0 = p0.lerp(c, t);
    let c1 = c.lerp(p1, t);
    let mid = c0.lerp(c1, t);
    ([p0, c0, mid], [mid, c1, p1])
}

/// Parameter in `(0, 1)` where the quadratic with end values `c0`, `c1` and control `cp` turns
/// around, `None` when it is already monotonic increasing.
pub(crate) fn quad_turn_param<T>(c0: T, cp: T, c1: T) -> Option<T>
where
    T: Real,
{
    if c0 <= cp && cp <= c1 {
        return None;
    }
    let c0 = c0 - cp;
    let c1 = c1 - cp;
    let denom = c0 + c1;
    if denom == T::zero() {
        return None;
    }
    let t = c0 / denom;
    if t <= T::zero() || t >= T::one() {
        return None;
    }
    Some(t)
}

/// Parameter where the quadratic with coefficients `coeff` reaches `y`, falling back to the end
/// nearest to `y` when no root lies in `[0, 1]`.
pub(crate) fn quad_t_for_y<T>(y: T, coeff: [T; 3]) -> T
where
    T: Real,
{
    let c0 = coeff[0] - y;
    let [_, c1, c2] = coeff;
    let in_unit = |r: T| r >= T::zero() && r <= T::one();
    if c2 == T::zero() {
        let root = -c0 / c1;
        if in_unit(root) {
            return root;
        }
    } else {
        let d = c1 * c1 - T::four() * c2 * c0;
        if d >= T::zero() {
            let mut d = d.sqrt();
            if c1 < T::zero() {
                d = -d;
            }
            let q = (c1 + d) / -T::two();
            let root = q / c2;
            if in_unit(root) {
                return root;
            }
            if q != T::zero() {
                let root = c0 / q;
                if in_unit(root) {
                    return root;
                }
            }
        }
    }

    let y0 = c0;
    let y1 = c0 + c1 + c2;
    if T::zero() < (y0 + y1) / T::two() {
        T::zero()
    } else {
        T::one()
    }
}

impl<T> Quad<T>
where
    T: Real,
{
    /// Quadratic from `(x0, y0)` down to `(x1, y1)`, the control y is clamped into `[y0, y1]`.
    pub fn new(x0: T, y0: T, cx0: T, cy0: T, x1: T, y1: T, direction: Direction) -> Self {
        debug_assert!(y0 <= y1, "quad must be stored top to bottom");
        let cy0 = if cy0 < y0 {
            y0
        } else if cy0 > y1 {
            y1
        } else {
            cy0
        };
        let min = <T as num_traits::real::Real>::min;
        let max = <T as num_traits::real::Real>::max;
        Self {
            x0,
            y0,
            cx0,
            cy0,
            x1,
            y1,
            xmin: min(min(x0, x1), cx0),
            xmax: max(max(x0, x1), cx0),
            xcoeff: [x0, cx0 + cx0 - x0 - x0, x0 - cx0 - cx0 + x1],
            ycoeff: [y0, cy0 + cy0 - y0 - y0, y0 - cy0 - cy0 + y1],
            direction,
        }
    }

    /// Quad drawn `p0 -> c -> p1` that is already y-monotonic, `None` if it is horizontal.
    pub fn from_points(p0: Vector2<T>, c: Vector2<T>, p1: Vector2<T>) -> Option<Self> {
        if p0.y > p1.y {
            Some(Self::new(p1.x, p1.y, c.x, c.y, p0.x, p0.y, Direction::Decreasing))
        } else if p1.y > p0.y {
            Some(Self::new(p0.x, p0.y, c.x, c.y, p1.x, p1.y, Direction::Increasing))
        } else {
            None
        }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn top(&self) -> Vector2<T> {
        vec2(self.x0, self.y0)
    }

    #[inline]
    pub fn bot(&self) -> Vector2<T> {
        vec2(self.x1, self.y1)
    }

    #[inline]
    pub fn ctrl(&self) -> Vector2<T> {
        vec2(self.cx0, self.cy0)
    }

    #[inline]
    pub fn x_min(&self) -> T {
        self.xmin
    }

    #[inline]
    pub fn x_max(&self) -> T {
        self.xmax
    }

    #[inline]
    pub fn x_for_t(&self, t: T) -> T {
        (self.xcoeff[2] * t + self.xcoeff[1]) * t + self.xcoeff[0]
    }

    #[inline]
    pub fn y_for_t(&self, t: T) -> T {
        (self.ycoeff[2] * t + self.ycoeff[1]) * t + self.ycoeff[0]
    }

    pub fn dx_for_t(&self, t: T, deriv: u32) -> T {
        derivative(&self.xcoeff, t, deriv)
    }

    pub fn dy_for_t(&self, t: T, deriv: u32) -> T {
        derivative(&self.ycoeff, t, deriv)
    }

    pub fn t_for_y(&self, y: T) -> T {
        if y <= self.y0 {
            return T::zero();
        }
        if y >= self.y1 {
            return T::one();
        }
        quad_t_for_y(y, self.ycoeff)
    }

    pub fn x_for_y(&self, y: T) -> T {
        if y <= self.y0 {
            return self.x0;
        }
        if y >= self.y1 {
            return self.x1;
        }
        self.x_for_t(self.t_for_y(y))
    }

    /// Parameter of the x extremum when it lies in `(0, 1)`.
    fn x_turn(&self) -> T {
        -self.xcoeff[1] / (T::two() * self.xcoeff[2])
    }

    pub fn next_vertical(&self, t0: T, t1: T) -> T {
        let t = self.x_turn();
        if t > t0 && t < t1 {
            t
        } else {
            t1
        }
    }

    pub fn enlarge(&self, bounds: &mut AABB<T>) {
        aabb_add_point(bounds, self.x0, self.y0);
        let t = self.x_turn();
        if t > T::zero() && t < T::one() {
            aabb_add_point(bounds, self.x_for_t(t), self.y_for_t(t));
        }
        aabb_add_point(bounds, self.x1, self.y1);
    }

    pub fn with_direction(&self, direction: Direction) -> Self {
        Self {
            direction,
            ..*self
        }
    }

    pub fn sub_curve(&self, ystart: T, yend: T, direction: Direction) -> Self {
        let t0 = if ystart <= self.y0 {
            if yend >= self.y1 {
                return self.with_direction(direction);
            }
            T::zero()
        } else {
            quad_t_for_y(ystart, self.ycoeff)
        };
        let t1 = if yend >= self.y1 {
            T::one()
        } else {
            quad_t_for_y(yend, self.ycoeff)
        };

        let mut pts = [self.top(), self.ctrl(), self.bot()];
        if t1 < T::one() {
            pts = split_quad(pts, t1).0;
        }
        if t0 > T::zero() {
            pts = split_quad(pts, t0 / t1).1;
        }
        let [p0, c, p1] = pts;
        Self::new(p0.x, ystart, c.x, c.y, p1.x, yend, direction)
    }

    /// Points in drawing order: start, control, end.
    pub fn path_points(&self) -> [Vector2<T>; 3] {
        match self.direction {
            Direction::Increasing => [self.top(), self.ctrl(), self.bot()],
            Direction::Decreasing => [self.bot(), self.ctrl(), self.top()],
        }
    }
}

/// Evaluate derivative `deriv` of the quadratic polynomial with coefficients `c` at `t`.
#[inline]
fn derivative<T>(c: &[T; 3], t: T, deriv: u32) -> T
where
    T: Real,
{
    match deriv {
        0 => (c[2] * t + c[1]) * t + c[0],
        1 => T::two() * c[2] * t + c[1],
        2 => T::two() * c[2],
        _ => T::zero(),
    }
}
