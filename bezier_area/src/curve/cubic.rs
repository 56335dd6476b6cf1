use super::{quad::quad_t_for_y, Direction};
use crate::core::{
    math::{aabb_add_point, solve_quadratic, vec2, Vector2},
    traits::Real,
};
use static_aabb2d_index::AABB;

/// Cubic bezier, monotonic in y, stored top (`y0`) to bottom (`y1`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cubic<T = f64> {
    x0: T,
    y0: T,
    cx0: T,
    cy0: T,
    cx1: T,
    cy1: T,
    x1: T,
    y1: T,
    xmin: T,
    xmax: T,
    xcoeff: [T; 4],
    ycoeff: [T; 4],
    direction: Direction,
}

/// De Casteljau split of the cubic `[p0, c0, c1, p1]` at `t`.
pub(crate) fn split_cubic<T>(pts: [Vector2<T>; 4], t: T) -> ([Vector2<T>; 4], [Vector2<T>; 4])
where
    T: Real,
{
    let [p0, c0, c1, p1] = pts;
    let p01 = p0.lerp(c0, t);
    let p12 = c0.lerp(c1, t);
    let p23 = c1.lerp(p1, t);
    let p012 = p01.lerp(p12, t);
    let p123 = p12.lerp(p23, t);
    let mid = p012.lerp(p123, t);
    ([p0, p01, p012, mid], [mid, p123, p23, p1])
}

/// Parameters in `(0, 1)` where the cubic with values `c0, cp0, cp1, c1` turns around, sorted
/// ascending. Returns the buffer and the number of valid entries.
pub(crate) fn cubic_turn_params<T>(c0: T, cp0: T, cp1: T, c1: T) -> ([T; 2], usize)
where
    T: Real,
{
    let mut out = [T::zero(); 2];
    if c0 <= cp0 && cp0 <= cp1 && cp1 <= c1 {
        return (out, 0);
    }
    let c1 = c1 - cp1;
    let cp1 = cp1 - cp0;
    let cp0 = cp0 - c0;
    let (roots, count) = solve_quadratic(c1 - cp1 - cp1 + cp0, (cp1 - cp0) * T::two(), cp0);
    let mut n = 0;
    for &t in &roots[..count] {
        if t > T::zero() && t < T::one() {
            out[n] = t;
            n += 1;
        }
    }
    if n == 2 && out[0] > out[1] {
        out.swap(0, 1);
    }
    (out, n)
}

impl<T> Cubic<T>
where
    T: Real,
{
    /// Cubic from `(x0, y0)` down to `(x1, y1)`, control y values are clamped into `[y0, y1]`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        x0: T,
        y0: T,
        cx0: T,
        cy0: T,
        cx1: T,
        cy1: T,
        x1: T,
        y1: T,
        direction: Direction,
    ) -> Self {
        debug_assert!(y0 <= y1, "cubic must be stored top to bottom");
        let cy0 = if cy0 < y0 { y0 } else { cy0 };
        let cy1 = if cy1 > y1 { y1 } else { cy1 };
        let min = <T as num_traits::real::Real>::min;
        let max = <T as num_traits::real::Real>::max;
        let three = T::three();
        Self {
            x0,
            y0,
            cx0,
            cy0,
            cx1,
            cy1,
            x1,
            y1,
            xmin: min(min(x0, x1), min(cx0, cx1)),
            xmax: max(max(x0, x1), max(cx0, cx1)),
            xcoeff: [
                x0,
                (cx0 - x0) * three,
                (cx1 - cx0 - cx0 + x0) * three,
                x1 - (cx1 - cx0) * three - x0,
            ],
            ycoeff: [
                y0,
                (cy0 - y0) * three,
                (cy1 - cy0 - cy0 + y0) * three,
                y1 - (cy1 - cy0) * three - y0,
            ],
            direction,
        }
    }

    /// Cubic drawn `p0 -> c0 -> c1 -> p1` that is already y-monotonic, `None` if horizontal.
    pub fn from_points(
        p0: Vector2<T>,
        c0: Vector2<T>,
        c1: Vector2<T>,
        p1: Vector2<T>,
    ) -> Option<Self> {
        if p0.y > p1.y {
            Some(Self::new(
                p1.x,
                p1.y,
                c1.x,
                c1.y,
                c0.x,
                c0.y,
                p0.x,
                p0.y,
                Direction::Decreasing,
            ))
        } else if p1.y > p0.y {
            Some(Self::new(
                p0.x,
                p0.y,
                c0.x,
                c0.y,
                c1.x,
                c1.y,
                p1.x,
                p1.y,
                Direction::Increasing,
            ))
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

    /// Control points in top to bottom order.
    #[inline]
    pub fn ctrls(&self) -> [Vector2<T>; 2] {
        [vec2(self.cx0, self.cy0), vec2(self.cx1, self.cy1)]
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
        derivative(&self.xcoeff, t, 0)
    }

    #[inline]
    pub fn y_for_t(&self, t: T) -> T {
        derivative(&self.ycoeff, t, 0)
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
        let [c0, c1, c2, c3] = self.ycoeff;
        if c3 == T::zero() {
            return quad_t_for_y(y, [c0, c1, c2]);
        }

        // monic form t^3 + a t^2 + b t + c
        let a = c2 / c3;
        let b = c1 / c3;
        let c = (c0 - y) / c3;
        let three = T::three();
        let nine = three * three;
        let q = (a * a - three * b) / nine;
        let r =
            (T::two() * a * a * a - nine * a * b + nine * three * c) / (nine * T::two() * three);
        let r2 = r * r;
        let q3 = q * q * q;
        let a_3 = a / three;

        let mut t;
        if r2 < q3 {
            // three real roots
            let theta = (r / q3.sqrt()).acos();
            let q = -T::two() * q.sqrt();
            t = self.refine_root(y, q * (theta / three).cos() - a_3);
            if t < T::zero() {
                t = self.refine_root(y, q * ((theta + T::tau()) / three).cos() - a_3);
            }
            if t < T::zero() {
                t = self.refine_root(y, q * ((theta - T::tau()) / three).cos() - a_3);
            }
        } else {
            let neg = r < T::zero();
            let s = (r2 - q3).sqrt();
            let r = if neg { -r } else { r };
            let mut big_a = (r + s).cbrt();
            if !neg {
                big_a = -big_a;
            }
            let big_b = if big_a == T::zero() {
                T::zero()
            } else {
                q / big_a
            };
            t = self.refine_root(y, (big_a + big_b) - a_3);
        }

        if t < T::zero() {
            // no usable analytic root, bisect
            let mut t0 = T::zero();
            let mut t1 = T::one();
            loop {
                t = (t0 + t1) / T::two();
                if t == t0 || t == t1 {
                    break;
                }
                let yt = self.y_for_t(t);
                if yt < y {
                    t0 = t;
                } else if yt > y {
                    t1 = t;
                } else {
                    break;
                }
            }
        }
        t
    }

    /// Polish an analytic root estimate with Newton steps, falling back to bisection. Returns
    /// `-1` when the estimate is unusable.
    fn refine_root(&self, target: T, mut t: T) -> T {
        let tenth = T::from(0.1).unwrap();
        if t < -tenth || t > T::one() + tenth {
            return -T::one();
        }
        let mut y = self.y_for_t(t);
        let (mut t0, mut t1) = if y < target {
            (t, T::one())
        } else {
            (T::zero(), t)
        };
        let mut use_slope = true;
        while y != target {
            if use_slope {
                let slope = self.dy_for_t(t, 1);
                if slope == T::zero() {
                    use_slope = false;
                    continue;
                }
                let t2 = t + (target - y) / slope;
                if t2 == t || t2 <= t0 || t2 >= t1 {
                    use_slope = false;
                    continue;
                }
                t = t2;
            } else {
                let t2 = (t0 + t1) / T::two();
                if t2 == t0 || t2 == t1 {
                    break;
                }
                t = t2;
            }
            y = self.y_for_t(t);
            if y < target {
                t0 = t;
            } else if y > target {
                t1 = t;
            } else {
                break;
            }
        }

        if t > T::one() {
            -T::one()
        } else {
            t
        }
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

    /// Roots of the x derivative.
    fn x_turns(&self) -> ([T; 2], usize) {
        solve_quadratic(
            T::three() * self.xcoeff[3],
            T::two() * self.xcoeff[2],
            self.xcoeff[1],
        )
    }

    pub fn next_vertical(&self, t0: T, t1: T) -> T {
        let (roots, count) = self.x_turns();
        let mut t1 = t1;
        for &r in &roots[..count] {
            if r > t0 && r < t1 {
                t1 = r;
            }
        }
        t1
    }

    pub fn enlarge(&self, bounds: &mut AABB<T>) {
        aabb_add_point(bounds, self.x0, self.y0);
        let (roots, count) = self.x_turns();
        for &t in &roots[..count] {
            if t > T::zero() && t < T::one() {
                aabb_add_point(bounds, self.x_for_t(t), self.y_for_t(t));
            }
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
        if ystart <= self.y0 && yend >= self.y1 {
            return self.with_direction(direction);
        }
        let mut t0 = self.t_for_y(ystart);
        let mut t1 = self.t_for_y(yend);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        let [c0, c1] = self.ctrls();
        let mut pts = [self.top(), c0, c1, self.bot()];
        if t1 < T::one() {
            pts = split_cubic(pts, t1).0;
        }
        if t0 > T::zero() {
            pts = split_cubic(pts, t0 / t1).1;
        }
        let [p0, c0, c1, p1] = pts;
        Self::new(p0.x, ystart, c0.x, c0.y, c1.x, c1.y, p1.x, yend, direction)
    }

    /// Points in drawing order: start, first control, second control, end.
    pub fn path_points(&self) -> [Vector2<T>; 4] {
        let [c0, c1] = self.ctrls();
        match self.direction {
            Direction::Increasing => [self.top(), c0, c1, self.bot()],
            Direction::Decreasing => [self.bot(), c1, c0, self.top()],
        }
    }
}

/// Evaluate derivative `deriv` of the cubic polynomial with coefficients `c` at `t`.
#[inline]
fn derivative<T>(c: &[T; 4], t: T, deriv: u32) -> T
where
    T: Real,
{
    let three = T::three();
    match deriv {
        0 => ((c[3] * t + c[2]) * t + c[1]) * t + c[0],
        1 => (three * c[3] * t + T::two() * c[2]) * t + c[1],
        2 => three * T::two() * c[3] * t + T::two() * c[2],
        3 => three * T::two() * c[3],
        _ => T::zero(),
    }
}
