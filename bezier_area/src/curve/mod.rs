//! Y-monotonic curves (orders 0 to 3) and the ordered lists they are stored in.
//!
//! Every path segment is split at its y extrema on ingestion so each stored [Curve] runs
//! strictly downward (or is a single point). The [Direction] records whether the original path
//! traversed the curve top to bottom, which is what winding numbers and output contours need.
mod cubic;
mod curve_list;
mod line;
mod quad;

pub use cubic::Cubic;
pub use curve_list::CurveList;
pub use line::Line;
pub use quad::Quad;

pub(crate) use cubic::split_cubic;
pub(crate) use quad::split_quad;

use crate::{
    core::{
        math::{aabb_add_point, Transform, Vector2},
        traits::Real,
    },
    path::PathCmd,
};
use static_aabb2d_index::AABB;
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Whether a curve was drawn toward increasing or decreasing y in its source path.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Direction {
    Increasing,
    Decreasing,
}

impl Direction {
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Increasing => Direction::Decreasing,
            Direction::Decreasing => Direction::Increasing,
        }
    }

    /// `1` for increasing, `-1` for decreasing.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Increasing => 1,
            Direction::Decreasing => -1,
        }
    }
}

/// Smallest parameter span the curve/curve intersection search subdivides to.
const T_MIN: f64 = 1e-3;

#[inline]
pub(crate) fn orderof<T>(x1: T, x2: T) -> Ordering
where
    T: Real,
{
    if x1 < x2 {
        Ordering::Less
    } else if x1 > x2 {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Relative x difference below which two curves start a coincident run on a scanline.
const COINCIDENT_TOL: f64 = 1e-10;

/// Relative x difference that ends a coincident run once started. Looser than
/// [COINCIDENT_TOL] so evaluation noise at that boundary cannot end a run after a few ulps.
const COINCIDENT_EXIT_TOL: f64 = 1e-9;

/// `true` if `v1` and `v2` differ by less than `rel_tol` relative to the larger magnitude.
#[inline]
fn fairly_close<T>(v1: T, v2: T, rel_tol: f64) -> bool
where
    T: Real,
{
    let scale = num_traits::real::Real::max(v1.abs(), v2.abs());
    (v1 - v2).abs() < scale * T::from(rel_tol).unwrap()
}

/// Parameter and position of a sample on a curve.
#[derive(Debug, Copy, Clone)]
struct CurveSample<T> {
    t: T,
    x: T,
    y: T,
}

impl<T> CurveSample<T>
where
    T: Real,
{
    #[inline]
    fn at(curve: &Curve<T>, t: T) -> Self {
        Self {
            t,
            x: curve.x_for_t(t),
            y: curve.y_for_t(t),
        }
    }
}

/// Bisection could not make progress in parameter space.
#[derive(Debug, Copy, Clone)]
struct Stalled;

/// Y-monotonic curve segment.
///
/// Order 0 ([Curve::Point]) marks the start of a contour and never contributes crossings. The
/// other orders are stored top to bottom with their drawing [Direction].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Curve<T = f64> {
    Point(Vector2<T>),
    Line(Line<T>),
    Quad(Quad<T>),
    Cubic(Cubic<T>),
}

impl<T> Curve<T>
where
    T: Real,
{
    /// Polynomial order: 0 for points through 3 for cubics.
    #[inline]
    pub fn order(&self) -> usize {
        match self {
            Curve::Point(_) => 0,
            Curve::Line(_) => 1,
            Curve::Quad(_) => 2,
            Curve::Cubic(_) => 3,
        }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        match self {
            Curve::Point(_) => Direction::Increasing,
            Curve::Line(c) => c.direction(),
            Curve::Quad(c) => c.direction(),
            Curve::Cubic(c) => c.direction(),
        }
    }

    #[inline]
    pub fn top(&self) -> Vector2<T> {
        match self {
            Curve::Point(p) => *p,
            Curve::Line(c) => c.top(),
            Curve::Quad(c) => c.top(),
            Curve::Cubic(c) => c.top(),
        }
    }

    #[inline]
    pub fn bot(&self) -> Vector2<T> {
        match self {
            Curve::Point(p) => *p,
            Curve::Line(c) => c.bot(),
            Curve::Quad(c) => c.bot(),
            Curve::Cubic(c) => c.bot(),
        }
    }

    #[inline]
    pub fn x_top(&self) -> T {
        self.top().x
    }

    #[inline]
    pub fn y_top(&self) -> T {
        self.top().y
    }

    #[inline]
    pub fn x_bot(&self) -> T {
        self.bot().x
    }

    #[inline]
    pub fn y_bot(&self) -> T {
        self.bot().y
    }

    #[inline]
    pub fn x_min(&self) -> T {
        match self {
            Curve::Point(p) => p.x,
            Curve::Line(c) => c.x_min(),
            Curve::Quad(c) => c.x_min(),
            Curve::Cubic(c) => c.x_min(),
        }
    }

    #[inline]
    pub fn x_max(&self) -> T {
        match self {
            Curve::Point(p) => p.x,
            Curve::Line(c) => c.x_max(),
            Curve::Quad(c) => c.x_max(),
            Curve::Cubic(c) => c.x_max(),
        }
    }

    /// Start point in drawing order.
    #[inline]
    pub fn start(&self) -> Vector2<T> {
        match self.direction() {
            Direction::Increasing => self.top(),
            Direction::Decreasing => self.bot(),
        }
    }

    /// End point in drawing order.
    #[inline]
    pub fn end(&self) -> Vector2<T> {
        match self.direction() {
            Direction::Increasing => self.bot(),
            Direction::Decreasing => self.top(),
        }
    }

    pub fn x_for_t(&self, t: T) -> T {
        match self {
            Curve::Point(p) => p.x,
            Curve::Line(c) => c.x_for_t(t),
            Curve::Quad(c) => c.x_for_t(t),
            Curve::Cubic(c) => c.x_for_t(t),
        }
    }

    pub fn y_for_t(&self, t: T) -> T {
        match self {
            Curve::Point(p) => p.y,
            Curve::Line(c) => c.y_for_t(t),
            Curve::Quad(c) => c.y_for_t(t),
            Curve::Cubic(c) => c.y_for_t(t),
        }
    }

    pub fn dx_for_t(&self, t: T, deriv: u32) -> T {
        match self {
            Curve::Point(p) => {
                if deriv == 0 {
                    p.x
                } else {
                    T::zero()
                }
            }
            Curve::Line(c) => c.dx_for_t(t, deriv),
            Curve::Quad(c) => c.dx_for_t(t, deriv),
            Curve::Cubic(c) => c.dx_for_t(t, deriv),
        }
    }

    pub fn dy_for_t(&self, t: T, deriv: u32) -> T {
        match self {
            Curve::Point(p) => {
                if deriv == 0 {
                    p.y
                } else {
                    T::zero()
                }
            }
            Curve::Line(c) => c.dy_for_t(t, deriv),
            Curve::Quad(c) => c.dy_for_t(t, deriv),
            Curve::Cubic(c) => c.dy_for_t(t, deriv),
        }
    }

    /// Parameter where the curve reaches `y` (clamped to the curve's y span).
    pub fn t_for_y(&self, y: T) -> T {
        match self {
            Curve::Point(_) => T::zero(),
            Curve::Line(c) => c.t_for_y(y),
            Curve::Quad(c) => c.t_for_y(y),
            Curve::Cubic(c) => c.t_for_y(y),
        }
    }

    /// X position of the curve on the scanline `y` (clamped to the curve's y span).
    pub fn x_for_y(&self, y: T) -> T {
        match self {
            Curve::Point(p) => p.x,
            Curve::Line(c) => c.x_for_y(y),
            Curve::Quad(c) => c.x_for_y(y),
            Curve::Cubic(c) => c.x_for_y(y),
        }
    }

    /// First parameter in `(t0, t1)` where the curve turns in x, or `t1`.
    pub fn next_vertical(&self, t0: T, t1: T) -> T {
        match self {
            Curve::Point(_) | Curve::Line(_) => t1,
            Curve::Quad(c) => c.next_vertical(t0, t1),
            Curve::Cubic(c) => c.next_vertical(t0, t1),
        }
    }

    /// `1` if the `+x` ray from `point` crosses this curve, otherwise `0`.
    ///
    /// The curve covers the half open span `[y_top, y_bot)` so rays through shared vertices
    /// are counted exactly once.
    pub fn crossings_for(&self, point: Vector2<T>) -> i32 {
        if self.ray_hits(point) {
            1
        } else {
            0
        }
    }

    /// Signed crossing of the `+x` ray from `point` (the curve [Direction] sign, or `0`).
    pub fn winding_for(&self, point: Vector2<T>) -> i32 {
        if self.ray_hits(point) {
            self.direction().sign()
        } else {
            0
        }
    }

    fn ray_hits(&self, point: Vector2<T>) -> bool {
        if matches!(self, Curve::Point(_)) {
            return false;
        }
        let (x, y) = (point.x, point.y);
        y >= self.y_top()
            && y < self.y_bot()
            && x < self.x_max()
            && (x < self.x_min() || x < self.x_for_y(y))
    }

    /// Grow `bounds` to include the curve (end points and x extrema).
    pub fn enlarge(&self, bounds: &mut AABB<T>) {
        match self {
            Curve::Point(p) => aabb_add_point(bounds, p.x, p.y),
            Curve::Line(c) => {
                let (top, bot) = (c.top(), c.bot());
                aabb_add_point(bounds, top.x, top.y);
                aabb_add_point(bounds, bot.x, bot.y);
            }
            Curve::Quad(c) => c.enlarge(bounds),
            Curve::Cubic(c) => c.enlarge(bounds),
        }
    }

    pub fn with_direction(&self, direction: Direction) -> Self {
        match self {
            Curve::Point(_) => *self,
            Curve::Line(c) => Curve::Line(c.with_direction(direction)),
            Curve::Quad(c) => Curve::Quad(c.with_direction(direction)),
            Curve::Cubic(c) => Curve::Cubic(c.with_direction(direction)),
        }
    }

    #[inline]
    pub fn reversed(&self) -> Self {
        self.with_direction(self.direction().reversed())
    }

    /// Portion of the curve between the scanlines `ystart` and `yend` with `direction`.
    pub fn sub_curve(&self, ystart: T, yend: T, direction: Direction) -> Self {
        match self {
            Curve::Point(_) => *self,
            Curve::Line(c) => Curve::Line(c.sub_curve(ystart, yend, direction)),
            Curve::Quad(c) => Curve::Quad(c.sub_curve(ystart, yend, direction)),
            Curve::Cubic(c) => Curve::Cubic(c.sub_curve(ystart, yend, direction)),
        }
    }

    /// Path command drawing this curve from its start point.
    pub fn segment(&self) -> PathCmd<T> {
        match self {
            Curve::Point(p) => PathCmd::MoveTo(*p),
            Curve::Line(_) => PathCmd::LineTo(self.end()),
            Curve::Quad(c) => {
                let [_, ctrl, to] = c.path_points();
                PathCmd::QuadTo { ctrl, to }
            }
            Curve::Cubic(c) => {
                let [_, ctrl1, ctrl2, to] = c.path_points();
                PathCmd::CubicTo { ctrl1, ctrl2, to }
            }
        }
    }

    /// Remap the curve through an axis aligned (no shear or rotation) `transform`.
    ///
    /// Direction is recomputed from the transformed drawing order so contours stay connected
    /// when the transform flips y. Returns `None` if the curve becomes horizontal.
    pub fn transform_scaled(&self, transform: &Transform<T>) -> Option<Self> {
        match self {
            Curve::Point(p) => Some(Curve::Point(transform.apply(*p))),
            Curve::Line(_) => Line::from_points(
                transform.apply(self.start()),
                transform.apply(self.end()),
            )
            .map(Curve::Line),
            Curve::Quad(c) => {
                let [p0, ctrl, p1] = c.path_points().map(|p| transform.apply(p));
                Quad::from_points(p0, ctrl, p1).map(Curve::Quad)
            }
            Curve::Cubic(c) => {
                let [p0, c0, c1, p1] = c.path_points().map(|p| transform.apply(p));
                Cubic::from_points(p0, c0, c1, p1).map(Curve::Cubic)
            }
        }
    }

    /// Order `self` against `that` by x over the scanlines in `yrange`.
    ///
    /// `yrange[0]` is the current scanline, `yrange[1]` is narrowed to the last scanline over
    /// which the returned ordering is known to hold (the next crossing or end of either curve).
    ///
    /// # Panics
    ///
    /// Panics if the range is (or becomes) empty, which means the sweep stepped backward.
    pub fn compare_to(&self, that: &Curve<T>, yrange: &mut [T; 2]) -> Ordering {
        if let (Curve::Line(a), Curve::Line(b)) = (self, that) {
            return a.compare_to(b, yrange);
        }

        let min = <T as num_traits::real::Real>::min;
        let max = <T as num_traits::real::Real>::max;
        let y0 = yrange[0];
        let y1 = min(min(yrange[1], self.y_bot()), that.y_bot());
        assert!(y1 > y0, "backstepping from {:?} to {:?}", y0, y1);
        yrange[1] = y1;

        if self.x_max() <= that.x_min() {
            return if self.x_min() == that.x_max() {
                Ordering::Equal
            } else {
                Ordering::Less
            };
        }
        if self.x_min() >= that.x_max() {
            return Ordering::Greater;
        }

        let (mut s0, s1) = self.param_range(y0, y1);
        let (mut t0, t1) = that.param_range(y0, y1);
        let mut s_top = CurveSample::at(self, s0);
        let mut t_top = CurveSample::at(that, t0);

        let scale = max(y0.abs(), y1.abs());
        let ymin = max(scale * T::from(1e-14).unwrap(), T::tiny());

        if fairly_close(s_top.x, t_top.x, COINCIDENT_TOL) {
            // walk down while the curves stay coincident
            let still_close =
                |y: T| fairly_close(self.x_for_y(y), that.x_for_y(y), COINCIDENT_EXIT_TOL);
            let mut bump = ymin;
            let maxbump = min(
                ymin * T::from(1e13).unwrap(),
                (y1 - y0) * T::from(0.1).unwrap(),
            );
            let mut y = y0 + bump;
            while y <= y1 {
                if still_close(y) {
                    bump = bump * T::two();
                    if bump > maxbump {
                        bump = maxbump;
                    }
                } else {
                    y = y - bump;
                    loop {
                        bump = bump / T::two();
                        let newy = y + bump;
                        if newy <= y {
                            break;
                        }
                        if still_close(newy) {
                            y = newy;
                        }
                    }
                    break;
                }
                y = y + bump;
            }
            if y > y0 {
                if y < y1 {
                    yrange[1] = y;
                }
                return Ordering::Equal;
            }
        }

        while s0 < s1 && t0 < t1 {
            let s_turn = CurveSample::at(self, self.next_vertical(s0, s1));
            let t_turn = CurveSample::at(that, that.next_vertical(t0, t1));

            match self.find_intersect(that, yrange, s_top, s_turn, t_top, t_turn) {
                Ok(true) => break,
                Ok(false) => {}
                Err(Stalled) => {
                    log::debug!("curve intersection search stalled, treating curves as coincident");
                    return Ordering::Equal;
                }
            }

            if s_turn.y < t_turn.y {
                if s_turn.y > yrange[0] {
                    if s_turn.y < yrange[1] {
                        yrange[1] = s_turn.y;
                    }
                    break;
                }
                s0 = s_turn.t;
                s_top = s_turn;
            } else {
                if t_turn.y > yrange[0] {
                    if t_turn.y < yrange[1] {
                        yrange[1] = t_turn.y;
                    }
                    break;
                }
                t0 = t_turn.t;
                t_top = t_turn;
            }
        }

        let ymid = (yrange[0] + yrange[1]) / T::two();
        orderof(self.x_for_y(ymid), that.x_for_y(ymid))
    }

    /// Parameters for the scanlines `y0` and `y1`, refined so the start is not above `y0`.
    fn param_range(&self, y0: T, y1: T) -> (T, T) {
        let mut s0 = self.t_for_y(y0);
        let ys0 = self.y_for_t(s0);
        if ys0 < y0 {
            s0 = self.refine_t_for_y(s0, y0);
        }
        let mut s1 = self.t_for_y(y1);
        if self.y_for_t(s1) < y0 {
            s1 = self.refine_t_for_y(s1, y0);
        }
        (s0, s1)
    }

    /// Bisect upward from `t0` (which sits above `y0`) to the first parameter at or below `y0`.
    fn refine_t_for_y(&self, mut t0: T, y0: T) -> T {
        let mut t1 = T::one();
        loop {
            let th = (t0 + t1) / T::two();
            if th == t0 || th == t1 {
                return t1;
            }
            let y = self.y_for_t(th);
            if y < y0 {
                t0 = th;
            } else if y > y0 {
                t1 = th;
            } else {
                return t1;
            }
        }
    }

    /// Recursive bounding box subdivision search for a crossing of the pieces `s0..s1` of
    /// `self` and `t0..t1` of `that`. On success `yrange[1]` is pulled up to the crossing.
    fn find_intersect(
        &self,
        that: &Curve<T>,
        yrange: &mut [T; 2],
        s0: CurveSample<T>,
        s1: CurveSample<T>,
        t0: CurveSample<T>,
        t1: CurveSample<T>,
    ) -> Result<bool, Stalled> {
        let min = <T as num_traits::real::Real>::min;
        let max = <T as num_traits::real::Real>::max;
        if s0.y > t1.y || t0.y > s1.y {
            return Ok(false);
        }
        if min(s0.x, s1.x) > max(t0.x, t1.x) || max(s0.x, s1.x) < min(t0.x, t1.x) {
            return Ok(false);
        }

        let t_min = T::from(T_MIN).unwrap();
        let split_s = s1.t - s0.t > t_min;
        let split_t = t1.t - t0.t > t_min;

        if split_s {
            let sm = (s0.t + s1.t) / T::two();
            if sm == s0.t || sm == s1.t {
                return Err(Stalled);
            }
            let s = CurveSample::at(self, sm);
            if split_t {
                let tm = (t0.t + t1.t) / T::two();
                if tm == t0.t || tm == t1.t {
                    return Err(Stalled);
                }
                let t = CurveSample::at(that, tm);
                if s.y >= t0.y && t.y >= s0.y && self.find_intersect(that, yrange, s0, s, t0, t)? {
                    return Ok(true);
                }
                if s.y >= t.y && self.find_intersect(that, yrange, s0, s, t, t1)? {
                    return Ok(true);
                }
                if t.y >= s.y && self.find_intersect(that, yrange, s, s1, t0, t)? {
                    return Ok(true);
                }
                if s1.y >= t.y && t1.y >= s.y && self.find_intersect(that, yrange, s, s1, t, t1)? {
                    return Ok(true);
                }
            } else {
                if s.y >= t0.y && self.find_intersect(that, yrange, s0, s, t0, t1)? {
                    return Ok(true);
                }
                if t1.y >= s.y && self.find_intersect(that, yrange, s, s1, t0, t1)? {
                    return Ok(true);
                }
            }
        } else if split_t {
            let tm = (t0.t + t1.t) / T::two();
            if tm == t0.t || tm == t1.t {
                return Err(Stalled);
            }
            let t = CurveSample::at(that, tm);
            if t.y >= s0.y && self.find_intersect(that, yrange, s0, s1, t0, t)? {
                return Ok(true);
            }
            if s1.y >= t.y && self.find_intersect(that, yrange, s0, s1, t, t1)? {
                return Ok(true);
            }
        } else {
            // both pieces are short, intersect them as lines
            let xlk = s1.x - s0.x;
            let ylk = s1.y - s0.y;
            let xnm = t1.x - t0.x;
            let ynm = t1.y - t0.y;
            let xmk = t0.x - s0.x;
            let ymk = t0.y - s0.y;
            let det = xnm * ylk - ynm * xlk;
            if det != T::zero() {
                let detinv = T::one() / det;
                let s = (xnm * ymk - ynm * xmk) * detinv;
                let t = (xlk * ymk - ylk * xmk) * detinv;
                let unit = |v: T| v >= T::zero() && v <= T::one();
                if unit(s) && unit(t) {
                    let s = s0.t + s * (s1.t - s0.t);
                    let t = t0.t + t * (t1.t - t0.t);
                    let y = (self.y_for_t(s) + that.y_for_t(t)) / T::two();
                    if y <= yrange[1] && y > yrange[0] {
                        yrange[1] = y;
                        return Ok(true);
                    }
                }
            }
        }

        Ok(false)
    }
}
