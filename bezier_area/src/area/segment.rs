use crate::{
    core::{
        math::{aabb_add_point, aabb_from_point, line_line_intr, Transform, Vector2},
        traits::Real,
    },
    curve::{split_cubic, split_quad},
    path::PathCmd,
};
use static_aabb2d_index::{
    StaticAABB2DIndex, StaticAABB2DIndexBuildError, StaticAABB2DIndexBuilder, AABB,
};

/// Subdivision depth after which pieces are treated as flat regardless of tolerance.
const MAX_SUBDIVISION_DEPTH: u32 = 24;

/// Line, quadratic or cubic bezier segment given by its control points in drawing order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BezierSegment<T = f64> {
    Line([Vector2<T>; 2]),
    Quad([Vector2<T>; 3]),
    Cubic([Vector2<T>; 4]),
}

impl<T> BezierSegment<T>
where
    T: Real,
{
    /// Segment drawn by `cmd` from `start`, `None` for moves and closes.
    pub fn from_command(start: Vector2<T>, cmd: &PathCmd<T>) -> Option<Self> {
        match *cmd {
            PathCmd::LineTo(p) => Some(BezierSegment::Line([start, p])),
            PathCmd::QuadTo { ctrl, to } => Some(BezierSegment::Quad([start, ctrl, to])),
            PathCmd::CubicTo { ctrl1, ctrl2, to } => {
                Some(BezierSegment::Cubic([start, ctrl1, ctrl2, to]))
            }
            PathCmd::MoveTo(_) | PathCmd::Close => None,
        }
    }

    #[inline]
    pub fn start(&self) -> Vector2<T> {
        match self {
            BezierSegment::Line(p) => p[0],
            BezierSegment::Quad(p) => p[0],
            BezierSegment::Cubic(p) => p[0],
        }
    }

    #[inline]
    pub fn end(&self) -> Vector2<T> {
        match self {
            BezierSegment::Line(p) => p[1],
            BezierSegment::Quad(p) => p[2],
            BezierSegment::Cubic(p) => p[3],
        }
    }

    fn ctrls(&self) -> &[Vector2<T>] {
        match self {
            BezierSegment::Line(_) => &[],
            BezierSegment::Quad(p) => &p[1..2],
            BezierSegment::Cubic(p) => &p[1..3],
        }
    }

    /// Bounding box of the control polygon, which contains the segment.
    pub fn bounds(&self) -> AABB<T> {
        let start = self.start();
        let end = self.end();
        let mut bounds = aabb_from_point(start.x, start.y);
        aabb_add_point(&mut bounds, end.x, end.y);
        for c in self.ctrls() {
            aabb_add_point(&mut bounds, c.x, c.y);
        }
        bounds
    }

    pub fn transformed(&self, transform: &Transform<T>) -> Self {
        match self {
            BezierSegment::Line(p) => BezierSegment::Line(p.map(|v| transform.apply(v))),
            BezierSegment::Quad(p) => BezierSegment::Quad(p.map(|v| transform.apply(v))),
            BezierSegment::Cubic(p) => BezierSegment::Cubic(p.map(|v| transform.apply(v))),
        }
    }

    /// `true` if every control point lies within `tolerance` of the baseline.
    pub fn is_flat(&self, tolerance: T) -> bool {
        let from = self.start();
        let baseline = self.end() - from;
        let len_sq = baseline.length_squared();
        let tol_sq = tolerance * tolerance;
        self.ctrls().iter().all(|&c| {
            let v = c - from;
            if len_sq <= tol_sq {
                v.length_squared() <= tol_sq
            } else {
                let cross = baseline.perp_dot(v);
                cross * cross <= tol_sq * len_sq
            }
        })
    }

    /// Split in half by parameter.
    pub fn split(&self) -> (Self, Self) {
        let half = T::one() / T::two();
        match *self {
            BezierSegment::Line([p0, p1]) => {
                let mid = p0.lerp(p1, half);
                (BezierSegment::Line([p0, mid]), BezierSegment::Line([mid, p1]))
            }
            BezierSegment::Quad(p) => {
                let (a, b) = split_quad(p, half);
                (BezierSegment::Quad(a), BezierSegment::Quad(b))
            }
            BezierSegment::Cubic(p) => {
                let (a, b) = split_cubic(p, half);
                (BezierSegment::Cubic(a), BezierSegment::Cubic(b))
            }
        }
    }

    /// `true` if the two segments touch or cross anywhere, end points included.
    ///
    /// Both segments are subdivided until each piece is within `flatness_eps` of its chord, then
    /// the chords are intersected.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bezier_area::area::*;
    /// # use bezier_area::core::math::*;
    /// let arch = BezierSegment::Quad([vec2(0.0, 0.0), vec2(2.0, 4.0), vec2(4.0, 0.0)]);
    /// let low = BezierSegment::Line([vec2(0.0, 1.0), vec2(4.0, 1.0)]);
    /// let high = BezierSegment::Line([vec2(0.0, 3.0), vec2(4.0, 3.0)]);
    /// assert!(arch.intersects(&low, 1e-6));
    /// assert!(!arch.intersects(&high, 1e-6));
    /// ```
    pub fn intersects(&self, other: &Self, flatness_eps: T) -> bool {
        intersects_at_depth(self, other, flatness_eps, 0)
    }
}

/// Iterator over the segments drawn by a command stream.
///
/// A contour whose last point differs from its start (in either coordinate) yields an implied
/// closing line, whether it ends with [PathCmd::Close], a new move or the end of the stream.
#[derive(Debug, Clone)]
pub struct Segments<I, T> {
    commands: I,
    start: Vector2<T>,
    last: Vector2<T>,
    done: bool,
}

impl<I, T> Segments<I, T>
where
    I: Iterator<Item = PathCmd<T>>,
    T: Real,
{
    pub fn new<C>(commands: C) -> Self
    where
        C: IntoIterator<IntoIter = I>,
    {
        Self {
            commands: commands.into_iter(),
            start: Vector2::zero(),
            last: Vector2::zero(),
            done: false,
        }
    }

    fn close_contour(&mut self) -> Option<BezierSegment<T>> {
        if self.last == self.start {
            return None;
        }
        let seg = BezierSegment::Line([self.last, self.start]);
        self.last = self.start;
        Some(seg)
    }
}

impl<I, T> Iterator for Segments<I, T>
where
    I: Iterator<Item = PathCmd<T>>,
    T: Real,
{
    type Item = BezierSegment<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let Some(cmd) = self.commands.next() else {
                self.done = true;
                return self.close_contour();
            };
            match cmd {
                PathCmd::MoveTo(p) => {
                    let closing = self.close_contour();
                    self.start = p;
                    self.last = p;
                    if closing.is_some() {
                        return closing;
                    }
                }
                PathCmd::Close => {
                    if let Some(seg) = self.close_contour() {
                        return Some(seg);
                    }
                }
                _ => {
                    let seg = BezierSegment::from_command(self.last, &cmd);
                    if let Some(end) = cmd.end_point() {
                        self.last = end;
                    }
                    if seg.is_some() {
                        return seg;
                    }
                }
            }
        }
        None
    }
}

/// Spatial index over the control polygon bounds of `segments`, item `i` is `segments[i]`.
pub(crate) fn build_segment_index<T>(segments: &[BezierSegment<T>]) -> StaticAABB2DIndex<T>
where
    T: Real,
{
    build_bounds_index(segments.iter().map(|seg| seg.bounds()))
}

/// Spatial index over `boxes`, item `i` is the `i`th box.
pub(crate) fn build_bounds_index<T, I>(boxes: I) -> StaticAABB2DIndex<T>
where
    T: Real,
    I: ExactSizeIterator<Item = AABB<T>>,
{
    let mut builder = StaticAABB2DIndexBuilder::new(boxes.len());
    for bb in boxes {
        builder.add(bb.min_x, bb.min_y, bb.max_x, bb.max_y);
    }

    match builder.build() {
        Ok(x) => x,
        Err(e) => match e {
            StaticAABB2DIndexBuildError::ItemCountError { .. } => {
                unreachable!("internal library error: count mismatch when building spatial index")
            }
            StaticAABB2DIndexBuildError::NumericCastError => {
                panic!("failed to cast numeric type: {e}")
            }
        },
    }
}

fn boxes_touch<T>(a: &AABB<T>, b: &AABB<T>, eps: T) -> bool
where
    T: Real,
{
    a.min_x <= b.max_x + eps
        && b.min_x <= a.max_x + eps
        && a.min_y <= b.max_y + eps
        && b.min_y <= a.max_y + eps
}

fn intersects_at_depth<T>(
    a: &BezierSegment<T>,
    b: &BezierSegment<T>,
    flatness_eps: T,
    depth: u32,
) -> bool
where
    T: Real,
{
    if !boxes_touch(&a.bounds(), &b.bounds(), flatness_eps) {
        return false;
    }

    let bottomed_out = depth >= MAX_SUBDIVISION_DEPTH;
    let a_flat = bottomed_out || a.is_flat(flatness_eps);
    let b_flat = bottomed_out || b.is_flat(flatness_eps);
    let next = depth + 1;
    match (a_flat, b_flat) {
        (true, true) => {
            line_line_intr(a.start(), a.end(), b.start(), b.end(), flatness_eps).touches()
        }
        (false, true) => {
            let (a0, a1) = a.split();
            intersects_at_depth(&a0, b, flatness_eps, next)
                || intersects_at_depth(&a1, b, flatness_eps, next)
        }
        (true, false) => {
            let (b0, b1) = b.split();
            intersects_at_depth(a, &b0, flatness_eps, next)
                || intersects_at_depth(a, &b1, flatness_eps, next)
        }
        (false, false) => {
            let (a0, a1) = a.split();
            let (b0, b1) = b.split();
            intersects_at_depth(&a0, &b0, flatness_eps, next)
                || intersects_at_depth(&a0, &b1, flatness_eps, next)
                || intersects_at_depth(&a1, &b0, flatness_eps, next)
                || intersects_at_depth(&a1, &b1, flatness_eps, next)
        }
    }
}
