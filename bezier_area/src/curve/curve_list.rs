use super::{
    cubic::{cubic_turn_params, split_cubic},
    quad::{quad_turn_param, split_quad},
    Cubic, Curve, Direction, Line, Quad,
};
use crate::{
    core::{
        math::{aabb_from_point, Vector2},
        traits::Real,
    },
    path::{PathCmd, PathError},
};
use static_aabb2d_index::AABB;
use std::ops::Index;

/// Ordered list of curves with a bounding box maintained as curves are appended.
///
/// Each contour is stored as a [Curve::Point] at its start followed by its curves in drawing
/// order. Horizontal pieces are never stored since they cannot cross a horizontal ray.
#[derive(Debug, Clone, Default)]
pub struct CurveList<T = f64> {
    curves: Vec<Curve<T>>,
    bounds: Option<AABB<T>>,
}

impl<T> CurveList<T>
where
    T: Real,
{
    pub const fn new() -> Self {
        Self {
            curves: Vec::new(),
            bounds: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            curves: Vec::with_capacity(capacity),
            bounds: None,
        }
    }

    /// Ingest path commands, splitting every segment at its y extrema.
    ///
    /// Open contours are closed with an implied line back to their start point.
    pub fn from_commands<I>(commands: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = PathCmd<T>>,
    {
        let commands = commands.into_iter();
        let mut list = Self::with_capacity(commands.size_hint().0 + 1);
        let mut mov = Vector2::zero();
        let mut cur = Vector2::zero();
        let mut started = false;
        for (index, cmd) in commands.enumerate() {
            if !cmd.is_finite() {
                return Err(PathError::NonFiniteCoordinate { index });
            }
            if !started && !matches!(cmd, PathCmd::MoveTo(_) | PathCmd::Close) {
                return Err(PathError::MissingMoveTo { index });
            }
            match cmd {
                PathCmd::MoveTo(p) => {
                    list.insert_line(cur, mov);
                    list.insert_move(p);
                    mov = p;
                    cur = p;
                    started = true;
                }
                PathCmd::LineTo(p) => {
                    list.insert_line(cur, p);
                    cur = p;
                }
                PathCmd::QuadTo { ctrl, to } => {
                    list.insert_quad(cur, ctrl, to);
                    cur = to;
                }
                PathCmd::CubicTo { ctrl1, ctrl2, to } => {
                    list.insert_cubic(cur, ctrl1, ctrl2, to);
                    cur = to;
                }
                PathCmd::Close => {
                    list.insert_line(cur, mov);
                    cur = mov;
                }
            }
        }
        list.insert_line(cur, mov);
        Ok(list)
    }

    /// Append `curve` and grow the bounds to cover it.
    pub fn push(&mut self, curve: Curve<T>) {
        match &mut self.bounds {
            Some(bounds) => curve.enlarge(bounds),
            None => {
                let start = curve.start();
                let mut bounds = aabb_from_point(start.x, start.y);
                curve.enlarge(&mut bounds);
                self.bounds = Some(bounds);
            }
        }
        self.curves.push(curve);
    }

    /// Append all curves of `other`.
    pub fn extend_from(&mut self, other: &CurveList<T>) {
        self.curves.reserve(other.len());
        for c in other.iter() {
            self.push(*c);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Curve<T>> {
        self.curves.get(index)
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Curve<T>> {
        self.curves.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Curve<T>] {
        &self.curves
    }

    /// Bounds of every curve (including x extrema of curved pieces), `None` when empty.
    #[inline]
    pub fn bounds(&self) -> Option<AABB<T>> {
        self.bounds
    }

    /// Start a new contour at `p`.
    pub fn insert_move(&mut self, p: Vector2<T>) {
        self.push(Curve::Point(p));
    }

    /// Add the line `p0 -> p1` unless it is horizontal.
    pub fn insert_line(&mut self, p0: Vector2<T>, p1: Vector2<T>) {
        if let Some(line) = Line::from_points(p0, p1) {
            self.push(Curve::Line(line));
        }
    }

    /// Add the quadratic `p0 -> ctrl -> p1`, split into y-monotonic pieces.
    pub fn insert_quad(&mut self, p0: Vector2<T>, ctrl: Vector2<T>, p1: Vector2<T>) {
        if p0.y > p1.y {
            self.insert_quad_pieces([p1, ctrl, p0], Direction::Decreasing);
        } else if p0.y == p1.y && p0.y == ctrl.y {
            // flat
        } else {
            self.insert_quad_pieces([p0, ctrl, p1], Direction::Increasing);
        }
    }

    /// Add the cubic `p0 -> ctrl1 -> ctrl2 -> p1`, split into y-monotonic pieces.
    pub fn insert_cubic(
        &mut self,
        p0: Vector2<T>,
        ctrl1: Vector2<T>,
        ctrl2: Vector2<T>,
        p1: Vector2<T>,
    ) {
        if p0.y > p1.y {
            self.insert_cubic_pieces([p1, ctrl2, ctrl1, p0], Direction::Decreasing);
        } else if p0.y == p1.y && p0.y == ctrl1.y && p0.y == ctrl2.y {
            // flat
        } else {
            self.insert_cubic_pieces([p0, ctrl1, ctrl2, p1], Direction::Increasing);
        }
    }

    /// `pts` runs from the lower y end to the higher y end, `direction` says which way it was
    /// drawn. Pieces are pushed in drawing order.
    fn insert_quad_pieces(&mut self, pts: [Vector2<T>; 3], direction: Direction) {
        let Some(t) = quad_turn_param(pts[0].y, pts[1].y, pts[2].y) else {
            self.push_quad(pts, direction);
            return;
        };
        let (first, second) = split_quad(pts, t);
        let (first, second) = match direction {
            Direction::Increasing => (first, second),
            Direction::Decreasing => (second, first),
        };
        self.push_quad(first, direction);
        self.push_quad(second, direction);
    }

    fn push_quad(&mut self, [p0, c, p1]: [Vector2<T>; 3], direction: Direction) {
        if p0.y > p1.y {
            self.push(Curve::Quad(Quad::new(
                p1.x,
                p1.y,
                c.x,
                c.y,
                p0.x,
                p0.y,
                direction.reversed(),
            )));
        } else if p1.y > p0.y {
            self.push(Curve::Quad(Quad::new(
                p0.x, p0.y, c.x, c.y, p1.x, p1.y, direction,
            )));
        }
    }

    fn insert_cubic_pieces(&mut self, pts: [Vector2<T>; 4], direction: Direction) {
        let (params, count) = cubic_turn_params(pts[0].y, pts[1].y, pts[2].y, pts[3].y);
        if count == 0 {
            self.push_cubic(pts, direction);
            return;
        }

        let mut pieces = Vec::with_capacity(3);
        let (first, rest) = split_cubic(pts, params[0]);
        pieces.push(first);
        if count > 1 {
            let t = (params[1] - params[0]) / (T::one() - params[0]);
            let (second, third) = split_cubic(rest, t);
            pieces.push(second);
            pieces.push(third);
        } else {
            pieces.push(rest);
        }

        if direction == Direction::Decreasing {
            pieces.reverse();
        }
        for piece in pieces {
            self.push_cubic(piece, direction);
        }
    }

    fn push_cubic(&mut self, [p0, c0, c1, p1]: [Vector2<T>; 4], direction: Direction) {
        if p0.y > p1.y {
            self.push(Curve::Cubic(Cubic::new(
                p1.x,
                p1.y,
                c1.x,
                c1.y,
                c0.x,
                c0.y,
                p0.x,
                p0.y,
                direction.reversed(),
            )));
        } else if p1.y > p0.y {
            self.push(Curve::Cubic(Cubic::new(
                p0.x, p0.y, c0.x, c0.y, c1.x, c1.y, p1.x, p1.y, direction,
            )));
        }
    }
}

impl<T> Index<usize> for CurveList<T> {
    type Output = Curve<T>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.curves[index]
    }
}

impl<'a, T> IntoIterator for &'a CurveList<T> {
    type Item = &'a Curve<T>;
    type IntoIter = std::slice::Iter<'a, Curve<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.curves.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::math::vec2, path::Path};

    #[test]
    fn rect_ingests_to_move_and_two_vertical_lines() {
        let list =
            CurveList::from_commands(Path::rect(0.0, 0.0, 2.0, 3.0).iter().copied()).unwrap();
        let orders: Vec<_> = list.iter().map(|c| c.order()).collect();
        assert_eq!(orders, vec![0, 1, 1]);
        assert_eq!(list[1].direction(), Direction::Increasing);
        assert_eq!(list[2].direction(), Direction::Decreasing);
        let b = list.bounds().unwrap();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (0.0, 0.0, 2.0, 3.0));
    }

    #[test]
    fn quad_with_turn_splits_in_drawing_order() {
        let mut list = CurveList::new();
        list.insert_move(vec2(0.0, 0.0));
        // reaches y = 2 at t = 0.5 then comes back
        list.insert_quad(vec2(0.0, 0.0), vec2(2.0, 4.0), vec2(4.0, 0.0));
        assert_eq!(list.len(), 3);
        assert_eq!(list[1].direction(), Direction::Increasing);
        assert_eq!(list[2].direction(), Direction::Decreasing);
        assert!(list[1].end().fuzzy_eq(list[2].start()));
        assert!(list[1].start().fuzzy_eq(vec2(0.0, 0.0)));
        assert!(list[2].end().fuzzy_eq(vec2(4.0, 0.0)));
    }

    #[test]
    fn decreasing_cubic_with_two_turns_keeps_order() {
        let mut list = CurveList::new();
        // drawn upward with an s-shaped wiggle in y
        list.insert_cubic(vec2(0.0, 4.0), vec2(1.0, -2.0), vec2(2.0, 6.0), vec2(3.0, 0.0));
        assert_eq!(list.len(), 3);
        assert!(list[0].start().fuzzy_eq(vec2(0.0, 4.0)));
        assert!(list[0].end().fuzzy_eq(list[1].start()));
        assert!(list[1].end().fuzzy_eq(list[2].start()));
        assert!(list[2].end().fuzzy_eq(vec2(3.0, 0.0)));
    }

    #[test]
    fn flat_segments_are_dropped() {
        let mut list = CurveList::new();
        list.insert_line(vec2(0.0, 1.0), vec2(5.0, 1.0));
        list.insert_quad(vec2(0.0, 1.0), vec2(2.0, 1.0), vec2(5.0, 1.0));
        list.insert_cubic(vec2(0.0, 1.0), vec2(2.0, 1.0), vec2(3.0, 1.0), vec2(5.0, 1.0));
        assert!(list.is_empty());
        assert!(list.bounds().is_none());
    }

    #[test]
    fn rejects_bad_input() {
        let mut p = Path::new(crate::path::WindingRule::NonZero);
        p.line_to(1.0, 1.0);
        assert_eq!(
            CurveList::from_commands(p.iter().copied()).unwrap_err(),
            PathError::MissingMoveTo { index: 0 }
        );

        let mut p = Path::new(crate::path::WindingRule::NonZero);
        p.move_to(0.0, 0.0).line_to(f64::NAN, 1.0);
        assert_eq!(
            CurveList::from_commands(p.iter().copied()).unwrap_err(),
            PathError::NonFiniteCoordinate { index: 1 }
        );
    }
}
