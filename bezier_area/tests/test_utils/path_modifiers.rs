use bezier_area::{
    core::math::{vec2, Vector2},
    path::{Path, PathCmd, WindingRule},
};

/// Closed polygon path through `vertexes`, starting at index `start`.
pub fn polygon_from_vertexes(vertexes: &[(f64, f64)], start: usize) -> Path<f64> {
    let mut path = Path::with_capacity(vertexes.len() + 1, WindingRule::NonZero);
    for (i, &(x, y)) in vertexes.iter().cycle().skip(start).take(vertexes.len()).enumerate() {
        if i == 0 {
            path.move_to(x, y);
        } else {
            path.line_to(x, y);
        }
    }
    path.close();
    path
}

/// Path with every contour traversed in the opposite direction.
///
/// Closed contours whose last point differs from their start get the implied closing line made
/// explicit first.
pub fn reverse_path(input: &Path<f64>) -> Path<f64> {
    struct Contour {
        start: Vector2<f64>,
        // control polygon of each segment, first point is the segment start
        segments: Vec<Vec<Vector2<f64>>>,
        closed: bool,
    }

    let mut contours: Vec<Contour> = Vec::new();
    let mut cur = vec2(0.0, 0.0);
    for cmd in input.iter().copied() {
        match cmd {
            PathCmd::MoveTo(p) => {
                contours.push(Contour {
                    start: p,
                    segments: Vec::new(),
                    closed: false,
                });
                cur = p;
            }
            PathCmd::LineTo(p) => {
                contours.last_mut().unwrap().segments.push(vec![cur, p]);
                cur = p;
            }
            PathCmd::QuadTo { ctrl, to } => {
                contours
                    .last_mut()
                    .unwrap()
                    .segments
                    .push(vec![cur, ctrl, to]);
                cur = to;
            }
            PathCmd::CubicTo { ctrl1, ctrl2, to } => {
                contours
                    .last_mut()
                    .unwrap()
                    .segments
                    .push(vec![cur, ctrl1, ctrl2, to]);
                cur = to;
            }
            PathCmd::Close => {
                let contour = contours.last_mut().unwrap();
                if cur != contour.start {
                    contour.segments.push(vec![cur, contour.start]);
                }
                contour.closed = true;
                cur = contour.start;
            }
        }
    }

    let mut result = Path::with_capacity(input.len() + contours.len(), input.winding_rule());
    for contour in contours {
        let end = contour
            .segments
            .last()
            .map_or(contour.start, |s| *s.last().unwrap());
        result.move_to(end.x, end.y);
        for seg in contour.segments.iter().rev() {
            let pts: Vec<_> = seg.iter().rev().copied().collect();
            match pts.as_slice() {
                [_, to] => result.line_to(to.x, to.y),
                [_, c, to] => result.quad_to(c.x, c.y, to.x, to.y),
                [_, c1, c2, to] => result.cubic_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y),
                _ => unreachable!(),
            };
        }
        if contour.closed {
            result.close();
        }
    }

    result
}

#[derive(Debug, Clone, Copy)]
pub struct ModifiedPathState {
    pub reversed: bool,
    pub start_index: usize,
}

impl ModifiedPathState {
    pub fn new(reversed: bool, start_index: usize) -> Self {
        Self {
            reversed,
            start_index,
        }
    }
}

/// Every equivalent closed polygon path for a vertex list: both directions and every start
/// vertex.
#[derive(Debug, Clone)]
pub struct ModifiedPolygonSet<'a> {
    pub vertexes: &'a [(f64, f64)],
    pub reverse_direction: bool,
    pub cycle_start_index: bool,
}

impl<'a> ModifiedPolygonSet<'a> {
    pub fn new(vertexes: &'a [(f64, f64)], reverse_direction: bool, cycle_start_index: bool) -> Self {
        Self {
            vertexes,
            reverse_direction,
            cycle_start_index,
        }
    }

    pub fn accept_closure<F>(&self, visitor: &mut F)
    where
        F: FnMut(Path<f64>, ModifiedPathState),
    {
        let starts = if self.cycle_start_index {
            self.vertexes.len()
        } else {
            1
        };
        for i in 0..starts {
            let path = polygon_from_vertexes(self.vertexes, i);
            if self.reverse_direction {
                visitor(reverse_path(&path), ModifiedPathState::new(true, i));
            }
            visitor(path, ModifiedPathState::new(false, i));
        }
    }
}
