use bezier_area::{
    area::Body,
    core::{
        math::{vec2, Vector2},
        traits::FuzzyEq,
    },
    path::{Path, PathCmd, WindingRule},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use static_aabb2d_index::AABB;

/// Fuzzy compare AABB values
pub fn aabb_fuzzy_eq_eps(a: &AABB<f64>, b: &AABB<f64>, eps: f64) -> bool {
    a.min_x.fuzzy_eq_eps(b.min_x, eps)
        && a.min_y.fuzzy_eq_eps(b.min_y, eps)
        && a.max_x.fuzzy_eq_eps(b.max_x, eps)
        && a.max_y.fuzzy_eq_eps(b.max_y, eps)
}

/// Enclosed area of a body computed from its exported outline.
///
/// Each segment contributes `(x * dy - y * dx) / 2` integrated over its parameter, three point
/// Gauss-Legendre is exact for the (at most fifth degree) cubic integrand.
pub fn body_area(body: &Body<f64>) -> f64 {
    const NODES: [(f64, f64); 3] = [
        (0.112_701_665_379_258_3, 5.0 / 18.0),
        (0.5, 8.0 / 18.0),
        (0.887_298_334_620_741_7, 5.0 / 18.0),
    ];

    // integrate p(t) x p'(t) for a bezier given by its control points
    fn integrate(pts: &[Vector2<f64>]) -> f64 {
        let n = pts.len() - 1;
        let eval = |t: f64| -> (Vector2<f64>, Vector2<f64>) {
            let mut work = pts.to_vec();
            let mut deriv = vec2(0.0, 0.0);
            for level in (1..=n).rev() {
                if level == 1 {
                    deriv = vec2(
                        (work[1].x - work[0].x) * n as f64,
                        (work[1].y - work[0].y) * n as f64,
                    );
                }
                for i in 0..level {
                    work[i] = vec2(
                        work[i].x + (work[i + 1].x - work[i].x) * t,
                        work[i].y + (work[i + 1].y - work[i].y) * t,
                    );
                }
            }
            (work[0], deriv)
        };
        NODES
            .iter()
            .map(|&(t, w)| {
                let (p, d) = eval(t);
                w * (p.x * d.y - p.y * d.x)
            })
            .sum::<f64>()
            * 0.5
    }

    let mut total = 0.0;
    let mut start = vec2(0.0, 0.0);
    let mut cur = vec2(0.0, 0.0);
    for cmd in body.iter_commands() {
        match cmd {
            PathCmd::MoveTo(p) => {
                start = p;
                cur = p;
            }
            PathCmd::LineTo(p) => {
                total += integrate(&[cur, p]);
                cur = p;
            }
            PathCmd::QuadTo { ctrl, to } => {
                total += integrate(&[cur, ctrl, to]);
                cur = to;
            }
            PathCmd::CubicTo { ctrl1, ctrl2, to } => {
                total += integrate(&[cur, ctrl1, ctrl2, to]);
                cur = to;
            }
            PathCmd::Close => {
                total += integrate(&[cur, start]);
                cur = start;
            }
        }
    }

    total.abs()
}

/// Holds a set of properties of a body for comparison in tests
#[derive(Debug, Copy, Clone)]
pub struct BodyProperties {
    pub contour_count: usize,
    pub area: f64,
    pub extents: Option<AABB<f64>>,
}

impl BodyProperties {
    // property comparer epsilon
    pub const PROP_CMP_EPS: f64 = 1e-4;

    pub fn new(contour_count: usize, area: f64, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            contour_count,
            area,
            extents: Some(AABB::new(min_x, min_y, max_x, max_y)),
        }
    }

    pub fn empty() -> Self {
        Self {
            contour_count: 0,
            area: 0.0,
            extents: None,
        }
    }

    pub fn from_body(body: &Body<f64>) -> Self {
        let valid = body.validate();
        Self {
            contour_count: valid.contour_starts().count(),
            area: body_area(body),
            extents: valid.bounds(),
        }
    }

    pub fn fuzzy_eq_eps(&self, other: &Self, eps: f64) -> bool {
        if self.contour_count != other.contour_count {
            return false;
        }
        if !self.area.fuzzy_eq_eps(other.area, eps) {
            return false;
        }
        match (&self.extents, &other.extents) {
            (None, None) => true,
            (Some(a), Some(b)) => aabb_fuzzy_eq_eps(a, b, eps),
            _ => false,
        }
    }
}

pub fn properties_match(result: &BodyProperties, expected: &BodyProperties) -> bool {
    let matched = result.fuzzy_eq_eps(expected, BodyProperties::PROP_CMP_EPS);
    if !matched {
        eprintln!("result:\n{:?}", result);
        eprintln!("expected:\n{:?}", expected);
    }
    matched
}

/// Deterministic random points spread over `bounds` grown by `margin` on every side.
pub fn sample_points(bounds: &AABB<f64>, margin: f64, count: usize, seed: u64) -> Vec<Vector2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            vec2(
                rng.gen_range((bounds.min_x - margin)..(bounds.max_x + margin)),
                rng.gen_range((bounds.min_y - margin)..(bounds.max_y + margin)),
            )
        })
        .collect()
}

/// First sampled point where `predicate` disagrees with `expected`, for assertion messages.
pub fn first_mismatch<P, E>(points: &[Vector2<f64>], predicate: P, expected: E) -> Option<Vector2<f64>>
where
    P: Fn(Vector2<f64>) -> bool,
    E: Fn(Vector2<f64>) -> bool,
{
    points.iter().copied().find(|&p| predicate(p) != expected(p))
}

/// Deterministic random closed contour of `segments` cubic curves with every coordinate in
/// `range`, under the nonzero winding rule. Usually self intersecting.
pub fn random_cubic_loop(seed: u64, segments: usize, range: (f64, f64)) -> Path<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut coord = || rng.gen_range(range.0..range.1);
    let (x0, y0) = (coord(), coord());
    let mut path = Path::new(WindingRule::NonZero);
    path.move_to(x0, y0);
    for i in 0..segments {
        let (c1x, c1y, c2x, c2y) = (coord(), coord(), coord(), coord());
        let (x, y) = if i + 1 == segments {
            (x0, y0)
        } else {
            (coord(), coord())
        };
        path.cubic_to(c1x, c1y, c2x, c2y, x, y);
    }
    path.close();
    path
}
