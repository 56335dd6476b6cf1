use super::Vector2;
use crate::core::traits::Real;

/// Result of intersecting two line segments.
#[derive(Debug, Copy, Clone)]
pub enum LineLineIntr<T>
where
    T: Real,
{
    /// Segments do not touch.
    NoIntersect,
    /// Segments touch at a single point.
    TrueIntersect {
        /// Parametric value for intersect on first segment.
        seg1_t: T,
        /// Parametric value for intersect on second segment.
        seg2_t: T,
    },
    /// Segments are collinear and share a stretch of positive length.
    Overlapping {
        /// Parametric value for start of coincidence along second segment.
        seg2_t0: T,
        /// Parametric value for end of coincidence along second segment.
        seg2_t1: T,
    },
}

impl<T> LineLineIntr<T>
where
    T: Real,
{
    /// `true` unless the result is [LineLineIntr::NoIntersect].
    #[inline]
    pub fn touches(&self) -> bool {
        !matches!(self, LineLineIntr::NoIntersect)
    }
}

/// Intersect the segments `v1->v2` and `u1->u2`.
///
/// End points count as part of the segments, so segments meeting end to end or one segment
/// ending on the other report [LineLineIntr::TrueIntersect]. `epsilon` is a distance tolerance
/// used to decide when segments are parallel and when an intersect lies on a segment.
///
/// # Examples
///
/// ```
/// # use bezier_area::core::math::*;
/// # use bezier_area::core::traits::*;
/// let r = line_line_intr(vec2(0.0, 0.0), vec2(2.0, 2.0), vec2(0.0, 2.0), vec2(2.0, 0.0), 1e-9);
/// match r {
///     LineLineIntr::TrueIntersect { seg1_t, seg2_t } => {
///         assert!(seg1_t.fuzzy_eq(0.5));
///         assert!(seg2_t.fuzzy_eq(0.5));
///     }
///     _ => unreachable!("expected crossing diagonals"),
/// }
/// let apart = line_line_intr(vec2(0.0, 0.0), vec2(1.0, 0.0), vec2(0.0, 1.0), vec2(1.0, 1.0), 1e-9);
/// assert!(!apart.touches());
/// ```
pub fn line_line_intr<T>(
    v1: Vector2<T>,
    v2: Vector2<T>,
    u1: Vector2<T>,
    u2: Vector2<T>,
    epsilon: T,
) -> LineLineIntr<T>
where
    T: Real,
{
    use LineLineIntr::*;

    let v = v2 - v1;
    let u = u2 - u1;
    let w = v1 - u1;
    let v_len = v.length();
    let u_len = u.length();
    let denom = v.perp_dot(u);

    // compare cross products at length scale so epsilon stays a distance
    let scale = num_traits::real::Real::max(num_traits::real::Real::max(v_len, u_len), T::one());
    if denom.abs() > epsilon * scale {
        let seg1_t = u.perp_dot(w) / denom;
        let seg2_t = v.perp_dot(w) / denom;
        if (seg1_t * v_len).fuzzy_in_range_eps(T::zero(), v_len, epsilon)
            && (seg2_t * u_len).fuzzy_in_range_eps(T::zero(), u_len, epsilon)
        {
            return TrueIntersect { seg1_t, seg2_t };
        }
        return NoIntersect;
    }

    // parallel, check distance between the carrying lines
    let v_is_point = v_len <= epsilon;
    let u_is_point = u_len <= epsilon;
    if v_is_point && u_is_point {
        if w.length() <= epsilon {
            return TrueIntersect {
                seg1_t: T::zero(),
                seg2_t: T::zero(),
            };
        }
        return NoIntersect;
    }

    if u_is_point {
        return point_on_segment(u1, v1, v, v_len, epsilon)
            .map_or(NoIntersect, |seg1_t| TrueIntersect {
                seg1_t,
                seg2_t: T::zero(),
            });
    }

    if v_is_point {
        return point_on_segment(v1, u1, u, u_len, epsilon)
            .map_or(NoIntersect, |seg2_t| TrueIntersect {
                seg1_t: T::zero(),
                seg2_t,
            });
    }

    if (u.perp_dot(w) / u_len).abs() > epsilon {
        // parallel and not collinear
        return NoIntersect;
    }

    // collinear, project v end points onto u
    let u_len_sq = u_len * u_len;
    let mut seg2_t0 = (v1 - u1).dot(u) / u_len_sq;
    let mut seg2_t1 = (v2 - u1).dot(u) / u_len_sq;
    if seg2_t0 > seg2_t1 {
        std::mem::swap(&mut seg2_t0, &mut seg2_t1);
    }

    if !(seg2_t0 * u_len).fuzzy_lt_eps(u_len, epsilon)
        || !(seg2_t1 * u_len).fuzzy_gt_eps(T::zero(), epsilon)
    {
        return NoIntersect;
    }

    let seg2_t0 = num_traits::real::Real::max(seg2_t0, T::zero());
    let seg2_t1 = num_traits::real::Real::min(seg2_t1, T::one());
    if (seg2_t1 - seg2_t0) * u_len <= epsilon {
        // end to end touch
        let p = u1.lerp(u2, seg2_t0);
        let seg1_t = if (p - v1).length() <= epsilon {
            T::zero()
        } else {
            T::one()
        };
        return TrueIntersect {
            seg1_t,
            seg2_t: seg2_t0,
        };
    }

    Overlapping { seg2_t0, seg2_t1 }
}

/// Parametric position of `p` on the segment `start + t * dir` if it lies on it.
fn point_on_segment<T>(
    p: Vector2<T>,
    start: Vector2<T>,
    dir: Vector2<T>,
    len: T,
    eps: T,
) -> Option<T>
where
    T: Real,
{
    let d = p - start;
    if (dir.perp_dot(d) / len).abs() > eps {
        return None;
    }

    let t = d.dot(dir) / (len * len);
    if (t * len).fuzzy_in_range_eps(T::zero(), len, eps) {
        Some(t)
    } else {
        None
    }
}
