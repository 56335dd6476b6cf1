use super::{
    segment::{build_segment_index, BezierSegment, Segments},
    Body,
};
use crate::{
    core::{
        math::{aabb_overlaps_area, Transform, Vector2},
        traits::Real,
    },
    path::{Path, PathCmd, PathError, PathSource},
};
use static_aabb2d_index::{self as aabb_index, StaticAABB2DIndex};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coarse spatial relationship between a body (left hand side) and another shape (right hand
/// side).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Relationship {
    /// No shared point.
    Disjoint,
    /// Right hand side lies entirely inside the left hand side.
    RhsInsideLhs,
    /// Left hand side lies entirely inside the right hand side.
    LhsInsideRhs,
    /// Boundaries touch or cross, or containment is mixed.
    Complex,
}

/// Options for [Body::relationship_opt].
#[derive(Debug, Clone)]
pub struct RelationshipOptions<'a, T>
where
    T: Real,
{
    /// Spatial index of the left hand side boundary segments as built by
    /// [Body::create_aabb_index]. If `None` is given then it will be computed internally.
    pub lhs_aabb_index: Option<&'a StaticAABB2DIndex<T>>,
    /// Distance within which a curve counts as flat while subdividing for intersection tests,
    /// also the tolerance for segments touching.
    pub flatness_eps: T,
}

impl<'a, T> RelationshipOptions<'a, T>
where
    T: Real,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            lhs_aabb_index: None,
            flatness_eps: T::from(1e-5).unwrap(),
        }
    }
}

impl<'a, T> Default for RelationshipOptions<'a, T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Agreement of a set of containment tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Containment {
    Unknown,
    All,
    None,
    Mixed,
}

fn containment<T, I, F>(points: I, mut contains: F) -> Containment
where
    T: Real,
    I: IntoIterator<Item = Vector2<T>>,
    F: FnMut(Vector2<T>) -> bool,
{
    let mut result = Containment::Unknown;
    for p in points {
        let next = if contains(p) {
            Containment::All
        } else {
            Containment::None
        };
        if result == Containment::Unknown {
            result = next;
        } else if result != next {
            return Containment::Mixed;
        }
    }
    result
}

impl<T> Body<T>
where
    T: Real,
{
    /// Relationship of this body to the area enclosed by `rhs` (mapped through `rhs_transform`
    /// if given).
    ///
    /// # Errors
    ///
    /// Returns the ingestion error if `rhs` has non finite coordinates or draws before moving.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bezier_area::area::*;
    /// # use bezier_area::core::math::*;
    /// # use bezier_area::path::*;
    /// let big = Body::from_source(&Path::rect(0.0, 0.0, 10.0, 10.0)).unwrap();
    /// let small = Path::rect(2.0, 2.0, 2.0, 2.0);
    /// assert_eq!(big.relationship(&small, None), Ok(Relationship::RhsInsideLhs));
    ///
    /// let shifted = Transform::translate(20.0, 0.0);
    /// assert_eq!(big.relationship(&small, Some(&shifted)), Ok(Relationship::Disjoint));
    /// ```
    pub fn relationship<S>(
        &self,
        rhs: &S,
        rhs_transform: Option<&Transform<T>>,
    ) -> Result<Relationship, PathError>
    where
        S: PathSource<Num = T> + ?Sized,
    {
        self.relationship_opt(rhs, rhs_transform, &RelationshipOptions::new())
    }

    /// Same as [Body::relationship] but with options given.
    pub fn relationship_opt<S>(
        &self,
        rhs: &S,
        rhs_transform: Option<&Transform<T>>,
        options: &RelationshipOptions<T>,
    ) -> Result<Relationship, PathError>
    where
        S: PathSource<Num = T> + ?Sized,
    {
        let mut rhs_path = Path::new(rhs.winding_rule());
        match rhs_transform {
            Some(t) => rhs_path.extend(rhs.iter_commands().map(|c| c.transformed(t))),
            None => rhs_path.extend(rhs.iter_commands()),
        }
        let rhs_body = Body::from_source(&rhs_path)?;

        let lhs = self.validate();
        let (Some(lhs_bounds), Some(rhs_bounds)) = (lhs.bounds(), rhs_body.bounds()) else {
            return Ok(Relationship::Disjoint);
        };
        if !aabb_overlaps_area(&lhs_bounds, &rhs_bounds) {
            return Ok(Relationship::Disjoint);
        }

        let eps = options.flatness_eps;
        let lhs_segments: Vec<BezierSegment<T>> = self.boundary_segments().collect();
        let constructed_index;
        let index = if let Some(x) = options.lhs_aabb_index {
            x
        } else {
            constructed_index = build_segment_index(&lhs_segments);
            &constructed_index
        };

        let mut query_stack = Vec::with_capacity(8);
        for seg in Segments::new(rhs_path.iter_commands()) {
            let bb = seg.bounds();
            let mut touched = false;
            let mut query_visitor = |i: usize| {
                if lhs_segments[i].intersects(&seg, eps) {
                    touched = true;
                    return aabb_index::Control::Break(());
                }
                aabb_index::Control::Continue
            };
            index.visit_query_with_stack(
                bb.min_x - eps,
                bb.min_y - eps,
                bb.max_x + eps,
                bb.max_y + eps,
                &mut query_visitor,
                &mut query_stack,
            );
            if touched {
                return Ok(Relationship::Complex);
            }
        }

        match containment(drawn_contour_starts(rhs_path.iter()), |p| self.contains_point(p)) {
            Containment::All => return Ok(Relationship::RhsInsideLhs),
            Containment::Mixed => return Ok(Relationship::Complex),
            Containment::None | Containment::Unknown => {}
        }

        Ok(
            match containment(lhs.contour_starts(), |p| rhs_body.contains_point(p)) {
                Containment::All => Relationship::LhsInsideRhs,
                Containment::None | Containment::Unknown => Relationship::Disjoint,
                Containment::Mixed => Relationship::Complex,
            },
        )
    }

    /// Relationship after mapping this body through `lhs_transform` and `rhs` through
    /// `rhs_transform`.
    pub fn relationship_transformed<S>(
        &self,
        lhs_transform: &Transform<T>,
        rhs: &S,
        rhs_transform: Option<&Transform<T>>,
    ) -> Result<Relationship, PathError>
    where
        S: PathSource<Num = T> + ?Sized,
    {
        self.try_transform(lhs_transform)?
            .relationship(rhs, rhs_transform)
    }
}

/// Start points of the contours in `commands` that draw at least one segment.
fn drawn_contour_starts<'a, T, I>(commands: I) -> Vec<Vector2<T>>
where
    T: Real,
    I: IntoIterator<Item = &'a PathCmd<T>>,
{
    let mut starts = Vec::new();
    let mut pending = None;
    for cmd in commands {
        match cmd {
            PathCmd::MoveTo(p) => pending = Some(*p),
            PathCmd::Close => {}
            PathCmd::LineTo(_) | PathCmd::QuadTo { .. } | PathCmd::CubicTo { .. } => {
                if let Some(p) = pending.take() {
                    starts.push(p);
                }
            }
        }
    }
    starts
}
