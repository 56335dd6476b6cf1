use super::{
    body_iter::BodyCommands,
    operator::{BooleanOp, Operator},
    segment::{build_segment_index, BezierSegment, Segments},
    sweep,
};
use crate::{
    core::{
        math::{aabb_contains_point_half_open, Transform, Vector2},
        traits::{ControlFlow, FuzzyEq, Real},
    },
    curve::{Curve, CurveList},
    path::{Path, PathCmd, PathError, PathSource, WindingRule},
};
use log::debug;
use static_aabb2d_index::{StaticAABB2DIndex, AABB};
use std::{
    cell::OnceCell,
    hash::{Hash, Hasher},
    ops::Deref,
};

#[derive(Debug, Clone)]
enum Validation<T> {
    Validated,
    Pending {
        rule: WindingRule,
        validated: OnceCell<CurveList<T>>,
    },
}

/// Area bounded by y-monotonic curves.
///
/// A body built from a path is pending validation: it holds the raw path curves (which may
/// self intersect or overlap) along with the winding rule of the path. Validating resolves the
/// curves into non overlapping closed contours, the result is computed once and cached. Boolean
/// operations validate their operands and return validated bodies.
///
/// The validation cache makes `Body` `Send` but not `Sync`.
#[derive(Debug, Clone)]
pub struct Body<T = f64> {
    curves: CurveList<T>,
    validation: Validation<T>,
}

/// Borrowed view of the validated curves of a [Body].
///
/// Only validated curves can be combined by [BooleanOp::apply], [Body::validate] is how one is
/// obtained.
#[derive(Debug, Clone, Copy)]
pub struct ValidBody<'a, T = f64> {
    curves: &'a CurveList<T>,
}

impl<'a, T> ValidBody<'a, T>
where
    T: Real,
{
    #[inline]
    pub fn curves(&self) -> &'a CurveList<T> {
        self.curves
    }

    /// Owned validated body with these curves.
    pub fn to_body(&self) -> Body<T> {
        Body::from_validated(self.curves.clone())
    }

    /// Contour start points, one per closed contour.
    pub fn contour_starts(&self) -> impl Iterator<Item = Vector2<T>> + 'a {
        self.curves.iter().filter_map(|c| match c {
            Curve::Point(p) => Some(*p),
            _ => None,
        })
    }
}

impl<'a, T> Deref for ValidBody<'a, T> {
    type Target = CurveList<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.curves
    }
}

impl<T> Default for Body<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Body<T>
where
    T: Real,
{
    /// Validated body with no curves.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            curves: CurveList::new(),
            validation: Validation::Validated,
        }
    }

    /// Ingest the commands of `source` into a body pending validation under the source winding
    /// rule.
    ///
    /// # Errors
    ///
    /// [PathError::NonFiniteCoordinate] if a command has a NaN or infinite coordinate and
    /// [PathError::MissingMoveTo] if a drawing command comes before the first move.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bezier_area::area::*;
    /// # use bezier_area::path::*;
    /// let mut path = Path::new(WindingRule::EvenOdd);
    /// path.move_to(0.0, 0.0).line_to(4.0, 0.0).line_to(0.0, 3.0).close();
    /// let body = Body::from_source(&path).unwrap();
    /// assert!(!body.is_validated());
    /// assert_eq!(body.winding_rule(), Some(WindingRule::EvenOdd));
    ///
    /// let mut bad = Path::new(WindingRule::NonZero);
    /// bad.line_to(1.0, 1.0);
    /// assert_eq!(Body::from_source(&bad).unwrap_err(), PathError::MissingMoveTo { index: 0 });
    /// ```
    pub fn from_source<S>(source: &S) -> Result<Self, PathError>
    where
        S: PathSource<Num = T> + ?Sized,
    {
        let rule = source.winding_rule();
        let curves = CurveList::from_commands(source.iter_commands())?;
        debug!("ingested {} curves under {:?}", curves.len(), rule);
        Ok(Self {
            curves,
            validation: Validation::Pending {
                rule,
                validated: OnceCell::new(),
            },
        })
    }

    pub(crate) fn from_validated(curves: CurveList<T>) -> Self {
        Self {
            curves,
            validation: Validation::Validated,
        }
    }

    /// `true` if the curves are already non overlapping closed contours.
    #[inline]
    pub fn is_validated(&self) -> bool {
        matches!(self.validation, Validation::Validated)
    }

    /// Winding rule the body will be validated with, `None` once validated.
    #[inline]
    pub fn winding_rule(&self) -> Option<WindingRule> {
        match &self.validation {
            Validation::Validated => None,
            Validation::Pending { rule, .. } => Some(*rule),
        }
    }

    /// Validated view of the body, computed on first use and cached.
    pub fn validate(&self) -> ValidBody<'_, T> {
        let curves = match &self.validation {
            Validation::Validated => &self.curves,
            Validation::Pending { rule, validated } => validated.get_or_init(|| {
                debug!("validating {} curves under {:?}", self.curves.len(), rule);
                sweep::calculate(Operator::Winding(*rule), &self.curves, &CurveList::new())
            }),
        };
        ValidBody { curves }
    }

    /// Owned validated copy.
    pub fn to_validated(&self) -> Body<T> {
        match &self.validation {
            Validation::Validated => self.clone(),
            Validation::Pending { .. } => self.validate().to_body(),
        }
    }

    /// Number of stored curves (raw curves for a body pending validation).
    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    #[inline]
    pub fn curves(&self) -> &CurveList<T> {
        &self.curves
    }

    #[inline]
    pub fn bounds(&self) -> Option<AABB<T>> {
        self.curves.bounds()
    }

    /// Smallest box with whole number coordinates containing [Body::bounds].
    pub fn integer_bounds(&self) -> Option<AABB<T>> {
        self.bounds().map(|b| {
            AABB::new(
                num_traits::real::Real::floor(b.min_x),
                num_traits::real::Real::floor(b.min_y),
                num_traits::real::Real::ceil(b.max_x),
                num_traits::real::Real::ceil(b.max_y),
            )
        })
    }

    /// `true` if `point` is inside the area.
    ///
    /// Points on the left or top boundary are inside, points on the right or bottom boundary
    /// are outside. A body pending validation is tested against its raw curves with its own
    /// winding rule.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bezier_area::area::*;
    /// # use bezier_area::core::math::*;
    /// # use bezier_area::path::*;
    /// let mut path = Path::new(WindingRule::EvenOdd);
    /// path.extend(Path::<f64>::rect(0.0, 0.0, 10.0, 10.0).iter().copied());
    /// path.extend(Path::<f64>::rect(2.0, 2.0, 6.0, 6.0).iter().copied());
    /// let ring = Body::from_source(&path).unwrap();
    /// assert!(ring.contains_point(vec2(1.0, 1.0)));
    /// assert!(!ring.contains_point(vec2(5.0, 5.0)));
    ///
    /// path.set_winding_rule(WindingRule::NonZero);
    /// let filled = Body::from_source(&path).unwrap();
    /// assert!(filled.contains_point(vec2(5.0, 5.0)));
    /// ```
    pub fn contains_point(&self, point: Vector2<T>) -> bool {
        let Some(bounds) = self.bounds() else {
            return false;
        };
        if !aabb_contains_point_half_open(&bounds, point.x, point.y) {
            return false;
        }

        match &self.validation {
            Validation::Pending {
                rule: WindingRule::NonZero,
                ..
            } => {
                let winding: i32 = self.curves.iter().map(|c| c.winding_for(point)).sum();
                winding != 0
            }
            _ => {
                let crossings: i32 = self.curves.iter().map(|c| c.crossings_for(point)).sum();
                crossings & 1 == 1
            }
        }
    }

    /// `true` if the rectangle lies strictly inside the area (touching the boundary does not
    /// count).
    pub fn contains_rect(&self, x: T, y: T, width: T, height: T) -> bool {
        self.contains_path(&Path::rect(x, y, width, height))
    }

    /// `true` if the rectangle and the area share any point.
    pub fn intersects_rect(&self, x: T, y: T, width: T, height: T) -> bool {
        self.intersects_path(&Path::rect(x, y, width, height))
    }

    /// `true` if the area enclosed by `source` lies strictly inside this area.
    pub fn contains_path<S>(&self, source: &S) -> bool
    where
        S: PathSource<Num = T> + ?Sized,
    {
        matches!(
            self.relationship(source, None),
            Ok(super::Relationship::RhsInsideLhs)
        )
    }

    /// `true` if the area enclosed by `source` and this area touch or overlap.
    pub fn intersects_path<S>(&self, source: &S) -> bool
    where
        S: PathSource<Num = T> + ?Sized,
    {
        !matches!(
            self.relationship(source, None),
            Ok(super::Relationship::Disjoint) | Err(_)
        )
    }

    /// `true` if the validated body has only straight edges.
    pub fn is_polygonal(&self) -> bool {
        self.validate().iter().all(|c| c.order() <= 1)
    }

    /// `true` if the validated body is a single axis aligned rectangle.
    pub fn is_rectangular(&self) -> bool {
        let valid = self.validate();
        let [Curve::Point(_), Curve::Line(a), Curve::Line(b)] = valid.as_slice() else {
            return false;
        };
        let (a_top, a_bot, b_top, b_bot) = (a.top(), a.bot(), b.top(), b.bot());
        a_top.x == a_bot.x && b_top.x == b_bot.x && a_top.y == b_top.y && a_bot.y == b_bot.y
    }

    /// `true` if the validated body has at most one contour.
    pub fn is_singular(&self) -> bool {
        self.validate().contour_starts().nth(1).is_none()
    }

    /// Combine with `rhs` using `op`.
    ///
    /// An empty operand short circuits to a copy of the appropriate side without validating.
    pub fn boolean(&self, rhs: &Body<T>, op: BooleanOp) -> Body<T> {
        match (op, self.is_empty(), rhs.is_empty()) {
            (BooleanOp::Add | BooleanOp::Xor, true, _) => rhs.clone(),
            (BooleanOp::Add | BooleanOp::Xor, _, true) => self.clone(),
            (BooleanOp::Subtract, true, _) | (BooleanOp::Subtract, _, true) => self.clone(),
            (BooleanOp::Intersect, true, _) => self.clone(),
            (BooleanOp::Intersect, _, true) => rhs.clone(),
            _ => op.apply(self.validate(), rhs.validate()),
        }
    }

    /// Union: area covered by either body.
    #[inline]
    pub fn add(&self, rhs: &Body<T>) -> Body<T> {
        self.boolean(rhs, BooleanOp::Add)
    }

    /// Difference: area of `self` not covered by `rhs`.
    #[inline]
    pub fn subtract(&self, rhs: &Body<T>) -> Body<T> {
        self.boolean(rhs, BooleanOp::Subtract)
    }

    /// Intersection: area covered by both bodies.
    #[inline]
    pub fn intersect(&self, rhs: &Body<T>) -> Body<T> {
        self.boolean(rhs, BooleanOp::Intersect)
    }

    /// Exclusive or: area covered by exactly one body.
    #[inline]
    pub fn xor(&self, rhs: &Body<T>) -> Body<T> {
        self.boolean(rhs, BooleanOp::Xor)
    }

    /// Concatenate the validated curves of two bodies without a sweep.
    ///
    /// Only correct when the bodies do not overlap, overlapping input gives a body whose
    /// contours cross.
    pub fn merge(&self, rhs: &Body<T>) -> Body<T> {
        if self.is_empty() {
            return rhs.clone();
        }
        if rhs.is_empty() {
            return self.clone();
        }
        Self::merge_all([self, rhs])
    }

    /// Concatenate the validated curves of many non overlapping bodies (see [Body::merge]).
    pub fn merge_all<'b, I>(bodies: I) -> Body<T>
    where
        I: IntoIterator<Item = &'b Body<T>>,
        T: 'b,
    {
        let mut curves = CurveList::new();
        for body in bodies {
            curves.extend_from(body.validate().curves());
        }
        Self::from_validated(curves)
    }

    /// Body mapped through `transform`.
    ///
    /// # Panics
    ///
    /// Panics if the transform is not finite or maps a coordinate to infinity, use
    /// [Body::try_transform] to handle that case.
    pub fn transform(&self, transform: &Transform<T>) -> Body<T> {
        match self.try_transform(transform) {
            Ok(body) => body,
            Err(e) => panic!("failed to transform body: {e}"),
        }
    }

    /// Body mapped through `transform`.
    ///
    /// Scales and translations map each curve directly and keep the validation state. Any
    /// rotation or shear (or a curve collapsing to horizontal) exports the validated outline,
    /// transforms it and validates it again.
    ///
    /// # Errors
    ///
    /// [PathError::NonFiniteTransform] for a transform with NaN or infinite entries and
    /// [PathError::NonFiniteCoordinate] if a coordinate overflows.
    pub fn try_transform(&self, transform: &Transform<T>) -> Result<Body<T>, PathError> {
        if !transform.is_finite() {
            return Err(PathError::NonFiniteTransform);
        }
        if transform.is_identity() {
            return Ok(self.clone());
        }

        if transform.is_axis_aligned_eps(T::from(1e-7).unwrap()) {
            let scale = Transform::new(
                transform.m00,
                T::zero(),
                T::zero(),
                transform.m11,
                transform.m02,
                transform.m12,
            );
            if let Some(body) = self.transform_scaled(&scale) {
                return Ok(body);
            }
            debug!("scaled transform degenerated a curve, rebuilding from outline");
        }

        let path = self.to_path_transformed(transform);
        let body = Body::from_source(&path)?;
        Ok(body.to_validated())
    }

    fn transform_scaled(&self, transform: &Transform<T>) -> Option<Body<T>> {
        let mut curves = CurveList::with_capacity(self.curves.len());
        for c in self.curves.iter() {
            curves.push(c.transform_scaled(transform)?);
        }
        if let Some(b) = curves.bounds() {
            if ![b.min_x, b.min_y, b.max_x, b.max_y].iter().all(|v| v.is_finite()) {
                return None;
            }
        }
        let validation = match &self.validation {
            Validation::Validated => Validation::Validated,
            Validation::Pending { rule, .. } => Validation::Pending {
                rule: *rule,
                validated: OnceCell::new(),
            },
        };
        Some(Body { curves, validation })
    }

    /// Path commands tracing the validated outline.
    #[inline]
    pub fn iter_commands(&self) -> BodyCommands<'_, T> {
        BodyCommands::new(self.validate().curves().as_slice(), None)
    }

    /// Path commands tracing the validated outline mapped through `transform`.
    #[inline]
    pub fn iter_commands_transformed(&self, transform: &Transform<T>) -> BodyCommands<'_, T> {
        BodyCommands::new(self.validate().curves().as_slice(), Some(*transform))
    }

    /// Validated outline as an owned [Path] using the nonzero winding rule.
    pub fn to_path(&self) -> Path<T> {
        let mut path = Path::with_capacity(self.validate().len() + 1, WindingRule::NonZero);
        path.extend(self.iter_commands());
        path
    }

    pub fn to_path_transformed(&self, transform: &Transform<T>) -> Path<T> {
        let mut path = Path::with_capacity(self.validate().len() + 1, WindingRule::NonZero);
        path.extend(self.iter_commands_transformed(transform));
        path
    }

    /// Segments of the validated outline in export order (implied closing lines included).
    pub fn boundary_segments(&self) -> Segments<BodyCommands<'_, T>, T> {
        Segments::new(self.iter_commands())
    }

    /// Visit the segments of [Body::boundary_segments] until `visitor` breaks.
    pub fn visit_boundary_segments<C, V>(&self, visitor: &mut V) -> C
    where
        C: ControlFlow,
        V: FnMut(BezierSegment<T>) -> C,
    {
        for seg in self.boundary_segments() {
            try_cf!(visitor(seg));
        }
        C::continuing()
    }

    /// Spatial index over [Body::boundary_segments], item `i` is the `i`th segment.
    ///
    /// Can be reused across relationship queries through
    /// [RelationshipOptions::lhs_aabb_index](super::RelationshipOptions::lhs_aabb_index).
    pub fn create_aabb_index(&self) -> StaticAABB2DIndex<T> {
        let segments: Vec<_> = self.boundary_segments().collect();
        build_segment_index(&segments)
    }
}

impl<T> PathSource for Body<T>
where
    T: Real,
{
    type Num = T;

    #[inline]
    fn winding_rule(&self) -> WindingRule {
        WindingRule::NonZero
    }

    #[inline]
    fn iter_commands(&self) -> impl Iterator<Item = PathCmd<T>> + '_ {
        Body::iter_commands(self)
    }
}

impl<T> PartialEq for Body<T>
where
    T: Real,
{
    /// Geometric equality: bounds equal within fuzzy epsilon and an empty exclusive or.
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        let (lhs, rhs) = (self.validate(), other.validate());
        match (lhs.bounds(), rhs.bounds()) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a.min_x.fuzzy_eq(b.min_x)
                    && a.min_y.fuzzy_eq(b.min_y)
                    && a.max_x.fuzzy_eq(b.max_x)
                    && a.max_y.fuzzy_eq(b.max_y)
                    && sweep::calculate(
                        Operator::Boolean(BooleanOp::Xor),
                        lhs.curves(),
                        rhs.curves(),
                    )
                    .is_empty()
            }
            _ => false,
        }
    }
}

impl<T> Hash for Body<T>
where
    T: Real,
{
    /// Wrapping sum of the rounded validated bounds (position and size).
    fn hash<H: Hasher>(&self, state: &mut H) {
        let k: i64 = self.validate().bounds().map_or(0, |b| {
            [b.min_x, b.min_y, b.max_x - b.min_x, b.max_y - b.min_y]
                .into_iter()
                .map(|v| num_traits::ToPrimitive::to_i64(&num_traits::real::Real::round(v)))
                .fold(0_i64, |acc, v| acc.wrapping_add(v.unwrap_or(0)))
        });
        k.hash(state);
    }
}
