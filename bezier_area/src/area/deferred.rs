//! Owned area that queues boolean operations and runs them in batches.
use super::{segment::build_bounds_index, BooleanOp, Body, Relationship};
use crate::{
    core::{
        math::{aabb_touches, Transform, Vector2},
        traits::Real,
    },
    path::{Path, PathError, PathSource},
};
use log::debug;
use static_aabb2d_index::AABB;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a batch of queued operations is carried out.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum BatchRules {
    /// Run every operation in queue order with a full sweep.
    Sequential,
    /// Use operand bounds to avoid sweeps where the result is known without one.
    ///
    /// Runs of consecutive unions are grouped into clusters of operands whose bounds touch,
    /// each cluster is unioned pairwise and the clusters are concatenated with
    /// [Body::merge_all]. Subtracting or intersecting an operand whose bounds do not touch the
    /// current area needs no sweep, neither does an exclusive or.
    #[default]
    Bounds,
}

#[derive(Debug, Clone)]
struct PendingOp<T> {
    op: BooleanOp,
    operand: Body<T>,
}

/// Area built up from a queue of boolean operations.
///
/// [Area::add], [Area::subtract], [Area::intersect] and [Area::xor] only record the operation.
/// The queue is run as one batch (see [BatchRules]) the next time the area is queried, or
/// explicitly with [Area::process_queue]. Queries therefore take `&mut self`.
///
/// # Examples
///
/// ```
/// # use bezier_area::area::*;
/// # use bezier_area::core::math::*;
/// # use bezier_area::path::*;
/// let tile = |x: f64, y: f64| Body::from_source(&Path::rect(x, y, 1.0, 1.0)).unwrap();
/// let mut area = Area::new();
/// for i in 0..4 {
///     area.add(tile(i as f64 * 2.0, 0.0));
/// }
/// area.subtract(tile(2.25, 0.25));
/// assert_eq!(area.pending_len(), 5);
///
/// assert!(area.contains_point(vec2(0.5, 0.5)));
/// assert!(!area.contains_point(vec2(2.5, 0.5)));
/// assert_eq!(area.pending_len(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Area<T = f64> {
    body: Body<T>,
    queue: Vec<PendingOp<T>>,
    rules: BatchRules,
}

impl<T> Default for Area<T>
where
    T: Real,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Body<T>> for Area<T>
where
    T: Real,
{
    fn from(body: Body<T>) -> Self {
        Self {
            body,
            queue: Vec::new(),
            rules: BatchRules::default(),
        }
    }
}

impl<T> Area<T>
where
    T: Real,
{
    /// Empty area with [BatchRules::Bounds].
    #[inline]
    pub fn new() -> Self {
        Self::from(Body::empty())
    }

    /// Area enclosed by `source` under its winding rule.
    pub fn from_source<S>(source: &S) -> Result<Self, PathError>
    where
        S: PathSource<Num = T> + ?Sized,
    {
        Ok(Self::from(Body::from_source(source)?))
    }

    #[inline]
    pub fn with_rules(mut self, rules: BatchRules) -> Self {
        self.rules = rules;
        self
    }

    #[inline]
    pub fn rules(&self) -> BatchRules {
        self.rules
    }

    /// Rules used for the next batch, already queued operations are kept.
    #[inline]
    pub fn set_rules(&mut self, rules: BatchRules) {
        self.rules = rules;
    }

    /// Number of operations waiting to run.
    #[inline]
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// Queue `op` with `operand` as the right hand side.
    pub fn push_op(&mut self, op: BooleanOp, operand: Body<T>) -> &mut Self {
        self.queue.push(PendingOp { op, operand });
        self
    }

    #[inline]
    pub fn add(&mut self, rhs: Body<T>) -> &mut Self {
        self.push_op(BooleanOp::Add, rhs)
    }

    #[inline]
    pub fn subtract(&mut self, rhs: Body<T>) -> &mut Self {
        self.push_op(BooleanOp::Subtract, rhs)
    }

    #[inline]
    pub fn intersect(&mut self, rhs: Body<T>) -> &mut Self {
        self.push_op(BooleanOp::Intersect, rhs)
    }

    #[inline]
    pub fn xor(&mut self, rhs: Body<T>) -> &mut Self {
        self.push_op(BooleanOp::Xor, rhs)
    }

    /// Drop the queue and the current shape.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.body = Body::empty();
    }

    /// Run every queued operation now.
    pub fn process_queue(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        let ops = std::mem::take(&mut self.queue);
        debug!(
            "processing {} queued operations with {:?} rules",
            ops.len(),
            self.rules
        );
        let body = std::mem::take(&mut self.body);
        self.body = self.rules.execute(body, ops);
    }

    /// Current shape with the queue processed.
    pub fn body(&mut self) -> &Body<T> {
        self.process_queue();
        &self.body
    }

    pub fn into_body(mut self) -> Body<T> {
        self.process_queue();
        self.body
    }

    /// `true` if the processed shape encloses no area.
    pub fn is_empty(&mut self) -> bool {
        self.body().validate().is_empty()
    }

    /// Bounds of the processed shape, `None` if empty.
    pub fn bounds(&mut self) -> Option<AABB<T>> {
        self.body().validate().bounds()
    }

    pub fn contains_point(&mut self, point: Vector2<T>) -> bool {
        self.body().contains_point(point)
    }

    /// See [Body::relationship].
    pub fn relationship<S>(
        &mut self,
        rhs: &S,
        rhs_transform: Option<&Transform<T>>,
    ) -> Result<Relationship, PathError>
    where
        S: PathSource<Num = T> + ?Sized,
    {
        self.body().relationship(rhs, rhs_transform)
    }

    /// Map the processed shape through `transform`.
    ///
    /// # Errors
    ///
    /// Same as [Body::try_transform], the area is left unchanged on error.
    pub fn try_transform(&mut self, transform: &Transform<T>) -> Result<(), PathError> {
        let transformed = self.body().try_transform(transform)?;
        self.body = transformed;
        Ok(())
    }

    /// Outline of the processed shape, see [Body::to_path].
    pub fn to_path(&mut self) -> Path<T> {
        self.body().to_path()
    }
}

impl BatchRules {
    /// Apply `ops` in order to `body`.
    fn execute<T>(self, body: Body<T>, ops: Vec<PendingOp<T>>) -> Body<T>
    where
        T: Real,
    {
        match self {
            BatchRules::Sequential => ops
                .into_iter()
                .fold(body, |acc, p| acc.boolean(&p.operand, p.op)),
            BatchRules::Bounds => {
                let mut acc = body;
                let mut ops = ops.into_iter().peekable();
                while let Some(first) = ops.next() {
                    acc = if first.op == BooleanOp::Add {
                        let mut run = vec![acc, first.operand];
                        while let Some(next) = ops.next_if(|p| p.op == BooleanOp::Add) {
                            run.push(next.operand);
                        }
                        union_by_bounds(run)
                    } else {
                        apply_by_bounds(acc, first)
                    };
                }
                acc
            }
        }
    }
}

/// Single operation, skipping the sweep when the operand bounds do not touch the area.
fn apply_by_bounds<T>(acc: Body<T>, pending: PendingOp<T>) -> Body<T>
where
    T: Real,
{
    let PendingOp { op, operand } = pending;
    let apart = match (acc.bounds(), operand.bounds()) {
        (Some(a), Some(b)) => !aabb_touches(&a, &b),
        _ => false,
    };
    if !apart {
        return acc.boolean(&operand, op);
    }
    match op {
        BooleanOp::Subtract => acc,
        BooleanOp::Intersect => Body::empty(),
        BooleanOp::Add | BooleanOp::Xor => acc.merge(&operand),
    }
}

/// Union of `bodies`: clusters of touching bounds are unioned, clusters are concatenated.
fn union_by_bounds<T>(bodies: Vec<Body<T>>) -> Body<T>
where
    T: Real,
{
    let (bodies, bounds): (Vec<Body<T>>, Vec<AABB<T>>) = bodies
        .into_iter()
        .filter_map(|b| b.bounds().map(|bb| (b, bb)))
        .unzip();
    if bodies.len() < 2 {
        return bodies.into_iter().next().unwrap_or_default();
    }

    // union find over touching bounds, every root is the smallest index of its cluster
    let index = build_bounds_index(bounds.iter().copied());
    let mut parent: Vec<usize> = (0..bodies.len()).collect();
    for (i, bb) in bounds.iter().enumerate() {
        for j in index.query(bb.min_x, bb.min_y, bb.max_x, bb.max_y) {
            let (ri, rj) = (find_root(&mut parent, i), find_root(&mut parent, j));
            if ri != rj {
                parent[ri.max(rj)] = ri.min(rj);
            }
        }
    }

    let mut clusters: BTreeMap<usize, Vec<Body<T>>> = BTreeMap::new();
    for (i, body) in bodies.into_iter().enumerate() {
        let root = find_root(&mut parent, i);
        clusters.entry(root).or_default().push(body);
    }
    debug!(
        "union of {} operands in {} bounds clusters",
        parent.len(),
        clusters.len()
    );

    let mut unions: Vec<Body<T>> = clusters.into_values().map(union_pairwise).collect();
    if unions.len() == 1 {
        return unions.pop().unwrap_or_default();
    }
    Body::merge_all(unions.iter())
}

fn find_root(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Union by rounds of neighbor pairs so operands stay similar in size.
fn union_pairwise<T>(mut bodies: Vec<Body<T>>) -> Body<T>
where
    T: Real,
{
    while bodies.len() > 1 {
        let mut next = Vec::with_capacity((bodies.len() + 1) / 2);
        let mut iter = bodies.into_iter();
        while let Some(a) = iter.next() {
            next.push(match iter.next() {
                Some(b) => a.add(&b),
                None => a,
            });
        }
        bodies = next;
    }
    bodies.pop().unwrap_or_default()
}
