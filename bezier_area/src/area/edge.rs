use super::operator::{EdgeTag, Operand};
use crate::{core::traits::Real, curve::Curve};
use std::cmp::Ordering;

/// Last comparison an edge made, reusable until the sweep passes `limit`.
#[derive(Debug, Copy, Clone)]
struct CompareMemo<T> {
    other: usize,
    limit: T,
    result: Ordering,
}

/// Curve wrapped with the state one sweep tracks for it.
#[derive(Debug, Clone)]
pub(crate) struct Edge<T> {
    pub(crate) curve: Curve<T>,
    pub(crate) operand: Operand,
    etag: EdgeTag,
    active_y: T,
    /// Group id shared by edges found coincident on the current row, `0` for none.
    pub(crate) equivalence: usize,
    memo: Option<CompareMemo<T>>,
}

impl<T> Edge<T>
where
    T: Real,
{
    pub(crate) fn new(curve: Curve<T>, operand: Operand) -> Self {
        Self {
            active_y: curve.y_top(),
            curve,
            operand,
            etag: EdgeTag::Ignore,
            equivalence: 0,
            memo: None,
        }
    }

    /// Remember the edge produced output with `etag` down to `yend`.
    #[inline]
    pub(crate) fn record(&mut self, yend: T, etag: EdgeTag) {
        self.active_y = yend;
        self.etag = etag;
    }

    /// `true` if the edge already produced output with `etag` reaching scanline `y`.
    #[inline]
    pub(crate) fn is_active_for(&self, y: T, etag: EdgeTag) -> bool {
        self.etag == etag && self.active_y >= y
    }
}

/// Arena of the edges taking part in one sweep, addressed by index.
#[derive(Debug, Clone)]
pub(crate) struct EdgeList<T> {
    edges: Vec<Edge<T>>,
}

impl<T> EdgeList<T>
where
    T: Real,
{
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, edge: Edge<T>) {
        self.edges.push(edge);
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> &Edge<T> {
        &self.edges[index]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: usize) -> &mut Edge<T> {
        &mut self.edges[index]
    }

    /// Order edge `a` against edge `b` over `yrange` (see [Curve::compare_to]).
    ///
    /// Adjacent edges are compared again on every row, so the last result of either edge
    /// against the other is reused while the sweep stays above the y it was valid to.
    pub(crate) fn compare(&mut self, a: usize, b: usize, yrange: &mut [T; 2]) -> Ordering {
        if let Some(memo) = self.edges[a].memo {
            if memo.other == b && yrange[0] < memo.limit {
                if yrange[1] > memo.limit {
                    yrange[1] = memo.limit;
                }
                return memo.result;
            }
        }
        if let Some(memo) = self.edges[b].memo {
            if memo.other == a && yrange[0] < memo.limit {
                if yrange[1] > memo.limit {
                    yrange[1] = memo.limit;
                }
                return memo.result.reverse();
            }
        }

        let result = self.edges[a]
            .curve
            .compare_to(&self.edges[b].curve, yrange);
        self.edges[a].memo = Some(CompareMemo {
            other: b,
            limit: yrange[1],
            result,
        });
        result
    }
}
