//! Scanline sweep that classifies curve spans and links the kept spans into closed contours.
use super::{
    chain::{ChainArena, CurveLink},
    edge::{Edge, EdgeList},
    operator::{Classifier, EdgeTag, Operand, Operator},
};
use crate::{
    core::traits::Real,
    curve::{orderof, CurveList},
};
use log::{debug, trace, warn};
use std::cmp::Ordering;

/// Combine (or, for a winding [Operator], normalize) curve lists into a validated curve list.
///
/// The result holds non overlapping closed contours, each a [Curve::Point](crate::curve::Curve)
/// followed by its curves in drawing order, with interior on the right of every enter curve.
pub(crate) fn calculate<T>(op: Operator, left: &CurveList<T>, right: &CurveList<T>) -> CurveList<T>
where
    T: Real,
{
    let mut edges = EdgeList::with_capacity(left.len() + right.len());
    add_edges(&mut edges, left, Operand::Left);
    add_edges(&mut edges, right, Operand::Right);
    let edge_count = edges.len();
    let result = prune_edges(op, edges);
    debug!(
        "{:?}: swept {} edges into {} curves",
        op,
        edge_count,
        result.len()
    );
    result
}

fn add_edges<T>(edges: &mut EdgeList<T>, curves: &CurveList<T>, operand: Operand)
where
    T: Real,
{
    for c in curves.iter().filter(|c| c.order() > 0) {
        edges.push(Edge::new(*c, operand));
    }
}

#[inline]
fn obstructs<T>(v1: T, v2: T, phase: usize) -> bool
where
    T: Real,
{
    if phase % 2 == 0 {
        v1 <= v2
    } else {
        v1 < v2
    }
}

/// Mutable state threaded through the rows of one sweep.
struct SweepState<T> {
    arena: ChainArena<T>,
    /// Heads of finished contours.
    subcurves: Vec<usize>,
    /// Open chain ends ordered left to right along the sweep line.
    chains: Vec<usize>,
}

impl<T> SweepState<T>
where
    T: Real,
{
    fn new() -> Self {
        Self {
            arena: ChainArena::new(),
            subcurves: Vec::new(),
            chains: Vec::new(),
        }
    }

    /// Join the new links of a row (ordered by x) onto the open chain ends.
    fn resolve_links(&mut self, links: &[usize]) {
        assert!(links.len() % 2 == 0, "odd number of new curves");
        assert!(self.chains.len() % 2 == 0, "odd number of chains");

        let ends = std::mem::take(&mut self.chains);
        let end_at = |i: usize| ends.get(i).copied();
        let link_at = |i: usize| links.get(i).copied();

        let mut cur_chain = 0;
        let mut cur_link = 0;
        let mut chain = end_at(0);
        let mut next_chain = end_at(1);
        let mut link = link_at(0);
        let mut next_link = link_at(1);

        while chain.is_some() || link.is_some() {
            let mut connect_chains = link.is_none();
            let mut connect_links = chain.is_none();
            if let (Some(c), Some(l)) = (chain, link) {
                let arena = &self.arena;
                // adjacent pairs meeting at the same x close off (chains) or open up (links)
                connect_chains = cur_chain % 2 == 0
                    && next_chain.is_some_and(|n| arena.end_x(c) == arena.end_x(n));
                connect_links = cur_link % 2 == 0
                    && next_link.is_some_and(|n| arena.link(l).x_top() == arena.link(n).x_top());
                if !connect_chains && !connect_links {
                    let cx = arena.end_x(c);
                    let lx = arena.link(l).x_top();
                    connect_chains = cx < lx
                        && next_chain.is_some_and(|n| obstructs(arena.end_x(n), lx, cur_chain));
                    connect_links = lx < cx
                        && next_link
                            .is_some_and(|n| obstructs(arena.link(n).x_top(), cx, cur_link));
                }
            }

            if connect_chains {
                let (Some(c), Some(n)) = (chain, next_chain) else {
                    panic!("unpaired chain end at sweep line");
                };
                if let Some(head) = self.arena.link_ends(c, n) {
                    self.subcurves.push(head);
                }
                cur_chain += 2;
                chain = end_at(cur_chain);
                next_chain = end_at(cur_chain + 1);
            }

            if connect_links {
                let (Some(l), Some(n)) = (link, next_link) else {
                    panic!("unpaired curve link at sweep line");
                };
                let (open, close) = self.arena.open_chain(l, n);
                self.chains.push(open);
                self.chains.push(close);
                cur_link += 2;
                link = link_at(cur_link);
                next_link = link_at(cur_link + 1);
            }

            if !connect_chains && !connect_links {
                let (Some(c), Some(l)) = (chain, link) else {
                    panic!("chain and link out of step at sweep line");
                };
                self.arena.extend_end(c, l);
                self.chains.push(c);
                cur_chain += 1;
                chain = next_chain;
                next_chain = end_at(cur_chain + 1);
                cur_link += 1;
                link = next_link;
                next_link = link_at(cur_link + 1);
            }
        }

        if self.chains.len() % 2 != 0 {
            warn!("odd number of chains after resolving links");
        }
    }

    /// Close off every open chain, pairing ends left to right.
    fn finalize_sub_curves(&mut self) {
        if self.chains.is_empty() {
            return;
        }
        assert!(self.chains.len() % 2 == 0, "odd number of chains");
        for pair in self.chains.chunks_exact(2) {
            if let Some(head) = self.arena.link_ends(pair[0], pair[1]) {
                self.subcurves.push(head);
            }
        }
        self.chains.clear();
    }

    /// Emit the finished contours, merging consecutive spans of the same edge.
    fn into_curves(self) -> CurveList<T> {
        let arena = self.arena;
        let mut result = CurveList::with_capacity(self.subcurves.len() * 4);
        for &head in &self.subcurves {
            let mut link: CurveLink<T> = arena.link(head).clone();
            result.push(link.move_to());
            let mut next = arena.next_link(head);
            while let Some(n) = next {
                let next_link = arena.link(n);
                if !link.absorb(next_link) {
                    result.push(link.sub_curve());
                    link = next_link.clone();
                }
                next = arena.next_link(n);
            }
            result.push(link.sub_curve());
        }
        result
    }
}

fn prune_edges<T>(op: Operator, mut edges: EdgeList<T>) -> CurveList<T>
where
    T: Real,
{
    let edge_count = edges.len();
    if edge_count < 2 {
        return CurveList::new();
    }

    // edge indices, active edges are order[left..right]
    let mut order: Vec<usize> = (0..edge_count).collect();
    order.sort_by(|&a, &b| {
        let (ca, cb) = (&edges.get(a).curve, &edges.get(b).curve);
        orderof(ca.y_top(), cb.y_top()).then_with(|| orderof(ca.x_top(), cb.x_top()))
    });

    let mut state = SweepState::new();
    let mut classifier = Classifier::new(op);
    let mut links = Vec::new();
    let mut yrange = [T::zero(); 2];
    let mut left = 0;
    let mut right = 0;

    while left < edge_count {
        let mut y = yrange[0];

        // drop edges ending at or above the sweep line, keeping the rest packed against right
        let mut next = right;
        for cur in (left..right).rev() {
            let e = order[cur];
            if edges.get(e).curve.y_bot() > y {
                next -= 1;
                order[next] = e;
            }
        }
        left = next;

        if left >= right {
            if right >= edge_count {
                break;
            }
            y = edges.get(order[right]).curve.y_top();
            if y > yrange[0] {
                state.finalize_sub_curves();
            }
            yrange[0] = y;
        }

        while right < edge_count && edges.get(order[right]).curve.y_top() <= y {
            right += 1;
        }

        yrange[1] = edges.get(order[left]).curve.y_bot();
        if right < edge_count {
            let y = edges.get(order[right]).curve.y_top();
            if yrange[1] > y {
                yrange[1] = y;
            }
        }

        // insertion sort by x, narrowing yrange[1] to where the ordering holds
        let mut next_eq = 1;
        for cur in left..right {
            let e = order[cur];
            edges.get_mut(e).equivalence = 0;
            let mut next = cur;
            while next > left {
                let prev = order[next - 1];
                let ordering = edges.compare(e, prev, &mut yrange);
                assert!(
                    yrange[1] > yrange[0],
                    "backstepping to {:?} from {:?}",
                    yrange[1],
                    yrange[0]
                );
                if ordering != Ordering::Less {
                    if ordering == Ordering::Equal {
                        let mut eq = edges.get(prev).equivalence;
                        if eq == 0 {
                            eq = next_eq;
                            next_eq += 1;
                            edges.get_mut(prev).equivalence = eq;
                        }
                        edges.get_mut(e).equivalence = eq;
                    }
                    break;
                }
                order[next] = prev;
                next -= 1;
            }
            order[next] = e;
        }

        trace!(
            "row [{:?}, {:?}] with {} active edges",
            yrange[0],
            yrange[1],
            right - left
        );

        classifier.new_row();
        let (ystart, yend) = (yrange[0], yrange[1]);
        let mut cur = left;
        while cur < right {
            let mut e = order[cur];
            let eq = edges.get(e).equivalence;
            let etag = if eq != 0 {
                // coincident group: at most one member carries the net transition, prefer the
                // one already active above ystart, else the one reaching furthest down
                let was_inside = classifier.is_inside();
                let tag = if was_inside {
                    EdgeTag::Exit
                } else {
                    EdgeTag::Enter
                };
                let mut active_match = None;
                let mut longest_match = e;
                let mut furthest_y = yend;
                loop {
                    let edge = edges.get(e);
                    classifier.classify(edge.operand, edge.curve.direction());
                    if active_match.is_none() && edge.is_active_for(ystart, tag) {
                        active_match = Some(e);
                    }
                    let y = edge.curve.y_bot();
                    if y > furthest_y {
                        longest_match = e;
                        furthest_y = y;
                    }
                    cur += 1;
                    if cur >= right {
                        break;
                    }
                    e = order[cur];
                    if edges.get(e).equivalence != eq {
                        break;
                    }
                }
                if classifier.is_inside() == was_inside {
                    EdgeTag::Ignore
                } else {
                    e = active_match.unwrap_or(longest_match);
                    tag
                }
            } else {
                let edge = edges.get(e);
                cur += 1;
                classifier.classify(edge.operand, edge.curve.direction())
            };

            if etag != EdgeTag::Ignore {
                edges.get_mut(e).record(yend, etag);
                let link = CurveLink::new(e, edges.get(e).curve, ystart, yend, etag);
                links.push(state.arena.add_link(link));
            }
        }

        if classifier.is_inside() {
            warn!("still inside at end of active edge row at y = {:?}", ystart);
        }

        state.resolve_links(&links);
        links.clear();
        yrange[0] = yend;
    }

    state.finalize_sub_curves();
    state.into_curves()
}
