use super::operator::EdgeTag;
use crate::{
    core::{math::vec2, traits::Real},
    curve::Curve,
};

/// Vertical span of one edge's curve claimed by the result, linked into an output contour.
#[derive(Debug, Clone)]
pub(crate) struct CurveLink<T> {
    /// Index of the edge the curve came from, used as curve identity.
    edge: usize,
    curve: Curve<T>,
    ytop: T,
    ybot: T,
    etag: EdgeTag,
    next: Option<usize>,
}

impl<T> CurveLink<T>
where
    T: Real,
{
    pub(crate) fn new(edge: usize, curve: Curve<T>, ystart: T, yend: T, etag: EdgeTag) -> Self {
        assert!(
            ystart >= curve.y_top() && yend <= curve.y_bot(),
            "bad curve link [{:?} => {:?}] for {:?}",
            ystart,
            yend,
            curve
        );
        Self {
            edge,
            curve,
            ytop: ystart,
            ybot: yend,
            etag,
            next: None,
        }
    }

    #[inline]
    pub(crate) fn etag(&self) -> EdgeTag {
        self.etag
    }

    #[inline]
    pub(crate) fn y_top(&self) -> T {
        self.ytop
    }

    #[inline]
    pub(crate) fn x_top(&self) -> T {
        self.curve.x_for_y(self.ytop)
    }

    #[inline]
    pub(crate) fn x_bot(&self) -> T {
        self.curve.x_for_y(self.ybot)
    }

    /// Grow this span to cover `other` if it continues the same edge with the same role.
    pub(crate) fn absorb(&mut self, other: &CurveLink<T>) -> bool {
        if self.edge != other.edge
            || self.etag != other.etag
            || self.ybot < other.ytop
            || self.ytop > other.ybot
        {
            return false;
        }
        self.ytop = num_traits::real::Real::min(self.ytop, other.ytop);
        self.ybot = num_traits::real::Real::max(self.ybot, other.ybot);
        true
    }

    /// Output contour start point for a chain beginning with this link.
    #[inline]
    pub(crate) fn move_to(&self) -> Curve<T> {
        Curve::Point(vec2(self.x_top(), self.ytop))
    }

    /// Claimed span of the curve drawn in the direction its role requires.
    pub(crate) fn sub_curve(&self) -> Curve<T> {
        let direction = self.etag.direction();
        if self.ytop == self.curve.y_top() && self.ybot == self.curve.y_bot() {
            self.curve.with_direction(direction)
        } else {
            self.curve.sub_curve(self.ytop, self.ybot, direction)
        }
    }
}

/// One open end of a partially built output contour.
///
/// Chain ends come in pairs, each knowing its partner (the other end of the same contour).
#[derive(Debug, Clone)]
pub(crate) struct ChainEnd {
    head: usize,
    tail: usize,
    partner: usize,
    etag: EdgeTag,
}

/// Arena owning every [CurveLink] and [ChainEnd] of one sweep, links and ends refer to each
/// other by index.
#[derive(Debug, Clone)]
pub(crate) struct ChainArena<T> {
    links: Vec<CurveLink<T>>,
    ends: Vec<ChainEnd>,
}

impl<T> ChainArena<T>
where
    T: Real,
{
    pub(crate) fn new() -> Self {
        Self {
            links: Vec::new(),
            ends: Vec::new(),
        }
    }

    pub(crate) fn add_link(&mut self, link: CurveLink<T>) -> usize {
        self.links.push(link);
        self.links.len() - 1
    }

    #[inline]
    pub(crate) fn link(&self, index: usize) -> &CurveLink<T> {
        &self.links[index]
    }

    #[inline]
    pub(crate) fn next_link(&self, index: usize) -> Option<usize> {
        self.links[index].next
    }

    /// Open a new contour from two links, returns the (enter side, exit side) chain ends.
    pub(crate) fn open_chain(&mut self, first: usize, second: usize) -> (usize, usize) {
        let open = self.ends.len();
        let close = open + 1;
        self.ends.push(ChainEnd {
            head: first,
            tail: first,
            partner: close,
            etag: self.links[first].etag,
        });
        self.ends.push(ChainEnd {
            head: second,
            tail: second,
            partner: open,
            etag: self.links[second].etag,
        });
        (open, close)
    }

    /// X position where the chain end currently reaches the sweep line.
    pub(crate) fn end_x(&self, end: usize) -> T {
        let end = &self.ends[end];
        match end.etag {
            EdgeTag::Enter => self.links[end.tail].x_bot(),
            _ => self.links[end.head].x_bot(),
        }
    }

    /// Extend an open chain end downward with `link`.
    pub(crate) fn extend_end(&mut self, end: usize, link: usize) {
        let chain = &mut self.ends[end];
        match chain.etag {
            EdgeTag::Enter => {
                let tail = chain.tail;
                chain.tail = link;
                self.links[tail].next = Some(link);
            }
            _ => {
                self.links[link].next = Some(chain.head);
                chain.head = link;
            }
        }
    }

    /// Join two chain ends meeting at the sweep line.
    ///
    /// Returns the first link of a contour when the join closes it. Otherwise the partners of
    /// both ends are paired up and the joined links spliced into their chain.
    ///
    /// # Panics
    ///
    /// Panics if either end was already joined or both ends have the same role.
    pub(crate) fn link_ends(&mut self, this: usize, that: usize) -> Option<usize> {
        let (this_tag, that_tag) = (self.ends[this].etag, self.ends[that].etag);
        assert!(
            this_tag != EdgeTag::Ignore && that_tag != EdgeTag::Ignore,
            "chain end linked more than once"
        );
        assert!(this_tag != that_tag, "linking chains of the same type");

        let (enter, exit) = if this_tag == EdgeTag::Enter {
            (this, that)
        } else {
            (that, this)
        };
        self.ends[this].etag = EdgeTag::Ignore;
        self.ends[that].etag = EdgeTag::Ignore;

        let enter_tail = self.ends[enter].tail;
        let exit_head = self.ends[exit].head;
        self.links[enter_tail].next = Some(exit_head);
        self.ends[enter].tail = self.ends[exit].tail;

        if self.ends[this].partner == that {
            // contour closed on itself
            return Some(self.ends[enter].head);
        }

        let other_enter = self.ends[exit].partner;
        let other_exit = self.ends[enter].partner;
        self.ends[other_enter].partner = other_exit;
        self.ends[other_exit].partner = other_enter;

        let enter_head = self.ends[enter].head;
        let other_enter_head = self.ends[other_enter].head;
        if self.links[enter_head].y_top() < self.links[other_enter_head].y_top() {
            let tail = self.ends[enter].tail;
            self.links[tail].next = Some(other_enter_head);
            self.ends[other_enter].head = enter_head;
        } else {
            let other_exit_tail = self.ends[other_exit].tail;
            self.links[other_exit_tail].next = Some(enter_head);
            self.ends[other_exit].tail = self.ends[enter].tail;
        }
        None
    }
}
