use super::{sweep, Body, ValidBody};
use crate::{core::traits::Real, curve::Direction, path::WindingRule};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Boolean operation combining two areas.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum BooleanOp {
    /// Union, covered by either operand.
    Add,
    /// Difference, covered by the left operand and not the right.
    Subtract,
    /// Intersection, covered by both operands.
    Intersect,
    /// Exclusive or, covered by exactly one operand.
    Xor,
}

impl BooleanOp {
    /// Whether a point covered by the operands as given is covered by the result.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bezier_area::area::*;
    /// assert!(BooleanOp::Subtract.classify(true, false));
    /// assert!(!BooleanOp::Subtract.classify(true, true));
    /// assert!(BooleanOp::Xor.classify(false, true));
    /// ```
    #[inline]
    pub fn classify(self, in_left: bool, in_right: bool) -> bool {
        match self {
            BooleanOp::Add => in_left || in_right,
            BooleanOp::Subtract => in_left && !in_right,
            BooleanOp::Intersect => in_left && in_right,
            BooleanOp::Xor => in_left != in_right,
        }
    }

    /// Run the sweep for this operation over two validated bodies.
    ///
    /// Unlike the [Body] methods this does not take the empty operand shortcuts.
    pub fn apply<T>(self, left: ValidBody<'_, T>, right: ValidBody<'_, T>) -> Body<T>
    where
        T: Real,
    {
        Body::from_validated(sweep::calculate(
            Operator::Boolean(self),
            left.curves(),
            right.curves(),
        ))
    }
}

/// Classification policy of one sweep: a boolean combination of two validated operands or the
/// winding rule used to validate a single raw operand.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Operator {
    Boolean(BooleanOp),
    Winding(WindingRule),
}

/// Operand an edge came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Operand {
    Left,
    Right,
}

/// Role an edge plays in the result at the current scanline.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum EdgeTag {
    Ignore,
    /// Crossing it left to right enters the result.
    Enter,
    /// Crossing it left to right exits the result.
    Exit,
}

impl EdgeTag {
    /// Direction output curves with this role are drawn in.
    #[inline]
    pub(crate) fn direction(self) -> Direction {
        match self {
            EdgeTag::Enter => Direction::Increasing,
            EdgeTag::Exit => Direction::Decreasing,
            EdgeTag::Ignore => unreachable!("ignored edges do not produce output"),
        }
    }
}

/// Left to right inside/outside state machine for one row of active edges.
#[derive(Debug, Clone)]
pub(crate) struct Classifier {
    op: Operator,
    in_left: bool,
    in_right: bool,
    in_result: bool,
    count: i32,
}

impl Classifier {
    pub(crate) fn new(op: Operator) -> Self {
        Self {
            op,
            in_left: false,
            in_right: false,
            in_result: false,
            count: 0,
        }
    }

    /// Reset to "outside everything" at the left end of a row.
    pub(crate) fn new_row(&mut self) {
        self.in_left = false;
        self.in_right = false;
        self.in_result = false;
        self.count = 0;
    }

    /// Step across an edge and report how the result changes.
    pub(crate) fn classify(&mut self, operand: Operand, direction: Direction) -> EdgeTag {
        match self.op {
            Operator::Boolean(op) => {
                match operand {
                    Operand::Left => self.in_left = !self.in_left,
                    Operand::Right => self.in_right = !self.in_right,
                }
                let now = op.classify(self.in_left, self.in_right);
                if now == self.in_result {
                    return EdgeTag::Ignore;
                }
                self.in_result = now;
                if now {
                    EdgeTag::Enter
                } else {
                    EdgeTag::Exit
                }
            }
            Operator::Winding(WindingRule::EvenOdd) => {
                self.in_result = !self.in_result;
                if self.in_result {
                    EdgeTag::Enter
                } else {
                    EdgeTag::Exit
                }
            }
            Operator::Winding(WindingRule::NonZero) => {
                let was_outside = self.count == 0;
                self.count += direction.sign();
                self.in_result = self.count != 0;
                if !self.in_result {
                    EdgeTag::Exit
                } else if was_outside {
                    EdgeTag::Enter
                } else {
                    EdgeTag::Ignore
                }
            }
        }
    }

    /// `true` while left of the current position is inside the result.
    #[inline]
    pub(crate) fn is_inside(&self) -> bool {
        self.in_result
    }
}
