//! Areas and the boolean operations on them.
//!
//! [Body] is the entry point: build one from any [PathSource](crate::path::PathSource), combine
//! bodies with [Body::add], [Body::subtract], [Body::intersect] and [Body::xor], query them with
//! [Body::contains_point] and [Body::relationship], and export them back out as path commands.
//! [Area] wraps a body with a queue of pending operations that run as one batch when queried.
//!
//! Boolean operations run a top to bottom scanline sweep over the curves of both operands. On
//! each row the active curves are ordered by x, every curve is classified as entering, exiting
//! or not changing the result, and the kept spans are linked into closed output contours.
mod body;
mod body_iter;
mod chain;
mod deferred;
mod edge;
mod operator;
mod relationship;
mod segment;
mod sweep;

pub use body::{Body, ValidBody};
pub use body_iter::BodyCommands;
pub use deferred::{Area, BatchRules};
pub use operator::BooleanOp;
pub use relationship::{Relationship, RelationshipOptions};
pub use segment::{BezierSegment, Segments};
