//! Math helpers: vectors, affine transforms, root solving and segment intersection.
mod base_math;
mod line_line_intersect;
mod transform;
mod vector2;

pub use base_math::*;
pub use line_line_intersect::{line_line_intr, LineLineIntr};
pub use transform::Transform;
pub use vector2::{vec2, Vector2};
