//! Boolean operations on 2D areas bounded by lines and quadratic/cubic bezier curves.
//!
//! A path (see [path::Path]) is ingested into an [area::Body], a soup of y-monotonic
//! [curve::Curve]s. Validating the body against its winding rule resolves self intersections,
//! after which bodies can be combined with union, subtraction, intersection and exclusive or.
//! Results can be queried for point containment, related to other shapes, transformed, or
//! exported back out as path commands.
//!
//! # Examples
//!
//! ```
//! # use bezier_area::area::*;
//! # use bezier_area::core::math::*;
//! # use bezier_area::path::*;
//! let a = Body::from_source(&Path::rect(0.0, 0.0, 8.0, 8.0)).unwrap();
//! let b = Body::from_source(&Path::rect(4.0, 4.0, 8.0, 8.0)).unwrap();
//!
//! let union = a.add(&b);
//! assert!(union.contains_point(vec2(6.0, 6.0)));
//! assert!(!union.contains_point(vec2(10.0, 2.0)));
//!
//! let overlap = a.intersect(&b);
//! let bounds = overlap.bounds().unwrap();
//! assert_eq!((bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y), (4.0, 4.0, 8.0, 8.0));
//! ```
#[macro_use]
mod macros;
pub mod area;
pub mod core;
pub mod curve;
pub mod path;

pub use static_aabb2d_index::AABB;
