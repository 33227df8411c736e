//! Fortune's sweep-line construction of the Voronoi diagram.
//!
//! The sweep line moves upward through the sites (ascending y). The beach
//! line, the upper envelope of one parabola per passed site, is tracked as a
//! binary tree of arcs and breakpoints, and a priority queue drives the two
//! event kinds: site events split an arc, circle events squeeze one out and
//! emit a Voronoi vertex / Delaunay triangle.

mod beachline;
mod driver;
mod edge;
mod event;

pub use driver::{compute_diagram, Diagram};
pub use edge::{Edge, EdgeKind};

use crate::primitives::Point2;
use num_traits::Float;

/// Bit-exact hash key for a finite point.
///
/// Input coordinates are validated finite before any of this is used, so the
/// f64 widening is lossless for both f32 and f64 scalars.
pub(crate) fn point_key<F: Float>(p: Point2<F>) -> (u64, u64) {
    let x = p.x.to_f64().unwrap_or(f64::NAN);
    let y = p.y.to_f64().unwrap_or(f64::NAN);
    (x.to_bits(), y.to_bits())
}
