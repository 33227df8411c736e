//! Voronoi edge records.
//!
//! During the sweep an edge is a mutable builder: vertices are attached as
//! circle events discover them, and breakpoints still alive at termination
//! report the direction their end keeps growing in. `finish` freezes the
//! builder into an immutable [`Edge`] value with a classification and fully
//! resolved endpoints.

use crate::primitives::{Point2, Vec2};
use num_traits::Float;
use std::cmp::Ordering;

/// Classification of a finished Voronoi edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// No vertex was ever attached; the edge is infinite in both directions.
    Line,
    /// One vertex attached; the edge extends to infinity from it.
    Ray,
    /// Two vertices attached; the edge is a finite segment.
    Segment,
}

/// A finished Voronoi edge separating two sites.
///
/// Sites are stored in canonical order: `left` has the smaller x coordinate,
/// ties broken by smaller y. Unbounded endpoints are synthesized at signed
/// infinity, component-wise consistent with the sign of `direction` (a zero
/// component keeps the finite anchor's coordinate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<F> {
    /// The canonically smaller site of the pair this edge separates.
    pub left: Point2<F>,
    /// The canonically larger site of the pair this edge separates.
    pub right: Point2<F>,
    /// First endpoint. Finite for RAY and SEGMENT edges.
    pub begin: Point2<F>,
    /// Second endpoint. Finite only for SEGMENT edges.
    pub end: Point2<F>,
    /// Unit direction from `begin` toward `end` along the edge line.
    pub direction: Vec2<F>,
    /// A representative point on the edge line: the midpoint of the sites.
    pub location: Point2<F>,
    /// The edge classification.
    pub kind: EdgeKind,
    /// Whether the site pair was swapped to reach canonical order.
    pub swapped: bool,
}

/// An edge under construction during the sweep.
#[derive(Debug, Clone)]
pub(crate) struct EdgeBuilder<F> {
    left: Point2<F>,
    right: Point2<F>,
    vertices: [Option<Point2<F>>; 2],
    open: [Option<Vec2<F>>; 2],
}

impl<F: Float> EdgeBuilder<F> {
    /// Creates an edge between two sites with no vertices attached yet.
    pub(crate) fn new(left: Point2<F>, right: Point2<F>) -> Self {
        Self {
            left,
            right,
            vertices: [None, None],
            open: [None, None],
        }
    }

    /// Creates an edge with one vertex already attached (circle events seed
    /// the merged edge with the circumcenter).
    pub(crate) fn with_vertex(left: Point2<F>, right: Point2<F>, vertex: Point2<F>) -> Self {
        let mut builder = Self::new(left, right);
        builder.add_vertex(vertex);
        builder
    }

    /// Attaches a vertex to the edge.
    ///
    /// # Panics
    ///
    /// Panics if the edge already has two vertices; an edge bounded at both
    /// ends cannot grow further, so a third vertex is a bug in the driver.
    pub(crate) fn add_vertex(&mut self, vertex: Point2<F>) {
        if self.vertices[0].is_none() {
            self.vertices[0] = Some(vertex);
        } else if self.vertices[1].is_none() {
            self.vertices[1] = Some(vertex);
        } else {
            panic!("edge already has two vertices");
        }
    }

    /// Records that one end of this edge is still unbounded at sweep
    /// termination and grows in the given direction.
    pub(crate) fn extend(&mut self, direction: Vec2<F>) {
        if self.open[0].is_none() {
            self.open[0] = Some(direction);
        } else {
            self.open[1] = Some(direction);
        }
    }

    /// Freezes the builder into an immutable edge.
    ///
    /// Classifies by vertex count, canonicalizes the site order, and
    /// synthesizes signed-infinity endpoints for unbounded ends.
    pub(crate) fn finish(self) -> Edge<F> {
        // The breakpoint tracing this edge grew along the perpendicular of
        // the site pair in creation order. A one-vertex edge with no
        // recorded open direction lost its only breakpoint to a circle
        // event, so its open end points the other way.
        let growth = (self.right - self.left)
            .perpendicular()
            .normalize()
            .expect("edge sites must be distinct");

        let swapped = self.left.cmp_xy(self.right) == Ordering::Greater;
        let (left, right) = if swapped {
            (self.right, self.left)
        } else {
            (self.left, self.right)
        };

        let location = left.midpoint(right);
        let axis = if swapped { -growth } else { growth };

        match (self.vertices[0], self.vertices[1]) {
            (Some(a), Some(b)) => Edge {
                left,
                right,
                begin: a,
                end: b,
                direction: (b - a).normalize().unwrap_or(axis),
                location,
                kind: EdgeKind::Segment,
                swapped,
            },
            (Some(a), None) => {
                let direction = self.open[0].unwrap_or(-growth);
                Edge {
                    left,
                    right,
                    begin: a,
                    end: infinity_along(a, direction),
                    direction,
                    location,
                    kind: EdgeKind::Ray,
                    swapped,
                }
            }
            (None, None) => Edge {
                left,
                right,
                begin: infinity_along(location, -axis),
                end: infinity_along(location, axis),
                direction: axis,
                location,
                kind: EdgeKind::Line,
                swapped,
            },
            (None, Some(_)) => panic!("edge vertex slots filled out of order"),
        }
    }
}

/// Synthesizes the point at signed infinity reached by following `direction`
/// from `anchor`. A zero direction component keeps the anchor's coordinate.
fn infinity_along<F: Float>(anchor: Point2<F>, direction: Vec2<F>) -> Point2<F> {
    let x = if direction.x > F::zero() {
        F::infinity()
    } else if direction.x < F::zero() {
        F::neg_infinity()
    } else {
        anchor.x
    };
    let y = if direction.y > F::zero() {
        F::infinity()
    } else if direction.y < F::zero() {
        F::neg_infinity()
    } else {
        anchor.y
    };
    Point2::new(x, y)
}
