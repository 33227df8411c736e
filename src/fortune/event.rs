//! Sweep events and their ordering.
//!
//! Site and circle events share one priority queue, ordered by ascending
//! sweep position. Circle events are pushed speculatively and may be
//! superseded before they are reached; rather than removing them from the
//! heap they carry a `valid` flag that is checked lazily on pop.

use crate::primitives::{Point2, Triangle2};
use num_traits::Float;
use std::cmp::Ordering;

/// Index of a circle event in the driver's event arena.
pub(crate) type CircleEventId = usize;

/// A speculative prediction that three adjacent arcs converge.
#[derive(Debug, Clone)]
pub(crate) struct CircleEvent<F> {
    /// The middle arc, removed from the beach line if the event fires.
    pub arc: usize,
    /// Site of the left neighbor arc at prediction time.
    pub left_site: Point2<F>,
    /// Site of the right neighbor arc at prediction time.
    pub right_site: Point2<F>,
    /// The Delaunay triangle emitted if the event fires.
    pub triangle: Triangle2<F>,
    /// Circumcenter of the triangle: the predicted Voronoi vertex.
    pub center: Point2<F>,
    /// Cleared when a later event supersedes this prediction.
    pub valid: bool,
}

/// What a queue entry dispatches to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum EventKind<F> {
    Site(Point2<F>),
    Circle(CircleEventId),
}

impl<F> EventKind<F> {
    fn rank(&self) -> u8 {
        match self {
            EventKind::Site(_) => 0,
            EventKind::Circle(_) => 1,
        }
    }
}

/// A priority-queue entry.
///
/// Ordered by sweep position (y), then x, with site events before circle
/// events on exact ties so that equal-y site runs arrive left to right.
/// Coordinates are finite by input validation, so the `partial_cmp`
/// fallbacks are never taken.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SweepEvent<F> {
    pub y: F,
    pub x: F,
    pub kind: EventKind<F>,
}

impl<F: Float> SweepEvent<F> {
    pub(crate) fn site(site: Point2<F>) -> Self {
        Self {
            y: site.y,
            x: site.x,
            kind: EventKind::Site(site),
        }
    }

    pub(crate) fn circle(position: Point2<F>, id: CircleEventId) -> Self {
        Self {
            y: position.y,
            x: position.x,
            kind: EventKind::Circle(id),
        }
    }
}

impl<F: Float> PartialEq for SweepEvent<F> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<F: Float> Eq for SweepEvent<F> {}

impl<F: Float> PartialOrd for SweepEvent<F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<F: Float> Ord for SweepEvent<F> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y
            .partial_cmp(&other.y)
            .unwrap_or(Ordering::Equal)
            .then(self.x.partial_cmp(&other.x).unwrap_or(Ordering::Equal))
            .then(self.kind.rank().cmp(&other.kind.rank()))
    }
}
