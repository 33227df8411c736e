//! Axis-aligned bounding box.

use crate::primitives::Point2;
use num_traits::Float;

/// A 2D axis-aligned bounding box.
///
/// Defined by minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2<F> {
    /// Minimum corner (smallest x and y values).
    pub min: Point2<F>,
    /// Maximum corner (largest x and y values).
    pub max: Point2<F>,
}

impl<F: Float> Aabb2<F> {
    /// Creates a new AABB from min and max corners.
    ///
    /// Does not validate that min <= max.
    #[inline]
    pub fn new(min: Point2<F>, max: Point2<F>) -> Self {
        Self { min, max }
    }

    /// Creates an AABB from two arbitrary corners.
    ///
    /// Correctly handles corners in any orientation.
    #[inline]
    pub fn from_corners(a: Point2<F>, b: Point2<F>) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Returns the width of the AABB.
    #[inline]
    pub fn width(self) -> F {
        self.max.x - self.min.x
    }

    /// Returns the height of the AABB.
    #[inline]
    pub fn height(self) -> F {
        self.max.y - self.min.y
    }

    /// Returns the area of the AABB.
    #[inline]
    pub fn area(self) -> F {
        self.width() * self.height()
    }

    /// Tests whether a point lies inside or on the boundary.
    #[inline]
    pub fn contains(self, p: Point2<F>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Returns a new AABB expanded to include the given point.
    #[inline]
    pub fn expand_to_include(self, p: Point2<F>) -> Self {
        Self {
            min: Point2::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point2::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Returns a new AABB grown outward by `margin` on every side.
    #[inline]
    pub fn inflate(self, margin: F) -> Self {
        Self {
            min: Point2::new(self.min.x - margin, self.min.y - margin),
            max: Point2::new(self.max.x + margin, self.max.y + margin),
        }
    }

    /// Returns the four corners in counter-clockwise order, starting at the
    /// upper-left corner.
    #[inline]
    pub fn corners_ccw(self) -> [Point2<F>; 4] {
        [
            Point2::new(self.min.x, self.max.y),
            Point2::new(self.min.x, self.min.y),
            Point2::new(self.max.x, self.min.y),
            Point2::new(self.max.x, self.max.y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_any_orientation() {
        let b: Aabb2<f64> =
            Aabb2::from_corners(Point2::new(4.0, 1.0), Point2::new(0.0, 3.0));
        assert_eq!(b.min, Point2::new(0.0, 1.0));
        assert_eq!(b.max, Point2::new(4.0, 3.0));
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 2.0);
        assert_eq!(b.area(), 8.0);
    }

    #[test]
    fn test_contains() {
        let b: Aabb2<f64> =
            Aabb2::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
        assert!(b.contains(Point2::new(1.0, 1.0)));
        assert!(b.contains(Point2::new(0.0, 2.0)));
        assert!(!b.contains(Point2::new(-0.1, 1.0)));
        assert!(!b.contains(Point2::new(1.0, 2.1)));
    }

    #[test]
    fn test_expand_and_inflate() {
        let b: Aabb2<f64> =
            Aabb2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        let grown = b.expand_to_include(Point2::new(3.0, -1.0));
        assert_eq!(grown.min, Point2::new(0.0, -1.0));
        assert_eq!(grown.max, Point2::new(3.0, 1.0));

        let inflated = b.inflate(1.0);
        assert_eq!(inflated.min, Point2::new(-1.0, -1.0));
        assert_eq!(inflated.max, Point2::new(2.0, 2.0));
    }

    #[test]
    fn test_corners_ccw_starts_upper_left() {
        let b: Aabb2<f64> =
            Aabb2::new(Point2::new(0.0, 0.0), Point2::new(4.0, 4.0));
        let corners = b.corners_ccw();
        assert_eq!(corners[0], Point2::new(0.0, 4.0));
        assert_eq!(corners[1], Point2::new(0.0, 0.0));
        assert_eq!(corners[2], Point2::new(4.0, 0.0));
        assert_eq!(corners[3], Point2::new(4.0, 4.0));
    }
}
