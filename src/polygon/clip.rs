//! Polygon clipping against an axis-aligned box.

use crate::bounds::Aabb2;
use crate::polygon::Polygon;
use crate::primitives::Point2;
use num_traits::Float;

/// Clips a polygon to an axis-aligned box.
///
/// Performs four successive half-plane clips, one per box side
/// (Sutherland-Hodgman specialized to axis-aligned boundaries). If the
/// polygon degenerates below 3 vertices at any step it lies entirely outside
/// the box and an empty polygon is returned.
///
/// # Example
///
/// ```
/// use fortune2d::{Aabb2, Point2, Polygon};
/// use fortune2d::polygon::clip_to_box;
///
/// let p = Polygon::new(vec![
///     Point2::new(-1.0, -1.0),
///     Point2::new(3.0, -1.0),
///     Point2::new(3.0, 3.0),
///     Point2::new(-1.0, 3.0),
/// ]);
/// let boxed = Aabb2::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
///
/// let clipped = clip_to_box(&p, boxed);
/// assert_eq!(clipped.area(), 4.0);
/// ```
pub fn clip_to_box<F: Float>(subject: &Polygon<F>, bounds: Aabb2<F>) -> Polygon<F> {
    let mut vertices = subject.vertices.clone();

    for side in [
        Side::Left(bounds.min.x),
        Side::Bottom(bounds.min.y),
        Side::Right(bounds.max.x),
        Side::Top(bounds.max.y),
    ] {
        vertices = clip_side(&vertices, side);
        if vertices.len() < 3 {
            return Polygon::empty();
        }
    }

    Polygon::new(vertices)
}

/// One half-plane boundary of the clip box.
#[derive(Clone, Copy)]
enum Side<F> {
    Left(F),
    Bottom(F),
    Right(F),
    Top(F),
}

impl<F: Float> Side<F> {
    fn inside(self, p: Point2<F>) -> bool {
        match self {
            Side::Left(x) => p.x >= x,
            Side::Bottom(y) => p.y >= y,
            Side::Right(x) => p.x <= x,
            Side::Top(y) => p.y <= y,
        }
    }

    /// Intersects the segment (p, q) with this boundary line.
    ///
    /// Only called when p and q straddle the boundary, so the denominator
    /// cannot vanish.
    fn intersect(self, p: Point2<F>, q: Point2<F>) -> Point2<F> {
        match self {
            Side::Left(x) | Side::Right(x) => {
                let t = (x - p.x) / (q.x - p.x);
                Point2::new(x, p.y + (q.y - p.y) * t)
            }
            Side::Bottom(y) | Side::Top(y) => {
                let t = (y - p.y) / (q.y - p.y);
                Point2::new(p.x + (q.x - p.x) * t, y)
            }
        }
    }
}

fn clip_side<F: Float>(input: &[Point2<F>], side: Side<F>) -> Vec<Point2<F>> {
    let mut output = Vec::with_capacity(input.len() + 1);
    let n = input.len();

    for i in 0..n {
        let current = input[i];
        let next = input[(i + 1) % n];

        let current_inside = side.inside(current);
        let next_inside = side.inside(next);

        if current_inside {
            output.push(current);
            if !next_inside {
                output.push(side.intersect(current, next));
            }
        } else if next_inside {
            output.push(side.intersect(current, next));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> Aabb2<f64> {
        Aabb2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0))
    }

    #[test]
    fn test_subject_inside_is_unchanged() {
        let p = Polygon::new(vec![
            Point2::new(0.2, 0.2),
            Point2::new(0.8, 0.2),
            Point2::new(0.5, 0.8),
        ]);
        let clipped = clip_to_box(&p, unit_box());
        assert_eq!(clipped, p);
    }

    #[test]
    fn test_subject_outside_vanishes() {
        let p = Polygon::new(vec![
            Point2::new(2.0, 2.0),
            Point2::new(3.0, 2.0),
            Point2::new(2.5, 3.0),
        ]);
        let clipped = clip_to_box(&p, unit_box());
        assert!(clipped.is_empty());
    }

    #[test]
    fn test_overlapping_square_is_cropped() {
        let p = Polygon::new(vec![
            Point2::new(0.5, 0.5),
            Point2::new(2.0, 0.5),
            Point2::new(2.0, 2.0),
            Point2::new(0.5, 2.0),
        ]);
        let clipped = clip_to_box(&p, unit_box());
        assert_relative_eq!(clipped.area(), 0.25, epsilon = 1e-12);
        for v in &clipped.vertices {
            assert!(unit_box().contains(*v));
        }
    }

    #[test]
    fn test_crossing_triangle_corners_preserved() {
        // Triangle poking through the right side of the box.
        let p = Polygon::new(vec![
            Point2::new(0.5, 0.25),
            Point2::new(2.0, 0.5),
            Point2::new(0.5, 0.75),
        ]);
        let clipped = clip_to_box(&p, unit_box());
        assert!(clipped.len() >= 4);
        for v in &clipped.vertices {
            assert!(unit_box().contains(*v));
        }
    }

    #[test]
    fn test_zero_vertex_subject() {
        let clipped = clip_to_box(&Polygon::<f64>::empty(), unit_box());
        assert!(clipped.is_empty());
    }
}
