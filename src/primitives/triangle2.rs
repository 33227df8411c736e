//! 2D triangle type.

use super::Point2;
use num_traits::Float;

/// A triangle defined by three vertices.
///
/// No winding order is assumed; `signed_area` exposes the actual orientation
/// (positive for counter-clockwise vertices).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle2<F> {
    pub a: Point2<F>,
    pub b: Point2<F>,
    pub c: Point2<F>,
}

impl<F: Float> Triangle2<F> {
    /// Creates a new triangle.
    #[inline]
    pub fn new(a: Point2<F>, b: Point2<F>, c: Point2<F>) -> Self {
        Self { a, b, c }
    }

    /// Returns the three vertices in order.
    #[inline]
    pub fn vertices(&self) -> [Point2<F>; 3] {
        [self.a, self.b, self.c]
    }

    /// Returns the signed area via the shoelace formula.
    ///
    /// Positive for counter-clockwise winding, negative for clockwise,
    /// zero for collinear vertices.
    pub fn signed_area(&self) -> F {
        let sum = self.a.x * self.b.y - self.b.x * self.a.y
            + self.b.x * self.c.y
            - self.c.x * self.b.y
            + self.c.x * self.a.y
            - self.a.x * self.c.y;
        sum / F::from(2.0).unwrap()
    }

    /// Returns the triangle with first and last vertices swapped,
    /// reversing the winding order.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            a: self.c,
            b: self.b,
            c: self.a,
        }
    }

    /// Computes the circumcenter, the point equidistant from all three
    /// vertices.
    ///
    /// Returns `None` if the vertices are (numerically) collinear and no
    /// circumcircle exists.
    pub fn circumcenter(&self) -> Option<Point2<F>> {
        let two = F::from(2.0).unwrap();

        let (ax, ay) = (self.a.x, self.a.y);
        let (bx, by) = (self.b.x, self.b.y);
        let (cx, cy) = (self.c.x, self.c.y);

        let d = two * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
        if d.abs() < F::epsilon() {
            return None;
        }

        let aa = ax * ax + ay * ay;
        let bb = bx * bx + by * by;
        let cc = cx * cx + cy * cy;

        let ux = (aa * (by - cy) + bb * (cy - ay) + cc * (ay - by)) / d;
        let uy = (aa * (cx - bx) + bb * (ax - cx) + cc * (bx - ax)) / d;

        Some(Point2::new(ux, uy))
    }

    /// Tests whether this triangle has the same vertex set as another,
    /// ignoring order and winding.
    pub fn same_vertex_set(&self, other: &Self) -> bool {
        self.vertices()
            .iter()
            .all(|v| other.vertices().contains(v))
            && other.vertices().iter().all(|v| self.vertices().contains(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_signed_area_ccw() {
        let t: Triangle2<f64> = Triangle2::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        );
        assert_relative_eq!(t.signed_area(), 0.5);
    }

    #[test]
    fn test_signed_area_cw() {
        let t: Triangle2<f64> = Triangle2::new(
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 0.0),
        );
        assert_relative_eq!(t.signed_area(), -0.5);
    }

    #[test]
    fn test_reversed_flips_winding() {
        let t: Triangle2<f64> = Triangle2::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        );
        assert_relative_eq!(t.reversed().signed_area(), -t.signed_area());
        assert!(t.same_vertex_set(&t.reversed()));
    }

    #[test]
    fn test_circumcenter_right_triangle() {
        // Circumcenter of a right triangle is the hypotenuse midpoint.
        let t: Triangle2<f64> = Triangle2::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        );
        let c = t.circumcenter().unwrap();
        assert_relative_eq!(c.x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(c.y, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_circumcenter_equidistant() {
        let t: Triangle2<f64> = Triangle2::new(
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 1.0),
        );
        let c = t.circumcenter().unwrap();
        let d0 = c.distance(t.a);
        assert_relative_eq!(c.distance(t.b), d0, epsilon = 1e-12);
        assert_relative_eq!(c.distance(t.c), d0, epsilon = 1e-12);
    }

    #[test]
    fn test_circumcenter_collinear() {
        let t: Triangle2<f64> = Triangle2::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
        );
        assert!(t.circumcenter().is_none());
    }

    #[test]
    fn test_same_vertex_set() {
        let t: Triangle2<f64> = Triangle2::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        );
        let u = Triangle2::new(
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
        );
        let w = Triangle2::new(
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
        );
        assert!(t.same_vertex_set(&u));
        assert!(!t.same_vertex_set(&w));
    }
}
