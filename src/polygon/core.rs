//! Core polygon type and basic operations.

use crate::primitives::Point2;
use num_traits::Float;

/// A simple polygon represented as a sequence of vertices.
///
/// Vertices are stored in counter-clockwise order. The polygon is implicitly
/// closed (the last vertex connects to the first).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<F> {
    /// The vertices of the polygon in CCW order.
    pub vertices: Vec<Point2<F>>,
}

impl<F: Float> Polygon<F> {
    /// Creates a new polygon from vertices.
    #[inline]
    pub fn new(vertices: Vec<Point2<F>>) -> Self {
        Self { vertices }
    }

    /// Creates an empty polygon.
    #[inline]
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
        }
    }

    /// Returns true if the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the signed area of the polygon using the shoelace formula.
    ///
    /// Positive for CCW winding, negative for CW winding.
    pub fn signed_area(&self) -> F {
        if self.vertices.len() < 3 {
            return F::zero();
        }

        let mut area = F::zero();
        let n = self.vertices.len();

        for i in 0..n {
            let j = (i + 1) % n;
            area = area + self.vertices[i].x * self.vertices[j].y;
            area = area - self.vertices[j].x * self.vertices[i].y;
        }

        area / F::from(2.0).unwrap()
    }

    /// Returns the absolute area of the polygon.
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    /// Tests whether a point lies inside the polygon using the even-odd
    /// rule (ray casting).
    ///
    /// Points exactly on the boundary may report either side.
    pub fn contains(&self, p: Point2<F>) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[j];
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}
