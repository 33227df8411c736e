//! 2D point type.

use super::Vec2;
use num_traits::Float;
use std::cmp::Ordering;
use std::ops::{Add, Sub};

/// A 2D point with x and y coordinates.
///
/// Generic over floating-point types (`f32` or `f64`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2<F> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Point2<F> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }

    /// Creates a point at the origin (0, 0).
    #[inline]
    pub fn origin() -> Self {
        Self {
            x: F::zero(),
            y: F::zero(),
        }
    }

    /// Computes the squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Self) -> F {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Computes the Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> F {
        self.distance_squared(other).sqrt()
    }

    /// Returns the midpoint between `self` and `other`.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        let two = F::one() + F::one();
        Self {
            x: (self.x + other.x) / two,
            y: (self.y + other.y) / two,
        }
    }

    /// Compares two points lexicographically by x, then by y.
    ///
    /// Used to pick the canonical (left, right) order of the site pair an
    /// edge separates. Coordinates are assumed finite; non-finite values
    /// compare as equal.
    #[inline]
    pub fn cmp_xy(self, other: Self) -> Ordering {
        match self.x.partial_cmp(&other.x) {
            Some(Ordering::Equal) | None => {
                self.y.partial_cmp(&other.y).unwrap_or(Ordering::Equal)
            }
            Some(ord) => ord,
        }
    }

    /// Returns true if both coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Converts this point to a vector from the origin.
    #[inline]
    pub fn to_vec(self) -> Vec2<F> {
        Vec2::new(self.x, self.y)
    }
}

// Point - Point = Vec2
impl<F: Float> Sub for Point2<F> {
    type Output = Vec2<F>;

    #[inline]
    fn sub(self, other: Self) -> Vec2<F> {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

// Point + Vec2 = Point
impl<F: Float> Add<Vec2<F>> for Point2<F> {
    type Output = Self;

    #[inline]
    fn add(self, v: Vec2<F>) -> Self {
        Self {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }
}

// Point - Vec2 = Point
impl<F: Float> Sub<Vec2<F>> for Point2<F> {
    type Output = Self;

    #[inline]
    fn sub(self, v: Vec2<F>) -> Self {
        Self {
            x: self.x - v.x,
            y: self.y - v.y,
        }
    }
}

impl<F: Float> Default for Point2<F> {
    fn default() -> Self {
        Self::origin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a: Point2<f64> = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_midpoint() {
        let a: Point2<f64> = Point2::new(1.0, 1.0);
        let b = Point2::new(3.0, 5.0);
        let m = a.midpoint(b);
        assert_eq!(m.x, 2.0);
        assert_eq!(m.y, 3.0);
    }

    #[test]
    fn test_cmp_xy() {
        let a: Point2<f64> = Point2::new(1.0, 5.0);
        let b = Point2::new(2.0, 0.0);
        let c = Point2::new(1.0, 6.0);
        assert_eq!(a.cmp_xy(b), Ordering::Less);
        assert_eq!(b.cmp_xy(a), Ordering::Greater);
        assert_eq!(a.cmp_xy(c), Ordering::Less);
        assert_eq!(a.cmp_xy(a), Ordering::Equal);
    }

    #[test]
    fn test_point_vector_arithmetic() {
        let p: Point2<f64> = Point2::new(1.0, 2.0);
        let q = Point2::new(4.0, 6.0);

        let v = q - p;
        assert_eq!(v.x, 3.0);
        assert_eq!(v.y, 4.0);

        let back = p + v;
        assert_eq!(back, q);

        let again = q - v;
        assert_eq!(again, p);
    }

    #[test]
    fn test_is_finite() {
        assert!(Point2::new(1.0_f64, 2.0).is_finite());
        assert!(!Point2::new(f64::NAN, 2.0).is_finite());
        assert!(!Point2::new(1.0, f64::INFINITY).is_finite());
    }
}
