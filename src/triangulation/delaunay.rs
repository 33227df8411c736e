//! Delaunay triangulation extraction.

use crate::fortune::{point_key, Diagram};
use crate::primitives::Triangle2;
use num_traits::Float;
use std::collections::HashSet;

/// Extracts the Delaunay triangulation from a computed diagram.
///
/// The sweep emits one triangle per Voronoi vertex with whatever winding the
/// beach line produced. This normalizes every triangle to clockwise winding
/// (negative signed area) and drops duplicates, which arise when cocircular
/// sites make several circle events share one circumcenter.
///
/// # Example
///
/// ```
/// use fortune2d::{compute_diagram, extract_delaunay, Point2};
///
/// let sites = [
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(1.0, 2.0),
/// ];
/// let diagram = compute_diagram(&sites).unwrap();
/// let triangles = extract_delaunay(&diagram);
///
/// assert_eq!(triangles.len(), 1);
/// assert!(triangles[0].signed_area() < 0.0);
/// ```
pub fn extract_delaunay<F: Float>(diagram: &Diagram<F>) -> Vec<Triangle2<F>> {
    let mut seen = HashSet::with_capacity(diagram.triangles.len());
    let mut triangles = Vec::with_capacity(diagram.triangles.len());

    for t in &diagram.triangles {
        let canonical = if t.signed_area() < F::zero() {
            *t
        } else {
            t.reversed()
        };

        let mut key = [
            point_key(canonical.a),
            point_key(canonical.b),
            point_key(canonical.c),
        ];
        key.sort_unstable();
        if seen.insert(key) {
            triangles.push(canonical);
        }
    }

    triangles
}
