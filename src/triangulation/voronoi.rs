//! Bounded Voronoi cell polygons.
//!
//! The sweep output describes cells implicitly as the edges separating each
//! site from its neighbors; unbounded cells reach infinity along rays and
//! lines. This module makes each cell explicit as a CCW polygon clipped to a
//! caller-provided box.
//!
//! Cells are assembled inside a working bound large enough to contain the
//! clip box, every site, and every Voronoi vertex. Inside that bound each
//! edge of a cell becomes a directed span (oriented to walk the cell
//! counter-clockwise), unbounded ends are cut at the bound's boundary, and
//! gaps between consecutive spans are closed by walking the boundary through
//! its corners. The final polygon is then clipped to the caller's box.

use crate::bounds::Aabb2;
use crate::fortune::{point_key, Diagram, Edge, EdgeKind};
use crate::polygon::{clip_to_box, Polygon};
use crate::primitives::{Point2, Vec2};
use num_traits::Float;
use std::cmp::Ordering;
use std::collections::HashMap;

/// One site's region of the plane, clipped to the requested box.
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell<F> {
    pub site: Point2<F>,
    /// The clipped cell polygon, wound counter-clockwise.
    pub polygon: Polygon<F>,
}

/// Builds the bounded Voronoi cell polygon of every site.
///
/// Cells are returned in site order. A site whose cell lies entirely outside
/// the clip box has no entry in the result.
///
/// # Example
///
/// ```
/// use fortune2d::{build_voronoi_cells, compute_diagram, Aabb2, Point2};
///
/// let sites = [Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)];
/// let diagram = compute_diagram(&sites).unwrap();
/// let boxed = Aabb2::new(Point2::new(-1.0, -1.0), Point2::new(3.0, 1.0));
///
/// let cells = build_voronoi_cells(&diagram, boxed);
/// assert_eq!(cells.len(), 2);
/// assert_eq!(cells[0].polygon.area(), 4.0);
/// assert_eq!(cells[1].polygon.area(), 4.0);
/// ```
pub fn build_voronoi_cells<F: Float>(
    diagram: &Diagram<F>,
    clip: Aabb2<F>,
) -> Vec<VoronoiCell<F>> {
    if diagram.sites.is_empty() {
        return Vec::new();
    }
    if diagram.sites.len() == 1 {
        return vec![VoronoiCell {
            site: diagram.sites[0],
            polygon: Polygon::new(clip.corners_ccw().to_vec()),
        }];
    }

    let mut bound = clip;
    for &site in &diagram.sites {
        bound = bound.expand_to_include(site);
    }
    for e in &diagram.edges {
        for p in [e.begin, e.end] {
            if p.is_finite() {
                bound = bound.expand_to_include(p);
            }
        }
    }
    let bound = bound.inflate(F::one());

    let mut by_site: HashMap<(u64, u64), Vec<&Edge<F>>> = HashMap::new();
    for e in &diagram.edges {
        by_site.entry(point_key(e.left)).or_default().push(e);
        by_site.entry(point_key(e.right)).or_default().push(e);
    }

    let mut cells = Vec::with_capacity(diagram.sites.len());
    for &site in &diagram.sites {
        let Some(edges) = by_site.get(&point_key(site)) else {
            continue;
        };
        let Some(perimeter) = cell_perimeter(site, edges, bound) else {
            continue;
        };
        let polygon = clip_to_box(&perimeter, clip);
        if !polygon.is_empty() {
            cells.push(VoronoiCell { site, polygon });
        }
    }
    cells
}

/// One cell edge as a directed piece of the cell's CCW perimeter.
struct Span<F> {
    /// From the site toward the edge; perpendicular to it.
    outward: Vec2<F>,
    start: Point2<F>,
    end: Point2<F>,
}

/// Assembles a cell's full perimeter inside the working bound.
///
/// Returns `None` when fewer than three distinct vertices remain, which
/// happens for cells crushed to a sliver by cocircular degeneracies.
fn cell_perimeter<F: Float>(
    site: Point2<F>,
    edges: &[&Edge<F>],
    bound: Aabb2<F>,
) -> Option<Polygon<F>> {
    let mut spans: Vec<Span<F>> = edges
        .iter()
        .map(|e| oriented_span(site, e, bound))
        .collect();
    spans.sort_by(|a, b| ccw_order(a.outward, b.outward));

    let mut vertices: Vec<Point2<F>> = Vec::new();
    for i in 0..spans.len() {
        let cur = &spans[i];
        let next = &spans[(i + 1) % spans.len()];

        push_unique(&mut vertices, cur.start);
        push_unique(&mut vertices, cur.end);

        // Consecutive edges of a closed cell share a circumcenter vertex
        // bit for bit; anything else is a gap along the bound's boundary.
        if point_key(cur.end) != point_key(next.start) {
            walk_boundary_ccw(bound, cur.end, next.start, &mut vertices);
        }
    }

    while vertices.len() > 1 && point_key(vertices[0]) == point_key(vertices[vertices.len() - 1]) {
        vertices.pop();
    }
    if vertices.len() < 3 {
        return None;
    }
    Some(Polygon::new(vertices))
}

/// Orients one edge for a CCW walk of the given site's cell and cuts any
/// unbounded end at the working bound.
fn oriented_span<F: Float>(site: Point2<F>, edge: &Edge<F>, bound: Aabb2<F>) -> Span<F> {
    let outward = edge.location - site;
    // Walking CCW around the site keeps the interior on the left, which
    // means the travel direction is the outward vector rotated a quarter
    // turn counter-clockwise.
    let forward = outward.cross(edge.direction) > F::zero();
    let tangent = if forward {
        edge.direction
    } else {
        -edge.direction
    };

    let (start, end) = match edge.kind {
        EdgeKind::Segment => {
            if forward {
                (edge.begin, edge.end)
            } else {
                (edge.end, edge.begin)
            }
        }
        EdgeKind::Ray => {
            if forward {
                (edge.begin, box_exit(edge.begin, tangent, bound))
            } else {
                (box_exit(edge.begin, -tangent, bound), edge.begin)
            }
        }
        EdgeKind::Line => (
            box_exit(edge.location, -tangent, bound),
            box_exit(edge.location, tangent, bound),
        ),
    };

    Span {
        outward,
        start,
        end,
    }
}

/// Orders outward vectors counter-clockwise starting from the positive x
/// axis: upper half-plane first, then lower, cross product within a half.
fn ccw_order<F: Float>(u: Vec2<F>, v: Vec2<F>) -> Ordering {
    fn half<F: Float>(v: Vec2<F>) -> u8 {
        if v.y > F::zero() || (v.y == F::zero() && v.x > F::zero()) {
            0
        } else {
            1
        }
    }

    half(u).cmp(&half(v)).then_with(|| {
        F::zero()
            .partial_cmp(&u.cross(v))
            .unwrap_or(Ordering::Equal)
    })
}

/// Follows `dir` from a point inside the bound to the boundary, snapping the
/// hit coordinate exactly onto the side it exits through.
fn box_exit<F: Float>(origin: Point2<F>, dir: Vec2<F>, bound: Aabb2<F>) -> Point2<F> {
    let tx = if dir.x > F::zero() {
        (bound.max.x - origin.x) / dir.x
    } else if dir.x < F::zero() {
        (bound.min.x - origin.x) / dir.x
    } else {
        F::infinity()
    };
    let ty = if dir.y > F::zero() {
        (bound.max.y - origin.y) / dir.y
    } else if dir.y < F::zero() {
        (bound.min.y - origin.y) / dir.y
    } else {
        F::infinity()
    };

    if tx <= ty {
        let x = if dir.x > F::zero() {
            bound.max.x
        } else {
            bound.min.x
        };
        Point2::new(x, origin.y + dir.y * tx)
    } else {
        let y = if dir.y > F::zero() {
            bound.max.y
        } else {
            bound.min.y
        };
        Point2::new(origin.x + dir.x * ty, y)
    }
}

/// Walks the bound's boundary counter-clockwise from `from` to `to`,
/// appending the corners passed on the way.
///
/// Sides are numbered in CCW order: 0 left (downward), 1 bottom (rightward),
/// 2 right (upward), 3 top (leftward).
fn walk_boundary_ccw<F: Float>(
    bound: Aabb2<F>,
    from: Point2<F>,
    to: Point2<F>,
    out: &mut Vec<Point2<F>>,
) {
    let (mut side, mut along) = side_position(bound, from);
    let (target_side, target_along) = side_position(bound, to);

    let mut steps = 0;
    while side != target_side || along > target_along {
        push_unique(out, side_end_corner(bound, side));
        side = (side + 1) % 4;
        along = F::zero();
        steps += 1;
        if steps > 4 {
            // A full lap passed the target; only possible through a
            // floating-point inconsistency in side_position.
            break;
        }
    }
}

/// Locates a boundary point: the side it lies on (nearest side wins) and its
/// progress along that side in CCW direction.
fn side_position<F: Float>(bound: Aabb2<F>, p: Point2<F>) -> (usize, F) {
    let distances = [
        p.x - bound.min.x,
        p.y - bound.min.y,
        bound.max.x - p.x,
        bound.max.y - p.y,
    ];

    let mut side = 0;
    for i in 1..4 {
        if distances[i] < distances[side] {
            side = i;
        }
    }

    let along = match side {
        0 => bound.max.y - p.y,
        1 => p.x - bound.min.x,
        2 => p.y - bound.min.y,
        _ => bound.max.x - p.x,
    };
    (side, along)
}

/// The corner where a side hands over to the next one in CCW order.
fn side_end_corner<F: Float>(bound: Aabb2<F>, side: usize) -> Point2<F> {
    match side {
        0 => Point2::new(bound.min.x, bound.min.y),
        1 => Point2::new(bound.max.x, bound.min.y),
        2 => Point2::new(bound.max.x, bound.max.y),
        _ => Point2::new(bound.min.x, bound.max.y),
    }
}

/// Appends `p` unless it repeats the previous vertex bit for bit.
fn push_unique<F: Float>(vertices: &mut Vec<Point2<F>>, p: Point2<F>) {
    if vertices
        .last()
        .map_or(true, |last| point_key(*last) != point_key(p))
    {
        vertices.push(p);
    }
}
