//! The sweep driver: event loop, arc splits, and arc removals.

use super::beachline::{Beachline, NodeId};
use super::edge::{Edge, EdgeBuilder};
use super::event::{CircleEvent, CircleEventId, EventKind, SweepEvent};
use super::point_key;
use crate::error::FortuneError;
use crate::primitives::{Point2, Triangle2};
use num_traits::Float;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// The output of the sweep: the sites that survived deduplication, one
/// Voronoi edge per adjacent site pair, and one Delaunay triangle per
/// Voronoi vertex.
///
/// Triangle windings are as discovered by the sweep; see
/// [`extract_delaunay`](crate::triangulation::extract_delaunay) for the
/// canonicalized triangulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram<F> {
    pub sites: Vec<Point2<F>>,
    pub edges: Vec<Edge<F>>,
    pub triangles: Vec<Triangle2<F>>,
}

/// Computes the Voronoi diagram of a set of sites with a sweep line moving
/// upward through them.
///
/// Duplicate sites (bit-identical coordinates) are collapsed to one; input
/// order is otherwise preserved in `Diagram::sites`. Zero or one distinct
/// sites yield a diagram with no edges, and exactly two yield the single
/// perpendicular bisector line without running the sweep.
///
/// # Errors
///
/// Returns [`FortuneError::NonFiniteSite`] if any coordinate is NaN or
/// infinite.
///
/// # Example
///
/// ```
/// use fortune2d::{compute_diagram, EdgeKind, Point2};
///
/// let sites = [Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)];
/// let diagram = compute_diagram(&sites).unwrap();
///
/// assert_eq!(diagram.edges.len(), 1);
/// assert_eq!(diagram.edges[0].kind, EdgeKind::Line);
/// assert_eq!(diagram.edges[0].location, Point2::new(1.0, 0.0));
/// ```
pub fn compute_diagram<F: Float>(sites: &[Point2<F>]) -> Result<Diagram<F>, FortuneError> {
    if sites.iter().any(|s| !s.is_finite()) {
        return Err(FortuneError::NonFiniteSite);
    }

    let mut seen = HashSet::with_capacity(sites.len());
    let mut unique = Vec::with_capacity(sites.len());
    for &site in sites {
        if seen.insert(point_key(site)) {
            unique.push(site);
        }
    }

    let diagram = match unique.len() {
        0 | 1 => Diagram {
            sites: unique,
            edges: Vec::new(),
            triangles: Vec::new(),
        },
        2 => {
            let edge = EdgeBuilder::new(unique[0], unique[1]).finish();
            Diagram {
                sites: unique,
                edges: vec![edge],
                triangles: Vec::new(),
            }
        }
        _ => Sweep::run(unique),
    };
    Ok(diagram)
}

struct Sweep<F> {
    beachline: Beachline<F>,
    queue: BinaryHeap<Reverse<SweepEvent<F>>>,
    /// Circle event arena; queue entries index into it.
    circle_events: Vec<CircleEvent<F>>,
    /// The live circle event (if any) predicted for each arc.
    tracked: HashMap<NodeId, CircleEventId>,
    /// Arcs whose neighborhood changed during the current event.
    pending: Vec<NodeId>,
    edges: Vec<EdgeBuilder<F>>,
    triangles: Vec<Triangle2<F>>,
    sweep: F,
}

impl<F: Float> Sweep<F> {
    fn run(sites: Vec<Point2<F>>) -> Diagram<F> {
        let mut queue = BinaryHeap::with_capacity(sites.len());
        for &site in &sites {
            queue.push(Reverse(SweepEvent::site(site)));
        }

        let mut state = Self {
            beachline: Beachline::new(),
            queue,
            circle_events: Vec::new(),
            tracked: HashMap::new(),
            pending: Vec::new(),
            edges: Vec::new(),
            triangles: Vec::new(),
            sweep: F::neg_infinity(),
        };

        while let Some(Reverse(event)) = state.queue.pop() {
            state.sweep = event.y;
            match event.kind {
                EventKind::Site(site) => state.handle_site(site),
                EventKind::Circle(id) => state.handle_circle(id),
            }
            state.process_pending();
        }

        state.beachline.finish(&mut state.edges);

        Diagram {
            sites,
            edges: state.edges.into_iter().map(EdgeBuilder::finish).collect(),
            triangles: state.triangles,
        }
    }

    /// Splits the arc directly above the new site.
    fn handle_site(&mut self, site: Point2<F>) {
        if self.beachline.is_empty() {
            let arc = self.beachline.new_arc(site);
            self.beachline.set_root(arc);
            return;
        }

        let arc = self.beachline.find(site.x, self.sweep);
        let split = self.beachline.site_of(arc);
        // The split arc either stays as the left half or is detached;
        // capture its parent before new breakpoints rewire the link.
        let parent = self.beachline.node(arc).parent;

        // Any convergence predicted for the split arc is superseded.
        if let Some(id) = self.tracked.remove(&arc) {
            self.circle_events[id].valid = false;
        }

        if split.y == site.y {
            // The new site shares the split arc's sweep position. Sites on
            // equal y arrive left to right, so the new arc lands on the
            // right and a single breakpoint separates the two.
            let edge = self.edges.len();
            self.edges.push(EdgeBuilder::new(split, site));

            let fresh = self.beachline.new_arc(site);
            let bp = self.beachline.new_breakpoint(split, site, edge, arc, fresh);
            self.beachline.replace_in(parent, arc, bp);

            self.pending.push(arc);
            self.pending.push(fresh);
        } else {
            // General case: the split arc is cut in two and the new arc sits
            // between the halves. Both breakpoints trace the same edge in
            // opposite directions; the outer one sees the site pair reversed.
            let edge = self.edges.len();
            self.edges.push(EdgeBuilder::new(site, split));

            let left = self.beachline.new_arc(split);
            let mid = self.beachline.new_arc(site);
            let right = self.beachline.new_arc(split);
            let inner = self.beachline.new_breakpoint(site, split, edge, mid, right);
            let outer = self.beachline.new_breakpoint(split, site, edge, left, inner);
            self.beachline.replace_in(parent, arc, outer);

            self.pending.push(left);
            self.pending.push(right);
        }
    }

    /// Removes a fully converged arc, emitting a Voronoi vertex and its
    /// Delaunay triangle.
    fn handle_circle(&mut self, id: CircleEventId) {
        if !self.circle_events[id].valid {
            return;
        }
        let ev = self.circle_events[id].clone();
        self.tracked.remove(&ev.arc);

        // The prediction named the arc's neighbors at the time it was made;
        // if either walk fails or finds a different site, the event is stale.
        let Some((l_arc, l_bp)) = self.beachline.left_neighbor(ev.arc) else {
            return;
        };
        let Some((r_arc, r_bp)) = self.beachline.right_neighbor(ev.arc) else {
            return;
        };
        if self.beachline.site_of(l_arc) != ev.left_site
            || self.beachline.site_of(r_arc) != ev.right_site
        {
            return;
        }

        let parent = self
            .beachline
            .node(ev.arc)
            .parent
            .expect("converging arc has flanking breakpoints");
        debug_assert!(parent == l_bp || parent == r_bp);
        let survivor = if parent == l_bp { r_bp } else { l_bp };

        let squeezed = self.beachline.breakpoint(parent);
        let sibling = if squeezed.left == ev.arc {
            squeezed.right
        } else {
            squeezed.left
        };

        // Both flanking breakpoints meet at the circumcenter, closing one
        // end of each of their edges.
        let l_edge = self.beachline.breakpoint(l_bp).edge;
        let r_edge = self.beachline.breakpoint(r_bp).edge;
        self.edges[l_edge].add_vertex(ev.center);
        self.edges[r_edge].add_vertex(ev.center);

        self.triangles.push(ev.triangle);

        // The neighbors become adjacent; a new edge grows from the
        // circumcenter between them.
        let edge = self.edges.len();
        self.edges
            .push(EdgeBuilder::with_vertex(ev.left_site, ev.right_site, ev.center));

        // Pull the sibling up over the dead breakpoint and repurpose the
        // surviving one for the new adjacency.
        self.beachline.replace(parent, sibling);
        let bp = self.beachline.breakpoint_mut(survivor);
        bp.left_site = ev.left_site;
        bp.right_site = ev.right_site;
        bp.edge = edge;

        self.pending.push(l_arc);
        self.pending.push(r_arc);
    }

    /// Re-examines arcs whose neighborhood changed: drops their superseded
    /// predictions and checks for new convergences.
    fn process_pending(&mut self) {
        while let Some(arc) = self.pending.pop() {
            if let Some(id) = self.tracked.remove(&arc) {
                self.circle_events[id].valid = false;
            }
            self.check_for_event(arc);
        }
    }

    /// Predicts whether `arc` will be squeezed out by its neighbors.
    fn check_for_event(&mut self, arc: NodeId) {
        let Some((l_arc, _)) = self.beachline.left_neighbor(arc) else {
            return;
        };
        let Some((r_arc, _)) = self.beachline.right_neighbor(arc) else {
            return;
        };

        let left = self.beachline.site_of(l_arc);
        let mid = self.beachline.site_of(arc);
        let right = self.beachline.site_of(r_arc);

        // The flanking breakpoints converge only if the three sites turn
        // strictly counter-clockwise; collinear or clockwise triples diverge.
        if (mid - left).cross(right - left) <= F::zero() {
            return;
        }

        let triangle = Triangle2::new(left, mid, right);
        let Some(center) = triangle.circumcenter() else {
            return;
        };

        // The event fires when the sweep reaches the top of the circumcircle.
        let reach = center.y + center.distance(mid);
        if reach < self.sweep {
            return;
        }

        let id = self.circle_events.len();
        self.circle_events.push(CircleEvent {
            arc,
            left_site: left,
            right_site: right,
            triangle,
            center,
            valid: true,
        });
        self.tracked.insert(arc, id);
        self.queue
            .push(Reverse(SweepEvent::circle(Point2::new(center.x, reach), id)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fortune::EdgeKind;
    use approx::assert_relative_eq;

    fn plus_sites() -> Vec<Point2<f64>> {
        vec![
            Point2::new(-1.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, -1.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 0.0),
        ]
    }

    #[test]
    fn test_empty_input() {
        let diagram = compute_diagram::<f64>(&[]).unwrap();
        assert!(diagram.sites.is_empty());
        assert!(diagram.edges.is_empty());
        assert!(diagram.triangles.is_empty());
    }

    #[test]
    fn test_single_site() {
        let diagram = compute_diagram(&[Point2::new(3.0_f64, 4.0)]).unwrap();
        assert_eq!(diagram.sites, vec![Point2::new(3.0, 4.0)]);
        assert!(diagram.edges.is_empty());
        assert!(diagram.triangles.is_empty());
    }

    #[test]
    fn test_two_sites_single_bisector_line() {
        let diagram =
            compute_diagram(&[Point2::new(1.0_f64, 1.0), Point2::new(1.0, 3.0)]).unwrap();
        assert_eq!(diagram.edges.len(), 1);
        assert!(diagram.triangles.is_empty());

        // The bisector is the horizontal line y = 2.
        let e = &diagram.edges[0];
        assert_eq!(e.kind, EdgeKind::Line);
        assert_eq!(e.location, Point2::new(1.0, 2.0));
        assert_eq!(e.direction.y, 0.0);
    }

    #[test]
    fn test_non_finite_site_rejected() {
        let err = compute_diagram(&[Point2::new(f64::NAN, 0.0)]).unwrap_err();
        assert_eq!(err, FortuneError::NonFiniteSite);

        let err =
            compute_diagram(&[Point2::new(0.0, 0.0), Point2::new(1.0, f64::INFINITY)]).unwrap_err();
        assert_eq!(err, FortuneError::NonFiniteSite);
    }

    #[test]
    fn test_duplicate_sites_collapse() {
        let diagram = compute_diagram(&[
            Point2::new(1.0_f64, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(diagram.sites.len(), 1);
        assert!(diagram.edges.is_empty());

        let with_dupes = compute_diagram(&[
            Point2::new(0.0_f64, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(0.0, 0.0),
        ])
        .unwrap();
        let without = compute_diagram(&[Point2::new(0.0_f64, 0.0), Point2::new(2.0, 0.0)]).unwrap();
        assert_eq!(with_dupes, without);
    }

    #[test]
    fn test_three_sites_fan_of_rays() {
        let diagram = compute_diagram(&[
            Point2::new(0.0_f64, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 2.0),
        ])
        .unwrap();

        assert_eq!(diagram.triangles.len(), 1);
        assert_eq!(diagram.edges.len(), 3);

        // All three edges are rays out of the single Voronoi vertex.
        for e in &diagram.edges {
            assert_eq!(e.kind, EdgeKind::Ray);
            assert_relative_eq!(e.begin.x, 1.0, epsilon = 1e-12);
            assert_relative_eq!(e.begin.y, 0.75, epsilon = 1e-12);
        }

        let center = diagram.triangles[0].circumcenter().unwrap();
        assert_relative_eq!(center.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(center.y, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_plus_pattern_triangles() {
        let diagram = compute_diagram(&plus_sites()).unwrap();
        assert_eq!(diagram.triangles.len(), 4);

        let center = Point2::new(0.0, 0.0);
        let expected = [
            Triangle2::new(Point2::new(-1.0, 0.0), Point2::new(0.0, -1.0), center),
            Triangle2::new(Point2::new(0.0, -1.0), Point2::new(1.0, 0.0), center),
            Triangle2::new(Point2::new(-1.0, 0.0), center, Point2::new(0.0, 1.0)),
            Triangle2::new(Point2::new(0.0, 1.0), center, Point2::new(1.0, 0.0)),
        ];
        for want in &expected {
            assert!(
                diagram.triangles.iter().any(|t| t.same_vertex_set(want)),
                "missing triangle {:?}",
                want
            );
        }
    }

    #[test]
    fn test_plus_pattern_edges() {
        let diagram = compute_diagram(&plus_sites()).unwrap();
        assert_eq!(diagram.edges.len(), 8);

        let segments = diagram
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Segment)
            .count();
        let rays = diagram
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Ray)
            .count();
        assert_eq!(segments, 4);
        assert_eq!(rays, 4);

        // Every finite endpoint is one of the four circumcenters.
        for e in &diagram.edges {
            for p in [e.begin, e.end] {
                if p.is_finite() {
                    assert_relative_eq!(p.x.abs(), 0.5, epsilon = 1e-12);
                    assert_relative_eq!(p.y.abs(), 0.5, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_edge_sites_are_canonically_ordered() {
        let diagram = compute_diagram(&plus_sites()).unwrap();
        for e in &diagram.edges {
            assert_eq!(e.left.cmp_xy(e.right), std::cmp::Ordering::Less);
        }
    }

    #[test]
    fn test_collinear_vertical_sites() {
        let diagram = compute_diagram(&[
            Point2::new(0.0_f64, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(0.0, 2.0),
        ])
        .unwrap();

        assert!(diagram.triangles.is_empty());
        assert_eq!(diagram.edges.len(), 2);
        for e in &diagram.edges {
            assert_eq!(e.kind, EdgeKind::Line);
            assert_eq!(e.direction.y, 0.0);
        }
        let mut ys: Vec<f64> = diagram.edges.iter().map(|e| e.location.y).collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(ys, vec![0.5, 1.5]);
    }

    #[test]
    fn test_collinear_horizontal_sites() {
        let diagram = compute_diagram(&[
            Point2::new(0.0_f64, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ])
        .unwrap();

        assert!(diagram.triangles.is_empty());
        assert_eq!(diagram.edges.len(), 2);
        for e in &diagram.edges {
            assert_eq!(e.kind, EdgeKind::Line);
            assert_eq!(e.direction.x, 0.0);
        }
        let mut xs: Vec<f64> = diagram.edges.iter().map(|e| e.location.x).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(xs, vec![0.5, 1.5]);
    }

    #[test]
    fn test_deterministic() {
        let sites: Vec<Point2<f64>> = (0..20)
            .map(|i| {
                let t = i as f64;
                Point2::new((t * 7.31).sin() * 10.0, (t * 3.77).cos() * 10.0)
            })
            .collect();
        let first = compute_diagram(&sites).unwrap();
        let second = compute_diagram(&sites).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_voronoi_vertices_are_equidistant() {
        let sites: Vec<Point2<f64>> = (0..12)
            .map(|i| {
                let t = i as f64;
                Point2::new((t * 2.13).sin() * 5.0, (t * 5.41).cos() * 5.0)
            })
            .collect();
        let diagram = compute_diagram(&sites).unwrap();
        assert!(!diagram.triangles.is_empty());

        for t in &diagram.triangles {
            let c = t.circumcenter().unwrap();
            let d = c.distance(t.a);
            assert_relative_eq!(c.distance(t.b), d, epsilon = 1e-6);
            assert_relative_eq!(c.distance(t.c), d, epsilon = 1e-6);

            // The circumcircle is empty of all other sites.
            for &s in &diagram.sites {
                assert!(c.distance(s) > d - 1e-6, "site {:?} inside circumcircle", s);
            }
        }
    }

    #[test]
    fn test_segment_endpoints_lie_on_the_bisector() {
        let diagram = compute_diagram(&plus_sites()).unwrap();
        for e in &diagram.edges {
            for p in [e.begin, e.end] {
                if p.is_finite() {
                    assert_relative_eq!(p.distance(e.left), p.distance(e.right), epsilon = 1e-9);
                }
            }
        }
    }
}
