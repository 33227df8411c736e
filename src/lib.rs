//! fortune2d - Voronoi diagrams and Delaunay triangulations in the plane.
//!
//! The core is Fortune's sweep-line algorithm: an event-driven pass over the
//! input sites that grows the Voronoi edge set and the dual Delaunay triangle
//! set in a single sweep. Post-processing steps turn the raw sweep output into
//! a canonically-wound triangulation and into bounded per-site cell polygons.
//!
//! # Example
//!
//! ```
//! use fortune2d::{compute_diagram, extract_delaunay, Point2};
//!
//! let sites: Vec<Point2<f64>> = vec![
//!     Point2::new(-1.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(0.0, -1.0),
//!     Point2::new(0.0, 1.0),
//!     Point2::new(0.0, 0.0),
//! ];
//!
//! let diagram = compute_diagram(&sites).unwrap();
//! let triangles = extract_delaunay(&diagram);
//! assert_eq!(triangles.len(), 4);
//! ```

pub mod bounds;
pub mod error;
pub mod fortune;
pub mod polygon;
pub mod primitives;
pub mod triangulation;

pub use bounds::Aabb2;
pub use error::FortuneError;
pub use fortune::{compute_diagram, Diagram, Edge, EdgeKind};
pub use polygon::Polygon;
pub use primitives::{Point2, Triangle2, Vec2};
pub use triangulation::{build_voronoi_cells, extract_delaunay, VoronoiCell};
