//! Structures derived from the sweep output: the Delaunay triangulation and
//! bounded Voronoi cell polygons.

mod delaunay;
mod voronoi;

pub use delaunay::extract_delaunay;
pub use voronoi::{build_voronoi_cells, VoronoiCell};
