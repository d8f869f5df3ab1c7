//! Incremental planar Delaunay triangulation and Voronoi diagrams on a
//! quad-edge data structure (Guibas & Stolfi).
//!
//! ```
//! use qeds_voronoi::{Point, Triangulation};
//!
//! let mut triangulation = Triangulation::new();
//! for &(x, y) in &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)] {
//!     triangulation.insert_point(Point::new(x, y));
//! }
//! assert_eq!(triangulation.compute_triangles().len(), 2);
//! assert_eq!(triangulation.compute_edges().len(), 5);
//! assert_eq!(triangulation.compute_voronoi().len(), 4);
//! ```
pub mod delaunay;
pub mod point;
pub mod predicates;
pub mod qeds;

pub use delaunay::{CircumcenterRounding, Triangulation, VertexIndex};
pub use point::Point;
