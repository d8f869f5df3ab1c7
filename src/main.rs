//! Scatter random points over a canvas, triangulate them and report the
//! Voronoi cells, the way a drawing front end would consume them.
//!
//! Usage: `qeds-voronoi [count] [seed]`. Set `RUST_LOG=debug` to see the
//! engine's own log output.
use qeds_voronoi::{Point, Triangulation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CANVAS: f64 = 1000.0;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let count: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(64);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut triangulation = Triangulation::new();
    for _ in 0..count {
        let point = Point::new(rng.gen_range(0.0..CANVAS), rng.gen_range(0.0..CANVAS));
        triangulation.insert_point(point);
    }

    let triangles = triangulation.compute_triangles();
    let edges = triangulation.compute_edges();
    let cells = triangulation.compute_voronoi();
    log::info!(
        "{} points, {} edges, {} triangles, {} cells",
        triangulation.num_vertices(),
        edges.len(),
        triangles.len(),
        cells.len()
    );

    // One polygon per line, ready for a smoothing or drawing stage.
    for cell in cells.iter() {
        let corners: Vec<String> = cell.iter().map(|p| p.to_string()).collect();
        println!("{}", corners.join(" "));
    }
}
