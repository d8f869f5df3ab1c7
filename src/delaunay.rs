//! Incremental Delaunay triangulation and its dual Voronoi diagram.
//!
//! Points are inserted one at a time into a triangulation that is kept
//! enclosed by a quadrilateral of four sentinel corners. The sentinels
//! stand in for the unbounded outer face: everything touching them is
//! filtered out again when edges, triangles or Voronoi cells are extracted.
use crate::point::*;
use crate::predicates::*;
use crate::qeds::*;
#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// An offset into the vertices vector.
pub type VertexIndex = usize;

/// The sentinel corners take up the first vertex slots, in the order lower
/// left, lower right, upper right, upper left.
const SENTINELS: VertexIndex = 4;

/// How Voronoi vertices are rounded once computed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum CircumcenterRounding {
    /// Drop the fractional part of each coordinate. Cells come out snapped
    /// to the integer grid.
    Truncate,
    /// Keep full `f64` precision.
    Full,
}

impl Default for CircumcenterRounding {
    fn default() -> Self {
        Self::Truncate
    }
}

/// Raw extent of the inserted points. Empty (min above max) until the first
/// point arrives.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Extent {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Extent {
    const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    fn extend(&self, p: Point) -> Self {
        Self {
            min_x: self.min_x.min(p.x),
            min_y: self.min_y.min(p.y),
            max_x: self.max_x.max(p.x),
            max_y: self.max_y.max(p.y),
        }
    }

    fn union(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// A Delaunay triangulation built by incremental insertion on a [`Qeds`].
///
/// Primal darts carry the index of their origin vertex. Dual darts carry the
/// circumcenter of the face they originate from, filled in on demand by
/// [`Triangulation::compute_voronoi`].
#[derive(Clone, Debug)]
pub struct Triangulation {
    /// The quad-edge data structure we use as the basis for the triangulation.
    pub qeds: Qeds<VertexIndex, Option<Point>>,
    vertices: Vec<Point>,
    /// Where the next location walk begins. Always has the most recently
    /// inserted vertex as its destination.
    starting_edge: EdgeTarget,
    /// Extent of the inserted points.
    extent: Extent,
    /// The box the sentinel corners were last built around. Always covers
    /// `extent`.
    frame: Extent,
    rounding: CircumcenterRounding,
    /// Set whenever the topology or the sentinel positions change, so that
    /// any circumcenters cached in the dual darts are out of date.
    stale_circumcenters: bool,
}

impl Default for Triangulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Triangulation {
    /// An empty triangulation. The four sentinel corners all start at the
    /// origin and only spread out once the first point is inserted.
    pub fn new() -> Self {
        let mut qeds = Qeds::new();
        let ab = qeds.make_edge_with_a(0, 1).target();
        let bc = qeds.make_edge_with_a(1, 2).target();
        let cd = qeds.make_edge_with_a(2, 3).target();
        let da = qeds.make_edge_with_a(3, 0).target();
        qeds.splice(ab.sym(), bc);
        qeds.splice(bc.sym(), cd);
        qeds.splice(cd.sym(), da);
        qeds.splice(da.sym(), ab);
        Self {
            qeds,
            vertices: vec![Point::default(); SENTINELS],
            starting_edge: ab,
            extent: Extent::EMPTY,
            frame: Extent::EMPTY,
            rounding: CircumcenterRounding::default(),
            stale_circumcenters: false,
        }
    }

    pub fn with_circumcenter_rounding(mut self, rounding: CircumcenterRounding) -> Self {
        self.set_circumcenter_rounding(rounding);
        self
    }

    pub fn set_circumcenter_rounding(&mut self, rounding: CircumcenterRounding) {
        if self.rounding != rounding {
            self.rounding = rounding;
            self.stale_circumcenters = true;
        }
    }

    pub fn circumcenter_rounding(&self) -> CircumcenterRounding {
        self.rounding
    }

    /// Move the sentinel corners so that they enclose the given box with a
    /// wide margin. The box is first widened to cover every point inserted
    /// so far, so no vertex can end up outside the corners.
    pub fn set_bounding_box(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) {
        let requested = Extent {
            min_x,
            min_y,
            max_x,
            max_y,
        };
        self.resize_sentinels(requested.union(&self.extent));
    }

    /// Each axis of `frame` is grown by one unit on both sides and then
    /// scaled by ten about its centre. Only the corner coordinates change,
    /// the sentinel edges keep their topology.
    fn resize_sentinels(&mut self, frame: Extent) {
        self.frame = frame;
        let center_x = (frame.min_x + frame.max_x) / 2.0;
        let center_y = (frame.min_y + frame.max_y) / 2.0;
        let x_min = (frame.min_x - center_x - 1.0) * 10.0 + center_x;
        let x_max = (frame.max_x - center_x + 1.0) * 10.0 + center_x;
        let y_min = (frame.min_y - center_y - 1.0) * 10.0 + center_y;
        let y_max = (frame.max_y - center_y + 1.0) * 10.0 + center_y;

        self.vertices[0] = Point::new(x_min, y_min);
        self.vertices[1] = Point::new(x_max, y_min);
        self.vertices[2] = Point::new(x_max, y_max);
        self.vertices[3] = Point::new(x_min, y_max);
        self.stale_circumcenters = true;
        log::debug!(
            "bounding box resized to ({}, {})-({}, {})",
            x_min,
            y_min,
            x_max,
            y_max
        );
    }

    /// The smallest and largest coordinates of the inserted points, or `None`
    /// if nothing has been inserted.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        if self.extent.is_empty() {
            None
        } else {
            Some((
                Point::new(self.extent.min_x, self.extent.min_y),
                Point::new(self.extent.max_x, self.extent.max_y),
            ))
        }
    }

    /// Current positions of the sentinel corners: lower left, lower right,
    /// upper right, upper left.
    pub fn sentinel_corners(&self) -> [Point; 4] {
        [
            self.vertices[0],
            self.vertices[1],
            self.vertices[2],
            self.vertices[3],
        ]
    }

    /// The inserted points, without duplicates, in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.vertices[SENTINELS..].iter().copied()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len() - SENTINELS
    }

    pub fn is_sentinel(&self, index: VertexIndex) -> bool {
        index < SENTINELS
    }

    fn org(&self, e: EdgeTarget) -> Point {
        self.vertices[self.qeds.edge_a(e).point]
    }

    fn dest(&self, e: EdgeTarget) -> Point {
        self.org(e.sym())
    }

    fn lies_right(&self, e: EdgeTarget, point: Point) -> bool {
        is_right_of(self.org(e), self.dest(e), point)
    }

    /// Find an edge of the triangle containing `point`, or an edge with
    /// `point` as one of its endpoints.
    ///
    /// Returns `None` for a point with a non-finite coordinate and for one
    /// outside the sentinel corners, which only insertion may move.
    pub fn locate(&self, point: Point) -> Option<EdgeRefA<'_, VertexIndex, Option<Point>>> {
        if !point.is_finite() || !self.inside_sentinels(point) {
            return None;
        }
        Some(self.qeds.edge_a_ref(self.locate_target(point)))
    }

    fn inside_sentinels(&self, point: Point) -> bool {
        let [lower_left, _, upper_right, _] = self.sentinel_corners();
        point.x > lower_left.x
            && point.x < upper_right.x
            && point.y > lower_left.y
            && point.y < upper_right.y
    }

    // Walks by orientation tests alone. This relies on every triangle being
    // reachable from the starting edge, which insertion maintains, and on
    // the point lying strictly inside the sentinel corners.
    fn locate_target(&self, point: Point) -> EdgeTarget {
        let mut e = self.starting_edge;
        loop {
            if point == self.org(e) || point == self.dest(e) {
                break e;
            }
            let onext = self.qeds.edge_a_ref(e).onext().target();
            let d_prev = self.qeds.edge_a_ref(e).d_prev().target();
            if self.lies_right(e, point) {
                e = e.sym();
            } else if !self.lies_right(onext, point) {
                e = onext;
            } else if !self.lies_right(d_prev, point) {
                e = d_prev;
            } else {
                break e;
            }
        }
    }

    /// Insert a point and restore the Delaunay property around it.
    ///
    /// Inserting a point that is already present does nothing. Points with
    /// a non-finite coordinate are rejected, as no walk can ever reach them.
    /// The sentinel corners move outwards first if the point is outside the
    /// box they were built around.
    pub fn insert_point(&mut self, point: Point) {
        if !point.is_finite() {
            log::warn!("ignoring non-finite point {}", point);
            return;
        }
        if !self.frame.contains(point) {
            self.resize_sentinels(self.frame.extend(point));
        }
        let mut e = self.locate_target(point);

        if point == self.org(e) || point == self.dest(e) {
            log::trace!("{} is already in the triangulation", point);
            return;
        }
        self.extent = self.extent.extend(point);

        // The point sits on an existing edge. Remove it so that the two
        // triangles either side become one quadrilateral for the fan below.
        if is_on_line(self.org(e), self.dest(e), point) {
            e = self.qeds.edge_a_ref(e).oprev().target();
            let on_edge = self.qeds.edge_a_ref(e).onext().target();
            self.qeds.delete(on_edge);
            log::trace!("{} lies on an edge, removed it", point);
        }

        // Connect the new point to every corner of the enclosing polygon.
        let new_index = self.vertices.len();
        self.vertices.push(point);
        let first_index = self.qeds.edge_a(e).point;
        let mut base = self.qeds.make_edge_with_a(first_index, new_index).target();
        self.qeds.splice(base, e);
        self.starting_edge = base;
        loop {
            base = self.qeds.connect(e, base.sym()).target();
            e = self.qeds.edge_a_ref(base).oprev().target();
            if self.qeds.edge_a_ref(e).l_next().target() == self.starting_edge {
                break;
            }
        }

        let swaps = self.retriangulate_suspect_edges(e, point);
        self.stale_circumcenters = true;
        log::trace!("inserted {} with {} swaps", point, swaps);
    }

    /// Walk the edges opposite the new point and flip every one that fails
    /// the in-circle test. A flip exposes two new suspect edges, which are
    /// examined before moving on around the fan.
    fn retriangulate_suspect_edges(&mut self, mut e: EdgeTarget, point: Point) -> usize {
        let mut swaps = 0;
        loop {
            let t = self.qeds.edge_a_ref(e).oprev().target();
            let t_dest = self.dest(t);
            if self.lies_right(e, t_dest) && in_circle(self.org(e), t_dest, self.dest(e), point) {
                self.qeds.swap(e);
                swaps += 1;
                e = self.qeds.edge_a_ref(e).oprev().target();
            } else if self.qeds.edge_a_ref(e).onext().target() == self.starting_edge {
                break swaps;
            } else {
                e = self.qeds.edge_a_ref(e).onext().l_prev().target();
            }
        }
    }

    /// Reset every mark, then mark each primal dart that leaves a sentinel
    /// corner. A quad joining a real point to a sentinel ends up with exactly
    /// one of its two darts marked.
    fn mark_sentinel_edges(&mut self) {
        for (_, quad) in self.qeds.quads.iter_mut() {
            for edge in quad.edges_a.iter_mut() {
                edge.mark = edge.point < SENTINELS;
            }
            for edge in quad.edges_b.iter_mut() {
                edge.mark = false;
            }
        }
    }

    /// Every edge between two inserted points, as (origin, destination).
    pub fn compute_edges(&mut self) -> Vec<(Point, Point)> {
        self.mark_sentinel_edges();
        self.qeds
            .quads
            .iter()
            .filter(|(_, quad)| !quad.edges_a[0].mark && !quad.edges_a[1].mark)
            .map(|(_, quad)| {
                (
                    self.vertices[quad.edges_a[0].point],
                    self.vertices[quad.edges_a[1].point],
                )
            })
            .collect()
    }

    /// Every triangle whose corners are all inserted points, each listed
    /// once with its corners in counter-clockwise order.
    pub fn compute_triangles(&mut self) -> Vec<(Point, Point, Point)> {
        self.mark_sentinel_edges();
        let targets: Vec<EdgeTarget> = self.qeds.base_targets().collect();
        let mut triangles = Vec::new();
        for q in targets {
            for &side in &[q, q.sym()] {
                if let Some(triangle) = self.unmarked_left_triangle(side) {
                    triangles.push(triangle);
                }
            }
            self.qeds.edge_a_mut(q).mark = true;
            self.qeds.edge_a_mut(q.sym()).mark = true;
        }
        triangles
    }

    fn unmarked_left_triangle(&self, e: EdgeTarget) -> Option<(Point, Point, Point)> {
        let q1 = self.qeds.edge_a_ref(e);
        let q2 = q1.l_next();
        let q3 = q2.l_next();
        if q1.edge().mark || q2.edge().mark || q3.edge().mark {
            return None;
        }
        debug_assert_eq!(q3.l_next(), q1, "face is not a triangle");
        Some((
            self.vertices[q1.edge().point],
            self.vertices[q2.edge().point],
            self.vertices[q3.edge().point],
        ))
    }

    /// One Voronoi cell per inserted point. Each cell lists the circumcenters
    /// of the triangles around its point, in the counter-clockwise order
    /// they are met walking around that point.
    ///
    /// Cells of points near the hull reach out to circumcenters of
    /// triangles that have a sentinel corner, so they are closed but can be
    /// very large.
    pub fn compute_voronoi(&mut self) -> Vec<Vec<Point>> {
        if self.stale_circumcenters {
            self.clear_circumcenters();
        }
        self.mark_sentinel_edges();
        let targets: Vec<EdgeTarget> = self.qeds.base_targets().collect();
        let mut cells = Vec::new();
        for q in targets {
            for &start in &[q, q.sym()] {
                if self.qeds.edge_a(start).mark {
                    continue;
                }
                let mut cell = Vec::new();
                let mut region = start;
                loop {
                    self.qeds.edge_a_mut(region).mark = true;
                    cell.push(self.circumcenter_of(region));
                    region = self.qeds.edge_a(region).next;
                    if region == start {
                        break;
                    }
                }
                cells.push(cell);
            }
        }
        cells
    }

    /// The circumcenter of the triangle to the left of `e`. It is stored in
    /// the dual darts of that face the first time it is asked for.
    fn circumcenter_of(&mut self, e: EdgeTarget) -> Point {
        if let Some(centre) = self.qeds.edge_b(e.inv_rot()).point {
            return centre;
        }
        let q1 = self.qeds.edge_a_ref(e);
        let q2 = q1.l_next();
        let q3 = q2.l_next();
        let face = [q1.target(), q2.target(), q3.target()];
        let centre = circumcenter(
            self.vertices[q1.edge().point],
            self.vertices[q2.edge().point],
            self.vertices[q3.edge().point],
        );
        let centre = match self.rounding {
            CircumcenterRounding::Truncate => centre.trunc(),
            CircumcenterRounding::Full => centre,
        };
        for side in face.iter() {
            self.qeds.edge_b_mut(side.inv_rot()).point = Some(centre);
        }
        centre
    }

    fn clear_circumcenters(&mut self) {
        for (_, quad) in self.qeds.quads.iter_mut() {
            for edge in quad.edges_b.iter_mut() {
                edge.point = None;
            }
        }
        self.stale_circumcenters = false;
        log::debug!("cleared cached circumcenters");
    }
}

pub fn to_letter(i: usize) -> char {
    (b'a' + (i % 26) as u8) as char
}

/// Names a dart after its quad's letter, with the rotation as a suffix:
/// `b`, `b.rot`, `b.sym`, `b.invRot`.
pub fn to_edge_name(target: EdgeTarget) -> String {
    let suffix = match target.r {
        1 => ".rot",
        2 => ".sym",
        3 => ".invRot",
        _ => "",
    };
    format!("{}{}", to_letter(target.e), suffix)
}

pub fn to_vertex_name(i: VertexIndex) -> String {
    if i < SENTINELS {
        format!("S{}", i)
    } else {
        format!("P{}", i - SENTINELS)
    }
}

#[cfg(feature = "serialize")]
impl Triangulation {
    /// Two tables for eyeballing the arena: one column per quad with the
    /// `onext` of each of its darts and its endpoints, then every vertex
    /// with its coordinates.
    pub fn debug_table(&self) -> String {
        use prettytable::{Cell, Row, Table};

        let mut rows: Vec<Vec<Cell>> = [
            "quad",
            "onext",
            "rot.onext",
            "sym.onext",
            "invRot.onext",
            "org",
            "dest",
        ]
        .iter()
        .map(|label| vec![Cell::new(label)])
        .collect();
        for (i, quad) in self.qeds.quads.iter() {
            let column = [
                to_letter(i).to_string(),
                to_edge_name(quad.edges_a[0].next),
                to_edge_name(quad.edges_b[0].next),
                to_edge_name(quad.edges_a[1].next),
                to_edge_name(quad.edges_b[1].next),
                to_vertex_name(quad.edges_a[0].point),
                to_vertex_name(quad.edges_a[1].point),
            ];
            for (row, text) in rows.iter_mut().zip(column.iter()) {
                row.push(Cell::new(text));
            }
        }
        let quads = Table::init(rows.into_iter().map(Row::new).collect());

        let vertices = Table::init(
            self.vertices
                .iter()
                .enumerate()
                .map(|(i, point)| {
                    Row::new(vec![
                        Cell::new(&to_vertex_name(i)),
                        Cell::new(&point.to_string()),
                    ])
                })
                .collect(),
        );

        format!("{}\n{}", quads, vertices)
    }
}
