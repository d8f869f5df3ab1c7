//! Plain floating point geometric predicates.
//!
//! Nothing here is exact. Near-collinear triples and near-cocircular
//! quadruples can be misclassified by rounding; callers that need
//! guarantees have to bring their own adaptive-precision kernel.
use crate::point::*;

#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum Direction {
    Left,
    Straight,
    Right,
}

/// Twice the signed area of the triangle a, b, c. Positive when a→b→c turns
/// counter-clockwise.
fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (a.x - b.x) * (b.y - c.y) - (a.y - b.y) * (b.x - c.x)
}

/// Does c lie to the left or the right (or is collinear) of the line formed
/// by a and b.
pub fn left_or_right(a: Point, b: Point, c: Point) -> Direction {
    let r = orientation(a, b, c);
    if r > 0.0 {
        Direction::Left
    } else if r == 0.0 {
        Direction::Straight
    } else {
        Direction::Right
    }
}

/// True if a, b and c turn counter-clockwise. Collinear triples are not.
pub fn is_ccw(a: Point, b: Point, c: Point) -> bool {
    orientation(a, b, c) > 0.0
}

/// True if p lies strictly to the right of the directed line org→dest.
pub fn is_right_of(org: Point, dest: Point, p: Point) -> bool {
    is_ccw(p, dest, org)
}

/// True if p is exactly collinear with org and dest (zero cross product).
/// Says nothing about whether p lies between them.
pub fn is_on_line(org: Point, dest: Point, p: Point) -> bool {
    (p.x - org.x) * (p.y - dest.y) == (p.y - org.y) * (p.x - dest.x)
}

fn det33(m: [f64; 9]) -> f64 {
    m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
        + m[2] * (m[3] * m[7] - m[4] * m[6])
}

/// The Delaunay criterion: is d strictly inside the circle through the
/// counter-clockwise triangle a, b, c.
///
/// ```text
///     |d² dx dy 1|
///     |a² ax ay 1|
/// det |b² bx by 1| < 0
///     |c² cx cy 1|
/// ```
///
/// A point exactly on the circle is not inside.
pub fn in_circle(a: Point, b: Point, c: Point, d: Point) -> bool {
    let a2 = a.norm_squared();
    let b2 = b.norm_squared();
    let c2 = c.norm_squared();
    let d2 = d.norm_squared();

    let mut det44 = 0.0;
    det44 += d2 * det33([a.x, a.y, 1.0, b.x, b.y, 1.0, c.x, c.y, 1.0]);
    det44 -= d.x * det33([a2, a.y, 1.0, b2, b.y, 1.0, c2, c.y, 1.0]);
    det44 += d.y * det33([a2, a.x, 1.0, b2, b.x, 1.0, c2, c.x, 1.0]);
    det44 -= det33([a2, a.x, a.y, b2, b.x, b.y, c2, c.x, c.y]);

    det44 < 0.0
}

/// Centre of the circle through p0, p1 and p2, found by intersecting the
/// perpendicular bisectors. Collinear input yields non-finite coordinates.
pub fn circumcenter(p0: Point, p1: Point, p2: Point) -> Point {
    let e = p1 - p0;
    // Direction of the bisector of p1 and p2.
    let n = Point::new(p2.y - p1.y, p1.x - p2.x);
    let d = (p0 - p2) * 0.5;
    let s = (e.x * d.x + e.y * d.y) / (e.x * n.x + e.y * n.y);
    p1.midpoint(p2) + n * s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::GridPoint;
    use quickcheck_macros::quickcheck;

    #[test]
    fn orientation_signs() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(0.0, 1.0);
        assert!(is_ccw(a, b, c));
        assert!(!is_ccw(a, c, b));
        assert!(!is_ccw(a, b, Point::new(2.0, 0.0)));
        assert_eq!(left_or_right(a, b, c), Direction::Left);
        assert_eq!(left_or_right(a, b, Point::new(0.5, -1.0)), Direction::Right);
        assert_eq!(left_or_right(a, b, Point::new(7.0, 0.0)), Direction::Straight);
    }

    #[test]
    fn right_of() {
        let org = Point::new(0.0, 0.0);
        let dest = Point::new(0.0, 10.0);
        assert!(is_right_of(org, dest, Point::new(1.0, 5.0)));
        assert!(!is_right_of(org, dest, Point::new(-1.0, 5.0)));
        assert!(!is_right_of(org, dest, Point::new(0.0, 5.0)));
    }

    #[test]
    fn on_line() {
        let org = Point::new(0.0, 0.0);
        let dest = Point::new(4.0, 2.0);
        assert!(is_on_line(org, dest, Point::new(2.0, 1.0)));
        // Beyond the segment still counts, the test is against the line.
        assert!(is_on_line(org, dest, Point::new(8.0, 4.0)));
        assert!(!is_on_line(org, dest, Point::new(2.0, 1.5)));
    }

    #[test]
    fn right_triangle_circle() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(4.0, 0.0);
        let c = Point::new(0.0, 3.0);
        assert!(in_circle(a, b, c, Point::new(1.0, 1.0)));
        assert!(in_circle(a, b, c, Point::new(2.0, 1.5)));
        assert!(!in_circle(a, b, c, Point::new(100.0, 100.0)));
        assert!(!in_circle(a, b, c, Point::new(-1.0, -1.0)));
        // On the circle is not inside.
        assert!(!in_circle(a, b, c, Point::new(4.0, 3.0)));
    }

    #[test]
    fn right_triangle_circumcenter() {
        let centre = circumcenter(
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 3.0),
        );
        assert_eq!(centre, Point::new(2.0, 1.5));
        // The order of the vertices does not matter.
        let centre = circumcenter(
            Point::new(0.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
        );
        assert_eq!(centre, Point::new(2.0, 1.5));
    }

    #[test]
    fn collinear_circumcenter_is_not_finite() {
        let centre = circumcenter(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        );
        assert!(!centre.is_finite());
    }

    #[quickcheck]
    fn orientation_matches_robust(a: GridPoint, b: GridPoint, c: GridPoint) -> bool {
        let (a, b, c) = (a.0, b.0, c.0);
        let exact = robust::orient2d::<f64>(a.into(), b.into(), c.into());
        let expected = if exact > 0.0 {
            Direction::Left
        } else if exact == 0.0 {
            Direction::Straight
        } else {
            Direction::Right
        };
        left_or_right(a, b, c) == expected
    }

    #[quickcheck]
    fn in_circle_matches_robust(a: GridPoint, b: GridPoint, c: GridPoint, d: GridPoint) -> bool {
        let (a, b, c, d) = (a.0, b.0, c.0, d.0);
        if !is_ccw(a, b, c) {
            return true;
        }
        let exact = robust::incircle::<f64>(a.into(), b.into(), c.into(), d.into());
        in_circle(a, b, c, d) == (exact > 0.0)
    }
}
