#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
#[cfg(test)]
use quickcheck::{Arbitrary, Gen};
use std::{
    fmt::{Display, Formatter},
    ops::{Add, Mul, Sub},
};

/// A point in the plane. Two points are the same point only if both
/// coordinates compare exactly equal.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Squared distance from the origin, the lifting used by the in-circle
    /// determinant.
    pub fn norm_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Drop the fractional part of both coordinates.
    pub fn trunc(self) -> Self {
        Self {
            x: self.x.trunc(),
            y: self.y.trunc(),
        }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
        }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

#[cfg(test)]
impl From<Point> for robust::Coord<f64> {
    fn from(s: Point) -> robust::Coord<f64> {
        robust::Coord { x: s.x, y: s.y }
    }
}

/// A point on a small integer lattice. Every coordinate, and every product
/// the predicates form from them, is exactly representable in an `f64`, so
/// properties tested on these points are not at the mercy of rounding.
#[cfg(test)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridPoint(pub Point);

#[cfg(test)]
impl GridPoint {
    pub const EXTENT: i16 = 64;
}

#[cfg(test)]
impl Arbitrary for GridPoint {
    fn arbitrary(g: &mut Gen) -> Self {
        let x = i16::arbitrary(g) % Self::EXTENT;
        let y = i16::arbitrary(g) % Self::EXTENT;
        GridPoint(Point::new(x as f64, y as f64))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let x = self.0.x as i16;
        let y = self.0.y as i16;
        Box::new(
            (x, y)
                .shrink()
                .map(|(x, y)| GridPoint(Point::new(x as f64, y as f64))),
        )
    }
}
