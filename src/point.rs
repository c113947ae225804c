#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use num_complex::Complex64;
use std::{
    fmt::{Display, Formatter},
    ops::{Add, Mul, Sub},
};

/// A point of the scaled triangulation plane.
///
/// All geometric predicates of the engine (edge lengths, tolerance
/// comparisons, skinniness ratios) operate on these scaled coordinates; the
/// user's function is only ever evaluated after mapping back through
/// [`Scaling::to_domain`](crate::scaling::Scaling::to_domain).
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
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

    pub fn distance(&self, other: Self) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    pub fn to_complex(self) -> Complex64 {
        Complex64::new(self.x, self.y)
    }

    pub fn from_complex(z: Complex64) -> Self {
        Self { x: z.re, y: z.im }
    }
}

/// Centroid of the triangle spanned by `a`, `b` and `c`.
pub fn centroid(a: Point, b: Point, c: Point) -> Point {
    Point {
        x: (a.x + b.x + c.x) / 3.0,
        y: (a.y + b.y + c.y) / 3.0,
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
impl quickcheck::Arbitrary for Point {
    fn arbitrary(g: &mut quickcheck::Gen) -> Point {
        // Stay well inside the range where distance computations are exact
        // enough for the property tests.
        let coord = |g: &mut quickcheck::Gen| loop {
            let f = f64::arbitrary(g);
            if f.is_finite() && f.abs() < 1.0e6 {
                break f;
            }
        };
        Point {
            x: coord(g),
            y: coord(g),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_and_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 0.0);
        assert_eq!(a.midpoint(b), Point::new(1.0, 0.0));
        assert_eq!(a.distance(b), 2.0);
    }

    #[test]
    fn triangle_centroid() {
        let c = centroid(
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(0.0, 3.0),
        );
        assert_eq!(c, Point::new(1.0, 1.0));
    }

    #[quickcheck]
    fn distance_is_symmetric(a: Point, b: Point) -> bool {
        a.distance(b) == b.distance(a)
    }

    #[test]
    fn complex_round_trip() {
        let p = Point::new(1.5, -0.25);
        assert_eq!(Point::from_complex(p.to_complex()), p);
    }
}
