use num_complex::Complex64;

use crate::error::GrpfError;
use crate::point::Point;

/// Affine map from the user's bounding box onto the triangulation library's
/// coordinate window `[min_coord, max_coord]`.
///
/// `x ↦ ra·x + rb`, `y ↦ ia·y + ib`. Both axis gains are positive, so the
/// map preserves orientation; contours walked counterclockwise in the scaled
/// plane are counterclockwise around the user's roots and poles as well.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Scaling {
    ra: f64,
    rb: f64,
    ia: f64,
    ib: f64,
    min_coord: f64,
    max_coord: f64,
}

/// Slack for the post-map containment check. Mapping the extreme seed back
/// onto `max_coord` can overshoot by a couple of ulps.
const RANGE_SLACK: f64 = 1.0e-12;

impl Scaling {
    /// Derives the map from the raw seed points and the coordinate window
    /// reported by the triangulation backend.
    pub fn from_seeds(
        seeds: &[Complex64],
        min_coord: f64,
        max_coord: f64,
    ) -> Result<Self, GrpfError> {
        if seeds.len() < 3 {
            return Err(GrpfError::TooFewSeeds(seeds.len()));
        }
        let mut rmin = f64::INFINITY;
        let mut rmax = f64::NEG_INFINITY;
        let mut imin = f64::INFINITY;
        let mut imax = f64::NEG_INFINITY;
        for z in seeds {
            rmin = rmin.min(z.re);
            rmax = rmax.max(z.re);
            imin = imin.min(z.im);
            imax = imax.max(z.im);
        }
        // Also rejects seeds with NaN components: the comparisons above
        // leave the extents infinite.
        if !(rmax - rmin).is_finite()
            || !(imax - imin).is_finite()
            || rmax <= rmin
            || imax <= imin
        {
            return Err(GrpfError::DegenerateMesh);
        }

        let w = max_coord - min_coord;
        let ra = w / (rmax - rmin);
        let ia = w / (imax - imin);
        Ok(Self {
            ra,
            rb: max_coord - ra * rmax,
            ia,
            ib: max_coord - ia * imax,
            min_coord,
            max_coord,
        })
    }

    /// Maps a point of the user's domain into the triangulation window.
    pub fn to_mesh(&self, z: Complex64) -> Point {
        Point::new(self.ra * z.re + self.rb, self.ia * z.im + self.ib)
    }

    /// Inverse of [`Scaling::to_mesh`]; used whenever the function is
    /// evaluated at a mesh node and when centroids are returned to the
    /// caller.
    pub fn to_domain(&self, p: Point) -> Complex64 {
        Complex64::new((p.x - self.rb) / self.ra, (p.y - self.ib) / self.ia)
    }

    /// Containment check for mapped seeds. Coordinates a hair outside the
    /// window from rounding are snapped back in; anything further out is a
    /// precondition failure.
    pub fn check_range(&self, p: Point) -> Result<Point, GrpfError> {
        let clip = |v: f64| -> Option<f64> {
            if v >= self.min_coord && v <= self.max_coord {
                Some(v)
            } else if v >= self.min_coord - RANGE_SLACK && v <= self.max_coord + RANGE_SLACK {
                Some(v.clamp(self.min_coord, self.max_coord))
            } else {
                // Catches NaN as well: both window tests above are false.
                None
            }
        };
        match (clip(p.x), clip(p.y)) {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => Err(GrpfError::CoordinateOutOfRange {
                x: p.x,
                y: p.y,
                min: self.min_coord,
                max: self.max_coord,
            }),
        }
    }
}
