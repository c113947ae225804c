//! Discretized Cauchy argument principle.
//!
//! Along a closed region boundary the function's value hops between
//! quadrants; summing those hops counts how often the value winds around
//! the origin. Regions are walked counterclockwise, so the winding number
//! is the plain forward sum divided by four: positive means the region
//! encloses a zero, negative a pole.

use crate::contour::Region;
use crate::point::Point;
use crate::quadrant::Quadrant;
use crate::tess::Tessellation;

/// A region classified by its winding number, with the arithmetic mean of
/// its boundary vertices (scaled coordinates) as location estimate.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedRegion {
    pub winding: i32,
    pub center: Point,
}

fn quadrant_step(from: Quadrant, to: Quadrant) -> i32 {
    match to as i32 - from as i32 {
        // Wrap-around between the fourth and first quadrants.
        3 => -1,
        -3 => 1,
        // A two-quadrant hop is ambiguous (could have gone either way
        // around); it carries no usable information and is discarded.
        2 | -2 => 0,
        d => d,
    }
}

/// Classifies every walked region. Regions with winding zero (including any
/// degenerate ones the walker may emit) are dropped.
pub fn classify_regions<T: Tessellation>(
    regions: &[Region],
    quadrants: &[Option<Quadrant>],
    tess: &T,
) -> Vec<ClassifiedRegion> {
    let mut classified = Vec::new();
    for region in regions {
        if region.len() < 2 {
            continue;
        }
        let mut sum = 0;
        for pair in region.windows(2) {
            if let (Some(qa), Some(qb)) = (quadrants[pair[0]], quadrants[pair[1]]) {
                sum += quadrant_step(qa, qb);
            }
        }
        // The boundary is closed (first vertex repeated last), so the sum
        // is the full cycle. Regions whose winding number comes out zero
        // are dropped, including broken contours whose step sum is not a
        // multiple of four.
        let winding = sum / 4;
        if winding == 0 {
            continue;
        }
        // Mean over the distinct vertices; the closing duplicate would
        // bias the location toward whichever vertex seeded the walk.
        let distinct = &region[..region.len() - 1];
        let mut center = Point::new(0.0, 0.0);
        for &node in distinct {
            center = center + tess.position(node);
        }
        classified.push(ClassifiedRegion {
            winding,
            center: center * (1.0 / distinct.len() as f64),
        });
    }
    classified
}
