//! Candidate-edge detection and adaptive mesh refinement.
//!
//! An edge whose endpoints carry diagonally opposite quadrants is the trace
//! of a nearby root or pole. Refinement keeps splitting the mesh around
//! those edges until every one of them is shorter than the tolerance.

use rustc_hash::FxHashSet;

use crate::point::{centroid, Point};
use crate::quadrant::{phase_difference, Quadrant};
use crate::tess::{triangle_edges, Edge, NodeId, Tessellation, Triangle};

/// Ratio of longest to shortest edge above which a zone-2 triangle is split
/// at its centroid.
pub const DEFAULT_SKINNY_TRIANGLE: f64 = 3.0;

/// Every solid edge whose endpoint quadrants differ by 2 (mod 4). Endpoint
/// order within an edge is irrelevant to the test.
pub fn candidate_edges<T: Tessellation>(
    tess: &T,
    quadrants: &[Option<Quadrant>],
) -> Vec<Edge> {
    tess.edges()
        .filter(|&(a, b)| match (quadrants[a], quadrants[b]) {
            (Some(qa), Some(qb)) => phase_difference(qa, qb) == 2,
            _ => false,
        })
        .collect()
}

fn unordered(a: NodeId, b: NodeId) -> Edge {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

fn sorted(mut tri: Triangle) -> Triangle {
    tri.sort_unstable();
    tri
}

/// One refinement pass.
///
/// Splits every candidate edge still longer than `tolerance` by visiting the
/// triangles around its endpoints: a triangle with two or more endpoints of
/// such edges (zone 1) contributes the midpoints of all three of its edges,
/// a triangle with exactly one (zone 2) contributes its centroid when it is
/// skinny. Returns the points to insert next; an empty result means the
/// candidate set has converged below tolerance.
pub fn refine<T: Tessellation>(
    tess: &T,
    candidates: &[Edge],
    tolerance: f64,
    skinny_triangle: f64,
) -> Vec<Point> {
    let select: Vec<Edge> = candidates
        .iter()
        .copied()
        .filter(|&(a, b)| tess.position(a).distance(tess.position(b)) > tolerance)
        .collect();
    if select.is_empty() {
        return Vec::new();
    }

    let unique: FxHashSet<NodeId> = select.iter().flat_map(|&(a, b)| [a, b]).collect();

    let mut visited: FxHashSet<Triangle> = FxHashSet::default();
    let mut split_edges: FxHashSet<Edge> = FxHashSet::default();
    let mut new_nodes = Vec::new();
    let mut incident = Vec::new();

    for &node in &unique {
        incident.clear();
        tess.triangles_at(node, &mut incident);
        for &tri in &incident {
            if !visited.insert(sorted(tri)) {
                continue;
            }
            let hits = tri.iter().filter(|v| unique.contains(*v)).count();
            if hits >= 2 {
                // Zone 1: certainly near a root or pole. Split every edge at
                // its midpoint, once per pass, unless already below
                // tolerance.
                for (a, b) in triangle_edges(tri) {
                    if !split_edges.insert(unordered(a, b)) {
                        continue;
                    }
                    let pa = tess.position(a);
                    let pb = tess.position(b);
                    if pa.distance(pb) > tolerance {
                        new_nodes.push(pa.midpoint(pb));
                    }
                }
            } else if hits == 1 {
                // Zone 2: only split skinny triangles, at the centroid.
                let pa = tess.position(tri[0]);
                let pb = tess.position(tri[1]);
                let pc = tess.position(tri[2]);
                let lengths = [pa.distance(pb), pb.distance(pc), pc.distance(pa)];
                let longest = lengths.iter().fold(f64::NEG_INFINITY, |m, &l| m.max(l));
                let shortest = lengths.iter().fold(f64::INFINITY, |m, &l| m.min(l));
                if longest / shortest > skinny_triangle {
                    new_nodes.push(centroid(pa, pb, pc));
                }
            }
        }
    }
    new_nodes
}
