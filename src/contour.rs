//! Contour extraction and region walking.
//!
//! Once refinement has converged, the triangles touching the candidate set
//! tile the regions suspected of holding a root or a pole. Their directed
//! edges are emitted once per triangle; an edge whose reverse is also
//! emitted is interior to the tiling and cancels, leaving the closed outer
//! boundary of each region. Since triangles are counterclockwise, so are
//! the surviving boundary loops.

use std::f64::consts::TAU;

use rustc_hash::FxHashSet;

use crate::point::Point;
use crate::tess::{triangle_edges, Edge, NodeId, Tessellation};

/// A closed boundary: cyclic vertex sequence with the first node repeated
/// at the end.
pub type Region = Vec<NodeId>;

fn unordered(a: NodeId, b: NodeId) -> Edge {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Directed boundary edges of the candidate regions.
///
/// Takes the full candidate set of the final detection pass, not the
/// tolerance-filtered selection.
pub fn contour_edges<T: Tessellation>(tess: &T, candidates: &[Edge]) -> Vec<Edge> {
    let candidate_set: FxHashSet<Edge> =
        candidates.iter().map(|&(a, b)| unordered(a, b)).collect();

    // Each directed edge belongs to exactly one counterclockwise triangle,
    // so `work` never holds duplicates and membership lookup is exact.
    let mut work: Vec<Edge> = Vec::new();
    for tri in tess.triangles() {
        let touches = triangle_edges(tri)
            .iter()
            .any(|&(a, b)| candidate_set.contains(&unordered(a, b)));
        if touches {
            work.extend(triangle_edges(tri));
        }
    }

    let emitted: FxHashSet<Edge> = work.iter().copied().collect();
    work.into_iter()
        .filter(|&(a, b)| !emitted.contains(&(b, a)))
        .collect()
}

/// At a junction vertex `s`, picks the outgoing edge making the smallest
/// positive turn from the incoming direction: the candidate head `n`
/// minimizing `(arg(prev - s) - arg(n - s)) mod 2π`. Returns the index into
/// `candidates`.
fn find_next_node(prev: Point, s: Point, candidates: &[Point]) -> usize {
    let base = (prev.y - s.y).atan2(prev.x - s.x);
    let mut best = 0;
    let mut best_turn = f64::INFINITY;
    for (i, n) in candidates.iter().enumerate() {
        let turn = (base - (n.y - s.y).atan2(n.x - s.x)).rem_euclid(TAU);
        if turn < best_turn {
            best_turn = turn;
            best = i;
        }
    }
    best
}

/// Traces the directed contour edges into ordered closed loops.
///
/// Follows edges head-to-tail, consuming them; a vertex with several
/// outgoing edges is disambiguated by [`find_next_node`], which keeps loop
/// orientation consistent. When no edge continues the current loop it is
/// closed and the next remaining edge seeds a new one.
pub fn evaluate_regions(mut contour: Vec<Edge>, position: impl Fn(NodeId) -> Point) -> Vec<Region> {
    let mut regions = Vec::new();
    if contour.is_empty() {
        return regions;
    }

    let (tail, head) = contour.remove(0);
    let mut region: Region = vec![tail];
    let mut reference = head;

    while !contour.is_empty() {
        let matches: Vec<usize> = contour
            .iter()
            .enumerate()
            .filter(|(_, e)| e.0 == reference)
            .map(|(i, _)| i)
            .collect();
        match matches.len() {
            0 => {
                region.push(reference);
                regions.push(region);
                let (tail, head) = contour.remove(0);
                region = vec![tail];
                reference = head;
            }
            1 => {
                let (tail, head) = contour.remove(matches[0]);
                region.push(tail);
                reference = head;
            }
            _ => {
                let prev = region[region.len() - 1];
                let heads: Vec<Point> = matches
                    .iter()
                    .map(|&i| position(contour[i].1))
                    .collect();
                let pick = find_next_node(position(prev), position(reference), &heads);
                let (tail, head) = contour.remove(matches[pick]);
                region.push(tail);
                reference = head;
            }
        }
    }
    region.push(reference);
    regions.push(region);
    regions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quadrant::Quadrant;
    use crate::refine::candidate_edges;
    use crate::tess::{DelaunayTess, Tessellation};

    #[test]
    fn interior_edges_cancel() {
        // Unit square with quadrants walking 1..4: the diagonal is the only
        // candidate, both triangles are emitted and the diagonal cancels,
        // leaving the four hull edges.
        let mut tess = DelaunayTess::with_capacity(4);
        tess.insert_all(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
        .unwrap();
        let quadrants = vec![
            Some(Quadrant::First),
            Some(Quadrant::Second),
            Some(Quadrant::Third),
            Some(Quadrant::Fourth),
        ];
        let candidates = candidate_edges(&tess, &quadrants);
        let contour = contour_edges(&tess, &candidates);
        assert_eq!(contour.len(), 4);
        for &(a, b) in &contour {
            // Hull edges only; the diagonal (0,2)/(1,3) is gone.
            assert_eq!((a as i64 - b as i64).rem_euclid(2), 1, "({a},{b})");
        }
    }

    #[test]
    fn walks_a_single_loop() {
        let positions = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let contour = vec![(0, 1), (1, 2), (2, 3), (3, 0)];
        let regions = evaluate_regions(contour, |id| positions[id]);
        assert_eq!(regions, vec![vec![0, 1, 2, 3, 0]]);
    }

    #[test]
    fn walks_disjoint_loops() {
        let positions = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.5, 1.0),
            Point::new(5.0, 0.0),
            Point::new(6.0, 0.0),
            Point::new(5.5, 1.0),
        ];
        let contour = vec![(0, 1), (3, 4), (1, 2), (4, 5), (2, 0), (5, 3)];
        let mut regions = evaluate_regions(contour, |id| positions[id]);
        regions.sort();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0], vec![0, 1, 2, 0]);
        assert_eq!(regions[1], vec![3, 4, 5, 3]);
    }

    #[test]
    fn junction_takes_the_smallest_positive_turn() {
        // Two triangles meeting at node 0 (a figure eight). Arriving from
        // node 1 the walker must keep to the left-hand loop before the
        // second one.
        let positions = [
            Point::new(0.0, 0.0),
            Point::new(-1.0, -1.0),
            Point::new(-1.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, -1.0),
        ];
        let contour = vec![(1, 0), (0, 2), (2, 1), (0, 4), (4, 3), (3, 0)];
        let regions = evaluate_regions(contour, |id| positions[id]);
        // Starting edge (1,0) hits the junction at 0 with outgoing edges to
        // 2 and 4; the smallest positive turn from the direction back to 1
        // selects 2, closing 1-0-2 first.
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0], vec![1, 0, 2, 1]);
        assert_eq!(regions[1], vec![0, 4, 3, 0]);
    }

    #[test]
    fn no_candidates_no_contour() {
        let mut tess = DelaunayTess::with_capacity(4);
        tess.insert_all(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.5, 1.0),
        ])
        .unwrap();
        assert!(contour_edges(&tess, &[]).is_empty());
        assert!(evaluate_regions(Vec::new(), |_| Point::new(0.0, 0.0)).is_empty());
    }
}
