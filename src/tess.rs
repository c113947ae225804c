//! Facade over the external Delaunay triangulation.
//!
//! The engine only needs four capabilities from a triangulation: bulk point
//! insertion, iteration over solid edges, iteration over solid triangles and
//! the triangles incident to a given vertex. [`Tessellation`] captures
//! exactly those, so the backing library can be swapped without touching the
//! refinement or contour code. [`DelaunayTess`] is the `spade`-backed
//! implementation used by [`grpf`](crate::grpf).

use spade::handles::FixedVertexHandle;
use spade::{DelaunayTriangulation, Point2, Triangulation as _};

use crate::error::GrpfError;
use crate::point::Point;

/// Identity of a mesh point: its insertion index, contiguous from 0. Two
/// points are the same point exactly when their ids match; coordinates are
/// never compared.
pub type NodeId = usize;

/// An ordered pair of point ids. Directed where orientation matters
/// (contour extraction), orientation-free for the candidate test.
pub type Edge = (NodeId, NodeId);

/// A solid triangle as an ordered triple of point ids.
pub type Triangle = [NodeId; 3];

/// The edges of `tri` in the triangle's own orientation.
pub fn triangle_edges(tri: Triangle) -> [Edge; 3] {
    [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])]
}

/// Capability set the engine requires from the external triangulation.
pub trait Tessellation {
    /// The coordinate window accepted by the backing library. Read once and
    /// cached by the driver at the start of each call, never hard-coded
    /// elsewhere.
    fn coordinate_range(&self) -> (f64, f64);

    fn with_capacity(size_hint: usize) -> Self;

    fn num_nodes(&self) -> usize;

    fn position(&self, node: NodeId) -> Point;

    /// Inserts a batch of points, assigning fresh ids past the current
    /// maximum in batch order.
    fn insert_all(&mut self, points: &[Point]) -> Result<(), GrpfError>;

    /// Every solid undirected edge, once.
    fn edges(&self) -> impl Iterator<Item = Edge> + '_;

    /// Every solid triangle, vertices in counterclockwise order.
    fn triangles(&self) -> impl Iterator<Item = Triangle> + '_;

    /// Appends the triangles incident to `node` onto `out`.
    fn triangles_at(&self, node: NodeId, out: &mut Vec<Triangle>);
}

/// One binade of uniform f64 resolution, comfortably clear of the smallest
/// coordinate magnitudes the library refuses to insert.
const MIN_COORD: f64 = 1.0;
const MAX_COORD: f64 = 2.0;

/// Delaunay tessellation backed by [`spade::DelaunayTriangulation`].
///
/// Positions and vertex handles are mirrored in insertion order so that id
/// lookups stay O(1); spade's own vertex indices are insertion-ordered too
/// (vertices are never removed), which makes `handle.index()` the id.
pub struct DelaunayTess {
    dt: DelaunayTriangulation<Point2<f64>>,
    handles: Vec<FixedVertexHandle>,
    positions: Vec<Point>,
}

impl Tessellation for DelaunayTess {
    fn coordinate_range(&self) -> (f64, f64) {
        (MIN_COORD, MAX_COORD)
    }

    fn with_capacity(size_hint: usize) -> Self {
        // Euler: a planar triangulation carries ~3 edges and ~2 faces per
        // vertex.
        Self {
            dt: DelaunayTriangulation::with_capacity(size_hint, 3 * size_hint, 2 * size_hint),
            handles: Vec::with_capacity(size_hint),
            positions: Vec::with_capacity(size_hint),
        }
    }

    fn num_nodes(&self) -> usize {
        self.positions.len()
    }

    fn position(&self, node: NodeId) -> Point {
        self.positions[node]
    }

    fn insert_all(&mut self, points: &[Point]) -> Result<(), GrpfError> {
        for &p in points {
            let handle = self.dt.insert(Point2::new(p.x, p.y))?;
            self.handles.push(handle);
            self.positions.push(p);
        }
        Ok(())
    }

    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.dt.undirected_edges().map(|edge| {
            let [a, b] = edge.vertices();
            (a.fix().index(), b.fix().index())
        })
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.dt.inner_faces().map(|face| {
            let [a, b, c] = face.vertices();
            [a.fix().index(), b.fix().index(), c.fix().index()]
        })
    }

    fn triangles_at(&self, node: NodeId, out: &mut Vec<Triangle>) {
        let vertex = self.dt.vertex(self.handles[node]);
        // Each inner face incident to the vertex has exactly one outgoing
        // boundary edge here, so no face is reported twice.
        for edge in vertex.out_edges() {
            if let Some(face) = edge.face().as_inner() {
                let [a, b, c] = face.vertices();
                out.push([a.fix().index(), b.fix().index(), c.fix().index()]);
            }
        }
    }
}
