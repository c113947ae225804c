//! The `grpf` driver: parameter object, quadrant assignment and the
//! adaptive refinement loop.

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};
use log::warn;
use num_complex::Complex64;
use rayon::prelude::*;

use crate::contour::{contour_edges, evaluate_regions};
use crate::error::GrpfError;
use crate::quadrant::{phase_difference, Quadrant};
use crate::refine::{candidate_edges, refine};
use crate::scaling::Scaling;
use crate::tess::{DelaunayTess, Edge, Tessellation};
use crate::winding::classify_regions;

/// Knobs of the root-and-pole search.
///
/// `tolerance` is an edge length in *scaled* units: the initial mesh is
/// mapped onto the triangulation's coordinate window before refinement, and
/// edges are compared against the tolerance there.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct GrpfParams {
    /// Cap on refinement passes.
    pub max_iterations: usize,
    /// Cap on total inserted points.
    pub max_nodes: usize,
    /// Skinniness ratio above which a zone-2 triangle is split.
    pub skinny_triangle: f64,
    /// Pre-allocation hint for the triangulation.
    pub tess_size_hint: usize,
    /// Scaled edge length below which refinement stops.
    pub tolerance: f64,
    /// Evaluate the function at new nodes on the rayon thread pool.
    pub multithreading: bool,
}

impl Default for GrpfParams {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            max_nodes: 500_000,
            skinny_triangle: crate::refine::DEFAULT_SKINNY_TRIANGLE,
            tess_size_hint: 5_000,
            tolerance: 1e-9,
            multithreading: false,
        }
    }
}

impl GrpfParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_skinny_triangle(mut self, skinny_triangle: f64) -> Self {
        self.skinny_triangle = skinny_triangle;
        self
    }

    pub fn with_tess_size_hint(mut self, tess_size_hint: usize) -> Self {
        self.tess_size_hint = tess_size_hint;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_multithreading(mut self, multithreading: bool) -> Self {
        self.multithreading = multithreading;
        self
    }
}

/// Everything the diagnostic entry point exposes beyond the roots and
/// poles.
pub struct PlotData {
    pub zeros: Vec<Complex64>,
    pub poles: Vec<Complex64>,
    /// Every mesh node in insertion order, mapped back to the caller's
    /// coordinates.
    pub nodes: Vec<Complex64>,
    /// Quadrant tag per node, parallel to `nodes`.
    pub quadrants: Vec<Option<Quadrant>>,
    /// `(quadrant(a) - quadrant(b)) mod 4` for every solid edge of the
    /// final tessellation.
    pub phase_diffs: Vec<(Edge, u8)>,
    /// The final tessellation, for mesh plots.
    pub tessellation: DelaunayTess,
}

/// Finds the zeros and poles of `f` inside the region sampled by
/// `initial_mesh`.
///
/// Returned coordinates are in the caller's coordinate system, in the order
/// their regions were walked; callers wanting a canonical order must sort.
/// Exhausting `max_iterations` or `max_nodes` logs a warning and returns
/// the best-effort result for the current mesh.
pub fn grpf<F>(
    f: F,
    initial_mesh: &[Complex64],
    params: &GrpfParams,
) -> Result<(Vec<Complex64>, Vec<Complex64>), GrpfError>
where
    F: Fn(Complex64) -> Complex64 + Sync,
{
    let outcome = run::<DelaunayTess, F>(f, initial_mesh, params)?;
    Ok((outcome.zeros, outcome.poles))
}

/// [`grpf`] plus the data needed to plot the final mesh, its quadrant tags
/// and the phase difference of every edge.
pub fn grpf_with_plot_data<F>(
    f: F,
    initial_mesh: &[Complex64],
    params: &GrpfParams,
) -> Result<PlotData, GrpfError>
where
    F: Fn(Complex64) -> Complex64 + Sync,
{
    let outcome = run::<DelaunayTess, F>(f, initial_mesh, params)?;
    let nodes = (0..outcome.tess.num_nodes())
        .map(|id| outcome.scaling.to_domain(outcome.tess.position(id)))
        .collect();
    let phase_diffs = outcome
        .tess
        .edges()
        .map(|(a, b)| {
            let tag = match (outcome.quadrants[a], outcome.quadrants[b]) {
                (Some(qa), Some(qb)) => phase_difference(qa, qb),
                _ => 0,
            };
            ((a, b), tag)
        })
        .collect();
    Ok(PlotData {
        zeros: outcome.zeros,
        poles: outcome.poles,
        nodes,
        quadrants: outcome.quadrants,
        phase_diffs,
        tessellation: outcome.tess,
    })
}

struct Outcome<T> {
    zeros: Vec<Complex64>,
    poles: Vec<Complex64>,
    quadrants: Vec<Option<Quadrant>>,
    scaling: Scaling,
    tess: T,
}

fn run<T, F>(f: F, initial_mesh: &[Complex64], params: &GrpfParams) -> Result<Outcome<T>, GrpfError>
where
    T: Tessellation,
    F: Fn(Complex64) -> Complex64 + Sync,
{
    let size_hint = if params.tess_size_hint > params.max_nodes {
        warn!(
            "tess_size_hint ({}) exceeds max_nodes ({}); clamping the hint",
            params.tess_size_hint, params.max_nodes
        );
        params.max_nodes
    } else {
        params.tess_size_hint
    };

    let mut tess = T::with_capacity(size_hint);
    let (min_coord, max_coord) = tess.coordinate_range();
    let scaling = Scaling::from_seeds(initial_mesh, min_coord, max_coord)?;

    let mut pending = Vec::with_capacity(initial_mesh.len());
    for &z in initial_mesh {
        pending.push(scaling.check_range(scaling.to_mesh(z))?);
    }

    let mut quadrants: Vec<Option<Quadrant>> = Vec::with_capacity(size_hint);
    // Candidate set of the final detection pass; the contour extractor
    // consumes the full set, not the tolerance-filtered selection.
    let mut candidates;

    let mut iteration = 0;
    loop {
        iteration += 1;
        tess.insert_all(&pending)?;
        pending.clear();
        assign_quadrants(&f, &tess, &scaling, &mut quadrants, params.multithreading);

        candidates = candidate_edges(&tess, &quadrants);
        if candidates.is_empty() {
            // No phase change anywhere: no root or pole in the domain.
            break;
        }
        let new_nodes = refine(&tess, &candidates, params.tolerance, params.skinny_triangle);
        if new_nodes.is_empty() {
            // Every candidate edge is below tolerance.
            break;
        }
        if iteration >= params.max_iterations {
            warn!(
                "no convergence within {} refinement passes; classifying the current mesh",
                params.max_iterations
            );
            break;
        }
        if tess.num_nodes() + new_nodes.len() > params.max_nodes {
            warn!(
                "next refinement pass would exceed max_nodes ({}); classifying the current mesh",
                params.max_nodes
            );
            break;
        }
        pending = new_nodes;
    }

    let contour = contour_edges(&tess, &candidates);
    let regions = evaluate_regions(contour, |id| tess.position(id));
    let mut zeros = Vec::new();
    let mut poles = Vec::new();
    for region in classify_regions(&regions, &quadrants, &tess) {
        let z = scaling.to_domain(region.center);
        if region.winding > 0 {
            zeros.push(z);
        } else {
            poles.push(z);
        }
    }

    Ok(Outcome {
        zeros,
        poles,
        quadrants,
        scaling,
        tess,
    })
}

/// Tags every node inserted since the last pass. The function sees the
/// caller's (unscaled) coordinates; with `multithreading` the evaluations
/// fan out over rayon, which is the only parallel phase of the engine.
fn assign_quadrants<T, F>(
    f: &F,
    tess: &T,
    scaling: &Scaling,
    quadrants: &mut Vec<Option<Quadrant>>,
    multithreading: bool,
) where
    T: Tessellation,
    F: Fn(Complex64) -> Complex64 + Sync,
{
    let start = quadrants.len();
    let coords: Vec<Complex64> = (start..tess.num_nodes())
        .map(|id| scaling.to_domain(tess.position(id)))
        .collect();
    let values: Vec<Complex64> = if multithreading {
        coords.par_iter().map(|&z| f(z)).collect()
    } else {
        coords.iter().map(|&z| f(z)).collect()
    };
    quadrants.extend(values.into_iter().map(|w| Some(Quadrant::of(w))));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_table() {
        let params = GrpfParams::default();
        assert_eq!(params.max_iterations, 100);
        assert_eq!(params.max_nodes, 500_000);
        assert_eq!(params.skinny_triangle, 3.0);
        assert_eq!(params.tess_size_hint, 5_000);
        assert_eq!(params.tolerance, 1e-9);
        assert!(!params.multithreading);
    }

    #[test]
    fn builder_chains() {
        let params = GrpfParams::new()
            .with_tolerance(1e-6)
            .with_max_iterations(10)
            .with_multithreading(true);
        assert_eq!(params.tolerance, 1e-6);
        assert_eq!(params.max_iterations, 10);
        assert!(params.multithreading);
    }

    #[test]
    fn constant_function_yields_nothing() {
        let mesh = crate::mesh::rectangular_domain(
            Complex64::new(-1.0, -1.0),
            Complex64::new(1.0, 1.0),
            0.5,
        );
        let (zeros, poles) = grpf(|_| Complex64::new(1.0, 0.0), &mesh, &GrpfParams::default())
            .unwrap();
        assert!(zeros.is_empty());
        assert!(poles.is_empty());
    }

    #[test]
    fn too_few_seeds_is_fatal() {
        let mesh = [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)];
        assert!(matches!(
            grpf(|z| z, &mesh, &GrpfParams::default()),
            Err(GrpfError::TooFewSeeds(2))
        ));
    }
}
