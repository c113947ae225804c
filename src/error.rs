use thiserror::Error;

/// Failures that abort a [`grpf`](crate::grpf) call.
///
/// Budget exhaustion (`max_iterations`, `max_nodes`) is deliberately not an
/// error; the engine logs a warning and returns the best-effort result.
#[derive(Debug, Error)]
pub enum GrpfError {
    #[error("initial mesh needs at least three points, got {0}")]
    TooFewSeeds(usize),
    /// All seeds share a real or imaginary part, so the rescaling map to the
    /// triangulation window is not invertible.
    #[error("initial mesh spans no area in the complex plane")]
    DegenerateMesh,
    #[error("scaled seed ({x}, {y}) falls outside the triangulation range [{min}, {max}]")]
    CoordinateOutOfRange { x: f64, y: f64, min: f64, max: f64 },
    #[error("triangulation rejected a point: {0}")]
    Insertion(#[from] spade::InsertionError),
}
