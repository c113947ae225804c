//! Global complex roots and poles finding.
//!
//! Samples a complex function on an adaptively refined Delaunay mesh,
//! watches for edges whose endpoint values sit in diagonally opposite
//! quadrants, and classifies the regions those edges enclose with the
//! discretized Cauchy argument principle. No derivatives or contour
//! integrals of the function are needed.
#![allow(clippy::many_single_char_names)]
#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

pub mod contour;
pub mod engine;
pub mod error;
pub mod mesh;
pub mod point;
pub mod quadrant;
pub mod refine;
pub mod scaling;
pub mod tess;
pub mod winding;

pub use engine::{grpf, grpf_with_plot_data, GrpfParams, PlotData};
pub use error::GrpfError;
pub use mesh::{disk_domain, rectangular_domain};
pub use quadrant::Quadrant;
