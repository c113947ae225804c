//! Initial mesh producers.
//!
//! Both producers return raw, unscaled seed points; the engine rescales them
//! into the triangulation window. Seed spacing only sets the starting
//! resolution, refinement supplies the rest.

use num_complex::Complex64;
use std::f64::consts::{PI, TAU};

/// Hexagonal close-packed sampling of the axis-aligned rectangle with
/// corners `z_lo` and `z_hi` at spacing `r`.
///
/// Every other column is shifted down-to-up by half a row step so each
/// interior point sits at distance ~`r` from six neighbours; shifted columns
/// get both boundary rows back so the rectangle's edges stay covered.
pub fn rectangular_domain(z_lo: Complex64, z_hi: Complex64, r: f64) -> Vec<Complex64> {
    let x_span = z_hi.re - z_lo.re;
    let y_span = z_hi.im - z_lo.im;
    assert!(r > 0.0, "seed spacing must be positive");
    assert!(
        x_span > 0.0 && y_span > 0.0,
        "rectangle corners must satisfy z_lo < z_hi componentwise"
    );

    let rows = ((y_span / r).ceil() as usize + 1).max(2);
    let dy = y_span / (rows - 1) as f64;
    // Column pitch of a hex packing with row step dy; dy <= r keeps the
    // radicand positive.
    let pitch = (r * r - dy * dy / 4.0).sqrt();
    let cols = ((x_span / pitch).ceil() as usize + 1).max(2);
    let dx = x_span / (cols - 1) as f64;

    let mut nodes = Vec::with_capacity(rows * cols + cols / 2 + 1);
    for j in 0..cols {
        let x = z_lo.re + dx * j as f64;
        if j % 2 == 1 {
            nodes.push(Complex64::new(x, z_lo.im));
            for i in 0..rows - 1 {
                nodes.push(Complex64::new(x, z_lo.im + dy * (i as f64 + 0.5)));
            }
            nodes.push(Complex64::new(x, z_hi.im));
        } else {
            for i in 0..rows {
                nodes.push(Complex64::new(x, z_lo.im + dy * i as f64));
            }
        }
    }
    nodes
}

/// Spiderweb sampling of the disk of radius `radius` centred at the origin
/// at spacing `r`: a centre point plus concentric rings, ring `k` carrying
/// `6k` points. Successive rings are phase-rotated so ring points do not
/// line up radially.
pub fn disk_domain(radius: f64, r: f64) -> Vec<Complex64> {
    assert!(r > 0.0, "seed spacing must be positive");
    assert!(radius > 0.0, "disk radius must be positive");

    // Ring step matching the row height of a hex packing at spacing r.
    let h = r * 3.0_f64.sqrt() / 2.0;
    let rings = ((radius / h).round() as usize).max(1);
    let dr = radius / rings as f64;

    let mut nodes = Vec::with_capacity(1 + 3 * rings * (rings + 1));
    nodes.push(Complex64::new(0.0, 0.0));
    let mut phase = 0.0;
    for k in 1..=rings {
        let count = 6 * k;
        let rad = dr * k as f64;
        for j in 0..count {
            nodes.push(Complex64::from_polar(rad, phase + TAU * j as f64 / count as f64));
        }
        phase += PI / (6.0 * rings as f64);
    }
    nodes
}
