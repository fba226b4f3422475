//! Common test utilities for the gel test suite.
//!
//! Synthetic projections drawn from fixed-seed Gaussians, and helpers to
//! write them out as XVG files.

#![allow(dead_code)]

use std::{io::Write, path::Path};

use gel::SampleSet;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::Normal;
use tempfile::NamedTempFile;

/// `n` points from an axis-aligned Gaussian centred on `(mx, my)`.
pub fn gaussian_points(n: usize, (mx, my): (f64, f64), sigma: f64, seed: u64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let x = Normal::new(mx, sigma).unwrap();
    let y = Normal::new(my, sigma).unwrap();
    (0..n).map(|_| (rng.sample(x), rng.sample(y))).collect()
}

/// Two separated basins, the first twice as populated as the second.
pub fn two_basins(seed: u64) -> Vec<(f64, f64)> {
    let mut points = gaussian_points(400, (-1.0, 0.0), 0.25, seed);
    points.extend(gaussian_points(200, (1.5, 0.5), 0.25, seed + 1));
    points
}

pub fn sample_set(points: &[(f64, f64)]) -> SampleSet {
    SampleSet::from_points(points).unwrap()
}

/// Write `points` as a GROMACS-style XVG file with `#`/`@` header lines.
pub fn write_xvg(points: &[(f64, f64)]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".xvg").tempfile().unwrap();
    writeln!(file, "# This file was created by gmx anaeig").unwrap();
    writeln!(file, "@    title \"2D projection of trajectory\"").unwrap();
    writeln!(file, "@    xaxis  label \"projection on eigenvector 1 (nm)\"").unwrap();
    writeln!(file, "@TYPE xy").unwrap();
    for (x, y) in points {
        writeln!(file, "{x:>12.6} {y:>12.6}").unwrap();
    }
    file.flush().unwrap();
    file
}

pub fn read_to_string(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}
