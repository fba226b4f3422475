//! Bivariate Gaussian kernel density estimation.
//!
//! The kernel covariance is the unbiased data covariance scaled by the square
//! of a bandwidth factor:
//!
//! ```text
//! Σ = factor² · cov(x, y)
//! ρ(p) = 1 / (n · 2π · √det Σ) · Σᵢ exp(-½ (p - pᵢ)ᵀ Σ⁻¹ (p - pᵢ))
//! ```
//!
//! Scott's and Silverman's rules pick the factor from the sample count; a
//! fixed factor replaces the rule outright, which matches the scalar
//! `bw_method` convention of widely used KDE libraries.

use std::{f64::consts::PI, fmt, str::FromStr};

use glam::{DMat2, DVec2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{field::DensityField, grid::Grid};
use crate::{Error, Result, samples::SampleSet};

const DIMENSIONS: f64 = 2.0;

/// Relative determinant below which the covariance is treated as singular.
const SINGULARITY_TOLERANCE: f64 = 1e-10;

/// How the bandwidth factor is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BandwidthMethod {
    /// `n^(-1/(d+4))`
    Scott,
    /// `(n(d+2)/4)^(-1/(d+4))`
    Silverman,
    /// Fixed factor applied to the data covariance's square root.
    Factor(f64),
}

impl BandwidthMethod {
    /// The factor this method yields for `n` samples.
    pub fn factor(&self, n: usize) -> Result<f64> {
        let n = n as f64;
        let exponent = -1.0 / (DIMENSIONS + 4.0);
        match *self {
            BandwidthMethod::Scott => Ok(n.powf(exponent)),
            BandwidthMethod::Silverman => Ok((n * (DIMENSIONS + 2.0) / 4.0).powf(exponent)),
            BandwidthMethod::Factor(f) if f > 0.0 && f.is_finite() => Ok(f),
            BandwidthMethod::Factor(f) => Err(Error::invalid_parameter(
                "bandwidth",
                f,
                "must be positive and finite",
            )),
        }
    }
}

impl fmt::Display for BandwidthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandwidthMethod::Scott => write!(f, "scott"),
            BandwidthMethod::Silverman => write!(f, "silverman"),
            BandwidthMethod::Factor(factor) => write!(f, "{factor}"),
        }
    }
}

impl FromStr for BandwidthMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scott" => Ok(BandwidthMethod::Scott),
            "silverman" => Ok(BandwidthMethod::Silverman),
            other => other
                .parse::<f64>()
                .map(BandwidthMethod::Factor)
                .map_err(|_| {
                    Error::invalid_parameter(
                        "bandwidth",
                        s,
                        "expected 'scott', 'silverman', or a positive number",
                    )
                }),
        }
    }
}

/// A Gaussian KDE fitted to a sample set.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    dataset: Vec<DVec2>,
    factor: f64,
    covariance: DMat2,
    inv_covariance: DMat2,
    norm: f64,
}

impl GaussianKde {
    /// Fit the estimator.
    ///
    /// # Errors
    ///
    /// - [`Error::DegenerateInput`] for fewer than two samples or a singular
    ///   data covariance (identical or collinear points).
    /// - [`Error::InvalidParameter`] for a non-positive fixed factor.
    pub fn fit(samples: &SampleSet, method: BandwidthMethod) -> Result<Self> {
        let n = samples.len();
        if n < 2 {
            return Err(Error::degenerate(format!(
                "kernel density estimation needs at least 2 samples, got {n}"
            )));
        }
        let factor = method.factor(n)?;

        let [[xx, xy], [_, yy]] = samples.covariance();
        if !(xx.is_finite() && yy.is_finite() && xy.is_finite()) {
            return Err(Error::degenerate(format!(
                "covariance is not finite (var x = {xx:e}, var y = {yy:e}, cov = {xy:e})"
            )));
        }
        if !(xx > 0.0 && yy > 0.0) {
            return Err(Error::degenerate(format!(
                "zero variance along an axis (var x = {xx:e}, var y = {yy:e})"
            )));
        }

        // Built from σx, σy and r; no product of variances is formed.
        let (sx, sy) = (xx.sqrt(), yy.sqrt());
        let r = (xy / sx / sy).clamp(-1.0, 1.0);
        let decorrelation = 1.0 - r * r;
        if decorrelation <= SINGULARITY_TOLERANCE {
            return Err(Error::degenerate(format!(
                "singular covariance matrix (correlation = {r}); samples are collinear"
            )));
        }

        let (kx, ky) = (factor * sx, factor * sy);
        let kxy = r * kx * ky;
        let covariance = DMat2::from_cols(DVec2::new(kx * kx, kxy), DVec2::new(kxy, ky * ky));
        let inv_xy = -r / (kx * ky * decorrelation);
        let inv_covariance = DMat2::from_cols(
            DVec2::new(1.0 / (kx * kx * decorrelation), inv_xy),
            DVec2::new(inv_xy, 1.0 / (ky * ky * decorrelation)),
        );
        let norm = 1.0 / (n as f64 * 2.0 * PI * kx * ky * decorrelation.sqrt());

        debug!(
            samples = n,
            %method,
            factor,
            sigma_x = kx,
            sigma_y = ky,
            "fitted gaussian kde"
        );

        Ok(Self {
            dataset: samples.points().map(|(x, y)| DVec2::new(x, y)).collect(),
            factor,
            covariance,
            inv_covariance,
            norm,
        })
    }

    /// Bandwidth factor in use.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Kernel covariance `[[σxx, σxy], [σxy, σyy]]`.
    pub fn covariance(&self) -> [[f64; 2]; 2] {
        let c = self.covariance;
        [[c.x_axis.x, c.y_axis.x], [c.x_axis.y, c.y_axis.y]]
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// Density at `(x, y)`.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let point = DVec2::new(x, y);
        let sum: f64 = self
            .dataset
            .iter()
            .map(|&sample| {
                let d = point - sample;
                (-0.5 * d.dot(self.inv_covariance * d)).exp()
            })
            .sum();
        sum * self.norm
    }

    /// Density at every cell midpoint of `grid`.
    ///
    /// Rows are evaluated in parallel; each value depends only on the fitted
    /// model so the output does not depend on scheduling.
    pub fn evaluate_grid(&self, grid: &Grid) -> DensityField {
        let cols = grid.cols();
        let xs = grid.x().midpoints();
        let mut values = vec![0.0; grid.rows() * cols];

        values
            .par_chunks_mut(cols)
            .zip(grid.y().midpoints().par_iter())
            .for_each(|(row, &y)| {
                for (slot, &x) in row.iter_mut().zip(xs) {
                    *slot = self.evaluate(x, y);
                }
            });

        DensityField::new(grid.rows(), cols, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landscape::grid::Axis;

    fn unit_square() -> SampleSet {
        SampleSet::from_points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]).unwrap()
    }

    #[test]
    fn scott_and_silverman_agree_in_two_dimensions() {
        let scott = BandwidthMethod::Scott.factor(64).unwrap();
        let silverman = BandwidthMethod::Silverman.factor(64).unwrap();
        assert!((scott - 0.5).abs() < 1e-12);
        assert!((scott - silverman).abs() < 1e-12);
    }

    #[test]
    fn fixed_factor_must_be_positive() {
        assert!(BandwidthMethod::Factor(0.0).factor(10).is_err());
        assert!(BandwidthMethod::Factor(-1.0).factor(10).is_err());
        assert_eq!(BandwidthMethod::Factor(0.15).factor(10).unwrap(), 0.15);
    }

    #[test]
    fn parses_bandwidth_methods() {
        assert_eq!(
            "Scott".parse::<BandwidthMethod>().unwrap(),
            BandwidthMethod::Scott
        );
        assert_eq!(
            "0.25".parse::<BandwidthMethod>().unwrap(),
            BandwidthMethod::Factor(0.25)
        );
        assert!("wide".parse::<BandwidthMethod>().is_err());
    }

    #[test]
    fn kernel_covariance_scales_with_factor_squared() {
        let kde = GaussianKde::fit(&unit_square(), BandwidthMethod::Factor(0.5)).unwrap();
        let cov = kde.covariance();
        assert!((cov[0][0] - 0.25 / 3.0).abs() < 1e-12);
        assert!((cov[1][1] - 0.25 / 3.0).abs() < 1e-12);
        assert!(cov[0][1].abs() < 1e-12);
    }

    #[test]
    fn evaluate_matches_closed_form() {
        let samples = SampleSet::from_points(&[(-1.0, -1.0), (1.0, 1.0), (1.0, -1.0)]).unwrap();
        let kde = GaussianKde::fit(&samples, BandwidthMethod::Factor(1.0)).unwrap();
        let direct = kde.evaluate(0.3, -0.2);
        let c = kde.covariance();
        let det = c[0][0] * c[1][1] - c[0][1] * c[1][0];
        let expected: f64 = samples
            .points()
            .map(|(px, py)| {
                let (dx, dy) = (0.3 - px, -0.2 - py);
                let q = (c[1][1] * dx * dx - 2.0 * c[0][1] * dx * dy + c[0][0] * dy * dy) / det;
                (-0.5 * q).exp()
            })
            .sum::<f64>()
            / (3.0 * 2.0 * PI * det.sqrt());
        assert!((direct - expected).abs() < 1e-12);
    }

    #[test]
    fn density_integrates_to_one_over_wide_grid() {
        let kde = GaussianKde::fit(&unit_square(), BandwidthMethod::Scott).unwrap();
        let axis = Axis::linspace(-6.0, 7.0, 260).unwrap();
        let grid = Grid::new(axis.clone(), axis);
        let density = kde.evaluate_grid(&grid);
        let cell = (13.0 / 260.0) * (13.0 / 260.0);
        let mass: f64 = density.values().iter().sum::<f64>() * cell;
        assert!((mass - 1.0).abs() < 1e-3, "mass = {mass}");
    }

    #[test]
    fn identical_points_are_degenerate() {
        let samples = SampleSet::from_points(&[(1.0, 2.0), (1.0, 2.0)]).unwrap();
        let err = GaussianKde::fit(&samples, BandwidthMethod::Scott).unwrap_err();
        assert!(matches!(err, Error::DegenerateInput { .. }));
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let samples =
            SampleSet::from_points(&[(0.0, 0.0), (0.1, 0.3), (0.2, 0.6), (0.7, 2.1)]).unwrap();
        let err = GaussianKde::fit(&samples, BandwidthMethod::Factor(0.15)).unwrap_err();
        assert!(matches!(err, Error::DegenerateInput { .. }));
    }

    #[test]
    fn overflowing_covariance_is_reported_as_such() {
        let samples = SampleSet::from_points(&[
            (-1.0e160, 0.0),
            (1.0e160, 2.0e160),
            (3.0e160, -1.0e160),
        ])
        .unwrap();
        match GaussianKde::fit(&samples, BandwidthMethod::Scott).unwrap_err() {
            Error::DegenerateInput { reason } => {
                assert!(reason.contains("not finite"), "{reason}");
                assert!(!reason.contains("collinear"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wide_range_samples_fit_without_overflow() {
        let samples = SampleSet::from_points(&[
            (-1.0e100, 0.0),
            (1.0e100, 2.0e100),
            (3.0e100, -1.0e100),
            (0.5e100, 0.5e100),
        ])
        .unwrap();
        let kde = GaussianKde::fit(&samples, BandwidthMethod::Scott).unwrap();
        let density = kde.evaluate(0.5e100, 0.5e100);
        assert!(density.is_finite() && density > 0.0, "density = {density}");
    }

    #[test]
    fn single_point_is_degenerate() {
        let samples = SampleSet::from_points(&[(1.0, 2.0)]).unwrap();
        assert!(matches!(
            GaussianKde::fit(&samples, BandwidthMethod::Scott),
            Err(Error::DegenerateInput { .. })
        ));
    }
}
