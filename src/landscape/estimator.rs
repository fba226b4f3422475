//! Density → free-energy pipeline.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    field::{DensityField, EnergyField},
    grid::Grid,
    kde::{BandwidthMethod, GaussianKde},
};
use crate::{Error, Result, samples::SampleSet};

/// Everything computed for one sample set: the grid, the KDE density on it,
/// and the derived free energy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Landscape {
    pub grid: Grid,
    pub density: DensityField,
    pub energy: EnergyField,
    /// Bandwidth factor the KDE was fitted with
    pub bandwidth_factor: f64,
    pub temperature: f64,
    pub kb: f64,
    /// Ceiling applied to `energy`, if any
    pub clip: Option<f64>,
}

impl Landscape {
    /// Thermal energy `kB·T` in the units of `kb`.
    pub fn kt(&self) -> f64 {
        self.kb * self.temperature
    }

    /// Location `(x, y)` and energy of the global minimum.
    pub fn minimum(&self) -> Option<(f64, f64, f64)> {
        let (energy, (row, col)) = self.energy.min()?;
        let (x, y) = self.grid.cell_center(row, col);
        Some((x, y, energy))
    }
}

/// Fits a Gaussian KDE to 2-D samples and maps the density on a regular grid
/// to `ΔG = -kB·T·ln(ρ/ρ_max)`.
///
/// # Examples
///
/// ```
/// use gel::landscape::FreeEnergyEstimator;
/// use gel::samples::SampleSet;
///
/// let samples = SampleSet::from_points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)])?;
/// let estimator = FreeEnergyEstimator::new(2, 1.0, 300.0, 0.008314)?;
/// let landscape = estimator.estimate(&samples)?;
/// assert_eq!(landscape.energy.min().map(|(e, _)| e), Some(0.0));
/// # Ok::<(), gel::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FreeEnergyEstimator {
    bins: usize,
    bandwidth: BandwidthMethod,
    temperature: f64,
    kb: f64,
    clip: Option<f64>,
}

impl FreeEnergyEstimator {
    /// Create an estimator with a fixed bandwidth factor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when `bins < 1`, `bandwidth <= 0`,
    /// `temperature <= 0` or `kb <= 0` (or any of them is not finite).
    pub fn new(bins: usize, bandwidth: f64, temperature: f64, kb: f64) -> Result<Self> {
        if bins < 1 {
            return Err(Error::invalid_parameter("bins", bins, "must be at least 1"));
        }
        let bandwidth = BandwidthMethod::Factor(bandwidth);
        bandwidth.factor(2)?;
        ensure_positive("temperature", temperature)?;
        ensure_positive("kb", kb)?;
        Ok(Self {
            bins,
            bandwidth,
            temperature,
            kb,
            clip: None,
        })
    }

    /// Use a rule-of-thumb or fixed bandwidth instead.
    pub fn with_bandwidth_method(mut self, method: BandwidthMethod) -> Result<Self> {
        method.factor(2)?;
        self.bandwidth = method;
        Ok(self)
    }

    /// Clip energies to `[0, ceiling]` after the transform.
    pub fn with_clip(mut self, ceiling: f64) -> Result<Self> {
        ensure_positive("z_max", ceiling)?;
        self.clip = Some(ceiling);
        Ok(self)
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn bandwidth(&self) -> BandwidthMethod {
        self.bandwidth
    }

    pub fn kt(&self) -> f64 {
        self.kb * self.temperature
    }

    /// Run the estimator. Pure: identical inputs give identical output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateInput`] when the KDE cannot be fitted
    /// (fewer than two samples, identical or collinear points) or the density
    /// vanishes on the whole grid.
    pub fn estimate(&self, samples: &SampleSet) -> Result<Landscape> {
        let kde = GaussianKde::fit(samples, self.bandwidth)?;
        let grid = Grid::spanning(samples, self.bins)?;
        debug!(
            bins = self.bins,
            x_bounds = ?grid.x().bounds(),
            y_bounds = ?grid.y().bounds(),
            "evaluating density on grid"
        );

        let density = kde.evaluate_grid(&grid);
        let mut energy = EnergyField::from_density(&density, self.kt())?;
        if let Some(ceiling) = self.clip {
            energy = energy.clipped(ceiling);
        }

        info!(
            samples = samples.len(),
            cells = energy.values().len(),
            unvisited = energy.infinite_count(),
            "free-energy landscape estimated"
        );

        Ok(Landscape {
            grid,
            density,
            energy,
            bandwidth_factor: kde.factor(),
            temperature: self.temperature,
            kb: self.kb,
            clip: self.clip,
        })
    }
}

/// One-shot form of [`FreeEnergyEstimator::estimate`] returning only the
/// energy field.
pub fn estimate(
    samples: &SampleSet,
    bins: usize,
    bandwidth: f64,
    temperature: f64,
    kb: f64,
) -> Result<EnergyField> {
    FreeEnergyEstimator::new(bins, bandwidth, temperature, kb)?
        .estimate(samples)
        .map(|landscape| landscape.energy)
}

fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid_parameter(
            name,
            value,
            "must be positive and finite",
        ))
    }
}
