//! Density and free-energy fields over a grid.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Row-major KDE density at each cell midpoint.
///
/// Only produced by [`GaussianKde::evaluate_grid`](super::GaussianKde::evaluate_grid),
/// so its shape always matches the grid it was evaluated on:
///
/// ```compile_fail
/// use gel::landscape::DensityField;
///
/// let field = DensityField::new(2, 2, vec![1.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityField {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl DensityField {
    /// `values` must hold exactly `rows * cols` entries.
    pub(crate) fn new(rows: usize, cols: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), rows * cols, "density field shape mismatch");
        Self { rows, cols, values }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    /// Largest density and its `(row, col)`; the first cell wins ties.
    pub fn max(&self) -> Option<(f64, (usize, usize))> {
        let (index, &value) = self
            .values
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, &f64)>, (i, v)| match best {
                Some((_, b)) if *b >= *v => best,
                _ => Some((i, v)),
            })?;
        Some((value, (index / self.cols, index % self.cols)))
    }
}

/// Free energy `ΔG = -kB·T·ln(ρ/ρ_max)` at each cell midpoint.
///
/// Cells whose density is exactly zero hold `+∞`: the region was never
/// visited. Renderers treat these like any value above the colour ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyField {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl EnergyField {
    /// Convert a density field using the thermal energy `kt = kB·T`.
    ///
    /// Computed as `kt · (ln ρ_max − ln ρ)`, which is exactly `0.0` at the
    /// maximum and never negative.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateInput`] if the density vanishes everywhere
    /// on the grid or is not finite.
    pub fn from_density(density: &DensityField, kt: f64) -> Result<Self> {
        let (rho_max, _) = density
            .max()
            .ok_or_else(|| Error::degenerate("density field has no cells"))?;
        if !(rho_max > 0.0 && rho_max.is_finite()) {
            return Err(Error::degenerate(format!(
                "maximum density on the grid is {rho_max}"
            )));
        }

        let ln_max = rho_max.ln();
        let values = density
            .values
            .iter()
            .map(|&rho| kt * (ln_max - rho.ln()))
            .collect();

        Ok(Self {
            rows: density.rows,
            cols: density.cols,
            values,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    /// Iterate over rows as slices (row index follows the y axis).
    pub fn row_slices(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.cols)
    }

    /// Smallest energy and its `(row, col)`.
    pub fn min(&self) -> Option<(f64, (usize, usize))> {
        let (index, &value) = self
            .values
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, &f64)>, (i, v)| match best {
                Some((_, b)) if *b <= *v => best,
                _ => Some((i, v)),
            })?;
        Some((value, (index / self.cols, index % self.cols)))
    }

    /// Largest finite energy, `None` if every cell is infinite.
    pub fn max_finite(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }

    /// Number of cells with `+∞` energy.
    pub fn infinite_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_infinite()).count()
    }

    /// Number of cells strictly above `ceiling`.
    pub fn count_above(&self, ceiling: f64) -> usize {
        self.values.iter().filter(|&&v| v > ceiling).count()
    }

    /// Elementwise `min(E, ceiling)`.
    ///
    /// Entries at or below `ceiling` are unchanged; everything above,
    /// including `+∞`, becomes `ceiling`.
    pub fn clipped(&self, ceiling: f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            values: self.values.iter().map(|&v| v.min(ceiling)).collect(),
        }
    }
}
