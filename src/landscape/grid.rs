//! Regular evaluation grid spanning the sample bounds.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, samples::SampleSet};

/// Bin edges and cell midpoints along one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    edges: Vec<f64>,
    midpoints: Vec<f64>,
}

impl Axis {
    /// `bins + 1` evenly spaced edges over `[min, max]`.
    ///
    /// The last edge is pinned to `max` so the grid covers the sample range
    /// exactly.
    pub fn linspace(min: f64, max: f64, bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(Error::invalid_parameter("bins", bins, "must be at least 1"));
        }
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(Error::degenerate(format!(
                "axis bounds [{min}, {max}] are not a finite interval"
            )));
        }

        let step = (max - min) / bins as f64;
        let mut edges: Vec<f64> = (0..=bins).map(|i| min + step * i as f64).collect();
        edges[bins] = max;

        let midpoints = edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();
        Ok(Self { edges, midpoints })
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn midpoints(&self) -> &[f64] {
        &self.midpoints
    }

    pub fn bins(&self) -> usize {
        self.midpoints.len()
    }

    /// `(first edge, last edge)`.
    pub fn bounds(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }
}

/// Two axes forming a `bins × bins` cell grid.
///
/// Cells are addressed `(row, col)` with rows following the y axis and
/// columns following the x axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    x: Axis,
    y: Axis,
}

impl Grid {
    pub fn new(x: Axis, y: Axis) -> Self {
        Self { x, y }
    }

    /// Grid spanning `[min, max]` of each sample column with `bins` cells
    /// per axis.
    pub fn spanning(samples: &SampleSet, bins: usize) -> Result<Self> {
        let empty = || Error::degenerate("cannot span a grid over an empty sample set");
        let (x_min, x_max) = samples.x_range().ok_or_else(empty)?;
        let (y_min, y_max) = samples.y_range().ok_or_else(empty)?;
        Ok(Self {
            x: Axis::linspace(x_min, x_max, bins)?,
            y: Axis::linspace(y_min, y_max, bins)?,
        })
    }

    pub fn x(&self) -> &Axis {
        &self.x
    }

    pub fn y(&self) -> &Axis {
        &self.y
    }

    pub fn rows(&self) -> usize {
        self.y.bins()
    }

    pub fn cols(&self) -> usize {
        self.x.bins()
    }

    /// Midpoint of cell `(row, col)` as `(x, y)`.
    pub fn cell_center(&self, row: usize, col: usize) -> (f64, f64) {
        (self.x.midpoints[col], self.y.midpoints[row])
    }

    /// All cell midpoints in row-major order.
    pub fn centers(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.y
            .midpoints
            .iter()
            .flat_map(move |&y| self.x.midpoints.iter().map(move |&x| (x, y)))
    }
}
