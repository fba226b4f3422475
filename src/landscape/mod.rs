//! Free-energy landscapes from two-dimensional samples
//!
//! ```text
//! SampleSet ──► GaussianKde ──► DensityField ──► EnergyField ──► (clip)
//!                   ▲                 ▲
//!                   └── Grid (bins) ──┘
//! ```

pub mod estimator;
pub mod field;
pub mod grid;
pub mod kde;

pub use estimator::{FreeEnergyEstimator, Landscape, estimate};
pub use field::{DensityField, EnergyField};
pub use grid::{Axis, Grid};
pub use kde::{BandwidthMethod, GaussianKde};
