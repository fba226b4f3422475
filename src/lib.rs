//! Gibbs free-energy landscapes from two-dimensional projections
//!
//! This crate provides:
//! - Parsing of two-column PC1/PC2 sample files (XVG or plain text)
//! - Gaussian kernel density estimation on a regular grid
//! - The free-energy transform `ΔG = -kB·T·ln(ρ/ρ_max)` with optional clipping
//! - Square heatmap and 3-D surface renderers, plus CSV/JSON export

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod export;
pub mod landscape;
pub mod ports;
pub mod samples;

pub use error::{Error, Result};
pub use landscape::{FreeEnergyEstimator, Landscape, estimate};
pub use samples::SampleSet;
