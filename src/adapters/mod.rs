//! Adapters implementing domain ports.
//!
//! This module contains infrastructure implementations of the traits defined
//! in the ports module. Following hexagonal architecture, adapters depend on
//! domain ports, not the other way around.

pub mod colormap;
pub mod heatmap;
pub mod recording;
pub mod surface;

pub use colormap::ColorScale;
pub use heatmap::HeatmapRenderer;
pub use recording::{RecordingRenderer, RenderCall};
pub use surface::SurfaceRenderer;
