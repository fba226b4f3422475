//! CLI command implementations

pub mod export;
pub mod heatmap;
pub mod summary;
pub mod surface;

use std::path::Path;

use anyhow::{Context, Result};

use crate::{app::App, cli::output::create_spinner};

/// Shared body of the rendering commands: load, estimate behind a spinner,
/// render, then print the saved path.
pub(crate) fn render_with(app: &App, input: &Path, output: Option<&Path>) -> Result<()> {
    let samples = app
        .load_samples(input)
        .with_context(|| format!("Failed to read samples from {}", input.display()))?;

    let spinner = create_spinner(&format!(
        "Estimating landscape from {} samples...",
        samples.len()
    ));
    let landscape = app.estimate(&samples);
    spinner.finish_and_clear();
    let landscape = landscape.context("Failed to estimate free-energy landscape")?;

    let path = app
        .render(&landscape, input, output)
        .with_context(|| format!("Failed to render {} plot", app.renderer_name()))?;
    println!("Saved: {}", path.display());
    Ok(())
}
