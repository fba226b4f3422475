//! Rendering port for free-energy landscapes.
//!
//! This module defines the trait boundary between the estimator and whatever
//! turns a [`Landscape`] into an image.

use std::path::{Path, PathBuf};

use crate::{Result, landscape::Landscape};

/// Port for drawing a landscape to a file.
///
/// # Examples
///
/// ```no_run
/// use gel::ports::LandscapeRenderer;
/// use gel::landscape::Landscape;
/// use std::path::Path;
///
/// fn save<R: LandscapeRenderer>(renderer: &R, landscape: &Landscape) -> gel::Result<()> {
///     renderer.render(landscape, Path::new("landscape.png"))
/// }
/// ```
pub trait LandscapeRenderer {
    /// Short name used in logs and CLI output.
    fn name(&self) -> &str;

    /// Draw `landscape` to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The landscape cannot be drawn in this style (e.g. too few cells)
    /// - The image cannot be encoded or written
    fn render(&self, landscape: &Landscape, path: &Path) -> Result<()>;

    /// Output file used when none is given, derived from the input file.
    fn default_output(&self, input: &Path) -> PathBuf;
}
