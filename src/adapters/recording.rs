//! Recording renderer for testing.
//!
//! This adapter implements [`LandscapeRenderer`] without touching the file
//! system. Every call is captured so tests can inspect what would have been
//! drawn and where.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Result, landscape::Landscape, ports::LandscapeRenderer};

/// One captured `render` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCall {
    pub path: PathBuf,
    pub rows: usize,
    pub cols: usize,
    pub min_energy: Option<f64>,
    pub max_finite_energy: Option<f64>,
    pub clip: Option<f64>,
}

/// Renderer that remembers what it was asked to draw.
///
/// # Examples
///
/// ```
/// use gel::adapters::RecordingRenderer;
///
/// let renderer = RecordingRenderer::new();
/// let shared = renderer.clone();
/// assert_eq!(shared.count(), 0);
/// ```
///
/// # Thread Safety
///
/// Clones share the same call log.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    calls: Arc<Mutex<Vec<RenderCall>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of render calls seen so far.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    pub fn calls(&self) -> Vec<RenderCall> {
        self.lock().clone()
    }

    pub fn last(&self) -> Option<RenderCall> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RenderCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LandscapeRenderer for RecordingRenderer {
    fn name(&self) -> &str {
        "recording"
    }

    fn render(&self, landscape: &Landscape, path: &Path) -> Result<()> {
        self.lock().push(RenderCall {
            path: path.to_path_buf(),
            rows: landscape.energy.rows(),
            cols: landscape.energy.cols(),
            min_energy: landscape.energy.min().map(|(value, _)| value),
            max_finite_energy: landscape.energy.max_finite(),
            clip: landscape.clip,
        });
        Ok(())
    }

    fn default_output(&self, input: &Path) -> PathBuf {
        input.with_extension("png")
    }
}
