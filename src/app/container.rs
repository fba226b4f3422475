//! Dependency injection container for the landscape pipeline.
//!
//! The container owns the renderer and the run configuration, and wires the
//! load → estimate → render steps together.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::info;

use super::config::LandscapeConfig;
use crate::{
    Result,
    adapters::{HeatmapRenderer, SurfaceRenderer},
    landscape::Landscape,
    ports::LandscapeRenderer,
    samples::SampleSet,
};

/// Outcome of [`App::run`].
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Where the image was written
    pub output: PathBuf,
    pub landscape: Landscape,
}

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use gel::app::{App, LandscapeConfig};
/// use std::path::Path;
///
/// let app = App::heatmap(LandscapeConfig::square());
/// let report = app.run(Path::new("2Dproj_PC1_PC2.xvg"), None)?;
/// println!("{}", report.output.display());
/// # Ok::<(), gel::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use gel::adapters::RecordingRenderer;
/// use gel::app::{App, LandscapeConfig};
///
/// let app = App::for_testing()
///     .with_renderer(RecordingRenderer::new())
///     .with_config(LandscapeConfig::square().with_bins(20))
///     .build();
/// assert_eq!(app.renderer_name(), "recording");
/// ```
pub struct App {
    renderer: Arc<dyn LandscapeRenderer + Send + Sync>,
    config: LandscapeConfig,
}

impl App {
    /// Square heatmap with the given parameters.
    pub fn heatmap(config: LandscapeConfig) -> Self {
        Self {
            renderer: Arc::new(HeatmapRenderer::new(config.z_max)),
            config,
        }
    }

    /// Clipped 3-D surface with the given parameters.
    pub fn surface(config: LandscapeConfig) -> Self {
        Self {
            renderer: Arc::new(SurfaceRenderer::new(config.z_max)),
            config,
        }
    }

    /// Create a builder for constructing an app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn config(&self) -> &LandscapeConfig {
        &self.config
    }

    pub fn renderer(&self) -> Arc<dyn LandscapeRenderer + Send + Sync> {
        Arc::clone(&self.renderer)
    }

    pub fn renderer_name(&self) -> &str {
        self.renderer.name()
    }

    /// Read the two-column sample file.
    pub fn load_samples(&self, input: &Path) -> Result<SampleSet> {
        SampleSet::from_path(input)
    }

    /// Run the estimator configured for this app.
    pub fn estimate(&self, samples: &SampleSet) -> Result<Landscape> {
        self.config.estimator()?.estimate(samples)
    }

    /// Draw `landscape` to `output`, or to the renderer's default path for
    /// `input` when no output is given. Returns the path written.
    pub fn render(
        &self,
        landscape: &Landscape,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<PathBuf> {
        let path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.renderer.default_output(input));
        self.renderer.render(landscape, &path)?;
        Ok(path)
    }

    /// Load, estimate and render in one go.
    ///
    /// # Errors
    ///
    /// Propagates the first failure: malformed input, invalid parameters,
    /// degenerate samples, or a rendering error. Nothing is written unless
    /// estimation succeeds.
    pub fn run(&self, input: &Path, output: Option<&Path>) -> Result<RunReport> {
        self.config.validate()?;
        let samples = self.load_samples(input)?;
        let landscape = self.estimate(&samples)?;
        let output = self.render(&landscape, input, output)?;
        info!(
            renderer = self.renderer.name(),
            output = %output.display(),
            "landscape saved"
        );
        Ok(RunReport { output, landscape })
    }
}

/// Builder for constructing an app with custom dependencies.
///
/// Defaults to the square preset drawn by [`HeatmapRenderer`].
pub struct AppBuilder {
    renderer: Option<Arc<dyn LandscapeRenderer + Send + Sync>>,
    config: LandscapeConfig,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            renderer: None,
            config: LandscapeConfig::default(),
        }
    }

    pub fn with_renderer<R: LandscapeRenderer + Send + Sync + 'static>(
        mut self,
        renderer: R,
    ) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    pub fn with_config(mut self, config: LandscapeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> App {
        let z_max = self.config.z_max;
        App {
            renderer: self
                .renderer
                .unwrap_or_else(|| Arc::new(HeatmapRenderer::new(z_max))),
            config: self.config,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
