//! Landscape parameter flags shared across commands

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::app::{LandscapeConfig, LandscapeOverrides};

/// Parameter flags. Precedence, lowest first: the command's preset, the
/// `--config` file, then explicit flags.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Temperature in K
    #[arg(long, short = 't')]
    pub temperature: Option<f64>,

    /// Boltzmann constant in kJ mol⁻¹ K⁻¹
    #[arg(long)]
    pub kb: Option<f64>,

    /// Grid cells per axis
    #[arg(long, short = 'b')]
    pub bins: Option<usize>,

    /// KDE bandwidth factor
    #[arg(long)]
    pub bandwidth: Option<f64>,

    /// Colour scale ceiling in kJ/mol
    #[arg(long)]
    pub z_max: Option<f64>,

    /// JSON file with any subset of the parameters
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

impl ParamArgs {
    fn flag_overrides(&self) -> LandscapeOverrides {
        LandscapeOverrides {
            temperature: self.temperature,
            kb: self.kb,
            bins: self.bins,
            bandwidth: self.bandwidth,
            z_max: self.z_max,
            clip: None,
        }
    }

    /// Layer the config file and flags over `preset` and validate the result.
    pub fn resolve(&self, preset: LandscapeConfig) -> Result<LandscapeConfig> {
        let mut config = preset;
        if let Some(path) = &self.config {
            let file = LandscapeOverrides::from_json_path(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            config = file.apply(config);
        }
        let config = self.flag_overrides().apply(config);
        config.validate().context("Invalid landscape parameters")?;
        Ok(config)
    }
}
