//! Export command - write the energy grid as CSV or JSON

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::{
    app::{App, LandscapeConfig},
    cli::{config::ParamArgs, output::create_spinner},
    export::{self, ExportFormat},
};

#[derive(Parser, Debug)]
#[command(about = "Export the energy grid in various formats")]
pub struct ExportArgs {
    /// Two-column PC1/PC2 file (XVG or whitespace-delimited)
    pub input: PathBuf,

    /// Output file path
    #[arg(long, short = 'o')]
    pub output: PathBuf,

    /// Export format
    #[arg(long, short = 'f', value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    #[command(flatten)]
    pub params: ParamArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// One row per cell: x,y,density,energy
    Csv,
    /// Grid edges plus the energy matrix
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let config = args.params.resolve(LandscapeConfig::square())?;
    let z_max = config.z_max;
    let app = App::heatmap(config);

    let samples = app
        .load_samples(&args.input)
        .with_context(|| format!("Failed to read samples from {}", args.input.display()))?;
    let spinner = create_spinner("Estimating landscape...");
    let landscape = app.estimate(&samples);
    spinner.finish_and_clear();
    let landscape = landscape.context("Failed to estimate free-energy landscape")?;

    export::export(&landscape, z_max, args.format.into(), &args.output)
        .with_context(|| format!("Failed to export to {}", args.output.display()))?;
    println!("Saved: {}", args.output.display());
    Ok(())
}
