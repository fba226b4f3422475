//! Heatmap command - square-pixel 2-D landscape

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::render_with;
use crate::{
    app::{App, LandscapeConfig},
    cli::config::ParamArgs,
};

#[derive(Parser, Debug)]
#[command(about = "Render a square-pixel free-energy heatmap")]
pub struct HeatmapArgs {
    /// Two-column PC1/PC2 file (XVG or whitespace-delimited)
    pub input: PathBuf,

    /// Output PNG (defaults to GEL_square_style.png)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub params: ParamArgs,
}

pub fn execute(args: HeatmapArgs) -> Result<()> {
    let config = args.params.resolve(LandscapeConfig::square())?;
    let app = App::heatmap(config);
    render_with(&app, &args.input, args.output.as_deref())
}
