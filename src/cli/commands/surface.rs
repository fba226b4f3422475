//! Surface command - clipped 3-D landscape

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::render_with;
use crate::{
    app::{App, LandscapeConfig},
    cli::config::ParamArgs,
};

#[derive(Parser, Debug)]
#[command(about = "Render a clipped 3-D free-energy surface")]
pub struct SurfaceArgs {
    /// Two-column PC1/PC2 file (XVG or whitespace-delimited)
    pub input: PathBuf,

    /// Output PNG (defaults to GEL_surface_3D_<stem>_clip<z_max>.png)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub params: ParamArgs,
}

pub fn execute(args: SurfaceArgs) -> Result<()> {
    let config = args.params.resolve(LandscapeConfig::surface())?;
    let app = App::surface(config);
    render_with(&app, &args.input, args.output.as_deref())
}
