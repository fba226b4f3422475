//! gel CLI - free-energy landscapes from PC1/PC2 projections
//!
//! This CLI provides a unified interface for:
//! - Rendering square heatmaps and clipped 3-D surfaces
//! - Summarising samples and the resulting landscape
//! - Exporting the energy grid for further analysis

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gel")]
#[command(version, about = "Gibbs free-energy landscapes from 2-D projections", long_about = None)]
struct Cli {
    /// Log debug details (fitted bandwidth, grid bounds)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Square-pixel 2-D heatmap
    Heatmap(gel::cli::commands::heatmap::HeatmapArgs),

    /// Clipped 3-D surface
    Surface(gel::cli::commands::surface::SurfaceArgs),

    /// Sample statistics and landscape overview
    Summary(gel::cli::commands::summary::SummaryArgs),

    /// Export the energy grid as CSV or JSON
    Export(gel::cli::commands::export::ExportArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Heatmap(args) => gel::cli::commands::heatmap::execute(args),
        Commands::Surface(args) => gel::cli::commands::surface::execute(args),
        Commands::Summary(args) => gel::cli::commands::summary::execute(args),
        Commands::Export(args) => gel::cli::commands::export::execute(args),
    }
}
