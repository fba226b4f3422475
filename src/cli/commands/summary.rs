//! Summary command - sample statistics and landscape overview

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    app::{App, LandscapeConfig},
    cli::{
        config::ParamArgs,
        output::{create_spinner, format_percent, print_kv, print_section, print_subsection},
    },
};

#[derive(Parser, Debug)]
#[command(about = "Summarise samples and the resulting landscape")]
pub struct SummaryArgs {
    /// Two-column PC1/PC2 file (XVG or whitespace-delimited)
    pub input: PathBuf,

    /// Print the summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub params: ParamArgs,
}

pub fn execute(args: SummaryArgs) -> Result<()> {
    let config = args.params.resolve(LandscapeConfig::square())?;
    let app = App::heatmap(config.clone());

    let samples = app
        .load_samples(&args.input)
        .with_context(|| format!("Failed to read samples from {}", args.input.display()))?;
    let spinner = create_spinner("Estimating landscape...");
    let landscape = app.estimate(&samples);
    spinner.finish_and_clear();
    let landscape = landscape.context("Failed to estimate free-energy landscape")?;

    let stats = samples
        .summary()
        .context("Input contains no samples")?;
    let cells = landscape.energy.rows() * landscape.energy.cols();
    let above = landscape.energy.count_above(config.z_max);
    let minimum = landscape.minimum();

    if args.json {
        let report = serde_json::json!({
            "input": args.input.display().to_string(),
            "samples": stats,
            "config": config,
            "bandwidth_factor": landscape.bandwidth_factor,
            "cells": cells,
            "cells_above_z_max": above,
            "infinite_cells": landscape.energy.infinite_count(),
            "minimum": minimum.map(|(x, y, energy)| serde_json::json!({ "x": x, "y": y, "energy": energy })),
            "max_finite_energy": landscape.energy.max_finite(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_section(&format!("Landscape summary: {}", args.input.display()));

    print_subsection("Samples");
    print_kv("Count", &stats.count.to_string());
    print_kv("PC1 range", &format!("[{:.4}, {:.4}]", stats.x_min, stats.x_max));
    print_kv("PC2 range", &format!("[{:.4}, {:.4}]", stats.y_min, stats.y_max));
    print_kv("Mean", &format!("({:.4}, {:.4})", stats.x_mean, stats.y_mean));
    print_kv(
        "Std dev",
        &format!("({:.4}, {:.4})", stats.x_std, stats.y_std),
    );
    print_kv("Correlation", &format!("{:.4}", stats.correlation));

    print_subsection("Estimator");
    print_kv("Temperature", &format!("{} K", config.temperature));
    print_kv("kB", &format!("{} kJ/(mol K)", config.kb));
    print_kv("kT", &format!("{:.4} kJ/mol", landscape.kt()));
    print_kv("Bandwidth factor", &format!("{}", landscape.bandwidth_factor));
    print_kv("Grid", &format!("{0} x {0}", config.bins));

    print_subsection("Landscape");
    if let Some((x, y, energy)) = minimum {
        print_kv("Minimum", &format!("({x:.4}, {y:.4}) at {energy:.3} kJ/mol"));
    }
    if let Some(max) = landscape.energy.max_finite() {
        print_kv("Max finite energy", &format!("{max:.3} kJ/mol"));
    }
    print_kv(
        &format!("Cells > {}", config.z_max),
        &format!("{above} ({})", format_percent(above, cells)),
    );
    print_kv(
        "Infinite cells",
        &landscape.energy.infinite_count().to_string(),
    );
    Ok(())
}
