//! CSV and JSON writers for energy grids.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Error, Result, landscape::Landscape};

/// On-disk format for [`export`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

/// JSON view of a landscape. Infinite energies become `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyGridDocument {
    pub bins: usize,
    pub temperature: f64,
    pub kb: f64,
    /// Fitted bandwidth factor
    pub bandwidth: f64,
    pub z_max: f64,
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
    /// Row-major energies, one inner vector per y bin
    pub energy: Vec<Vec<Option<f64>>>,
}

impl EnergyGridDocument {
    pub fn new(landscape: &Landscape, z_max: f64) -> Self {
        Self {
            bins: landscape.grid.cols(),
            temperature: landscape.temperature,
            kb: landscape.kb,
            bandwidth: landscape.bandwidth_factor,
            z_max,
            x_edges: landscape.grid.x().edges().to_vec(),
            y_edges: landscape.grid.y().edges().to_vec(),
            energy: landscape
                .energy
                .row_slices()
                .map(|row| row.iter().map(|&e| e.is_finite().then_some(e)).collect())
                .collect(),
        }
    }
}

/// Write one `x,y,density,energy` row per cell, row-major.
pub fn write_csv<W: Write>(landscape: &Landscape, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["x", "y", "density", "energy"])?;

    let density = landscape.density.values();
    for (index, ((x, y), &energy)) in landscape
        .grid
        .centers()
        .zip(landscape.energy.values())
        .enumerate()
    {
        csv.write_record([
            x.to_string(),
            y.to_string(),
            density[index].to_string(),
            format_energy(energy),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

/// Pretty-printed [`EnergyGridDocument`].
pub fn write_json<W: Write>(landscape: &Landscape, z_max: f64, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &EnergyGridDocument::new(landscape, z_max))?;
    Ok(())
}

/// Write `landscape` to `path` in the given format.
pub fn export(landscape: &Landscape, z_max: f64, format: ExportFormat, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::Io {
        operation: format!("create {}", path.display()),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    match format {
        ExportFormat::Csv => write_csv(landscape, &mut writer)?,
        ExportFormat::Json => write_json(landscape, z_max, &mut writer)?,
    }
    writer.flush()?;
    info!(path = %path.display(), ?format, "landscape exported");
    Ok(())
}

fn format_energy(energy: f64) -> String {
    if energy == f64::INFINITY {
        "inf".to_string()
    } else {
        energy.to_string()
    }
}
