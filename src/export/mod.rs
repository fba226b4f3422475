//! Export of computed landscapes for downstream analysis.
//!
//! Two flat formats are supported: a per-cell CSV table and a JSON document
//! holding the grid edges and the energy matrix.

mod grid_export;

pub use grid_export::{EnergyGridDocument, ExportFormat, export, write_csv, write_json};
