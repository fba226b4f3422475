//! Square-pixel 2-D heatmap renderer.
//!
//! One filled rectangle per grid cell, jet colours over `[0, z_max]`, red for
//! anything hotter (unclipped infinities included), thin white lines on the
//! cell edges and a horizontal colour bar underneath.

use std::{
    error::Error as StdError,
    path::{Path, PathBuf},
};

use plotters::{
    coord::Shift,
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use tracing::info;

use super::colormap::ColorScale;
use crate::{Error, Result, landscape::Landscape, ports::LandscapeRenderer};

const DEFAULT_FILE_NAME: &str = "GEL_square_style.png";
const TITLE: &str = "Gibbs Energy Landscape";
const COLORBAR_STEPS: i32 = 256;

/// Plotters-based heatmap renderer.
#[derive(Debug, Clone)]
pub struct HeatmapRenderer {
    z_max: f64,
    size: u32,
}

impl HeatmapRenderer {
    pub fn new(z_max: f64) -> Self {
        Self {
            z_max,
            size: 1500,
        }
    }

    /// Edge length of the square image in pixels.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    fn draw(&self, landscape: &Landscape, path: &Path) -> std::result::Result<(), Box<dyn StdError>> {
        let scale = ColorScale::new(0.0, self.z_max);
        let font = |px: u32| ("sans-serif", px * self.size / 1500);

        let root = BitMapBackend::new(path, (self.size, self.size)).into_drawing_area();
        root.fill(&WHITE)?;
        let (plot_area, bar_area) = root.split_vertically(self.size * 17 / 20);

        let grid = &landscape.grid;
        let (x0, x1) = grid.x().bounds();
        let (y0, y1) = grid.y().bounds();
        let x_edges = grid.x().edges();
        let y_edges = grid.y().edges();

        let mut chart = ChartBuilder::on(&plot_area)
            .caption(TITLE, font(42))
            .margin(self.size / 40)
            .x_label_area_size(self.size / 20)
            .y_label_area_size(self.size / 14)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("PC1")
            .y_desc("PC2")
            .axis_desc_style(font(30))
            .label_style(font(24))
            .draw()?;

        chart.draw_series(landscape.energy.row_slices().enumerate().flat_map(
            move |(row, energies)| {
                energies.iter().enumerate().map(move |(col, &energy)| {
                    Rectangle::new(
                        [
                            (x_edges[col], y_edges[row]),
                            (x_edges[col + 1], y_edges[row + 1]),
                        ],
                        scale.color(energy).filled(),
                    )
                })
            },
        ))?;

        chart.draw_series(
            x_edges
                .iter()
                .map(|&x| PathElement::new(vec![(x, y0), (x, y1)], WHITE.stroke_width(1))),
        )?;
        chart.draw_series(
            y_edges
                .iter()
                .map(|&y| PathElement::new(vec![(x0, y), (x1, y)], WHITE.stroke_width(1))),
        )?;

        self.draw_colorbar(&bar_area, &scale)?;
        root.present()?;
        Ok(())
    }

    /// Horizontal bar with a triangular "over" extension and ticks at `0` and
    /// `z_max`.
    fn draw_colorbar(
        &self,
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        scale: &ColorScale,
    ) -> std::result::Result<(), Box<dyn StdError>> {
        let (width, height) = area.dim_in_pixel();
        let (width, height) = (width as i32, height as i32);
        let left = width / 8;
        let right = width - width / 8;
        let top = height / 8;
        let bottom = top + height / 5;
        let span = right - left;

        for step in 0..COLORBAR_STEPS {
            let a = left + span * step / COLORBAR_STEPS;
            let b = left + span * (step + 1) / COLORBAR_STEPS;
            let t = (step as f64 + 0.5) / COLORBAR_STEPS as f64;
            let color = scale.color(scale.vmin + t * (scale.vmax - scale.vmin));
            area.draw(&Rectangle::new([(a, top), (b, bottom)], color.filled()))?;
        }

        let tip = right + (bottom - top);
        area.draw(&Polygon::new(
            vec![(right, top), (tip, (top + bottom) / 2), (right, bottom)],
            scale.over.filled(),
        ))?;
        area.draw(&PathElement::new(
            vec![
                (right, top),
                (left, top),
                (left, bottom),
                (right, bottom),
                (tip, (top + bottom) / 2),
                (right, top),
            ],
            BLACK.stroke_width(1),
        ))?;

        let tick_px = 24 * self.size / 1500;
        let tick_style = TextStyle::from(("sans-serif", tick_px).into_font())
            .pos(Pos::new(HPos::Center, VPos::Top));
        for (value, x) in [(scale.vmin, left), (scale.vmax, right)] {
            area.draw(&PathElement::new(
                vec![(x, bottom), (x, bottom + 6)],
                BLACK.stroke_width(1),
            ))?;
            area.draw(&Text::new(
                format_tick(value),
                (x, bottom + 10),
                tick_style.clone(),
            ))?;
        }

        let label_px = 28 * self.size / 1500;
        area.draw(&Text::new(
            "G (kJ/mol)",
            ((left + right) / 2, bottom + height / 4),
            TextStyle::from(("sans-serif", label_px).into_font())
                .pos(Pos::new(HPos::Center, VPos::Top)),
        ))?;
        Ok(())
    }
}

impl LandscapeRenderer for HeatmapRenderer {
    fn name(&self) -> &str {
        "heatmap"
    }

    fn render(&self, landscape: &Landscape, path: &Path) -> Result<()> {
        self.draw(landscape, path).map_err(|e| Error::Render {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        info!(path = %path.display(), "heatmap written");
        Ok(())
    }

    fn default_output(&self, _input: &Path) -> PathBuf {
        PathBuf::from(DEFAULT_FILE_NAME)
    }
}

pub(crate) fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_is_fixed() {
        let renderer = HeatmapRenderer::new(10.1);
        assert_eq!(
            renderer.default_output(Path::new("runs/2Dproj_PC1_PC2.xvg")),
            PathBuf::from("GEL_square_style.png")
        );
    }

    #[test]
    fn ticks_drop_trailing_zero_fraction() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(10.0), "10");
        assert_eq!(format_tick(10.1), "10.1");
    }
}
