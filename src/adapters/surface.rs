//! 3-D surface renderer.
//!
//! Energies are clamped to `[0, z_max]` and drawn as a quad mesh over the cell
//! midpoints. The vertical axis and the palette are both locked to
//! `[0, z_max]` so surfaces from different runs compare directly.

use std::{
    cmp::Ordering,
    error::Error as StdError,
    path::{Path, PathBuf},
};

use plotters::{
    coord::Shift,
    prelude::*,
    style::{
        FontTransform,
        text_anchor::{HPos, Pos, VPos},
    },
};
use tracing::info;

use super::{colormap::ColorScale, heatmap::format_tick};
use crate::{Error, Result, landscape::Landscape, ports::LandscapeRenderer};

const COLORBAR_STEPS: i32 = 256;
const TICK_SPACING: f64 = 2.0;
/// Camera elevation in degrees
const ELEVATION: f64 = 28.0;
/// Camera azimuth in degrees
const AZIMUTH: f64 = -40.0;
const PANEL_LABEL: &str = "A";

/// Plotters-based surface renderer.
#[derive(Debug, Clone)]
pub struct SurfaceRenderer {
    z_max: f64,
    width: u32,
    height: u32,
}

impl SurfaceRenderer {
    pub fn new(z_max: f64) -> Self {
        Self {
            z_max,
            width: 1800,
            height: 1500,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    fn draw(&self, landscape: &Landscape, path: &Path) -> std::result::Result<(), Box<dyn StdError>> {
        let grid = &landscape.grid;
        let energy = &landscape.energy;
        if energy.rows() < 2 || energy.cols() < 2 {
            return Err(format!(
                "surface needs at least 2 bins per axis, got {}x{}",
                energy.rows(),
                energy.cols()
            )
            .into());
        }

        let scale = ColorScale::new(0.0, self.z_max);
        let px = |base: u32| base * self.height / 1500;
        let xs = grid.x().midpoints();
        let ys = grid.y().midpoints();
        let (x0, x1) = (xs[0], xs[xs.len() - 1]);
        let (y0, y1) = (ys[0], ys[ys.len() - 1]);
        let z_max = self.z_max;
        let height_at = |row: usize, col: usize| energy.get(row, col).clamp(0.0, z_max);

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;
        let (plot_area, bar_area) = root.split_horizontally(self.width * 17 / 20);

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(px(40))
            .build_cartesian_3d(x0..x1, 0.0..z_max, y0..y1)?;

        let (pitch, yaw) = (ELEVATION.to_radians(), AZIMUTH.to_radians());
        chart.with_projection(|mut pb| {
            pb.pitch = pitch;
            pb.yaw = yaw;
            pb.scale = 0.85;
            pb.into_matrix()
        });

        chart
            .configure_axes()
            .light_grid_style(BLACK.mix(0.15))
            .max_light_lines(3)
            .label_style(("sans-serif", px(22)))
            .draw()?;

        let quads = draw_order(energy.rows(), energy.cols(), yaw);
        chart.draw_series(quads.iter().map(|&(row, col)| {
            let corners = [
                (row, col),
                (row, col + 1),
                (row + 1, col + 1),
                (row + 1, col),
            ];
            let mean = corners.iter().map(|&(r, c)| height_at(r, c)).sum::<f64>() / 4.0;
            Polygon::new(
                corners
                    .iter()
                    .map(|&(r, c)| (xs[c], height_at(r, c), ys[r]))
                    .collect::<Vec<_>>(),
                scale.color(mean).filled(),
            )
        }))?;
        chart.draw_series(quads.iter().map(|&(row, col)| {
            let outline = [
                (row, col),
                (row, col + 1),
                (row + 1, col + 1),
                (row + 1, col),
                (row, col),
            ];
            PathElement::new(
                outline
                    .iter()
                    .map(|&(r, c)| (xs[c], height_at(r, c), ys[r]))
                    .collect::<Vec<_>>(),
                BLACK.mix(0.6).stroke_width(1),
            )
        }))?;

        let axis_font = TextStyle::from(("sans-serif", px(28)).into_font().style(FontStyle::Italic));
        chart.draw_series([
            Text::new("PC1", ((x0 + x1) / 2.0, 0.0, y0), axis_font.clone()),
            Text::new("PC2", (x1, 0.0, (y0 + y1) / 2.0), axis_font.clone()),
            Text::new("G (kJ mol⁻¹)", (x0, z_max, y0), axis_font),
        ])?;

        plot_area.draw(&Text::new(
            PANEL_LABEL,
            (px(30) as i32, px(20) as i32),
            ("sans-serif", px(48)).into_font(),
        ))?;

        self.draw_colorbar(&bar_area, &scale)?;
        root.present()?;
        Ok(())
    }

    /// Vertical bar spanning `[0, z_max]` with ticks every 2 units.
    fn draw_colorbar(
        &self,
        area: &DrawingArea<BitMapBackend<'_>, Shift>,
        scale: &ColorScale,
    ) -> std::result::Result<(), Box<dyn StdError>> {
        let (width, height) = area.dim_in_pixel();
        let (width, height) = (width as i32, height as i32);
        let left = width / 6;
        let right = left + width / 6;
        let top = height / 5;
        let bottom = height - height / 5;
        let span = bottom - top;

        for step in 0..COLORBAR_STEPS {
            let a = bottom - span * step / COLORBAR_STEPS;
            let b = bottom - span * (step + 1) / COLORBAR_STEPS;
            let t = (step as f64 + 0.5) / COLORBAR_STEPS as f64;
            let color = scale.color(scale.vmin + t * (scale.vmax - scale.vmin));
            area.draw(&Rectangle::new([(left, b), (right, a)], color.filled()))?;
        }
        area.draw(&Rectangle::new(
            [(left, top), (right, bottom)],
            BLACK.stroke_width(1),
        ))?;

        let tick_font = TextStyle::from(("sans-serif", 22 * self.height / 1500).into_font())
            .pos(Pos::new(HPos::Left, VPos::Center));
        for value in colorbar_ticks(scale.vmin, scale.vmax) {
            let t = (value - scale.vmin) / (scale.vmax - scale.vmin);
            let y = bottom - (t * span as f64).round() as i32;
            area.draw(&PathElement::new(
                vec![(right, y), (right + 6, y)],
                BLACK.stroke_width(1),
            ))?;
            area.draw(&Text::new(format_tick(value), (right + 10, y), tick_font.clone()))?;
        }

        let label_font = TextStyle::from(
            ("sans-serif", 26 * self.height / 1500)
                .into_font()
                .style(FontStyle::Bold),
        )
        .transform(FontTransform::Rotate270)
        .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Text::new(
            "ΔG (kJ mol⁻¹)",
            (right + width / 3, (top + bottom) / 2),
            label_font,
        ))?;
        Ok(())
    }
}

impl LandscapeRenderer for SurfaceRenderer {
    fn name(&self) -> &str {
        "surface"
    }

    fn render(&self, landscape: &Landscape, path: &Path) -> Result<()> {
        self.draw(landscape, path).map_err(|e| Error::Render {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        info!(path = %path.display(), "surface written");
        Ok(())
    }

    fn default_output(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "landscape".to_string());
        PathBuf::from(format!(
            "GEL_surface_3D_{stem}_clip{}.png",
            format_tick(self.z_max)
        ))
    }
}

/// Tick values `vmin, vmin + 2, ...` not exceeding `vmax`.
fn colorbar_ticks(vmin: f64, vmax: f64) -> Vec<f64> {
    (0..)
        .map(|i| vmin + TICK_SPACING * i as f64)
        .take_while(|&v| v <= vmax + 1e-9)
        .collect()
}

/// Quads `(row, col)` ordered far-to-near for the given yaw so nearer faces
/// are painted last.
fn draw_order(rows: usize, cols: usize, yaw: f64) -> Vec<(usize, usize)> {
    let (sin, cos) = yaw.sin_cos();
    let depth = |row: usize, col: usize| {
        let u = col as f64 / (cols - 1) as f64;
        let v = row as f64 / (rows - 1) as f64;
        u * sin + v * cos
    };

    let mut quads: Vec<(usize, usize)> = (0..rows - 1)
        .flat_map(|row| (0..cols - 1).map(move |col| (row, col)))
        .collect();
    quads.sort_by(|a, b| {
        depth(b.0, b.1)
            .partial_cmp(&depth(a.0, a.1))
            .unwrap_or(Ordering::Equal)
    });
    quads
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_is_derived_from_input_stem() {
        let renderer = SurfaceRenderer::new(10.0);
        assert_eq!(
            renderer.default_output(Path::new("data/2Dproj_PC1_PC2.xvg")),
            PathBuf::from("GEL_surface_3D_2Dproj_PC1_PC2_clip10.png")
        );
        let renderer = SurfaceRenderer::new(7.5);
        assert_eq!(
            renderer.default_output(Path::new("run.xvg")),
            PathBuf::from("GEL_surface_3D_run_clip7.5.png")
        );
    }

    #[test]
    fn ticks_every_two_units_up_to_ceiling() {
        assert_eq!(colorbar_ticks(0.0, 10.0), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(colorbar_ticks(0.0, 5.0), vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn draw_order_visits_every_quad_once() {
        let mut order = draw_order(4, 5, AZIMUTH.to_radians());
        assert_eq!(order.len(), 3 * 4);
        order.sort();
        order.dedup();
        assert_eq!(order.len(), 12);
    }
}
