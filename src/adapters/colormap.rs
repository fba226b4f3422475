//! Jet colour map with an out-of-range colour.

use plotters::style::RGBColor;

/// `(position, value)` control points of the jet map, one table per channel.
const JET_RED: [(f64, f64); 5] = [(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)];
const JET_GREEN: [(f64, f64); 6] = [
    (0.0, 0.0),
    (0.125, 0.0),
    (0.375, 1.0),
    (0.64, 1.0),
    (0.91, 0.0),
    (1.0, 0.0),
];
const JET_BLUE: [(f64, f64); 5] = [(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)];

/// Colour used for values above the scale.
pub const OVER_RED: RGBColor = RGBColor(255, 0, 0);

/// Blue → cyan → yellow → red, `t` clamped to `[0, 1]`.
pub fn jet(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    RGBColor(
        channel(&JET_RED, t),
        channel(&JET_GREEN, t),
        channel(&JET_BLUE, t),
    )
}

fn channel(points: &[(f64, f64)], t: f64) -> u8 {
    let value = points
        .windows(2)
        .find(|w| t <= w[1].0)
        .map(|w| {
            let (t0, v0) = w[0];
            let (t1, v1) = w[1];
            v0 + (v1 - v0) * (t - t0) / (t1 - t0)
        })
        .unwrap_or(points[points.len() - 1].1);
    (value * 255.0).round() as u8
}

/// Maps energies on `[vmin, vmax]` to jet; anything above `vmax`, including
/// `+∞`, takes the over colour.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    pub vmin: f64,
    pub vmax: f64,
    pub over: RGBColor,
}

impl ColorScale {
    pub fn new(vmin: f64, vmax: f64) -> Self {
        Self {
            vmin,
            vmax,
            over: OVER_RED,
        }
    }

    pub fn color(&self, value: f64) -> RGBColor {
        if value > self.vmax || value.is_nan() {
            return self.over;
        }
        jet((value - self.vmin) / (self.vmax - self.vmin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jet_endpoints() {
        assert_eq!(jet(0.0), RGBColor(0, 0, 128));
        assert_eq!(jet(1.0), RGBColor(128, 0, 0));
        assert_eq!(jet(0.5).1, 255);
    }

    #[test]
    fn jet_clamps_out_of_range_input() {
        assert_eq!(jet(-3.0), jet(0.0));
        assert_eq!(jet(7.0), jet(1.0));
    }

    #[test]
    fn values_above_the_scale_use_the_over_colour() {
        let scale = ColorScale::new(0.0, 10.1);
        assert_eq!(scale.color(10.2), OVER_RED);
        assert_eq!(scale.color(f64::INFINITY), OVER_RED);
        assert_eq!(scale.color(10.1), jet(1.0));
        assert_eq!(scale.color(0.0), jet(0.0));
    }
}
