//! Landscape parameters, presets and validation.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, landscape::FreeEnergyEstimator};

/// Boltzmann constant in kJ mol⁻¹ K⁻¹
pub const KB_KJ_PER_MOL: f64 = 0.008314;

/// Parameters for one landscape run.
///
/// Every value is fixed for the duration of a run; presets mirror the two
/// classic renderings (square heatmap and clipped 3-D surface).
///
/// # Examples
///
/// ```
/// use gel::app::LandscapeConfig;
///
/// let config = LandscapeConfig::square()
///     .with_bins(80)
///     .with_temperature(310.0);
/// config.validate()?;
/// # Ok::<(), gel::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandscapeConfig {
    /// Temperature in K
    pub temperature: f64,
    /// Boltzmann constant, in the energy unit of the plot per K
    pub kb: f64,
    /// Grid cells per axis
    pub bins: usize,
    /// KDE bandwidth factor
    pub bandwidth: f64,
    /// Upper end of the colour scale / clipping ceiling
    pub z_max: f64,
    /// Clip energies to `z_max` before rendering
    pub clip: bool,
}

impl LandscapeConfig {
    /// Square pixel heatmap: 60 bins, unclipped, ceiling 10.1 kJ/mol.
    pub fn square() -> Self {
        Self {
            temperature: 300.0,
            kb: KB_KJ_PER_MOL,
            bins: 60,
            bandwidth: 0.15,
            z_max: 10.1,
            clip: false,
        }
    }

    /// 3-D surface: 100 bins, clipped to 10 kJ/mol.
    pub fn surface() -> Self {
        Self {
            temperature: 300.0,
            kb: KB_KJ_PER_MOL,
            bins: 100,
            bandwidth: 0.15,
            z_max: 10.0,
            clip: true,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_kb(mut self, kb: f64) -> Self {
        self.kb = kb;
        self
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_bandwidth(mut self, bandwidth: f64) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    pub fn with_z_max(mut self, z_max: f64) -> Self {
        self.z_max = z_max;
        self
    }

    pub fn with_clip(mut self, clip: bool) -> Self {
        self.clip = clip;
        self
    }

    /// Check every parameter range.
    pub fn validate(&self) -> Result<()> {
        self.estimator().map(|_| ())
    }

    /// Build the estimator described by this config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for any out-of-range value,
    /// including a non-positive `z_max` even when clipping is off.
    pub fn estimator(&self) -> Result<FreeEnergyEstimator> {
        if !(self.z_max > 0.0 && self.z_max.is_finite()) {
            return Err(Error::invalid_parameter(
                "z_max",
                self.z_max,
                "must be positive and finite",
            ));
        }
        let estimator =
            FreeEnergyEstimator::new(self.bins, self.bandwidth, self.temperature, self.kb)?;
        if self.clip {
            estimator.with_clip(self.z_max)
        } else {
            Ok(estimator)
        }
    }
}

impl Default for LandscapeConfig {
    fn default() -> Self {
        Self::square()
    }
}

/// A partial [`LandscapeConfig`]: every set field replaces the base value.
///
/// Used for config files layered over a preset and for command-line flags
/// layered over both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LandscapeOverrides {
    pub temperature: Option<f64>,
    pub kb: Option<f64>,
    pub bins: Option<usize>,
    pub bandwidth: Option<f64>,
    pub z_max: Option<f64>,
    pub clip: Option<bool>,
}

impl LandscapeOverrides {
    /// Read overrides from a JSON object.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read config {}", path.display()),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn apply(&self, base: LandscapeConfig) -> LandscapeConfig {
        LandscapeConfig {
            temperature: self.temperature.unwrap_or(base.temperature),
            kb: self.kb.unwrap_or(base.kb),
            bins: self.bins.unwrap_or(base.bins),
            bandwidth: self.bandwidth.unwrap_or(base.bandwidth),
            z_max: self.z_max.unwrap_or(base.z_max),
            clip: self.clip.unwrap_or(base.clip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_the_classic_renderings() {
        let square = LandscapeConfig::square();
        assert_eq!(square.bins, 60);
        assert_eq!(square.z_max, 10.1);
        assert!(!square.clip);

        let surface = LandscapeConfig::surface();
        assert_eq!(surface.bins, 100);
        assert_eq!(surface.z_max, 10.0);
        assert!(surface.clip);

        assert_eq!(LandscapeConfig::default(), square);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: LandscapeConfig =
            serde_json::from_str(r#"{ "temperature": 310.0, "bins": 40 }"#).unwrap();
        assert_eq!(config.temperature, 310.0);
        assert_eq!(config.bins, 40);
        assert_eq!(config.bandwidth, 0.15);
        assert_eq!(config.kb, KB_KJ_PER_MOL);
    }

    #[test]
    fn unknown_json_keys_are_rejected() {
        let result = serde_json::from_str::<LandscapeConfig>(r#"{ "tempreature": 310.0 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn overrides_replace_only_the_fields_they_set() {
        let overrides: LandscapeOverrides =
            serde_json::from_str(r#"{ "temperature": 310.0, "z_max": 12.0 }"#).unwrap();
        let config = overrides.apply(LandscapeConfig::surface());
        assert_eq!(config.temperature, 310.0);
        assert_eq!(config.z_max, 12.0);
        assert_eq!(config.bins, 100);
        assert!(config.clip);

        assert_eq!(
            LandscapeOverrides::default().apply(LandscapeConfig::square()),
            LandscapeConfig::square()
        );
    }

    #[test]
    fn config_file_is_layered_over_the_given_preset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, br#"{ "bins": 40 }"#).unwrap();

        let overrides = LandscapeOverrides::from_json_path(file.path()).unwrap();
        let config = overrides.apply(LandscapeConfig::surface());
        assert_eq!(config.bins, 40);
        assert_eq!(config.z_max, 10.0);
        assert!(config.clip);

        let missing = LandscapeOverrides::from_json_path(Path::new("no/such/params.json"));
        assert!(matches!(missing, Err(Error::Io { .. })));
    }

    #[test]
    fn validation_reports_the_offending_parameter() {
        let bad = LandscapeConfig::square().with_z_max(0.0);
        match bad.validate().unwrap_err() {
            Error::InvalidParameter { name, .. } => assert_eq!(name, "z_max"),
            other => panic!("unexpected error: {other}"),
        }

        let bad = LandscapeConfig::square().with_bins(0);
        assert!(matches!(
            bad.validate(),
            Err(Error::InvalidParameter { name: "bins", .. })
        ));
    }

    #[test]
    fn clip_flag_controls_the_estimator() {
        assert_eq!(
            LandscapeConfig::surface().estimator().unwrap(),
            FreeEnergyEstimator::new(100, 0.15, 300.0, KB_KJ_PER_MOL)
                .unwrap()
                .with_clip(10.0)
                .unwrap()
        );
    }
}
