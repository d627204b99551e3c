mod defaults;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::math::Axis;

/// Thresholds for classifying a point cluster as a wall.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WallDetectorConfig {
    /// KS-test strictness. Must lie in `(0, 1)`.
    #[serde(default = "defaults::significance_level")]
    pub significance_level: f64,

    /// Lower bound (inclusive) of the plane-to-ground angle, in degrees.
    #[serde(default = "defaults::min_angle_deg")]
    pub min_angle_deg: f64,

    /// Upper bound (inclusive) of the plane-to-ground angle, in degrees.
    #[serde(default = "defaults::max_angle_deg")]
    pub max_angle_deg: f64,

    /// Clusters with fewer points are never walls. `0` or `1` disables the check.
    #[serde(default = "defaults::min_cluster_size")]
    pub min_cluster_size: usize,

    /// Coordinate whose spread is tested for normality.
    #[serde(default = "defaults::vertical_axis")]
    pub vertical_axis: Axis,
}

impl Default for WallDetectorConfig {
    fn default() -> Self {
        Self {
            significance_level: defaults::significance_level(),
            min_angle_deg: defaults::min_angle_deg(),
            max_angle_deg: defaults::max_angle_deg(),
            min_cluster_size: defaults::min_cluster_size(),
            vertical_axis: defaults::vertical_axis(),
        }
    }
}

impl WallDetectorConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::from)?;
        Self::from_yaml(&contents)
    }

    /// Parse and validate from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or the values are invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml).map_err(ConfigError::from)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that every threshold is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "significance_level = {} is outside (0, 1)",
                self.significance_level
            ))
            .into());
        }
        if !self.min_angle_deg.is_finite() || !self.max_angle_deg.is_finite() {
            return Err(ConfigError::Invalid("angle bounds must be finite".into()).into());
        }
        if self.min_angle_deg > self.max_angle_deg {
            return Err(ConfigError::Invalid(format!(
                "min_angle_deg = {} exceeds max_angle_deg = {}",
                self.min_angle_deg, self.max_angle_deg
            ))
            .into());
        }
        Ok(())
    }

    /// `true` if `angle` (degrees) lies inside the inclusive wall window.
    #[must_use]
    pub fn angle_in_window(&self, angle: f64) -> bool {
        (self.min_angle_deg..=self.max_angle_deg).contains(&angle)
    }
}
