//! Beadizer configuration.
//!
//! Everything a host may set before `generate()`: bead parameters plus the
//! auto-refresh and auto-camera switches. Loadable from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BeadError, Result};
use crate::refresher::BeadParams;

/// Runtime settings for a beadizer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeadizerConfig {
  /// Bead scale multiplier. Values ≤ 0 leave the current scale alone.
  pub bead_size: f32,
  /// Metallic surface factor, 0.0-1.0.
  pub bead_metallicness: f32,
  /// Surface smoothness, 0.0-1.0.
  pub bead_smoothness: f32,
  /// Re-apply bead parameters on every tick.
  pub auto_refresh: bool,
  /// Place the viewpoint over the grid after generating and refreshing.
  pub auto_position_camera: bool,
}

impl Default for BeadizerConfig {
  fn default() -> Self {
    Self {
      bead_size: 1.0,
      bead_metallicness: 0.0,
      bead_smoothness: 0.5,
      auto_refresh: false,
      auto_position_camera: true,
    }
  }
}

impl BeadizerConfig {
  /// Parse and validate a TOML document.
  pub fn from_toml_str(content: &str) -> Result<Self> {
    let config: BeadizerConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Load configuration from a TOML file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| BeadError::ConfigRead {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml_str(&content)
  }

  /// Reject non-finite values and surface factors outside [0, 1].
  pub fn validate(&self) -> Result<()> {
    if !self.bead_size.is_finite() {
      return Err(BeadError::InvalidConfig(format!(
        "bead_size must be finite, got {}",
        self.bead_size
      )));
    }
    for (name, value) in [
      ("bead_metallicness", self.bead_metallicness),
      ("bead_smoothness", self.bead_smoothness),
    ] {
      if !(0.0..=1.0).contains(&value) {
        return Err(BeadError::InvalidConfig(format!(
          "{name} must be within 0.0-1.0, got {value}"
        )));
      }
    }
    Ok(())
  }

  /// Parameters handed to the refresher.
  pub fn bead_params(&self) -> BeadParams {
    BeadParams {
      size: self.bead_size,
      metallicness: self.bead_metallicness,
      smoothness: self.bead_smoothness,
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
