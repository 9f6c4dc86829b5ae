//! Error types for bead generation and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the bead pipeline.
#[derive(Debug, Error)]
pub enum BeadError {
  /// The image has no CPU-readable pixel data. Recoverable: supply a
  /// readable image and generate again.
  #[error("Cannot read image \"{name}\" - it has no CPU-side pixel data (check that it is loaded as readable)")]
  UnreadableImage { name: String },

  /// Failed to decode an image file.
  #[error("Failed to load image {}: {source}", path.display())]
  ImageLoad {
    path: PathBuf,
    #[source]
    source: ::image::ImageError,
  },

  /// Failed to read a configuration file.
  #[error("Failed to read config file {}: {source}", path.display())]
  ConfigRead {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Configuration file is not valid TOML for [`crate::BeadizerConfig`].
  #[error("Failed to parse config TOML: {0}")]
  ConfigParse(#[from] toml::de::Error),

  /// Configuration parsed but holds out-of-range values.
  #[error("Invalid config: {0}")]
  InvalidConfig(String),
}

impl BeadError {
  /// True for the recoverable "image not readable" condition.
  pub fn is_unreadable_image(&self) -> bool {
    matches!(self, BeadError::UnreadableImage { .. })
  }
}

pub type Result<T, E = BeadError> = std::result::Result<T, E>;
